// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sightline Model: observable, indexable item collections.
//!
//! This crate provides the data side of a virtualized list: an ordered sequence of
//! rows that can be mutated by the application and observed by any number of
//! consumers (typically a `ListView` from `sightline_scroll`).
//!
//! The core concepts are:
//!
//! - [`Model`]: a trait describing an ordered, indexable collection of rows that owns a
//!   [`ModelNotify`] to announce changes.
//! - [`ModelEvent`]: a single change (insert, remove, update, or reset) expressed in
//!   terms of row indices.
//! - [`ModelNotify`] / [`ModelSubscription`]: a fan-out of change events. Each
//!   subscription owns a private queue; consumers drain it at a time of their choosing.
//! - [`VecModel`]: a `Vec`-backed model implementing the trait.
//!
//! Consumers hold a [`ModelSubscription`] and borrow the model only while they read it.
//! The model never holds a strong reference to its consumers: dropping a subscription
//! detaches it.
//!
//! ## Minimal example
//!
//! ```rust
//! use sightline_model::{Model, ModelEvent, VecModel};
//!
//! let mut model = VecModel::from(vec!["a", "b"]);
//! let subscription = model.subscribe();
//!
//! model.push("c");
//! model.remove(0).unwrap();
//!
//! let events: Vec<_> = subscription.drain().collect();
//! assert_eq!(
//!     events,
//!     [
//!         ModelEvent::Inserted { index: 2, count: 1 },
//!         ModelEvent::Removed { index: 0, count: 1 },
//!     ]
//! );
//! assert_eq!(model.row_count(), 2);
//! ```
//!
//! Mutations that reference an index outside the model are rejected with
//! [`ModelError::IndexOutOfRange`]; no event is emitted and the rows are left untouched.
//!
//! This crate is `no_std` and uses `alloc`. Its types are `!Send`: a model and its
//! subscriptions live on the thread that drives the UI.

#![no_std]

extern crate alloc;

mod event;
mod notify;
mod vec_model;

pub use event::{ModelError, ModelEvent};
pub use notify::{ModelNotify, ModelSubscription};
pub use vec_model::VecModel;

/// An ordered, indexable collection of rows with change notifications.
///
/// Implementations must call [`ModelNotify::notify`] for every mutation, after the
/// mutation has been applied, so that subscribers observe events in the same order as
/// the changes happened.
pub trait Model {
    /// Row data type.
    type Data;

    /// Returns the number of rows.
    fn row_count(&self) -> usize;

    /// Returns the data of `row`, or `None` if `row` is out of range.
    fn row_data(&self, row: usize) -> Option<&Self::Data>;

    /// Returns the change notifier of this model.
    fn notify(&self) -> &ModelNotify;

    /// Returns `true` if the model has no rows.
    fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Creates a new subscription to this model's change events.
    ///
    /// The subscription only observes changes made after this call.
    fn subscribe(&self) -> ModelSubscription {
        self.notify().subscribe()
    }
}
