// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=sightline_virtual_list --heading-base-level=0

//! Sightline Virtual List: materialize only the items a viewport can see.
//!
//! This crate provides a small, renderer-agnostic core for virtualizing a dense strip
//! of items indexed `0..len`:
//!
//! - [`ExtentModel`]: a trait describing a 1D strip of items with per-item extents, a
//!   fixed spacing between them, and prefix-sum-style queries.
//!   [`FixedExtentModel`] answers in `O(1)`; [`PrefixSumExtentModel`] keeps measured
//!   extents in a Fenwick tree.
//! - [`SlotArena`]: a free-list pool of [`ItemSlot`]s addressed by generational
//!   [`SlotId`]s, so released slots are rebound instead of reallocated.
//! - [`Virtualizer`]: owns an extent model and the live slots, and turns visible-rect
//!   changes and structural edits (insert, remove, update, reset) into [`SlotChanges`].
//!
//! This crate does **not** own data, widgets, or scroll state. Host containers are
//! responsible for:
//!
//! - Clamping the scroll offset and passing the visible content rect to
//!   [`Virtualizer::recompute`].
//! - Forwarding model edits with per-item extents from an [`ExtentSource`].
//! - Applying the returned [`SlotChanges`] to their element tree.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Rect;
//! use sightline_virtual_list::{PrefixSumExtentModel, Virtualizer};
//!
//! // Rows of alternating heights, 4px apart.
//! let heights = (0..100).map(|i| if i % 2 == 0 { 20.0 } else { 40.0 });
//! let model = PrefixSumExtentModel::from_extents(heights, 4.0).unwrap();
//! let mut list = Virtualizer::new(model).with_overscan(20.0);
//! list.set_cross_extent(320.0);
//!
//! let changes = list.recompute(Rect::new(0.0, 0.0, 320.0, 100.0));
//! assert!(!changes.to_create.is_empty());
//!
//! // Append two rows; nothing visible moves.
//! let changes = list.insert(100, 2, &mut |_: usize| 20.0).unwrap();
//! assert!(changes.to_reposition.is_empty());
//! ```
//!
//! All extents and offsets live in one 1D coordinate space (typically logical pixels)
//! and must be finite and non-negative; anything else is rejected with
//! [`VirtualListError::InvalidExtent`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod fixed;
mod model;
mod prefix_sum;
mod slot;
mod virtualizer;

pub use error::VirtualListError;
pub use fixed::FixedExtentModel;
pub use model::{ExtentModel, ExtentSource};
pub use prefix_sum::PrefixSumExtentModel;
pub use slot::{ItemSlot, SlotArena, SlotFlags, SlotId};
pub use virtualizer::{SlotChange, SlotChanges, Virtualizer, VirtualizerDebugInfo, VisibleRange};
