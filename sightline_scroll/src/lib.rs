// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=sightline_scroll --heading-base-level=0

//! Sightline Scroll: scrollable containers built from the Sightline cores.
//!
//! Three containers share one scroll-step discipline:
//!
//! - [`ScrollView`]: a window onto content whose size the caller supplies, or onto a box
//!   of children arranged by `sightline_layout`.
//! - [`ListView`]: a vertical list that materializes only the rows it shows, tracking a
//!   [`Model`](sightline_model::Model) through a subscription. [`FixedListView`] and
//!   [`VariableListView`] pick the row geometry.
//! - [`StandardListView`]: a list of text rows that owns its items and draws itself.
//!
//! Every scroll, resize or model sync runs as one step: the container enters
//! [`ScrollPhase::ScrollPending`], clamps the scroll offset, recomputes the visible rows
//! and applies the scroll requests queued on its [`ScrollRequests`] handle, coalesced to
//! the latest target, before going back to [`ScrollPhase::Idle`].
//!
//! Style names are resolved once through a [`StyleCatalog`] into a [`StyleContext`],
//! whose metrics build a [`ListViewConfig`] or [`BoxConfig`]. Drawing goes through the
//! [`Widget`] trait into a backend-agnostic [`DrawList`].
//!
//! ## Minimal example
//!
//! ```rust
//! use sightline_model::VecModel;
//! use sightline_scroll::{ListView, ListViewConfig};
//!
//! let mut model: VecModel<u32> = (0..1000).collect();
//! let config = ListViewConfig {
//!     row_height: 30.0,
//!     ..ListViewConfig::default()
//! };
//! let mut list = ListView::fixed(&model, config).unwrap();
//!
//! let changes = list.set_visible_size(200.0, 150.0);
//! assert_eq!(changes.created_indices(), [0, 1, 2, 3, 4]);
//!
//! let changes = list.scroll_to(0.0, 300.0);
//! assert_eq!(changes.created_indices(), [10, 11, 12, 13, 14]);
//!
//! // Model edits are pulled in explicitly; the rows below the insert move down.
//! model.insert(0, 7).unwrap();
//! let changes = list.sync(&model).unwrap();
//! assert_eq!(changes.created_indices(), [10]);
//! assert_eq!(changes.destroyed_indices(), [15]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`. Its types are `!Send`: containers and their
//! request handles belong to one UI thread.

#![no_std]

extern crate alloc;

mod config;
mod draw;
mod error;
mod list_view;
mod requests;
mod scroll_view;
mod standard_list_view;
mod style;

pub use config::{BoxConfig, ListViewConfig};
pub use draw::{DrawCommand, DrawList, Widget};
pub use error::ScrollError;
pub use list_view::{
    FixedListView, ListView, ListViewDebugInfo, LiveItem, MAX_SETTLE_PASSES, SlotObserver,
    VariableListView,
};
pub use requests::{ScrollPhase, ScrollRequest, ScrollRequests};
pub use scroll_view::{SCROLLBAR_THICKNESS, ScrollView};
pub use standard_list_view::{StandardListView, StandardListViewItem};
pub use style::{Palette, StyleCatalog, StyleCatalogBuilder, StyleContext, StyleMetrics};
