// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=sightline_viewport --heading-base-level=0

//! Sightline Viewport: scroll state for a visible window onto larger content.
//!
//! This crate provides a small, headless model of a scrollable surface:
//! - Content (virtual) extent and visible extent.
//! - A scroll offset that always stays within `[0, max(0, content - visible)]` per axis.
//! - Coordinate conversion between content space and viewport space.
//! - Scroll-into-view helpers.
//!
//! It does **not** own any items or rendering backend. Callers are expected to:
//! - Feed the content extent (for example, the total extent of a virtualized list).
//! - Forward raw scroll deltas and resize notifications from their input layer.
//! - Use [`ScrollViewport::visible_content_rect`] to decide what to materialize.
//!
//! Every mutating method returns `true` when the visible content window changed, which
//! is the signal hosts use to recompute their visible set.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use sightline_viewport::ScrollViewport;
//!
//! // A 200x150 window onto 200x1000 of content.
//! let mut view = ScrollViewport::new(Size::new(200.0, 150.0), Size::new(200.0, 1000.0));
//!
//! assert!(view.scroll_by(0.0, 300.0));
//! assert_eq!(view.visible_content_rect(), Rect::new(0.0, 300.0, 200.0, 450.0));
//!
//! // Requests beyond the end clamp silently.
//! view.scroll_to(0.0, 5_000.0);
//! assert_eq!(view.state().scroll_y, 850.0);
//!
//! // Convert a pointer position into content space for hit testing.
//! let content_pt = view.viewport_to_content(Point::new(10.0, 20.0));
//! assert_eq!(content_pt, Point::new(10.0, 870.0));
//! ```
//!
//! ## Degenerate sizes
//!
//! Zero or negative visible sizes are accepted and stored as zero: the visible window is
//! then empty, which is a valid state rather than an error.
//!
//! This crate is `no_std`.

#![no_std]

mod viewport;

pub use viewport::{ScrollAlign, ScrollViewport, ScrollViewportDebugInfo, ViewportState};
