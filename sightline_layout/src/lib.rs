// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=sightline_layout --heading-base-level=0

//! Sightline Layout: geometry helpers and a small arrangement engine.
//!
//! This crate computes the natural size and the arranged position of a sequence of
//! children inside a container. It backs the box containers (`HorizontalBox`,
//! `VerticalBox`, `GridBox`) and produces the per-row rectangles of virtualized lists.
//!
//! - [`geometry`]: Kurbo-based value helpers that uphold the non-negative size invariant,
//!   plus the [`Axis`] abstraction shared with the virtualizer.
//! - [`BoxConstraints`]: minimum/maximum size a container may take.
//! - [`arrange`]: stacks children horizontally or vertically, or wraps them into a grid.
//!
//! ## Not a widget toolkit
//!
//! Children are plain [`Size`]s: measuring text or styling widgets happens upstream.
//! [`arrange`] is a pure function; identical inputs always produce identical output.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Insets, Rect, Size};
//! use sightline_layout::{BoxConstraints, Direction, arrange};
//!
//! let children = [Size::new(40.0, 10.0), Size::new(60.0, 20.0)];
//! let arranged = arrange(
//!     &children,
//!     &BoxConstraints::unbounded(),
//!     Direction::Vertical,
//!     5.0,
//!     Insets::uniform(2.0),
//! );
//!
//! assert_eq!(arranged.rects[0], Rect::new(2.0, 2.0, 42.0, 12.0));
//! assert_eq!(arranged.rects[1], Rect::new(2.0, 17.0, 62.0, 37.0));
//! assert_eq!(arranged.size, Size::new(64.0, 39.0));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod arrange;
mod constraints;
pub mod geometry;

pub use arrange::{Arrangement, Direction, arrange, measure, stack_slot_rect};
pub use constraints::BoxConstraints;
pub use geometry::Axis;

pub use kurbo::{Insets, Point, Rect, Size, Vec2};
