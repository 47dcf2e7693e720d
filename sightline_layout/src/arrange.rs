// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stack and grid arrangement.

use alloc::vec::Vec;

use kurbo::{Insets, Point, Rect, Size};
use smallvec::SmallVec;

use crate::BoxConstraints;
use crate::geometry::{Axis, non_negative, non_negative_len, rect_from_origin_size};

/// How children are placed inside a container.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Left to right, like `HorizontalBox`.
    Horizontal,
    /// Top to bottom, like `VerticalBox`.
    #[default]
    Vertical,
    /// Row-major wrapping into equal-width tracks, like `GridBox`.
    Grid,
}

/// Result of [`arrange`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Arrangement {
    /// One rectangle per child, in child order, relative to the container origin.
    pub rects: Vec<Rect>,
    /// Size of the container including padding, clamped into the constraints.
    pub size: Size,
}

/// Arranges children of the given natural sizes.
///
/// - [`Direction::Horizontal`] / [`Direction::Vertical`] accumulate children along the
///   main axis. The cross size is the largest natural cross size, unless `constraints`
///   fix the cross axis; then every child stretches to the fixed inner extent.
/// - [`Direction::Grid`] wraps children into rows. The number of columns is how many
///   cells of the widest child fit in the available width. Each column is as wide as its
///   widest member and each row as tall as its tallest member; children fill their cell.
///
/// `spacing` is inserted only between consecutive children (or tracks). `padding` is an
/// outer inset around the bounding box of the children.
#[must_use]
pub fn arrange(
    children: &[Size],
    constraints: &BoxConstraints,
    direction: Direction,
    spacing: f64,
    padding: Insets,
) -> Arrangement {
    let spacing = non_negative_len(spacing);
    let padding = Insets::new(
        non_negative_len(padding.x0),
        non_negative_len(padding.y0),
        non_negative_len(padding.x1),
        non_negative_len(padding.y1),
    );
    let inner = constraints.deflate(padding);
    let (rects, content) = match direction {
        Direction::Horizontal => {
            arrange_stack(children, &inner, Axis::Horizontal, spacing, padding)
        }
        Direction::Vertical => arrange_stack(children, &inner, Axis::Vertical, spacing, padding),
        Direction::Grid => arrange_grid(children, &inner, spacing, padding),
    };
    let size = constraints.constrain(Size::new(
        content.width + padding.x_value(),
        content.height + padding.y_value(),
    ));
    Arrangement { rects, size }
}

/// Returns only the size [`arrange`] would produce.
#[must_use]
pub fn measure(
    children: &[Size],
    constraints: &BoxConstraints,
    direction: Direction,
    spacing: f64,
    padding: Insets,
) -> Size {
    arrange(children, constraints, direction, spacing, padding).size
}

/// Rectangle of one entry of a stacked strip.
///
/// The entry starts `offset` along `axis`, is `extent` long, and spans `cross_extent`
/// across the axis starting at zero. Virtualized lists use this to place a row without
/// arranging the rows before it.
#[must_use]
pub fn stack_slot_rect(axis: Axis, offset: f64, extent: f64, cross_extent: f64) -> Rect {
    rect_from_origin_size(
        axis.pack_point(offset, 0.0),
        axis.pack_size(extent, cross_extent),
    )
}

fn arrange_stack(
    children: &[Size],
    inner: &BoxConstraints,
    axis: Axis,
    spacing: f64,
    padding: Insets,
) -> (Vec<Rect>, Size) {
    let stretch = inner.fixed_len(axis.cross());
    let natural_cross = children
        .iter()
        .map(|child| axis.cross_len(non_negative(*child)))
        .fold(0.0_f64, f64::max);
    let cross = stretch.unwrap_or(natural_cross);

    let (main_start, cross_start) = match axis {
        Axis::Horizontal => (padding.x0, padding.y0),
        Axis::Vertical => (padding.y0, padding.x0),
    };

    let mut rects = Vec::with_capacity(children.len());
    let mut cursor = main_start;
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            cursor += spacing;
        }
        let child = non_negative(*child);
        let main = axis.main_len(child);
        let child_cross = stretch.unwrap_or_else(|| axis.cross_len(child));
        rects.push(rect_from_origin_size(
            axis.pack_point(cursor, cross_start),
            axis.pack_size(main, child_cross),
        ));
        cursor += main;
    }

    (rects, axis.pack_size(cursor - main_start, cross))
}

fn arrange_grid(
    children: &[Size],
    inner: &BoxConstraints,
    spacing: f64,
    padding: Insets,
) -> (Vec<Rect>, Size) {
    if children.is_empty() {
        return (Vec::new(), Size::ZERO);
    }
    let columns = grid_columns(children, inner.max.width, spacing);

    let mut col_widths: SmallVec<[f64; 8]> = SmallVec::from_elem(0.0, columns);
    let mut row_heights: SmallVec<[f64; 8]> = SmallVec::new();
    for (i, child) in children.iter().enumerate() {
        let child = non_negative(*child);
        let (row, col) = (i / columns, i % columns);
        if row == row_heights.len() {
            row_heights.push(0.0);
        }
        col_widths[col] = col_widths[col].max(child.width);
        row_heights[row] = row_heights[row].max(child.height);
    }

    let col_starts = track_starts(&col_widths, padding.x0, spacing);
    let row_starts = track_starts(&row_heights, padding.y0, spacing);
    let rects = (0..children.len())
        .map(|i| {
            let (row, col) = (i / columns, i % columns);
            rect_from_origin_size(
                Point::new(col_starts[col], row_starts[row]),
                Size::new(col_widths[col], row_heights[row]),
            )
        })
        .collect();

    let content = Size::new(
        track_total(&col_widths, spacing),
        track_total(&row_heights, spacing),
    );
    (rects, content)
}

/// Number of columns whose minimum cell (the widest child) fits into `available`.
fn grid_columns(children: &[Size], available: f64, spacing: f64) -> usize {
    let count = children.len();
    let cell = children
        .iter()
        .map(|child| non_negative(*child).width)
        .fold(0.0_f64, f64::max);
    let stride = cell + spacing;
    if !available.is_finite() || stride <= 0.0 {
        return count;
    }
    // `n` cells take `n * cell + (n - 1) * spacing`.
    let fit = (available + spacing) / stride;
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Non-negative and finite; truncation is the intended floor"
    )]
    let fit = fit as usize;
    fit.clamp(1, count)
}

fn track_starts(tracks: &[f64], start: f64, spacing: f64) -> SmallVec<[f64; 8]> {
    let mut cursor = start;
    tracks
        .iter()
        .map(|len| {
            let at = cursor;
            cursor += len + spacing;
            at
        })
        .collect()
}

fn track_total(tracks: &[f64], spacing: f64) -> f64 {
    let gaps = tracks.len().saturating_sub(1) as f64;
    tracks.iter().sum::<f64>() + gaps * spacing
}
