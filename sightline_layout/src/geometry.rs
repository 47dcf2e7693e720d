// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry value helpers.
//!
//! Kurbo's [`Rect`] normalizes negative sizes by swapping edges. Containers want the
//! opposite: a negative width or height is a degenerate, empty box anchored at its
//! origin. The constructors here clamp sizes to zero instead.

use kurbo::{Point, Rect, Size};

/// Clamps a scalar length to a finite, non-negative value.
///
/// `NaN` and negative values become `0.0`; positive infinity is preserved so that
/// unbounded constraints survive.
#[must_use]
pub fn non_negative_len(value: f64) -> f64 {
    if value > 0.0 { value } else { 0.0 }
}

/// Clamps both components of `size` with [`non_negative_len`].
#[must_use]
pub fn non_negative(size: Size) -> Size {
    Size::new(non_negative_len(size.width), non_negative_len(size.height))
}

/// Builds a rectangle from its origin and size, clamping the size to be non-negative.
#[must_use]
pub fn rect_from_origin_size(origin: Point, size: Size) -> Rect {
    let size = non_negative(size);
    Rect::new(
        origin.x,
        origin.y,
        origin.x + size.width,
        origin.y + size.height,
    )
}

/// Builds a rectangle from `x, y, width, height`, clamping the size to be non-negative.
#[must_use]
pub fn rect_from_xywh(x: f64, y: f64, width: f64, height: f64) -> Rect {
    rect_from_origin_size(Point::new(x, y), Size::new(width, height))
}

/// Returns `true` if the interiors of `a` and `b` overlap.
///
/// Rectangles that only touch along an edge do not intersect, and an empty rectangle
/// never intersects anything.
#[must_use]
pub fn intersects(a: Rect, b: Rect) -> bool {
    has_area(a) && has_area(b) && a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
}

fn has_area(r: Rect) -> bool {
    r.x0 < r.x1 && r.y0 < r.y1
}

/// A layout axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Axis {
    /// The X axis.
    Horizontal,
    /// The Y axis.
    #[default]
    Vertical,
}

impl Axis {
    /// Returns the other axis.
    #[must_use]
    pub const fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    /// Extent of `size` along this axis.
    #[must_use]
    pub fn main_len(self, size: Size) -> f64 {
        match self {
            Self::Horizontal => size.width,
            Self::Vertical => size.height,
        }
    }

    /// Extent of `size` across this axis.
    #[must_use]
    pub fn cross_len(self, size: Size) -> f64 {
        self.cross().main_len(size)
    }

    /// Coordinate of `point` along this axis.
    #[must_use]
    pub fn main_coord(self, point: Point) -> f64 {
        match self {
            Self::Horizontal => point.x,
            Self::Vertical => point.y,
        }
    }

    /// Start and end of `rect` along this axis.
    #[must_use]
    pub fn span(self, rect: Rect) -> (f64, f64) {
        match self {
            Self::Horizontal => (rect.x0, rect.x1),
            Self::Vertical => (rect.y0, rect.y1),
        }
    }

    /// Builds a size from main and cross extents.
    #[must_use]
    pub fn pack_size(self, main: f64, cross: f64) -> Size {
        match self {
            Self::Horizontal => Size::new(main, cross),
            Self::Vertical => Size::new(cross, main),
        }
    }

    /// Builds a point from main and cross coordinates.
    #[must_use]
    pub fn pack_point(self, main: f64, cross: f64) -> Point {
        match self {
            Self::Horizontal => Point::new(main, cross),
            Self::Vertical => Point::new(cross, main),
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size};

    use super::{Axis, intersects, non_negative, rect_from_xywh};

    #[test]
    fn negative_sizes_clamp_instead_of_flipping() {
        let r = rect_from_xywh(10.0, 20.0, -5.0, 4.0);
        assert_eq!(r, Rect::new(10.0, 20.0, 10.0, 24.0));
        assert_eq!(r.width(), 0.0);

        let s = non_negative(Size::new(f64::NAN, f64::INFINITY));
        assert_eq!(s.width, 0.0);
        assert!(s.height.is_infinite());
    }

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!intersects(a, Rect::new(10.0, 0.0, 20.0, 10.0)));
        assert!(intersects(a, Rect::new(9.5, 0.0, 20.0, 10.0)));
        assert!(!intersects(a, Rect::new(5.0, 5.0, 5.0, 5.0)));
        assert!(!intersects(a, Rect::new(2.0, 5.0, 8.0, 5.0)));
        let collapsed = Rect::new(0.0, 60.0, 200.0, 60.0);
        assert!(!intersects(collapsed, Rect::new(0.0, 40.0, 50.0, 80.0)));
    }

    #[test]
    fn axis_packing_is_symmetric() {
        let size = Axis::Horizontal.pack_size(3.0, 4.0);
        assert_eq!(size, Size::new(3.0, 4.0));
        assert_eq!(Axis::Vertical.pack_size(3.0, 4.0), Size::new(4.0, 3.0));
        assert_eq!(Axis::Vertical.main_len(size), 4.0);
        assert_eq!(Axis::Vertical.cross_len(size), 3.0);
        assert_eq!(Axis::Horizontal.pack_point(1.0, 2.0), Point::new(1.0, 2.0));
        assert_eq!(
            Axis::Vertical.span(Rect::new(0.0, 5.0, 1.0, 9.0)),
            (5.0, 9.0)
        );
    }
}
