// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size, Vec2};
use sightline_layout::Axis;
use sightline_layout::geometry::{non_negative, rect_from_origin_size};

/// Plain snapshot of a scrollable surface.
///
/// Invariant (maintained by [`ScrollViewport`]): each scroll offset lies in
/// `[0, max(0, content - visible)]` on its axis, and all sizes are non-negative.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ViewportState {
    /// Width of the scrollable content.
    pub content_width: f64,
    /// Height of the scrollable content.
    pub content_height: f64,
    /// Horizontal scroll offset into the content.
    pub scroll_x: f64,
    /// Vertical scroll offset into the content.
    pub scroll_y: f64,
    /// Width of the visible window.
    pub visible_width: f64,
    /// Height of the visible window.
    pub visible_height: f64,
}

impl ViewportState {
    /// Largest valid scroll offset on each axis.
    #[must_use]
    pub fn max_scroll(&self) -> Vec2 {
        Vec2::new(
            (self.content_width - self.visible_width).max(0.0),
            (self.content_height - self.visible_height).max(0.0),
        )
    }

    /// The visible window expressed in content coordinates.
    #[must_use]
    pub fn visible_content_rect(&self) -> Rect {
        rect_from_origin_size(
            Point::new(self.scroll_x, self.scroll_y),
            Size::new(self.visible_width, self.visible_height),
        )
    }
}

/// Where a target should land inside the viewport when scrolling to it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum ScrollAlign {
    /// Align the target's start with the viewport start.
    Start,
    /// Center the target in the viewport.
    Center,
    /// Align the target's end with the viewport end.
    End,
    /// Scroll the minimal distance that makes the target visible; do nothing if it
    /// already is. Targets larger than the viewport are aligned to the start.
    #[default]
    Nearest,
}

/// Scroll state for a visible window onto larger content.
///
/// `ScrollViewport` owns a [`ViewportState`] and keeps its invariant under every
/// mutation: scroll targets are clamped independently per axis, and content or visible
/// size changes re-clamp the current offset.
#[derive(Clone, Debug, Default)]
pub struct ScrollViewport {
    state: ViewportState,
}

impl ScrollViewport {
    /// Creates a viewport scrolled to the origin.
    #[must_use]
    pub fn new(visible: Size, content: Size) -> Self {
        let visible = non_negative(visible);
        let content = non_negative(content);
        Self {
            state: ViewportState {
                content_width: content.width,
                content_height: content.height,
                scroll_x: 0.0,
                scroll_y: 0.0,
                visible_width: visible.width,
                visible_height: visible.height,
            },
        }
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn state(&self) -> ViewportState {
        self.state
    }

    /// Size of the visible window.
    #[must_use]
    pub fn visible_size(&self) -> Size {
        Size::new(self.state.visible_width, self.state.visible_height)
    }

    /// Size of the scrollable content.
    #[must_use]
    pub fn content_size(&self) -> Size {
        Size::new(self.state.content_width, self.state.content_height)
    }

    /// Current scroll offset.
    #[must_use]
    pub fn scroll_offset(&self) -> Vec2 {
        Vec2::new(self.state.scroll_x, self.state.scroll_y)
    }

    /// Largest valid scroll offset on each axis.
    #[must_use]
    pub fn max_scroll(&self) -> Vec2 {
        self.state.max_scroll()
    }

    /// The visible window in content coordinates.
    #[must_use]
    pub fn visible_content_rect(&self) -> Rect {
        self.state.visible_content_rect()
    }

    /// Sets the size of the visible window and re-clamps the scroll offset.
    ///
    /// Negative sizes are stored as zero. Returns `true` if the visible content window
    /// changed.
    pub fn set_visible_size(&mut self, width: f64, height: f64) -> bool {
        let size = non_negative(Size::new(width, height));
        self.update(|state| {
            state.visible_width = size.width;
            state.visible_height = size.height;
        })
    }

    /// Sets the size of the scrollable content and re-clamps the scroll offset.
    ///
    /// Returns `true` if the visible content window changed, which happens when the
    /// content shrinks under the current offset.
    pub fn set_content_size(&mut self, width: f64, height: f64) -> bool {
        let size = non_negative(Size::new(width, height));
        self.update(|state| {
            state.content_width = size.width;
            state.content_height = size.height;
        })
    }

    /// Scrolls to an absolute offset, clamped per axis.
    ///
    /// Non-finite components leave that axis unchanged. Returns `true` if the visible
    /// content window changed.
    pub fn scroll_to(&mut self, x: f64, y: f64) -> bool {
        self.update(|state| {
            if x.is_finite() {
                state.scroll_x = x;
            }
            if y.is_finite() {
                state.scroll_y = y;
            }
        })
    }

    /// Scrolls by a delta, clamped per axis.
    pub fn scroll_by(&mut self, dx: f64, dy: f64) -> bool {
        let (x, y) = (self.state.scroll_x + dx, self.state.scroll_y + dy);
        self.scroll_to(x, y)
    }

    /// Converts a content-space point into viewport space.
    #[must_use]
    pub fn content_to_viewport(&self, point: Point) -> Point {
        point - self.scroll_offset()
    }

    /// Converts a viewport-space point into content space.
    #[must_use]
    pub fn viewport_to_content(&self, point: Point) -> Point {
        point + self.scroll_offset()
    }

    /// Converts a content-space rectangle into viewport space.
    #[must_use]
    pub fn content_to_viewport_rect(&self, rect: Rect) -> Rect {
        rect - self.scroll_offset()
    }

    /// Converts a viewport-space rectangle into content space.
    #[must_use]
    pub fn viewport_to_content_rect(&self, rect: Rect) -> Rect {
        rect + self.scroll_offset()
    }

    /// Scrolls the minimal distance that makes `rect` (content space) visible.
    pub fn ensure_visible(&mut self, rect: Rect) -> bool {
        self.scroll_align(rect, ScrollAlign::Nearest)
    }

    /// Scrolls so that `rect` (content space) lands at `align` on both axes.
    pub fn scroll_align(&mut self, rect: Rect, align: ScrollAlign) -> bool {
        let x = self.aligned_offset(Axis::Horizontal, rect, align);
        let y = self.aligned_offset(Axis::Vertical, rect, align);
        self.scroll_to(x, y)
    }

    /// Scrolls along a single axis so that `rect` lands at `align`; the other axis keeps
    /// its offset.
    pub fn scroll_align_axis(&mut self, axis: Axis, rect: Rect, align: ScrollAlign) -> bool {
        let target = self.aligned_offset(axis, rect, align);
        match axis {
            Axis::Horizontal => self.scroll_to(target, self.state.scroll_y),
            Axis::Vertical => self.scroll_to(self.state.scroll_x, target),
        }
    }

    /// Snapshot of the current viewport state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ScrollViewportDebugInfo {
        ScrollViewportDebugInfo {
            state: self.state,
            max_scroll: self.max_scroll(),
            visible_content_rect: self.visible_content_rect(),
            content_fits: self.max_scroll() == Vec2::ZERO,
        }
    }

    fn aligned_offset(&self, axis: Axis, rect: Rect, align: ScrollAlign) -> f64 {
        let (start, end) = axis.span(rect);
        let visible = axis.main_len(self.visible_size());
        let current = axis.main_coord(self.scroll_offset().to_point());
        match align {
            ScrollAlign::Start => start,
            ScrollAlign::End => end - visible,
            ScrollAlign::Center => (start + end - visible) * 0.5,
            ScrollAlign::Nearest => {
                if start < current || end - start > visible {
                    start
                } else if end > current + visible {
                    end - visible
                } else {
                    current
                }
            }
        }
    }

    fn update(&mut self, mutate: impl FnOnce(&mut ViewportState)) -> bool {
        let before = self.state.visible_content_rect();
        mutate(&mut self.state);
        self.clamp_scroll();
        let after = self.state.visible_content_rect();
        let changed = before != after;
        if changed {
            log::trace!("viewport window {before:?} -> {after:?}");
        }
        changed
    }

    fn clamp_scroll(&mut self) {
        let max = self.state.max_scroll();
        // `max` is finite and non-negative, so `clamp` cannot panic.
        self.state.scroll_x = self.state.scroll_x.clamp(0.0, max.x);
        self.state.scroll_y = self.state.scroll_y.clamp(0.0, max.y);
    }
}

/// Debug snapshot of a [`ScrollViewport`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollViewportDebugInfo {
    /// The raw state.
    pub state: ViewportState,
    /// Largest valid scroll offset on each axis.
    pub max_scroll: Vec2,
    /// The visible window in content coordinates.
    pub visible_content_rect: Rect,
    /// `true` when the content fits entirely and no scrolling is possible.
    pub content_fits: bool,
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size, Vec2};
    use sightline_layout::Axis;

    use super::{ScrollAlign, ScrollViewport};

    fn list_view() -> ScrollViewport {
        ScrollViewport::new(Size::new(100.0, 150.0), Size::new(100.0, 30_000.0))
    }

    #[test]
    fn scroll_clamps_each_axis_independently() {
        let mut vp = ScrollViewport::new(Size::new(100.0, 100.0), Size::new(300.0, 150.0));
        assert!(vp.scroll_to(-20.0, 1_000.0));
        assert_eq!(vp.scroll_offset(), Vec2::new(0.0, 50.0));

        assert!(vp.scroll_by(500.0, -10.0));
        assert_eq!(vp.scroll_offset(), Vec2::new(200.0, 40.0));
    }

    #[test]
    fn content_smaller_than_viewport_pins_scroll_to_zero() {
        let mut vp = ScrollViewport::new(Size::new(100.0, 150.0), Size::new(100.0, 50.0));
        assert!(!vp.scroll_to(0.0, 120.0));
        assert_eq!(vp.state().scroll_y, 0.0);
        assert!(vp.debug_info().content_fits);
    }

    #[test]
    fn shrinking_content_reclamps_offset() {
        let mut vp = list_view();
        vp.scroll_to(0.0, 29_000.0);
        assert!(vp.set_content_size(100.0, 1_000.0));
        assert_eq!(vp.state().scroll_y, 850.0);
        // Growing again keeps the offset.
        assert!(!vp.set_content_size(100.0, 2_000.0));
        assert_eq!(vp.state().scroll_y, 850.0);
    }

    #[test]
    fn resize_reports_window_changes() {
        let mut vp = list_view();
        assert!(!vp.set_visible_size(100.0, 150.0));
        assert!(vp.set_visible_size(100.0, 200.0));
        assert_eq!(vp.visible_content_rect(), Rect::new(0.0, 0.0, 100.0, 200.0));
    }

    #[test]
    fn negative_visible_size_is_an_empty_window() {
        let mut vp = list_view();
        vp.scroll_to(0.0, 40.0);
        assert!(vp.set_visible_size(-10.0, -5.0));
        assert_eq!(vp.visible_size(), Size::ZERO);
        assert_eq!(vp.visible_content_rect().area(), 0.0);
        assert_eq!(vp.state().scroll_y, 40.0);
    }

    #[test]
    fn non_finite_scroll_targets_are_ignored() {
        let mut vp = list_view();
        vp.scroll_to(0.0, 60.0);
        assert!(!vp.scroll_to(f64::NAN, f64::INFINITY));
        assert_eq!(vp.state().scroll_y, 60.0);
    }

    #[test]
    fn point_and_rect_conversion() {
        let mut vp = list_view();
        vp.scroll_to(0.0, 300.0);
        assert_eq!(
            vp.content_to_viewport(Point::new(5.0, 330.0)),
            Point::new(5.0, 30.0)
        );
        let row = Rect::new(0.0, 330.0, 100.0, 360.0);
        let on_screen = vp.content_to_viewport_rect(row);
        assert_eq!(on_screen, Rect::new(0.0, 30.0, 100.0, 60.0));
        assert_eq!(vp.viewport_to_content_rect(on_screen), row);
    }

    #[test]
    fn ensure_visible_scrolls_minimally() {
        let mut vp = list_view();
        // Already visible: no change.
        assert!(!vp.ensure_visible(Rect::new(0.0, 30.0, 100.0, 60.0)));
        // Below: align end.
        assert!(vp.ensure_visible(Rect::new(0.0, 300.0, 100.0, 330.0)));
        assert_eq!(vp.state().scroll_y, 180.0);
        // Above: align start.
        assert!(vp.ensure_visible(Rect::new(0.0, 60.0, 100.0, 90.0)));
        assert_eq!(vp.state().scroll_y, 60.0);
    }

    #[test]
    fn scroll_align_variants() {
        let mut vp = list_view();
        let row = Rect::new(0.0, 600.0, 100.0, 630.0);
        vp.scroll_align_axis(Axis::Vertical, row, ScrollAlign::Start);
        assert_eq!(vp.state().scroll_y, 600.0);
        vp.scroll_align_axis(Axis::Vertical, row, ScrollAlign::End);
        assert_eq!(vp.state().scroll_y, 480.0);
        vp.scroll_align_axis(Axis::Vertical, row, ScrollAlign::Center);
        assert_eq!(vp.state().scroll_y, 540.0);

        // Aligning near the start clamps at zero.
        vp.scroll_align(Rect::new(0.0, 0.0, 100.0, 30.0), ScrollAlign::Center);
        assert_eq!(vp.scroll_offset(), Vec2::ZERO);
    }
}
