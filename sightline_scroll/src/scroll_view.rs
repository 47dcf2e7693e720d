// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A plain scrollable window onto caller-sized or box-laid-out content.

use alloc::vec::Vec;

use kurbo::{Rect, Size};
use sightline_layout::geometry::intersects;
use sightline_layout::{Arrangement, BoxConstraints, Direction, arrange};
use sightline_viewport::{ScrollAlign, ScrollViewport, ViewportState};

use crate::requests::ScrollRequest;
use crate::{BoxConfig, DrawCommand, DrawList, ScrollPhase, ScrollRequests, StyleContext, Widget};

/// Thickness of the scroll indicators drawn by [`ScrollView`].
pub const SCROLLBAR_THICKNESS: f64 = 6.0;

#[derive(Clone, Debug)]
struct BoxContent {
    children: Vec<Size>,
    direction: Direction,
    config: BoxConfig,
    arrangement: Arrangement,
}

/// A scrollable window onto content of a known size.
///
/// The content size comes either from the caller ([`set_content_size`](Self::set_content_size))
/// or from a box of children arranged by the layout engine
/// ([`set_box_content`](Self::set_box_content)), which is re-arranged whenever the visible
/// size changes.
///
/// Every mutation runs as one scroll step: the phase is
/// [`ScrollPhase::ScrollPending`] while the viewport is updated and clamped, and any
/// request queued on the [`ScrollRequests`] handle is applied before the step ends.
/// Mutators return `true` if the visible content window changed.
///
/// The properties follow the declarative surface: `viewport_width`/`viewport_height` are
/// the content size, `viewport_x`/`viewport_y` the negated scroll offsets, and
/// `visible_width`/`visible_height` the window size.
#[derive(Clone, Debug, Default)]
pub struct ScrollView {
    viewport: ScrollViewport,
    requests: ScrollRequests,
    content: Option<BoxContent>,
}

impl ScrollView {
    /// Creates a view of `visible` size onto `content`, scrolled to the origin.
    #[must_use]
    pub fn new(visible: Size, content: Size) -> Self {
        Self {
            viewport: ScrollViewport::new(visible, content),
            requests: ScrollRequests::new(),
            content: None,
        }
    }

    /// The underlying viewport.
    #[must_use]
    pub fn viewport(&self) -> &ScrollViewport {
        &self.viewport
    }

    /// Snapshot of the viewport state.
    #[must_use]
    pub fn state(&self) -> ViewportState {
        self.viewport.state()
    }

    /// A handle for queuing scroll requests.
    #[must_use]
    pub fn requests(&self) -> ScrollRequests {
        self.requests.clone()
    }

    /// Current scroll phase.
    #[must_use]
    pub fn phase(&self) -> ScrollPhase {
        self.requests.phase()
    }

    /// Width of the content.
    #[must_use]
    pub fn viewport_width(&self) -> f64 {
        self.viewport.state().content_width
    }

    /// Height of the content.
    #[must_use]
    pub fn viewport_height(&self) -> f64 {
        self.viewport.state().content_height
    }

    /// Horizontal position of the content relative to the window: `-scroll_x`.
    #[must_use]
    pub fn viewport_x(&self) -> f64 {
        -self.viewport.state().scroll_x
    }

    /// Vertical position of the content relative to the window: `-scroll_y`.
    #[must_use]
    pub fn viewport_y(&self) -> f64 {
        -self.viewport.state().scroll_y
    }

    /// Width of the visible window.
    #[must_use]
    pub fn visible_width(&self) -> f64 {
        self.viewport.state().visible_width
    }

    /// Height of the visible window.
    #[must_use]
    pub fn visible_height(&self) -> f64 {
        self.viewport.state().visible_height
    }

    /// Sets the content width.
    pub fn set_viewport_width(&mut self, width: f64) -> bool {
        self.set_content_size(width, self.viewport_height())
    }

    /// Sets the content height.
    pub fn set_viewport_height(&mut self, height: f64) -> bool {
        self.set_content_size(self.viewport_width(), height)
    }

    /// Positions the content horizontally; `x` is clamped to `[-max_scroll_x, 0]`.
    pub fn set_viewport_x(&mut self, x: f64) -> bool {
        let y = self.viewport.state().scroll_y;
        self.scroll_to(-x, y)
    }

    /// Positions the content vertically; `y` is clamped to `[-max_scroll_y, 0]`.
    pub fn set_viewport_y(&mut self, y: f64) -> bool {
        let x = self.viewport.state().scroll_x;
        self.scroll_to(x, -y)
    }

    /// Sets the window width.
    pub fn set_visible_width(&mut self, width: f64) -> bool {
        self.set_visible_size(width, self.visible_height())
    }

    /// Sets the window height.
    pub fn set_visible_height(&mut self, height: f64) -> bool {
        self.set_visible_size(self.visible_width(), height)
    }

    /// Resizes the window, re-arranging box content if there is any.
    pub fn set_visible_size(&mut self, width: f64, height: f64) -> bool {
        self.step(|view| {
            let resized = view.viewport.set_visible_size(width, height);
            view.relayout() | resized
        })
    }

    /// Sets the content size explicitly, discarding any box content.
    pub fn set_content_size(&mut self, width: f64, height: f64) -> bool {
        self.content = None;
        self.step(|view| view.viewport.set_content_size(width, height))
    }

    /// Lays `children` out as a box and uses the box as content.
    ///
    /// Vertical boxes are at least as wide as the window and horizontal boxes at least as
    /// tall; grids wrap at the window width, with cells no narrower than
    /// [`BoxConfig::min_cell_width`].
    pub fn set_box_content(
        &mut self,
        children: &[Size],
        direction: Direction,
        config: BoxConfig,
    ) -> bool {
        let children = match direction {
            Direction::Grid => children
                .iter()
                .map(|size| Size::new(size.width.max(config.min_cell_width), size.height))
                .collect(),
            _ => children.to_vec(),
        };
        self.content = Some(BoxContent {
            children,
            direction,
            config,
            arrangement: Arrangement::default(),
        });
        self.step(Self::relayout)
    }

    /// Rectangles of the box children in content coordinates.
    #[must_use]
    pub fn child_rects(&self) -> &[Rect] {
        self.content
            .as_ref()
            .map_or(&[], |content| content.arrangement.rects.as_slice())
    }

    /// Indices of box children overlapping the visible window.
    pub fn visible_children(&self) -> impl Iterator<Item = usize> {
        let window = self.viewport.visible_content_rect();
        self.child_rects()
            .iter()
            .enumerate()
            .filter(move |(_, rect)| intersects(**rect, window))
            .map(|(index, _)| index)
    }

    /// Scrolls to an absolute offset, clamped to the valid range.
    pub fn scroll_to(&mut self, x: f64, y: f64) -> bool {
        self.step(|view| view.viewport.scroll_to(x, y))
    }

    /// Scrolls by a delta, clamped to the valid range.
    pub fn scroll_by(&mut self, dx: f64, dy: f64) -> bool {
        self.step(|view| view.viewport.scroll_by(dx, dy))
    }

    /// Scrolls so that `rect` (content coordinates) lands at `align`.
    pub fn scroll_into_view(&mut self, rect: Rect, align: ScrollAlign) -> bool {
        self.step(|view| view.viewport.scroll_align(rect, align))
    }

    /// Applies a request queued while the view was idle.
    pub fn process_requests(&mut self) -> bool {
        self.step(|_| false)
    }

    /// Start and length of the scroll thumb along the vertical track of `track_len`, or
    /// `None` if the content fits.
    #[must_use]
    pub fn vertical_thumb(&self, track_len: f64) -> Option<(f64, f64)> {
        let state = self.viewport.state();
        thumb(
            state.scroll_y,
            state.visible_height,
            state.content_height,
            track_len,
        )
    }

    /// Start and length of the scroll thumb along the horizontal track of `track_len`, or
    /// `None` if the content fits.
    #[must_use]
    pub fn horizontal_thumb(&self, track_len: f64) -> Option<(f64, f64)> {
        let state = self.viewport.state();
        thumb(
            state.scroll_x,
            state.visible_width,
            state.content_width,
            track_len,
        )
    }

    pub(crate) fn viewport_mut(&mut self) -> &mut ScrollViewport {
        &mut self.viewport
    }

    /// Enters [`ScrollPhase::ScrollPending`], first applying any request left over from
    /// the idle phase.
    pub(crate) fn begin(&mut self) -> bool {
        self.requests.set_phase(ScrollPhase::ScrollPending);
        self.take_request()
            .is_some_and(|request| self.apply_request(request))
    }

    pub(crate) fn end(&self) {
        self.requests.set_phase(ScrollPhase::Idle);
    }

    pub(crate) fn take_request(&self) -> Option<ScrollRequest> {
        self.requests.take()
    }

    pub(crate) fn apply_request(&mut self, request: ScrollRequest) -> bool {
        let target = request.target(self.viewport.scroll_offset().to_point());
        self.viewport.scroll_to(target.x, target.y)
    }

    fn step(&mut self, op: impl FnOnce(&mut Self) -> bool) -> bool {
        let mut changed = self.begin();
        changed |= op(self);
        if let Some(request) = self.take_request() {
            changed |= self.apply_request(request);
        }
        self.end();
        changed
    }

    fn relayout(&mut self) -> bool {
        let visible = self.viewport.visible_size();
        let Some(content) = self.content.as_mut() else {
            return false;
        };
        content.arrangement = arrange(
            &content.children,
            &box_constraints(content.direction, visible),
            content.direction,
            content.config.spacing,
            content.config.padding,
        );
        let size = content.arrangement.size;
        self.viewport.set_content_size(size.width, size.height)
    }
}

fn box_constraints(direction: Direction, visible: Size) -> BoxConstraints {
    let unbounded = f64::INFINITY;
    match direction {
        Direction::Vertical => BoxConstraints::new(
            Size::new(visible.width, 0.0),
            Size::new(unbounded, unbounded),
        ),
        Direction::Horizontal => BoxConstraints::new(
            Size::new(0.0, visible.height),
            Size::new(unbounded, unbounded),
        ),
        Direction::Grid => BoxConstraints::new(
            Size::new(visible.width, 0.0),
            Size::new(visible.width, unbounded),
        ),
    }
}

fn thumb(offset: f64, visible: f64, content: f64, track_len: f64) -> Option<(f64, f64)> {
    if content <= visible || content <= 0.0 {
        return None;
    }
    let len = track_len * visible / content;
    let start = track_len * offset / content;
    Some((start, len))
}

impl Widget for ScrollView {
    fn render(&self, style: &StyleContext, bounds: Rect, out: &mut DrawList) {
        out.push(DrawCommand::PushClip(bounds));
        out.push(DrawCommand::FillRect {
            rect: bounds,
            color: style.palette.background,
        });
        let indicator = style.palette.foreground.with_alpha(0.4);
        if let Some((start, len)) = self.vertical_thumb(bounds.height()) {
            out.push(DrawCommand::FillRect {
                rect: Rect::new(
                    bounds.x1 - SCROLLBAR_THICKNESS,
                    bounds.y0 + start,
                    bounds.x1,
                    bounds.y0 + start + len,
                ),
                color: indicator,
            });
        }
        if let Some((start, len)) = self.horizontal_thumb(bounds.width()) {
            out.push(DrawCommand::FillRect {
                rect: Rect::new(
                    bounds.x0 + start,
                    bounds.y1 - SCROLLBAR_THICKNESS,
                    bounds.x0 + start + len,
                    bounds.y1,
                ),
                color: indicator,
            });
        }
        out.push(DrawCommand::PopClip);
    }
}
