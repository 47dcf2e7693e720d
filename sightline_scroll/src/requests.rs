// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deferred scroll requests and the container scroll phase.

use alloc::rc::Rc;
use core::cell::Cell;

use kurbo::{Point, Vec2};

/// Whether a container is in the middle of a scroll step.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScrollPhase {
    /// No scroll step is running.
    #[default]
    Idle,
    /// A scroll or resize is being applied: the viewport is clamped and the visible set
    /// recomputed as one step. Requests made now are queued.
    ScrollPending,
}

/// A queued scroll request.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ScrollRequest {
    /// Scroll to an absolute offset.
    To(Point),
    /// Scroll by a relative delta.
    By(Vec2),
}

impl ScrollRequest {
    /// Folds a later request into this one.
    ///
    /// An absolute target replaces anything before it; a delta moves the pending target.
    #[must_use]
    pub fn then(self, later: Self) -> Self {
        match (self, later) {
            (_, Self::To(target)) => Self::To(target),
            (Self::To(target), Self::By(delta)) => Self::To(target + delta),
            (Self::By(a), Self::By(b)) => Self::By(a + b),
        }
    }

    /// The offset this request asks for, starting from `current`.
    #[must_use]
    pub fn target(self, current: Point) -> Point {
        match self {
            Self::To(target) => target,
            Self::By(delta) => current + delta,
        }
    }
}

#[derive(Debug, Default)]
struct Shared {
    phase: Cell<ScrollPhase>,
    pending: Cell<Option<ScrollRequest>>,
}

/// Cloneable handle for asking a container to scroll.
///
/// Requests are not applied immediately. They are coalesced into one pending request,
/// keeping only the latest target, and the container applies it at the end of its current
/// scroll step, or on the next call that processes requests when it is idle.
///
/// ```rust
/// use kurbo::Point;
/// use sightline_scroll::{ScrollRequest, ScrollRequests};
///
/// let requests = ScrollRequests::new();
/// requests.scroll_to(0.0, 100.0);
/// requests.scroll_by(0.0, 20.0);
/// requests.scroll_by(0.0, 5.0);
/// assert_eq!(requests.pending(), Some(ScrollRequest::To(Point::new(0.0, 125.0))));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ScrollRequests {
    shared: Rc<Shared>,
}

impl ScrollRequests {
    /// Creates a handle with no pending request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests an absolute scroll offset. Non-finite components are ignored.
    pub fn scroll_to(&self, x: f64, y: f64) {
        if x.is_finite() && y.is_finite() {
            self.push(ScrollRequest::To(Point::new(x, y)));
        } else {
            log::warn!("ignoring non-finite scroll target ({x}, {y})");
        }
    }

    /// Requests a relative scroll. Non-finite components are ignored.
    pub fn scroll_by(&self, dx: f64, dy: f64) {
        if dx.is_finite() && dy.is_finite() {
            self.push(ScrollRequest::By(Vec2::new(dx, dy)));
        } else {
            log::warn!("ignoring non-finite scroll delta ({dx}, {dy})");
        }
    }

    /// The coalesced pending request, if any.
    #[must_use]
    pub fn pending(&self) -> Option<ScrollRequest> {
        self.shared.pending.get()
    }

    /// The phase of the container this handle belongs to.
    #[must_use]
    pub fn phase(&self) -> ScrollPhase {
        self.shared.phase.get()
    }

    pub(crate) fn take(&self) -> Option<ScrollRequest> {
        self.shared.pending.take()
    }

    pub(crate) fn set_phase(&self, phase: ScrollPhase) {
        self.shared.phase.set(phase);
    }

    fn push(&self, request: ScrollRequest) {
        let merged = match self.shared.pending.get() {
            Some(previous) => {
                log::trace!("coalescing scroll request {request:?} into {previous:?}");
                previous.then(request)
            }
            None => request,
        };
        self.shared.pending.set(Some(merged));
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Vec2};

    use super::{ScrollPhase, ScrollRequest, ScrollRequests};

    #[test]
    fn latest_absolute_target_wins() {
        let requests = ScrollRequests::new();
        requests.scroll_by(0.0, 10.0);
        requests.scroll_to(0.0, 300.0);
        requests.scroll_to(0.0, 40.0);
        assert_eq!(requests.take(), Some(ScrollRequest::To(Point::new(0.0, 40.0))));
        assert_eq!(requests.take(), None);
    }

    #[test]
    fn deltas_accumulate() {
        let requests = ScrollRequests::new();
        requests.scroll_by(1.0, 10.0);
        requests.scroll_by(2.0, -4.0);
        requests.scroll_by(f64::NAN, 1.0);
        let pending = requests.pending().unwrap();
        assert_eq!(pending, ScrollRequest::By(Vec2::new(3.0, 6.0)));
        assert_eq!(pending.target(Point::new(10.0, 10.0)), Point::new(13.0, 16.0));
    }

    #[test]
    fn clones_share_state() {
        let requests = ScrollRequests::new();
        let observer = requests.clone();
        requests.set_phase(ScrollPhase::ScrollPending);
        assert_eq!(observer.phase(), ScrollPhase::ScrollPending);
        observer.scroll_to(0.0, 5.0);
        assert!(requests.pending().is_some());
    }
}
