// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Virtualized vertical list: a [`ScrollView`] driven by a [`Virtualizer`].

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::mem;

use kurbo::{Point, Rect, Size};
use sightline_layout::Axis;
use sightline_model::{Model, ModelEvent, ModelSubscription};
use sightline_viewport::{ScrollAlign, ScrollViewportDebugInfo};
use sightline_virtual_list::{
    ExtentModel, ExtentSource, FixedExtentModel, PrefixSumExtentModel, SlotChanges, SlotFlags,
    SlotId, VirtualListError, Virtualizer, VirtualizerDebugInfo,
};

use crate::{ListViewConfig, ScrollError, ScrollPhase, ScrollRequests, ScrollView};

/// Upper bound on observer round trips within one step.
///
/// Each pass calls the slot observer once and then applies whatever it requested; an
/// observer that keeps asking to scroll somewhere new is cut off here.
pub const MAX_SETTLE_PASSES: usize = 8;

/// Callback told about every non-empty batch of slot changes within a step.
///
/// It may queue scroll requests on the handle; they are applied before the step ends.
pub type SlotObserver = Box<dyn FnMut(&SlotChanges, &ScrollRequests)>;

/// A list whose rows all share the configured row height.
pub type FixedListView = ListView<FixedExtentModel>;

/// A list whose rows are measured individually.
pub type VariableListView = ListView<PrefixSumExtentModel>;

/// A materialized row, ready to be drawn.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LiveItem {
    /// Slot holding the row.
    pub slot: SlotId,
    /// Model index.
    pub index: usize,
    /// Row rectangle in content coordinates.
    pub rect: Rect,
    /// Row rectangle relative to the visible window.
    pub viewport_rect: Rect,
    /// Interaction flags of the slot.
    pub flags: SlotFlags,
}

/// Debug snapshot of a [`ListView`].
#[derive(Clone, Debug, PartialEq)]
pub struct ListViewDebugInfo {
    /// Scroll state.
    pub viewport: ScrollViewportDebugInfo,
    /// Virtualizer state.
    pub virtualizer: VirtualizerDebugInfo,
    /// Current item.
    pub current_item: Option<usize>,
    /// Model events not yet pulled with [`ListView::sync`].
    pub pending_events: usize,
}

/// A vertically scrolling list that only materializes the rows it shows.
///
/// The list does not own its model. It holds a [`ModelSubscription`] and reads the model
/// through a borrow whenever [`sync`](Self::sync) is called, which applies the queued
/// model events to the virtualizer.
///
/// Every operation runs as one scroll step and returns the coalesced [`SlotChanges`] the
/// host has to apply to its row widgets. Within a step the content size is updated, the
/// scroll offset clamped and the visible rows recomputed; the optional slot observer then
/// sees the changes and may queue scroll requests, which are applied (and the rows
/// recomputed again) before the step ends.
///
/// [`SlotChanges::scroll_adjustment`] in a returned batch reports an anchoring shift that
/// has already been applied to the scroll offset.
pub struct ListView<E> {
    scroll: ScrollView,
    virtualizer: Virtualizer<E>,
    subscription: ModelSubscription,
    current: Option<usize>,
    config: ListViewConfig,
    observer: Option<SlotObserver>,
}

impl<E: fmt::Debug> fmt::Debug for ListView<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListView")
            .field("scroll", &self.scroll)
            .field("virtualizer", &self.virtualizer)
            .field("subscription", &self.subscription)
            .field("current", &self.current)
            .field("config", &self.config)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl ListView<FixedExtentModel> {
    /// Creates a list of uniform rows over `model`.
    pub fn fixed<M: Model + ?Sized>(model: &M, config: ListViewConfig) -> Result<Self, ScrollError> {
        let extents = FixedExtentModel::new(0, config.row_height)?.with_spacing(config.spacing);
        Self::new(model, extents, config)
    }
}

impl ListView<PrefixSumExtentModel> {
    /// Creates a list of individually measured rows over `model`.
    ///
    /// Every row starts out at the configured row height; report measured heights with
    /// [`set_item_extent`](Self::set_item_extent) or [`sync_with`](Self::sync_with).
    pub fn variable<M: Model + ?Sized>(
        model: &M,
        config: ListViewConfig,
    ) -> Result<Self, ScrollError> {
        Self::new(model, PrefixSumExtentModel::with_spacing(config.spacing), config)
    }
}

impl<E: ExtentModel> ListView<E> {
    /// Creates a list over `model` using `extents` for row geometry.
    ///
    /// `extents` is reset to the model's row count, with every row at the configured row
    /// height. Nothing is visible until the list gets a size.
    pub fn new<M: Model + ?Sized>(
        model: &M,
        extents: E,
        config: ListViewConfig,
    ) -> Result<Self, ScrollError> {
        let mut virtualizer = Virtualizer::new(extents)
            .with_overscan(config.overscan)
            .with_anchor_on_shift(config.anchor_on_shift);
        let estimate = config.row_height;
        virtualizer.reset(model.row_count(), &mut |_: usize| estimate)?;
        let mut list = Self {
            scroll: ScrollView::new(Size::ZERO, Size::ZERO),
            virtualizer,
            subscription: model.subscribe(),
            current: None,
            config,
            observer: None,
        };
        list.sync_content_size();
        Ok(list)
    }

    /// The underlying scroll view.
    #[must_use]
    pub fn scroll(&self) -> &ScrollView {
        &self.scroll
    }

    /// The underlying virtualizer.
    #[must_use]
    pub fn virtualizer(&self) -> &Virtualizer<E> {
        &self.virtualizer
    }

    /// The configuration the list was built with.
    #[must_use]
    pub fn config(&self) -> &ListViewConfig {
        &self.config
    }

    /// A handle for queuing scroll requests.
    #[must_use]
    pub fn requests(&self) -> ScrollRequests {
        self.scroll.requests()
    }

    /// Current scroll phase.
    #[must_use]
    pub fn phase(&self) -> ScrollPhase {
        self.scroll.phase()
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.virtualizer.len()
    }

    /// Returns `true` if the list has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.virtualizer.is_empty()
    }

    /// Installs the slot observer, replacing any previous one.
    pub fn set_slot_observer(
        &mut self,
        observer: impl FnMut(&SlotChanges, &ScrollRequests) + 'static,
    ) {
        self.observer = Some(Box::new(observer));
    }

    /// Removes the slot observer.
    pub fn clear_slot_observer(&mut self) {
        self.observer = None;
    }

    /// Content width.
    #[must_use]
    pub fn viewport_width(&self) -> f64 {
        self.scroll.viewport_width()
    }

    /// Content height: the total extent of all rows.
    #[must_use]
    pub fn viewport_height(&self) -> f64 {
        self.scroll.viewport_height()
    }

    /// Negated horizontal scroll offset.
    #[must_use]
    pub fn viewport_x(&self) -> f64 {
        self.scroll.viewport_x()
    }

    /// Negated vertical scroll offset.
    #[must_use]
    pub fn viewport_y(&self) -> f64 {
        self.scroll.viewport_y()
    }

    /// Width of the visible window.
    #[must_use]
    pub fn visible_width(&self) -> f64 {
        self.scroll.visible_width()
    }

    /// Height of the visible window.
    #[must_use]
    pub fn visible_height(&self) -> f64 {
        self.scroll.visible_height()
    }

    /// Positions the content horizontally; see [`ScrollView::set_viewport_x`].
    pub fn set_viewport_x(&mut self, x: f64) -> SlotChanges {
        let y = self.scroll.state().scroll_y;
        self.scroll_to(-x, y)
    }

    /// Positions the content vertically; see [`ScrollView::set_viewport_y`].
    pub fn set_viewport_y(&mut self, y: f64) -> SlotChanges {
        let x = self.scroll.state().scroll_x;
        self.scroll_to(x, -y)
    }

    /// Sets the window width.
    pub fn set_visible_width(&mut self, width: f64) -> SlotChanges {
        self.set_visible_size(width, self.visible_height())
    }

    /// Sets the window height.
    pub fn set_visible_height(&mut self, height: f64) -> SlotChanges {
        self.set_visible_size(self.visible_width(), height)
    }

    /// Resizes the visible window.
    pub fn set_visible_size(&mut self, width: f64, height: f64) -> SlotChanges {
        self.step(|list| {
            list.scroll.viewport_mut().set_visible_size(width, height);
        })
    }

    /// Scrolls to an absolute offset, clamped to the valid range.
    pub fn scroll_to(&mut self, x: f64, y: f64) -> SlotChanges {
        self.step(|list| {
            list.scroll.viewport_mut().scroll_to(x, y);
        })
    }

    /// Scrolls by a delta, clamped to the valid range.
    pub fn scroll_by(&mut self, dx: f64, dy: f64) -> SlotChanges {
        self.step(|list| {
            list.scroll.viewport_mut().scroll_by(dx, dy);
        })
    }

    /// Applies a scroll request queued while the list was idle.
    pub fn process_requests(&mut self) -> SlotChanges {
        self.step(|_| {})
    }

    /// Changes the overscan distance.
    pub fn set_overscan(&mut self, overscan: f64) -> SlotChanges {
        self.config.overscan = overscan;
        self.step(|list| list.virtualizer.set_overscan(overscan))
    }

    /// Scrolls vertically so that row `index` lands at `align`.
    pub fn scroll_to_item(
        &mut self,
        index: usize,
        align: ScrollAlign,
    ) -> Result<SlotChanges, ScrollError> {
        let rect = self.checked_item_rect(index)?;
        Ok(self.step(|list| {
            list.scroll
                .viewport_mut()
                .scroll_align_axis(Axis::Vertical, rect, align);
        }))
    }

    /// The current item, or `-1` if there is none.
    #[must_use]
    pub fn current_item(&self) -> isize {
        self.current
            .and_then(|index| isize::try_from(index).ok())
            .unwrap_or(-1)
    }

    /// The current item as an index.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Sets the current item, clamped to `[-1, len - 1]`, and scrolls it into view.
    pub fn set_current_item(&mut self, index: isize) -> SlotChanges {
        let current = usize::try_from(index)
            .ok()
            .and_then(|index| self.len().checked_sub(1).map(|last| index.min(last)));
        self.current = current;
        self.step(|list| {
            if let Some(rect) = current.and_then(|index| list.virtualizer.item_rect(index)) {
                list.scroll.viewport_mut().scroll_align_axis(
                    Axis::Vertical,
                    rect,
                    ScrollAlign::Nearest,
                );
            }
        })
    }

    /// Row under `point`, given relative to the visible window.
    ///
    /// Points outside the window or in the spacing between rows hit nothing.
    #[must_use]
    pub fn item_at_viewport_point(&self, point: Point) -> Option<usize> {
        let visible = self.scroll.viewport().visible_size();
        if point.x < 0.0 || point.y < 0.0 || point.x >= visible.width || point.y >= visible.height
        {
            return None;
        }
        let content = self.scroll.viewport().viewport_to_content(point);
        self.virtualizer.index_at_point(content)
    }

    /// Materialized rows in index order.
    pub fn live_items(&self) -> impl Iterator<Item = LiveItem> + '_ {
        let viewport = self.scroll.viewport();
        self.virtualizer.live_slots().map(move |(slot, item)| LiveItem {
            slot,
            index: item.index(),
            rect: item.rect(),
            viewport_rect: viewport.content_to_viewport_rect(item.rect()),
            flags: item.flags(),
        })
    }

    /// Sets the interaction flags of the slot showing row `index`.
    ///
    /// Returns `false` if the row is not materialized. The flags follow the row while it
    /// stays materialized.
    pub fn set_item_flags(&mut self, index: usize, flags: SlotFlags) -> bool {
        let Some(id) = self.virtualizer.slot_for_index(index) else {
            return false;
        };
        let focused = self.current == Some(index);
        self.virtualizer.slot_mut(id).is_some_and(|slot| {
            slot.set_flags(flags);
            slot.set_flag(SlotFlags::FOCUSED, focused);
            true
        })
    }

    /// Reports the measured height of row `index`.
    ///
    /// Lists of uniform rows keep their row height and only refresh the row.
    pub fn set_item_extent(
        &mut self,
        index: usize,
        extent: f64,
    ) -> Result<SlotChanges, ScrollError> {
        self.try_step(|list, changes| {
            changes.extend(list.virtualizer.update(index, &mut |_: usize| extent)?);
            Ok(())
        })
    }

    /// Pulls pending model events, measuring new and changed rows at the configured row
    /// height.
    pub fn sync<M: Model + ?Sized>(&mut self, model: &M) -> Result<SlotChanges, ScrollError> {
        let estimate = self.config.row_height;
        self.sync_with(model, &mut |_: usize| estimate)
    }

    /// Pulls pending model events, measuring new and changed rows with `source`.
    ///
    /// A batch containing a reset rebuilds the list from the model's current row count.
    /// An event that does not fit the rows the list has at that point rejects the whole
    /// batch with [`VirtualListError::IndexOutOfRange`] and leaves the list untouched.
    /// If valid events do not add up to the model's row count the list is rebuilt.
    /// Inserts and removes before the current item shift it; removing it clears it.
    pub fn sync_with<M: Model + ?Sized>(
        &mut self,
        model: &M,
        source: &mut dyn ExtentSource,
    ) -> Result<SlotChanges, ScrollError> {
        let events: Vec<ModelEvent> = self.subscription.drain().collect();
        let row_count = model.row_count();
        if events.is_empty() && row_count == self.len() {
            return Ok(SlotChanges::default());
        }
        if !events.contains(&ModelEvent::Reset) {
            self.check_events(&events)?;
        }
        log::debug!(
            "syncing {} model events, {} -> {row_count} rows",
            events.len(),
            self.len()
        );
        self.try_step(|list, changes| list.apply_events(&events, row_count, source, changes))
    }

    /// Returns a debug snapshot.
    #[must_use]
    pub fn debug_info(&self) -> ListViewDebugInfo {
        ListViewDebugInfo {
            viewport: self.scroll.viewport().debug_info(),
            virtualizer: self.virtualizer.debug_info(),
            current_item: self.current,
            pending_events: self.subscription.pending(),
        }
    }

    fn apply_events(
        &mut self,
        events: &[ModelEvent],
        row_count: usize,
        source: &mut dyn ExtentSource,
        changes: &mut SlotChanges,
    ) -> Result<(), ScrollError> {
        if events.contains(&ModelEvent::Reset) {
            self.current = None;
            changes.extend(self.virtualizer.reset(row_count, source)?);
            return Ok(());
        }
        for &event in events {
            match event {
                ModelEvent::Inserted { index, count } => {
                    changes.extend(self.virtualizer.insert(index, count, source)?);
                    self.current = self
                        .current
                        .map(|current| if current >= index { current + count } else { current });
                }
                ModelEvent::Removed { index, count } => {
                    changes.extend(self.virtualizer.remove(index, count)?);
                    self.current = self.current.and_then(|current| {
                        if current < index {
                            Some(current)
                        } else if current < index + count {
                            None
                        } else {
                            Some(current - count)
                        }
                    });
                }
                ModelEvent::Changed { index } => {
                    changes.extend(self.virtualizer.update(index, source)?);
                }
                // Batches with a reset were handled above.
                ModelEvent::Reset => {}
            }
        }
        if self.len() != row_count {
            log::warn!(
                "list has {} rows after sync but the model has {row_count}; rebuilding",
                self.len()
            );
            self.current = None;
            changes.extend(self.virtualizer.reset(row_count, source)?);
        }
        Ok(())
    }

    fn check_events(&self, events: &[ModelEvent]) -> Result<(), VirtualListError> {
        let mut len = self.len();
        for &event in events {
            let Some(next) = event.apply_to_len(len) else {
                log::warn!("model event {event:?} does not fit {len} rows");
                let index = match event {
                    ModelEvent::Inserted { index, .. }
                    | ModelEvent::Removed { index, .. }
                    | ModelEvent::Changed { index } => index,
                    ModelEvent::Reset => 0,
                };
                return Err(VirtualListError::IndexOutOfRange { index, len });
            };
            len = next;
        }
        Ok(())
    }

    fn checked_item_rect(&self, index: usize) -> Result<Rect, VirtualListError> {
        self.virtualizer
            .item_rect(index)
            .ok_or(VirtualListError::IndexOutOfRange {
                index,
                len: self.len(),
            })
    }

    fn step(&mut self, op: impl FnOnce(&mut Self)) -> SlotChanges {
        self.scroll.begin();
        op(self);
        let changes = self.settle(SlotChanges::default());
        self.scroll.end();
        changes
    }

    fn try_step(
        &mut self,
        op: impl FnOnce(&mut Self, &mut SlotChanges) -> Result<(), ScrollError>,
    ) -> Result<SlotChanges, ScrollError> {
        self.scroll.begin();
        let mut changes = SlotChanges::default();
        let outcome = op(self, &mut changes);
        let changes = self.settle(changes);
        self.scroll.end();
        outcome.map(|()| changes)
    }

    /// Updates the content size, applies anchoring, recomputes the rows and lets the
    /// observer react until no scroll request is left.
    fn settle(&mut self, mut changes: SlotChanges) -> SlotChanges {
        let adjustment = mem::take(&mut changes.scroll_adjustment);
        let offset = self.scroll.viewport().scroll_offset();
        self.sync_content_size();
        if adjustment != 0.0 {
            // Anchor against the old offset; the new content size decides the clamp.
            self.scroll
                .viewport_mut()
                .scroll_to(offset.x, offset.y + adjustment);
        }
        changes.extend(self.recompute());

        let requests = self.scroll.requests();
        let mut batch = changes;
        let mut total = SlotChanges::default();
        let mut passes = 0;
        loop {
            if !batch.is_empty()
                && let Some(observer) = self.observer.as_mut()
            {
                observer(&batch, &requests);
            }
            total.extend(batch);
            let Some(request) = self.scroll.take_request() else {
                break;
            };
            passes += 1;
            if passes >= MAX_SETTLE_PASSES {
                log::warn!("dropping scroll request {request:?} after {passes} settle passes");
                break;
            }
            self.scroll.apply_request(request);
            batch = self.recompute();
        }
        total.scroll_adjustment = adjustment;
        self.refresh_focus();
        log::trace!(
            "list step settled at {:?}",
            self.scroll.viewport().visible_content_rect()
        );
        total
    }

    fn recompute(&mut self) -> SlotChanges {
        let window = self.scroll.viewport().visible_content_rect();
        self.virtualizer.recompute(window)
    }

    fn sync_content_size(&mut self) {
        let visible = self.scroll.viewport().visible_size();
        let width = visible.width.max(self.config.min_content_width);
        self.virtualizer.set_cross_extent(width);
        let height = self.virtualizer.content_extent();
        self.scroll.viewport_mut().set_content_size(width, height);
    }

    fn refresh_focus(&mut self) {
        let live: Vec<(SlotId, usize)> = self
            .virtualizer
            .live_slots()
            .map(|(id, slot)| (id, slot.index()))
            .collect();
        for (id, index) in live {
            if let Some(slot) = self.virtualizer.slot_mut(id) {
                slot.set_flag(SlotFlags::FOCUSED, self.current == Some(index));
            }
        }
    }
}
