// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The virtualizer: keeps exactly the needed items materialized.

use alloc::vec::Vec;
use core::ops::RangeInclusive;

use hashbrown::HashMap;
use kurbo::{Point, Rect};
use sightline_layout::geometry::non_negative_len;
use sightline_layout::{Axis, stack_slot_rect};

use crate::model::check_range;
use crate::{ExtentModel, ExtentSource, ItemSlot, SlotArena, SlotId, VirtualListError};

/// Inclusive range of item indices.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct VisibleRange {
    /// First index in the range.
    pub first_index: usize,
    /// Last index in the range (inclusive).
    pub last_index: usize,
}

impl VisibleRange {
    /// Number of indices covered; zero if `first_index` is past `last_index`.
    #[must_use]
    pub fn count(self) -> usize {
        self.last_index
            .checked_sub(self.first_index)
            .map_or(0, |span| span + 1)
    }

    /// Whether `index` lies in the range.
    #[must_use]
    pub fn contains(self, index: usize) -> bool {
        (self.first_index..=self.last_index).contains(&index)
    }

    /// The indices as a standard range.
    #[must_use]
    pub fn indices(self) -> RangeInclusive<usize> {
        self.first_index..=self.last_index
    }
}

/// One entry in a [`SlotChanges`] batch.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SlotChange {
    /// The affected slot.
    pub slot: SlotId,
    /// Model index the slot is bound to.
    pub index: usize,
    /// Content-relative rectangle of the item.
    pub rect: Rect,
}

/// The slot diff produced by a [`Virtualizer`] operation.
///
/// Hosts apply the batch in field order: destroy, reposition, refresh, then create.
/// Entries are keyed by [`SlotId`]; indices always refer to the model as it is after the
/// operation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SlotChanges {
    /// Slots bound to items that entered the visible range.
    pub to_create: Vec<SlotChange>,
    /// Slots released because their items left the visible range or were removed.
    pub to_destroy: Vec<SlotChange>,
    /// Live slots whose index or rectangle changed.
    pub to_reposition: Vec<SlotChange>,
    /// Live slots whose item data changed in place.
    pub to_refresh: Vec<SlotChange>,
    /// Main-axis delta the host should add to its scroll offset to keep the visible items
    /// stationary. Non-zero only when anchoring is enabled.
    pub scroll_adjustment: f64,
}

impl SlotChanges {
    /// Returns `true` if nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_create.is_empty()
            && self.to_destroy.is_empty()
            && self.to_reposition.is_empty()
            && self.to_refresh.is_empty()
            && self.scroll_adjustment == 0.0
    }

    /// Indices of created slots, in order.
    #[must_use]
    pub fn created_indices(&self) -> Vec<usize> {
        self.to_create.iter().map(|c| c.index).collect()
    }

    /// Indices of destroyed slots, in order.
    #[must_use]
    pub fn destroyed_indices(&self) -> Vec<usize> {
        self.to_destroy.iter().map(|c| c.index).collect()
    }

    /// Folds a later batch into this one.
    ///
    /// A slot created here and destroyed later disappears from both lists; repositions and
    /// refreshes of slots destroyed later are dropped; a later reposition of a slot created
    /// here updates the creation entry instead.
    pub fn extend(&mut self, later: Self) {
        for gone in later.to_destroy {
            self.to_reposition.retain(|c| c.slot != gone.slot);
            self.to_refresh.retain(|c| c.slot != gone.slot);
            let before = self.to_create.len();
            self.to_create.retain(|c| c.slot != gone.slot);
            if self.to_create.len() == before {
                self.to_destroy.push(gone);
            }
        }
        for moved in later.to_reposition {
            if let Some(entry) = self
                .to_create
                .iter_mut()
                .chain(self.to_reposition.iter_mut())
                .find(|c| c.slot == moved.slot)
            {
                *entry = moved;
            } else {
                self.to_reposition.push(moved);
            }
        }
        for refreshed in later.to_refresh {
            let known = self
                .to_create
                .iter()
                .chain(&self.to_refresh)
                .any(|c| c.slot == refreshed.slot);
            if !known {
                self.to_refresh.push(refreshed);
            }
        }
        self.to_create.extend(later.to_create);
        self.scroll_adjustment += later.scroll_adjustment;
    }
}

/// Debug snapshot of a [`Virtualizer`].
#[derive(Clone, Debug, PartialEq)]
pub struct VirtualizerDebugInfo {
    /// Item count.
    pub len: usize,
    /// Total content extent along the main axis.
    pub content_extent: f64,
    /// Last visible rect passed to [`Virtualizer::recompute`].
    pub visible_rect: Rect,
    /// Items intersecting the visible rect, without overscan.
    pub visible_range: Option<VisibleRange>,
    /// Items currently materialized.
    pub materialized_range: Option<VisibleRange>,
    /// Number of live slots.
    pub live_slots: usize,
    /// Number of released slots waiting for reuse.
    pub pooled_slots: usize,
}

/// Materializes the items of an [`ExtentModel`] that intersect a visible rectangle.
///
/// Items are stacked along `axis` starting at the content origin and stretch across
/// [`cross_extent`](Self::cross_extent). After every operation the set of live slots is
/// exactly the items whose extent strictly overlaps the last visible rect, grown along the
/// main axis by [`overscan`](Self::overscan). Items that only touch the window edge are
/// not materialized; partially visible ones are.
///
/// Structural edits ([`insert`](Self::insert), [`remove`](Self::remove),
/// [`update`](Self::update), [`reset`](Self::reset)) keep slots bound to the same items
/// across index shifts, so their [`SlotFlags`](crate::SlotFlags) survive, and report the
/// moves in [`SlotChanges::to_reposition`].
///
/// ```rust
/// use kurbo::Rect;
/// use sightline_virtual_list::{FixedExtentModel, Virtualizer};
///
/// let model = FixedExtentModel::new(1000, 30.0).unwrap();
/// let mut list = Virtualizer::new(model);
/// list.set_cross_extent(200.0);
///
/// let changes = list.recompute(Rect::new(0.0, 0.0, 200.0, 150.0));
/// assert_eq!(changes.created_indices(), [0, 1, 2, 3, 4]);
///
/// let changes = list.recompute(Rect::new(0.0, 300.0, 200.0, 450.0));
/// assert_eq!(changes.destroyed_indices(), [0, 1, 2, 3, 4]);
/// assert_eq!(changes.created_indices(), [10, 11, 12, 13, 14]);
/// ```
#[derive(Clone, Debug)]
pub struct Virtualizer<E> {
    extents: E,
    axis: Axis,
    overscan: f64,
    cross_extent: f64,
    anchor_on_shift: bool,
    visible_rect: Rect,
    arena: SlotArena,
    live: HashMap<usize, SlotId>,
}

impl<E: ExtentModel> Virtualizer<E> {
    /// Creates a vertical virtualizer with no overscan and nothing visible yet.
    #[must_use]
    pub fn new(extents: E) -> Self {
        Self {
            extents,
            axis: Axis::Vertical,
            overscan: 0.0,
            cross_extent: 0.0,
            anchor_on_shift: false,
            visible_rect: Rect::ZERO,
            arena: SlotArena::new(),
            live: HashMap::new(),
        }
    }

    /// Sets the stacking axis.
    #[must_use]
    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    /// Sets the overscan distance.
    #[must_use]
    pub fn with_overscan(mut self, overscan: f64) -> Self {
        self.set_overscan(overscan);
        self
    }

    /// Enables or disables scroll anchoring.
    #[must_use]
    pub fn with_anchor_on_shift(mut self, anchor: bool) -> Self {
        self.anchor_on_shift = anchor;
        self
    }

    /// The extent model.
    #[must_use]
    pub fn extents(&self) -> &E {
        &self.extents
    }

    /// The stacking axis.
    #[must_use]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.extents.len()
    }

    /// Returns `true` if there are no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extents.is_empty()
    }

    /// Total extent of all items along the main axis.
    #[must_use]
    pub fn content_extent(&self) -> f64 {
        self.extents.total_extent()
    }

    /// Start offset of item `index` along the main axis.
    #[must_use]
    pub fn offset_of(&self, index: usize) -> f64 {
        self.extents.offset_of(index)
    }

    /// Extra distance materialized beyond each end of the visible rect.
    #[must_use]
    pub fn overscan(&self) -> f64 {
        self.overscan
    }

    /// Sets the overscan distance. Takes effect on the next [`recompute`](Self::recompute).
    pub fn set_overscan(&mut self, overscan: f64) {
        self.overscan = if overscan.is_finite() {
            non_negative_len(overscan)
        } else {
            0.0
        };
    }

    /// Extent of every item across the main axis.
    #[must_use]
    pub fn cross_extent(&self) -> f64 {
        self.cross_extent
    }

    /// Sets the cross extent of items. Live rects update on the next
    /// [`recompute`](Self::recompute).
    pub fn set_cross_extent(&mut self, cross_extent: f64) {
        self.cross_extent = non_negative_len(cross_extent);
    }

    /// Whether structural edits before the visible items report a
    /// [`SlotChanges::scroll_adjustment`] that keeps those items in place.
    #[must_use]
    pub fn anchor_on_shift(&self) -> bool {
        self.anchor_on_shift
    }

    /// Enables or disables scroll anchoring.
    pub fn set_anchor_on_shift(&mut self, anchor: bool) {
        self.anchor_on_shift = anchor;
    }

    /// The visible rect used by the last operation.
    #[must_use]
    pub fn visible_rect(&self) -> Rect {
        self.visible_rect
    }

    /// Content-relative rectangle of item `index`.
    #[must_use]
    pub fn item_rect(&self, index: usize) -> Option<Rect> {
        (index < self.extents.len()).then(|| self.rect_of(index))
    }

    /// Items strictly overlapping `visible_rect`, ignoring overscan.
    #[must_use]
    pub fn visible_range(&self, visible_rect: Rect) -> Option<VisibleRange> {
        self.range_for(visible_rect, 0.0)
    }

    /// Items currently materialized.
    #[must_use]
    pub fn materialized_range(&self) -> Option<VisibleRange> {
        let first_index = self.live.keys().copied().min()?;
        let last_index = self.live.keys().copied().max()?;
        Some(VisibleRange {
            first_index,
            last_index,
        })
    }

    /// Number of live slots.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// The live slot addressed by `id`.
    #[must_use]
    pub fn slot(&self, id: SlotId) -> Option<&ItemSlot> {
        self.arena.get(id)
    }

    /// The live slot addressed by `id`, for updating its flags.
    pub fn slot_mut(&mut self, id: SlotId) -> Option<&mut ItemSlot> {
        self.arena.get_mut(id)
    }

    /// The slot materializing item `index`, if any.
    #[must_use]
    pub fn slot_for_index(&self, index: usize) -> Option<SlotId> {
        self.live.get(&index).copied()
    }

    /// Live slots in index order.
    pub fn live_slots(&self) -> impl Iterator<Item = (SlotId, &ItemSlot)> {
        self.materialized_range()
            .into_iter()
            .flat_map(VisibleRange::indices)
            .filter_map(|index| {
                let id = *self.live.get(&index)?;
                Some((id, self.arena.get(id)?))
            })
    }

    /// Index of the item under `point`, in content coordinates.
    ///
    /// Points in the spacing between items or outside the strip hit nothing.
    #[must_use]
    pub fn index_at_point(&self, point: Point) -> Option<usize> {
        if self.extents.is_empty() {
            return None;
        }
        let main = self.axis.main_coord(point);
        let cross = self.axis.cross().main_coord(point);
        if main < 0.0 || cross < 0.0 || cross >= self.cross_extent {
            return None;
        }
        let index = self.extents.index_at_offset(main);
        let start = self.extents.offset_of(index);
        (main >= start && main < start + self.extents.extent_of(index)).then_some(index)
    }

    /// Returns a debug snapshot.
    #[must_use]
    pub fn debug_info(&self) -> VirtualizerDebugInfo {
        VirtualizerDebugInfo {
            len: self.extents.len(),
            content_extent: self.content_extent(),
            visible_rect: self.visible_rect,
            visible_range: self.visible_range(self.visible_rect),
            materialized_range: self.materialized_range(),
            live_slots: self.live.len(),
            pooled_slots: self.arena.capacity() - self.arena.live_count(),
        }
    }

    /// Brings the live slots in line with `visible_rect` (content coordinates).
    ///
    /// Calling it twice with the same rect yields an empty second batch.
    pub fn recompute(&mut self, visible_rect: Rect) -> SlotChanges {
        self.visible_rect = visible_rect;
        let mut changes = SlotChanges::default();
        self.fill(&mut changes);
        log_changes("recompute", &changes);
        changes
    }

    /// Inserts `count` items before `index`, measuring them with `source`.
    pub fn insert(
        &mut self,
        index: usize,
        count: usize,
        source: &mut dyn ExtentSource,
    ) -> Result<SlotChanges, VirtualListError> {
        let first_visible = self.first_visible_index();
        self.extents.insert(index, count, source)?;
        let mut changes = SlotChanges::default();
        if count == 0 {
            return Ok(changes);
        }
        if first_visible.is_some_and(|first| index < first) {
            let inserted = self.extents.offset_of(index + count) - self.extents.offset_of(index);
            self.anchor(inserted, &mut changes);
        }
        self.clamp_window();
        self.remap(
            |i| Some(if i >= index { i + count } else { i }),
            &mut changes,
        );
        self.fill(&mut changes);
        log_changes("insert", &changes);
        Ok(changes)
    }

    /// Removes the items `index..index + count`; their slots are destroyed.
    ///
    /// If the content no longer reaches the end of the visible rect, the rect slides back
    /// first, so items that stay on screen keep their slots.
    pub fn remove(&mut self, index: usize, count: usize) -> Result<SlotChanges, VirtualListError> {
        check_range(index, count, self.extents.len())?;
        let end = index + count;
        let first_visible = self.first_visible_index();
        let removed = self.extents.offset_of(end) - self.extents.offset_of(index);
        self.extents.remove(index, count)?;
        let mut changes = SlotChanges::default();
        if count == 0 {
            return Ok(changes);
        }
        if first_visible.is_some_and(|first| end <= first) {
            self.anchor(-removed, &mut changes);
        }
        self.clamp_window();
        self.remap(
            |i| {
                if i < index {
                    Some(i)
                } else if i < end {
                    None
                } else {
                    Some(i - count)
                }
            },
            &mut changes,
        );
        self.fill(&mut changes);
        log_changes("remove", &changes);
        Ok(changes)
    }

    /// Re-measures item `index`.
    ///
    /// A live item is reported in [`SlotChanges::to_refresh`]; if its extent changed, the
    /// items after it move.
    pub fn update(
        &mut self,
        index: usize,
        source: &mut dyn ExtentSource,
    ) -> Result<SlotChanges, VirtualListError> {
        check_range(index, 1, self.extents.len())?;
        let first_visible = self.first_visible_index();
        let old = self.extents.extent_of(index);
        let resized = self.extents.update(index, source)?;
        let mut changes = SlotChanges::default();
        if let Some(&slot) = self.live.get(&index) {
            changes.to_refresh.push(SlotChange {
                slot,
                index,
                rect: self.rect_of(index),
            });
        }
        if resized {
            if first_visible.is_some_and(|first| index < first) {
                let grown = self.extents.extent_of(index) - old;
                self.anchor(grown, &mut changes);
            }
            self.clamp_window();
            self.remap(Some, &mut changes);
            self.fill(&mut changes);
        }
        log_changes("update", &changes);
        Ok(changes)
    }

    /// Replaces all items; every live slot is destroyed and the visible range rebuilt.
    pub fn reset(
        &mut self,
        len: usize,
        source: &mut dyn ExtentSource,
    ) -> Result<SlotChanges, VirtualListError> {
        self.extents.reset(len, source)?;
        let mut changes = SlotChanges::default();
        self.clamp_window();
        self.remap(|_| None, &mut changes);
        self.fill(&mut changes);
        log_changes("reset", &changes);
        Ok(changes)
    }

    fn rect_of(&self, index: usize) -> Rect {
        stack_slot_rect(
            self.axis,
            self.extents.offset_of(index),
            self.extents.extent_of(index),
            self.cross_extent,
        )
    }

    fn first_visible_index(&self) -> Option<usize> {
        self.visible_range(self.visible_rect)
            .map(|range| range.first_index)
    }

    fn target_range(&self) -> Option<VisibleRange> {
        self.range_for(self.visible_rect, self.overscan)
    }

    fn range_for(&self, visible_rect: Rect, overscan: f64) -> Option<VisibleRange> {
        let len = self.extents.len();
        if len == 0 || !(visible_rect.width() > 0.0 && visible_rect.height() > 0.0) {
            return None;
        }
        let (start, end) = self.axis.span(visible_rect);
        let start = (start - overscan).max(0.0);
        let end = (end + overscan).min(self.extents.total_extent());
        if end <= start {
            return None;
        }

        let mut first_index = self.extents.index_at_offset(start);
        if self.extents.offset_of(first_index) + self.extents.extent_of(first_index) <= start {
            first_index += 1;
        }
        let mut last_index = self.extents.index_at_offset(end);
        if self.extents.offset_of(last_index) >= end {
            last_index = last_index.checked_sub(1)?;
        }
        (first_index <= last_index).then_some(VisibleRange {
            first_index,
            last_index,
        })
    }

    /// Slides the window back so it ends no later than the content, the way a scroll
    /// container clamps its offset after the content shrinks.
    fn clamp_window(&mut self) {
        let (start, end) = self.axis.span(self.visible_rect);
        let max_start = (self.extents.total_extent() - (end - start)).max(0.0);
        let clamped = start.min(max_start).max(0.0);
        if clamped != start {
            self.visible_rect =
                self.visible_rect + self.axis.pack_point(clamped - start, 0.0).to_vec2();
        }
    }

    fn anchor(&mut self, delta: f64, changes: &mut SlotChanges) {
        if !self.anchor_on_shift || delta == 0.0 {
            return;
        }
        self.visible_rect = self.visible_rect + self.axis.pack_point(delta, 0.0).to_vec2();
        changes.scroll_adjustment += delta;
    }

    /// Rebinds live slots through `map` (`None` means the item is gone) and releases the
    /// ones that end up outside the target range.
    fn remap(&mut self, mut map: impl FnMut(usize) -> Option<usize>, changes: &mut SlotChanges) {
        let mut bound: Vec<(usize, SlotId)> = self.live.drain().collect();
        bound.sort_unstable_by_key(|&(index, _)| index);
        let target = self.target_range();
        for (old_index, id) in bound {
            let Some(index) = map(old_index) else {
                if let Some(slot) = self.arena.release(id) {
                    changes.to_destroy.push(SlotChange {
                        slot: id,
                        index: old_index,
                        rect: slot.rect(),
                    });
                }
                continue;
            };
            let rect = self.rect_of(index);
            if !target.is_some_and(|range| range.contains(index)) {
                if self.arena.release(id).is_some() {
                    changes.to_destroy.push(SlotChange {
                        slot: id,
                        index,
                        rect,
                    });
                }
                continue;
            }
            let Some(slot) = self.arena.get_mut(id) else {
                continue;
            };
            if slot.index() != index || slot.rect() != rect {
                slot.rebind(index, rect);
                changes.to_reposition.push(SlotChange {
                    slot: id,
                    index,
                    rect,
                });
            }
            self.live.insert(index, id);
        }
    }

    /// Releases slots outside the target range, moves stale ones, and binds the missing.
    fn fill(&mut self, changes: &mut SlotChanges) {
        let target = self.target_range();
        let mut stale: Vec<usize> = self
            .live
            .keys()
            .copied()
            .filter(|&index| !target.is_some_and(|range| range.contains(index)))
            .collect();
        stale.sort_unstable();
        for index in stale {
            let Some(id) = self.live.remove(&index) else {
                continue;
            };
            if let Some(slot) = self.arena.release(id) {
                changes.to_destroy.push(SlotChange {
                    slot: id,
                    index,
                    rect: slot.rect(),
                });
            }
        }

        let Some(range) = target else {
            return;
        };
        for index in range.indices() {
            let rect = self.rect_of(index);
            match self.live.get(&index).copied() {
                Some(id) => {
                    let Some(slot) = self.arena.get_mut(id) else {
                        continue;
                    };
                    if slot.rect() != rect {
                        slot.rebind(index, rect);
                        changes.to_reposition.push(SlotChange {
                            slot: id,
                            index,
                            rect,
                        });
                    }
                }
                None => {
                    let id = self.arena.acquire(index, rect);
                    self.live.insert(index, id);
                    changes.to_create.push(SlotChange {
                        slot: id,
                        index,
                        rect,
                    });
                }
            }
        }
    }
}

fn log_changes(operation: &str, changes: &SlotChanges) {
    if !changes.is_empty() {
        log::debug!(
            "{operation}: {} created, {} destroyed, {} repositioned, {} refreshed",
            changes.to_create.len(),
            changes.to_destroy.len(),
            changes.to_reposition.len(),
            changes.to_refresh.len(),
        );
    }
}
