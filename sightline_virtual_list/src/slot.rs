// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pooled item slots and their generational handles.

use alloc::vec::Vec;

use kurbo::Rect;

/// Handle to a pooled [`ItemSlot`].
///
/// It consists of a pool index and a generation counter.
///
/// ## Semantics
///
/// - A slot allocated for the first time has generation `1`.
/// - Releasing a slot frees it; any existing `SlotId` that pointed to it is now stale.
/// - Rebinding a freed slot to another item increments its generation, producing a new,
///   distinct `SlotId`.
///
/// Stale ids never alias a slot that was rebound to a different item because the
/// generation must match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct SlotId(u32, u32);

impl SlotId {
    const fn idx(self) -> usize {
        self.0 as usize
    }

    /// Generation of the slot this handle refers to.
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.1
    }
}

bitflags::bitflags! {
    /// Interaction state carried by a slot while it stays bound to the same item.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct SlotFlags: u8 {
        /// The item holds keyboard focus.
        const FOCUSED = 0b0000_0001;
        /// The item is being edited in place.
        const EDITING = 0b0000_0010;
    }
}

/// A materialized element bound to one model index.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemSlot {
    index: usize,
    rect: Rect,
    live: bool,
    flags: SlotFlags,
}

impl ItemSlot {
    /// Model index the slot is bound to.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Rectangle of the item relative to the content origin.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Whether the slot is currently bound.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Interaction flags.
    #[must_use]
    pub fn flags(&self) -> SlotFlags {
        self.flags
    }

    /// Replaces the interaction flags.
    pub fn set_flags(&mut self, flags: SlotFlags) {
        self.flags = flags;
    }

    /// Sets or clears some interaction flags.
    pub fn set_flag(&mut self, flag: SlotFlags, on: bool) {
        self.flags.set(flag, on);
    }

    pub(crate) fn rebind(&mut self, index: usize, rect: Rect) {
        self.index = index;
        self.rect = rect;
    }
}

#[derive(Clone, Debug)]
struct Entry {
    generation: u32,
    slot: ItemSlot,
}

/// Free-list arena of reusable [`ItemSlot`]s.
///
/// Released slots keep their storage and are handed out again before the arena grows, so
/// its capacity tracks the peak number of simultaneously live slots.
#[derive(Clone, Debug, Default)]
pub struct SlotArena {
    entries: Vec<Entry>,
    free: Vec<u32>,
}

impl SlotArena {
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a slot to `index`, reusing a released one when available.
    ///
    /// Reused slots start with cleared flags.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "slot pools never approach u32::MAX entries"
    )]
    pub fn acquire(&mut self, index: usize, rect: Rect) -> SlotId {
        let slot = ItemSlot {
            index,
            rect,
            live: true,
            flags: SlotFlags::empty(),
        };
        if let Some(idx) = self.free.pop() {
            let entry = &mut self.entries[idx as usize];
            entry.generation = entry.generation.wrapping_add(1);
            entry.slot = slot;
            SlotId(idx, entry.generation)
        } else {
            let idx = self.entries.len() as u32;
            self.entries.push(Entry {
                generation: 1,
                slot,
            });
            SlotId(idx, 1)
        }
    }

    /// Returns the slot to the pool. Returns the released slot state, or `None` if `id`
    /// was stale.
    pub fn release(&mut self, id: SlotId) -> Option<ItemSlot> {
        let entry = self.entries.get_mut(id.idx())?;
        if entry.generation != id.1 || !entry.slot.live {
            return None;
        }
        entry.slot.live = false;
        self.free.push(id.0);
        Some(entry.slot.clone())
    }

    /// Returns the live slot addressed by `id`.
    #[must_use]
    pub fn get(&self, id: SlotId) -> Option<&ItemSlot> {
        self.entries
            .get(id.idx())
            .filter(|e| e.generation == id.1 && e.slot.live)
            .map(|e| &e.slot)
    }

    /// Returns the live slot addressed by `id` mutably.
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut ItemSlot> {
        self.entries
            .get_mut(id.idx())
            .filter(|e| e.generation == id.1 && e.slot.live)
            .map(|e| &mut e.slot)
    }

    /// Whether `id` still refers to a live slot.
    #[must_use]
    pub fn is_alive(&self, id: SlotId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live slots.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.entries.len() - self.free.len()
    }

    /// Number of slots ever allocated, live or pooled.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }
}
