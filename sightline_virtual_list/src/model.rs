// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core extent model trait.

use crate::VirtualListError;

/// Supplies the extent of newly inserted or re-measured items.
///
/// Any `FnMut(usize) -> f64` closure is a source. Indices passed to the source are the
/// item's index *after* the mutation being applied.
pub trait ExtentSource {
    /// Returns the extent of item `index` along the list's main axis.
    fn extent(&mut self, index: usize) -> f64;
}

impl<F: FnMut(usize) -> f64> ExtentSource for F {
    fn extent(&mut self, index: usize) -> f64 {
        self(index)
    }
}

/// A dense 1D strip of items `0..len` with per-item extents.
///
/// Items are laid out back to back along the main axis, separated by a fixed
/// [`spacing`](Self::spacing) that appears only between consecutive items. Implementations
/// must keep every extent finite and non-negative and reject anything else with
/// [`VirtualListError::InvalidExtent`] without modifying themselves.
pub trait ExtentModel {
    /// Number of items.
    fn len(&self) -> usize;

    /// Returns `true` if there are no items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Gap between consecutive items.
    fn spacing(&self) -> f64;

    /// Extent of item `index`, or `0.0` if `index` is out of range.
    fn extent_of(&self, index: usize) -> f64;

    /// Start offset of item `index`.
    ///
    /// `index` is clamped to `len`; `offset_of(len)` is the sum of all extents plus one
    /// spacing per item, i.e. where an appended item would start.
    fn offset_of(&self, index: usize) -> f64;

    /// Total extent of the strip: all extents plus the spacing between them.
    fn total_extent(&self) -> f64;

    /// Largest index whose start offset is `<= offset`, clamped to `len - 1`.
    ///
    /// Returns `0` for negative offsets and for an empty model.
    fn index_at_offset(&self, offset: f64) -> usize;

    /// Inserts `count` items before `index`, measuring them with `source`.
    fn insert(
        &mut self,
        index: usize,
        count: usize,
        source: &mut dyn ExtentSource,
    ) -> Result<(), VirtualListError>;

    /// Removes the items `index..index + count`.
    fn remove(&mut self, index: usize, count: usize) -> Result<(), VirtualListError>;

    /// Re-measures item `index`. Returns `true` if its extent changed.
    fn update(
        &mut self,
        index: usize,
        source: &mut dyn ExtentSource,
    ) -> Result<bool, VirtualListError>;

    /// Replaces the whole strip with `len` items measured by `source`.
    fn reset(&mut self, len: usize, source: &mut dyn ExtentSource)
    -> Result<(), VirtualListError>;
}

/// Validates that `index..index + count` lies within `0..len`.
pub(crate) fn check_range(index: usize, count: usize, len: usize) -> Result<(), VirtualListError> {
    match index.checked_add(count) {
        Some(end) if end <= len => Ok(()),
        _ => Err(VirtualListError::IndexOutOfRange { index, len }),
    }
}
