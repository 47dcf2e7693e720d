// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Variable-extent model backed by a Fenwick tree.

use alloc::vec::Vec;

use crate::error::checked_extent;
use crate::fixed::finite_gap;
use crate::model::check_range;
use crate::{ExtentModel, ExtentSource, VirtualListError};

/// Extent model for items of differing extents.
///
/// Each item contributes a *stride* (its extent plus the spacing) to a Fenwick tree, so
/// offsets, index lookups and single-item updates are `O(log n)`. Inserting, removing or
/// resetting rebuilds the tree in `O(n)`.
#[derive(Clone, Debug)]
pub struct PrefixSumExtentModel {
    extents: Vec<f64>,
    /// 1-based Fenwick tree over strides; `tree[0]` is unused.
    tree: Vec<f64>,
    spacing: f64,
}

impl PrefixSumExtentModel {
    /// Creates an empty model with no spacing.
    #[must_use]
    pub fn new() -> Self {
        Self {
            extents: Vec::new(),
            tree: alloc::vec![0.0],
            spacing: 0.0,
        }
    }

    /// Creates an empty model with the given gap between consecutive items.
    #[must_use]
    pub fn with_spacing(spacing: f64) -> Self {
        let mut model = Self::new();
        model.spacing = finite_gap(spacing);
        model
    }

    /// Builds a model from a list of extents.
    pub fn from_extents(
        extents: impl IntoIterator<Item = f64>,
        spacing: f64,
    ) -> Result<Self, VirtualListError> {
        let extents = extents
            .into_iter()
            .enumerate()
            .map(|(index, extent)| checked_extent(index, extent))
            .collect::<Result<Vec<_>, _>>()?;
        let mut model = Self::with_spacing(spacing);
        model.extents = extents;
        model.rebuild();
        Ok(model)
    }

    /// Sets the extent of item `index` directly.
    pub fn set_extent(&mut self, index: usize, extent: f64) -> Result<bool, VirtualListError> {
        self.update(index, &mut |_: usize| extent)
    }

    /// The per-item extents in order.
    #[must_use]
    pub fn extents(&self) -> &[f64] {
        &self.extents
    }

    fn stride(&self, extent: f64) -> f64 {
        extent + self.spacing
    }

    /// Rebuilds the tree from `extents` in linear time.
    fn rebuild(&mut self) {
        let n = self.extents.len();
        self.tree.clear();
        self.tree.reserve(n + 1);
        self.tree.push(0.0);
        for &extent in &self.extents {
            self.tree.push(extent + self.spacing);
        }
        for i in 1..=n {
            let parent = i + lowest_bit(i);
            if parent <= n {
                let value = self.tree[i];
                self.tree[parent] += value;
            }
        }
    }

    /// Sum of the first `count` strides.
    fn prefix(&self, count: usize) -> f64 {
        let mut i = count.min(self.extents.len());
        let mut sum = 0.0;
        while i > 0 {
            sum += self.tree[i];
            i -= lowest_bit(i);
        }
        sum
    }

    fn add(&mut self, index: usize, delta: f64) {
        let n = self.extents.len();
        let mut i = index + 1;
        while i <= n {
            self.tree[i] += delta;
            i += lowest_bit(i);
        }
    }

    fn measure(
        start: usize,
        count: usize,
        source: &mut dyn ExtentSource,
    ) -> Result<Vec<f64>, VirtualListError> {
        (start..start + count)
            .map(|index| checked_extent(index, source.extent(index)))
            .collect()
    }
}

impl Default for PrefixSumExtentModel {
    fn default() -> Self {
        Self::new()
    }
}

fn lowest_bit(i: usize) -> usize {
    i & i.wrapping_neg()
}

impl ExtentModel for PrefixSumExtentModel {
    fn len(&self) -> usize {
        self.extents.len()
    }

    fn spacing(&self) -> f64 {
        self.spacing
    }

    fn extent_of(&self, index: usize) -> f64 {
        self.extents.get(index).copied().unwrap_or(0.0)
    }

    fn offset_of(&self, index: usize) -> f64 {
        self.prefix(index)
    }

    fn total_extent(&self) -> f64 {
        if self.extents.is_empty() {
            0.0
        } else {
            self.prefix(self.extents.len()) - self.spacing
        }
    }

    fn index_at_offset(&self, offset: f64) -> usize {
        let n = self.extents.len();
        if n == 0 || offset.is_nan() || offset < 0.0 {
            return 0;
        }
        // Descend the tree looking for the longest prefix whose sum stays <= offset.
        let mut pos = 0;
        let mut remaining = offset;
        let mut step = 1_usize << (usize::BITS - 1 - n.leading_zeros());
        while step > 0 {
            let next = pos + step;
            if next <= n && self.tree[next] <= remaining {
                pos = next;
                remaining -= self.tree[next];
            }
            step >>= 1;
        }
        pos.min(n - 1)
    }

    fn insert(
        &mut self,
        index: usize,
        count: usize,
        source: &mut dyn ExtentSource,
    ) -> Result<(), VirtualListError> {
        let len = self.extents.len();
        if index > len {
            return Err(VirtualListError::IndexOutOfRange { index, len });
        }
        let fresh = Self::measure(index, count, source)?;
        self.extents.splice(index..index, fresh);
        self.rebuild();
        Ok(())
    }

    fn remove(&mut self, index: usize, count: usize) -> Result<(), VirtualListError> {
        check_range(index, count, self.extents.len())?;
        self.extents.drain(index..index + count);
        self.rebuild();
        Ok(())
    }

    fn update(
        &mut self,
        index: usize,
        source: &mut dyn ExtentSource,
    ) -> Result<bool, VirtualListError> {
        check_range(index, 1, self.extents.len())?;
        let extent = checked_extent(index, source.extent(index))?;
        let old = self.extents[index];
        if old == extent {
            return Ok(false);
        }
        self.extents[index] = extent;
        self.add(index, self.stride(extent) - self.stride(old));
        Ok(true)
    }

    fn reset(
        &mut self,
        len: usize,
        source: &mut dyn ExtentSource,
    ) -> Result<(), VirtualListError> {
        self.extents = Self::measure(0, len, source)?;
        self.rebuild();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::PrefixSumExtentModel;
    use crate::{ExtentModel, VirtualListError};

    fn naive_offset(extents: &[f64], spacing: f64, index: usize) -> f64 {
        extents.iter().take(index).map(|e| e + spacing).sum()
    }

    #[test]
    fn matches_naive_prefix_sums() {
        let extents: Vec<f64> = (0..37).map(|i| f64::from(i % 5) * 4.0 + 8.0).collect();
        let m = PrefixSumExtentModel::from_extents(extents.clone(), 2.0).unwrap();
        for i in 0..=extents.len() {
            assert_eq!(m.offset_of(i), naive_offset(&extents, 2.0, i), "offset {i}");
        }
        assert_eq!(
            m.total_extent(),
            naive_offset(&extents, 2.0, extents.len()) - 2.0
        );
    }

    #[test]
    fn index_at_offset_finds_item_start() {
        let m = PrefixSumExtentModel::from_extents([10.0, 20.0, 30.0, 40.0], 0.0).unwrap();
        assert_eq!(m.index_at_offset(-1.0), 0);
        assert_eq!(m.index_at_offset(0.0), 0);
        assert_eq!(m.index_at_offset(9.0), 0);
        assert_eq!(m.index_at_offset(10.0), 1);
        assert_eq!(m.index_at_offset(29.0), 1);
        assert_eq!(m.index_at_offset(30.0), 2);
        assert_eq!(m.index_at_offset(60.0), 3);
        assert_eq!(m.index_at_offset(1_000.0), 3);
    }

    #[test]
    fn update_adjusts_following_offsets() {
        let mut m = PrefixSumExtentModel::from_extents([10.0; 8], 1.0).unwrap();
        assert_eq!(m.offset_of(5), 55.0);
        assert_eq!(m.set_extent(2, 25.0), Ok(true));
        assert_eq!(m.offset_of(2), 22.0);
        assert_eq!(m.offset_of(3), 48.0);
        assert_eq!(m.offset_of(5), 70.0);
        assert_eq!(m.set_extent(2, 25.0), Ok(false));
    }

    #[test]
    fn insert_and_remove_rebuild() {
        let mut m = PrefixSumExtentModel::from_extents([10.0, 10.0], 0.0).unwrap();
        m.insert(1, 2, &mut |i: usize| f64::from(u8::try_from(i).unwrap()) * 100.0)
            .unwrap();
        assert_eq!(m.extents(), &[10.0, 100.0, 200.0, 10.0]);
        m.remove(0, 2).unwrap();
        assert_eq!(m.extents(), &[200.0, 10.0]);
        assert_eq!(m.total_extent(), 210.0);
    }

    #[test]
    fn invalid_extent_leaves_model_unchanged() {
        let mut m = PrefixSumExtentModel::from_extents([10.0, 10.0], 0.0).unwrap();
        let err = m.insert(1, 3, &mut |i: usize| if i == 2 { -4.0 } else { 5.0 });
        assert_eq!(
            err,
            Err(VirtualListError::InvalidExtent {
                index: 2,
                extent: -4.0
            })
        );
        assert_eq!(m.extents(), &[10.0, 10.0]);
        assert!(m.reset(4, &mut |_: usize| f64::NAN).is_err());
        assert_eq!(m.len(), 2);
        assert!(m.set_extent(5, 1.0).is_err());
    }

    #[test]
    fn reset_replaces_everything() {
        let mut m = PrefixSumExtentModel::with_spacing(5.0);
        m.reset(3, &mut |_: usize| 20.0).unwrap();
        assert_eq!(m.extents(), vec![20.0; 3].as_slice());
        assert_eq!(m.total_extent(), 70.0);
        m.reset(0, &mut |_: usize| 20.0).unwrap();
        assert_eq!(m.total_extent(), 0.0);
    }
}
