// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-extent model: every item has the same extent.

use crate::error::checked_extent;
use crate::model::check_range;
use crate::{ExtentModel, ExtentSource, VirtualListError};

/// Extent model where every item shares one extent.
///
/// Offsets and index lookups are `O(1)`. Extent sources passed to mutations are ignored;
/// the shared extent is validated once at construction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FixedExtentModel {
    len: usize,
    extent: f64,
    spacing: f64,
}

impl FixedExtentModel {
    /// Creates a model of `len` items of `extent` each, with no spacing.
    pub fn new(len: usize, extent: f64) -> Result<Self, VirtualListError> {
        let extent = checked_extent(0, extent)?;
        Ok(Self {
            len,
            extent,
            spacing: 0.0,
        })
    }

    /// Sets the gap between consecutive items. Negative or non-finite values become `0`.
    #[must_use]
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = finite_gap(spacing);
        self
    }

    /// The shared item extent.
    #[must_use]
    pub fn item_extent(&self) -> f64 {
        self.extent
    }

    /// Distance between the starts of consecutive items.
    #[must_use]
    pub fn stride(&self) -> f64 {
        self.extent + self.spacing
    }
}

pub(crate) fn finite_gap(spacing: f64) -> f64 {
    if spacing.is_finite() && spacing > 0.0 {
        spacing
    } else {
        0.0
    }
}

impl ExtentModel for FixedExtentModel {
    fn len(&self) -> usize {
        self.len
    }

    fn spacing(&self) -> f64 {
        self.spacing
    }

    fn extent_of(&self, index: usize) -> f64 {
        if index < self.len { self.extent } else { 0.0 }
    }

    fn offset_of(&self, index: usize) -> f64 {
        index.min(self.len) as f64 * self.stride()
    }

    fn total_extent(&self) -> f64 {
        if self.len == 0 {
            0.0
        } else {
            self.offset_of(self.len) - self.spacing
        }
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "the quotient is non-negative and clamped to len - 1"
    )]
    fn index_at_offset(&self, offset: f64) -> usize {
        if self.len == 0 || offset.is_nan() || offset <= 0.0 {
            return 0;
        }
        let stride = self.stride();
        if stride <= 0.0 {
            return self.len - 1;
        }
        ((offset / stride) as usize).min(self.len - 1)
    }

    fn insert(
        &mut self,
        index: usize,
        count: usize,
        _source: &mut dyn ExtentSource,
    ) -> Result<(), VirtualListError> {
        if index > self.len {
            return Err(VirtualListError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        self.len += count;
        Ok(())
    }

    fn remove(&mut self, index: usize, count: usize) -> Result<(), VirtualListError> {
        check_range(index, count, self.len)?;
        self.len -= count;
        Ok(())
    }

    fn update(
        &mut self,
        index: usize,
        _source: &mut dyn ExtentSource,
    ) -> Result<bool, VirtualListError> {
        check_range(index, 1, self.len)?;
        Ok(false)
    }

    fn reset(
        &mut self,
        len: usize,
        _source: &mut dyn ExtentSource,
    ) -> Result<(), VirtualListError> {
        self.len = len;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::FixedExtentModel;
    use crate::{ExtentModel, VirtualListError};

    #[test]
    fn offsets_and_lookup() {
        let m = FixedExtentModel::new(10, 30.0).unwrap().with_spacing(2.0);
        assert_eq!(m.offset_of(0), 0.0);
        assert_eq!(m.offset_of(3), 96.0);
        assert_eq!(m.offset_of(99), m.offset_of(10));
        assert_eq!(m.total_extent(), 10.0 * 30.0 + 9.0 * 2.0);
        assert_eq!(m.index_at_offset(-5.0), 0);
        assert_eq!(m.index_at_offset(95.9), 2);
        assert_eq!(m.index_at_offset(96.0), 3);
        assert_eq!(m.index_at_offset(10_000.0), 9);
    }

    #[test]
    fn empty_model_has_no_extent() {
        let m = FixedExtentModel::new(0, 30.0).unwrap().with_spacing(4.0);
        assert_eq!(m.total_extent(), 0.0);
        assert_eq!(m.index_at_offset(50.0), 0);
        assert!(m.is_empty());
    }

    #[test]
    fn rejects_invalid_extent_and_ranges() {
        assert!(matches!(
            FixedExtentModel::new(3, -1.0),
            Err(VirtualListError::InvalidExtent { .. })
        ));
        let mut m = FixedExtentModel::new(3, 10.0).unwrap();
        assert_eq!(
            m.remove(2, 2),
            Err(VirtualListError::IndexOutOfRange { index: 2, len: 3 })
        );
        assert!(m.insert(4, 1, &mut |_: usize| 10.0).is_err());
        assert_eq!(m.len(), 3);
        m.insert(3, 2, &mut |_: usize| 10.0).unwrap();
        assert_eq!(m.len(), 5);
    }
}
