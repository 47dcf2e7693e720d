// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Errors reported by extent models and the [`Virtualizer`](crate::Virtualizer).
///
/// Every operation that returns one of these leaves its receiver unchanged.
#[derive(Copy, Clone, Debug, PartialEq, Error)]
pub enum VirtualListError {
    /// An index or range did not fit the current item count.
    #[error("index {index} is out of range for a list of {len} items")]
    IndexOutOfRange {
        /// The offending index (the start of the range for ranged operations).
        index: usize,
        /// Item count at the time of the call.
        len: usize,
    },
    /// An extent source produced a negative or non-finite extent.
    #[error("item {index} reported an invalid extent of {extent}")]
    InvalidExtent {
        /// Index of the item being measured.
        index: usize,
        /// The rejected value.
        extent: f64,
    },
}

/// Validates an extent coming from an [`ExtentSource`](crate::ExtentSource).
pub(crate) fn checked_extent(index: usize, extent: f64) -> Result<f64, VirtualListError> {
    if extent.is_finite() && extent >= 0.0 {
        // Fold -0.0 into 0.0.
        Ok(extent + 0.0)
    } else {
        Err(VirtualListError::InvalidExtent { index, extent })
    }
}
