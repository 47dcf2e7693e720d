// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change events and errors.

/// A single change to a [`Model`](crate::Model), expressed in row indices.
///
/// Indices are relative to the model state *before* the change for removals and
/// *after* the change for insertions, which is the order a consumer needs to replay
/// them against its own mirror of the row count.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ModelEvent {
    /// `count` rows were inserted starting at `index`.
    Inserted {
        /// First inserted row.
        index: usize,
        /// Number of inserted rows.
        count: usize,
    },
    /// `count` rows starting at `index` were removed.
    Removed {
        /// First removed row.
        index: usize,
        /// Number of removed rows.
        count: usize,
    },
    /// The data of row `index` changed in place.
    Changed {
        /// Updated row.
        index: usize,
    },
    /// The whole model was replaced; consumers should rebuild from scratch.
    Reset,
}

impl ModelEvent {
    /// Returns the row count after applying this event to a model of `len` rows.
    ///
    /// Returns `None` for [`ModelEvent::Reset`], where the new length must be read
    /// from the model, and when the event does not fit a model of `len` rows.
    #[must_use]
    pub fn apply_to_len(self, len: usize) -> Option<usize> {
        match self {
            Self::Inserted { index, count } => (index <= len).then(|| len + count),
            Self::Removed { index, count } => {
                let end = index.checked_add(count)?;
                (end <= len).then(|| len - count)
            }
            Self::Changed { index } => (index < len).then_some(len),
            Self::Reset => None,
        }
    }
}

/// Errors reported by model mutations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// A mutation referenced a row that does not exist.
    #[error("row {index} is out of range for a model of {len} rows")]
    IndexOutOfRange {
        /// The offending row index.
        index: usize,
        /// Row count at the time of the mutation.
        len: usize,
    },
}
