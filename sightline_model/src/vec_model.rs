// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A `Vec`-backed [`Model`].

use alloc::vec::Vec;

use crate::{Model, ModelError, ModelEvent, ModelNotify};

/// A [`Model`] storing its rows in a `Vec`.
///
/// Every successful mutation broadcasts exactly one [`ModelEvent`]. Failed mutations
/// broadcast nothing and leave the rows untouched.
#[derive(Debug, Default)]
pub struct VecModel<T> {
    rows: Vec<T>,
    notify: ModelNotify,
}

impl<T> VecModel<T> {
    /// Creates an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            notify: ModelNotify::new(),
        }
    }

    /// Returns the rows as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.rows
    }

    /// Returns an iterator over the rows.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.rows.iter()
    }

    /// Appends a row at the end.
    pub fn push(&mut self, value: T) {
        let index = self.rows.len();
        self.rows.push(value);
        self.notify.notify(ModelEvent::Inserted { index, count: 1 });
    }

    /// Inserts a row at `index`, shifting later rows down.
    ///
    /// `index == row_count()` appends.
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), ModelError> {
        self.check_insert(index)?;
        self.rows.insert(index, value);
        self.notify.notify(ModelEvent::Inserted { index, count: 1 });
        Ok(())
    }

    /// Inserts all `values` starting at `index` as a single change.
    pub fn insert_many(
        &mut self,
        index: usize,
        values: impl IntoIterator<Item = T>,
    ) -> Result<(), ModelError> {
        self.check_insert(index)?;
        let tail = self.rows.split_off(index);
        self.rows.extend(values);
        let count = self.rows.len() - index;
        self.rows.extend(tail);
        if count > 0 {
            self.notify.notify(ModelEvent::Inserted { index, count });
        }
        Ok(())
    }

    /// Removes and returns the row at `index`.
    pub fn remove(&mut self, index: usize) -> Result<T, ModelError> {
        self.check_row(index)?;
        let value = self.rows.remove(index);
        self.notify.notify(ModelEvent::Removed { index, count: 1 });
        Ok(value)
    }

    /// Removes `count` rows starting at `index` as a single change.
    pub fn remove_range(&mut self, index: usize, count: usize) -> Result<(), ModelError> {
        let len = self.rows.len();
        match index.checked_add(count) {
            Some(end) if end <= len => {}
            _ => return Err(self.reject(index)),
        }
        if count == 0 {
            return Ok(());
        }
        self.rows.drain(index..index + count);
        self.notify.notify(ModelEvent::Removed { index, count });
        Ok(())
    }

    /// Replaces the row at `index`, returning the previous value.
    pub fn set_row_data(&mut self, index: usize, value: T) -> Result<T, ModelError> {
        self.check_row(index)?;
        let old = core::mem::replace(&mut self.rows[index], value);
        self.notify.notify(ModelEvent::Changed { index });
        Ok(old)
    }

    /// Edits the row at `index` in place.
    pub fn update<R>(
        &mut self,
        index: usize,
        edit: impl FnOnce(&mut T) -> R,
    ) -> Result<R, ModelError> {
        self.check_row(index)?;
        let result = edit(&mut self.rows[index]);
        self.notify.notify(ModelEvent::Changed { index });
        Ok(result)
    }

    /// Replaces all rows.
    pub fn set_vec(&mut self, rows: impl Into<Vec<T>>) {
        self.rows = rows.into();
        self.notify.notify(ModelEvent::Reset);
    }

    /// Removes all rows.
    pub fn clear(&mut self) {
        self.set_vec(Vec::new());
    }

    fn check_insert(&self, index: usize) -> Result<(), ModelError> {
        if index > self.rows.len() {
            return Err(self.reject(index));
        }
        Ok(())
    }

    fn check_row(&self, index: usize) -> Result<(), ModelError> {
        if index >= self.rows.len() {
            return Err(self.reject(index));
        }
        Ok(())
    }

    fn reject(&self, index: usize) -> ModelError {
        let len = self.rows.len();
        log::warn!("rejected model mutation at row {index} (row count {len})");
        ModelError::IndexOutOfRange { index, len }
    }
}

impl<T> Model for VecModel<T> {
    type Data = T;

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn row_data(&self, row: usize) -> Option<&T> {
        self.rows.get(row)
    }

    fn notify(&self) -> &ModelNotify {
        &self.notify
    }
}

impl<T> From<Vec<T>> for VecModel<T> {
    fn from(rows: Vec<T>) -> Self {
        Self {
            rows,
            notify: ModelNotify::new(),
        }
    }
}

impl<T> FromIterator<T> for VecModel<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<T>>())
    }
}
