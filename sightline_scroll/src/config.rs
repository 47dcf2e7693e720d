// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Insets;

use crate::StyleMetrics;

/// Configuration of a [`ListView`](crate::ListView), resolved at construction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ListViewConfig {
    /// Row height; also the initial estimate for rows of variable height.
    pub row_height: f64,
    /// Gap between consecutive rows.
    pub spacing: f64,
    /// Distance materialized beyond each end of the visible window.
    pub overscan: f64,
    /// Rows are never narrower than this; wider content scrolls horizontally.
    pub min_content_width: f64,
    /// Keep the visible rows in place when rows above them are inserted or removed.
    pub anchor_on_shift: bool,
}

impl ListViewConfig {
    /// Builds a configuration from style metrics.
    #[must_use]
    pub fn from_metrics(metrics: &StyleMetrics) -> Self {
        Self {
            row_height: metrics.row_height,
            spacing: metrics.spacing,
            overscan: 0.0,
            min_content_width: 0.0,
            anchor_on_shift: false,
        }
    }

    /// Sets the overscan distance.
    #[must_use]
    pub fn with_overscan(mut self, overscan: f64) -> Self {
        self.overscan = overscan;
        self
    }

    /// Sets the minimum content width.
    #[must_use]
    pub fn with_min_content_width(mut self, width: f64) -> Self {
        self.min_content_width = width;
        self
    }

    /// Enables or disables scroll anchoring.
    #[must_use]
    pub fn with_anchor_on_shift(mut self, anchor: bool) -> Self {
        self.anchor_on_shift = anchor;
        self
    }
}

impl Default for ListViewConfig {
    fn default() -> Self {
        Self::from_metrics(&StyleMetrics::default())
    }
}

/// Configuration of a box laid out inside a [`ScrollView`](crate::ScrollView).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BoxConfig {
    /// Gap between consecutive children.
    pub spacing: f64,
    /// Outer padding of the box.
    pub padding: Insets,
    /// Grid cells are at least this wide.
    pub min_cell_width: f64,
}

impl BoxConfig {
    /// Builds a configuration from style metrics.
    #[must_use]
    pub fn from_metrics(metrics: &StyleMetrics) -> Self {
        Self {
            spacing: metrics.spacing,
            padding: metrics.padding,
            min_cell_width: metrics.min_cell_width,
        }
    }
}
