// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use sightline_model::ModelError;
use sightline_virtual_list::VirtualListError;
use thiserror::Error;

/// Errors surfaced by the scrollable containers.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ScrollError {
    /// A model mutation was rejected.
    #[error(transparent)]
    Model(#[from] ModelError),
    /// The virtualizer rejected an edit or an item extent.
    #[error(transparent)]
    VirtualList(#[from] VirtualListError),
}
