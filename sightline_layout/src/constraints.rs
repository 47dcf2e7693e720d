// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Insets, Size};

use crate::geometry::{Axis, non_negative, non_negative_len};

/// Minimum and maximum size a container may take.
///
/// `max` components may be `f64::INFINITY` to express unbounded space. Both bounds are
/// kept non-negative and `min <= max` holds component-wise.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoxConstraints {
    /// Smallest allowed size.
    pub min: Size,
    /// Largest allowed size.
    pub max: Size,
}

impl BoxConstraints {
    /// Creates constraints, normalizing so that `min <= max` on each axis.
    #[must_use]
    pub fn new(min: Size, max: Size) -> Self {
        let min = non_negative(min);
        let max = non_negative(max);
        Self {
            min: Size::new(min.width.min(max.width), min.height.min(max.height)),
            max: Size::new(min.width.max(max.width), min.height.max(max.height)),
        }
    }

    /// Constraints that allow exactly `size`.
    #[must_use]
    pub fn tight(size: Size) -> Self {
        let size = non_negative(size);
        Self {
            min: size,
            max: size,
        }
    }

    /// Constraints from zero up to `max`.
    #[must_use]
    pub fn loose(max: Size) -> Self {
        Self::new(Size::ZERO, max)
    }

    /// Constraints without an upper bound.
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            min: Size::ZERO,
            max: Size::new(f64::INFINITY, f64::INFINITY),
        }
    }

    /// Clamps `size` into these constraints.
    #[must_use]
    pub fn constrain(&self, size: Size) -> Size {
        let size = non_negative(size);
        Size::new(
            size.width.clamp(self.min.width, self.max.width),
            size.height.clamp(self.min.height, self.max.height),
        )
    }

    /// Returns the fixed extent across `axis`, if the constraints pin it to one finite value.
    #[must_use]
    pub fn fixed_len(&self, axis: Axis) -> Option<f64> {
        let min = axis.main_len(self.min);
        let max = axis.main_len(self.max);
        (min == max && max.is_finite()).then_some(max)
    }

    /// Shrinks both bounds by `insets`, keeping them non-negative.
    #[must_use]
    pub fn deflate(&self, insets: Insets) -> Self {
        let dx = insets.x_value();
        let dy = insets.y_value();
        let shrink = |size: Size| {
            Size::new(
                non_negative_len(size.width - dx),
                non_negative_len(size.height - dy),
            )
        };
        Self {
            min: shrink(self.min),
            max: shrink(self.max),
        }
    }
}

impl Default for BoxConstraints {
    fn default() -> Self {
        Self::unbounded()
    }
}
