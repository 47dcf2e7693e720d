// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for `ScrollViewport` clamping and coordinate conversion.

use kurbo::{Point, Size};
use proptest::prelude::*;
use sightline_viewport::ScrollViewport;

fn size() -> impl Strategy<Value = Size> {
    (0.0..2_000.0_f64, 0.0..2_000.0_f64).prop_map(|(w, h)| Size::new(w, h))
}

proptest! {
    #[test]
    fn content_viewport_roundtrip(
        visible in size(),
        content in size(),
        fx in 0.0..=1.0_f64,
        fy in 0.0..=1.0_f64,
        px in -5_000.0..5_000.0_f64,
        py in -5_000.0..5_000.0_f64,
    ) {
        let mut vp = ScrollViewport::new(visible, content);
        let max = vp.max_scroll();
        vp.scroll_to(max.x * fx, max.y * fy);

        let p = Point::new(px, py);
        let back = vp.viewport_to_content(vp.content_to_viewport(p));
        prop_assert!((back.x - p.x).abs() < 1e-9);
        prop_assert!((back.y - p.y).abs() < 1e-9);
    }

    #[test]
    fn scroll_offset_always_within_bounds(
        visible in size(),
        content in size(),
        ops in prop::collection::vec((-3_000.0..3_000.0_f64, -3_000.0..3_000.0_f64, 0_u8..4), 1..32),
    ) {
        let mut vp = ScrollViewport::new(visible, content);
        for (a, b, op) in ops {
            match op {
                0 => { vp.scroll_by(a, b); }
                1 => { vp.scroll_to(a, b); }
                2 => { vp.set_visible_size(a, b); }
                _ => { vp.set_content_size(a.abs(), b.abs()); }
            }
            let state = vp.state();
            let max = vp.max_scroll();
            prop_assert!(state.scroll_x >= 0.0 && state.scroll_x <= max.x);
            prop_assert!(state.scroll_y >= 0.0 && state.scroll_y <= max.y);
            prop_assert!(state.visible_width >= 0.0 && state.visible_height >= 0.0);
        }
    }
}
