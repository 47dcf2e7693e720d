// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end scrolling scenarios over a large fixed-height list.

use kurbo::Rect;
use sightline_virtual_list::{FixedExtentModel, Virtualizer, VisibleRange};

fn thousand_rows() -> Virtualizer<FixedExtentModel> {
    let mut list = Virtualizer::new(FixedExtentModel::new(1000, 30.0).unwrap());
    list.set_cross_extent(200.0);
    list
}

fn window(scroll_y: f64) -> Rect {
    Rect::new(0.0, scroll_y, 200.0, scroll_y + 150.0)
}

#[test]
fn five_rows_at_the_top() {
    let mut list = thousand_rows();
    let changes = list.recompute(window(0.0));
    assert_eq!(changes.created_indices(), [0, 1, 2, 3, 4]);
    assert_eq!(list.live_count(), 5);
    assert_eq!(list.content_extent(), 30_000.0);
}

#[test]
fn partial_row_adds_a_sixth_slot() {
    let mut list = thousand_rows();
    list.recompute(window(10.0));
    assert_eq!(
        list.materialized_range(),
        Some(VisibleRange {
            first_index: 0,
            last_index: 5
        })
    );
}

#[test]
fn scrolling_to_300_swaps_the_whole_window() {
    let mut list = thousand_rows();
    list.recompute(window(0.0));
    let changes = list.recompute(window(300.0));
    assert_eq!(changes.destroyed_indices(), [0, 1, 2, 3, 4]);
    assert_eq!(changes.created_indices(), [10, 11, 12, 13, 14]);
    assert!(changes.to_reposition.is_empty());

    let rects: Vec<Rect> = list.live_slots().map(|(_, slot)| slot.rect()).collect();
    assert_eq!(rects[0], Rect::new(0.0, 300.0, 200.0, 330.0));
    assert_eq!(rects[4], Rect::new(0.0, 420.0, 200.0, 450.0));

    let changes = list.recompute(window(305.0));
    assert_eq!(changes.created_indices(), [15]);
    assert!(changes.to_destroy.is_empty());
}

#[test]
fn small_steps_only_touch_the_edges() {
    let mut list = thousand_rows();
    list.recompute(window(0.0));
    let mut y = 0.0;
    for _ in 0..100 {
        y += 7.5;
        let changes = list.recompute(window(y));
        assert!(changes.to_create.len() <= 1);
        assert!(changes.to_destroy.len() <= 1);
        assert!(list.live_count() <= 6);
    }
}

#[test]
fn jumping_to_the_end() {
    let mut list = thousand_rows();
    list.recompute(window(0.0));
    let changes = list.recompute(window(30_000.0 - 150.0));
    assert_eq!(changes.created_indices(), [995, 996, 997, 998, 999]);
    assert_eq!(list.index_at_point(kurbo::Point::new(10.0, 29_999.0)), Some(999));
}
