// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests: after any mix of model edits, scrolls and resizes, the list shows
//! exactly the rows overlapping its window and the scroll offset stays in range. With
//! anchoring on, inserts above the window move rows without churning their slots.

use proptest::prelude::*;
use sightline_model::VecModel;
use sightline_scroll::{FixedListView, ListView, ListViewConfig};

const ROW: f64 = 30.0;

#[derive(Clone, Debug)]
enum Op {
    Insert { at: usize, count: usize },
    Remove { at: usize, count: usize },
    Scroll(u32),
    Resize(u32),
    Current(isize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0_usize..400, 1_usize..40).prop_map(|(at, count)| Op::Insert { at, count }),
        (0_usize..400, 1_usize..40).prop_map(|(at, count)| Op::Remove { at, count }),
        (0_u32..15_000).prop_map(Op::Scroll),
        (0_u32..400).prop_map(Op::Resize),
        (-2_isize..400).prop_map(Op::Current),
    ]
}

fn apply(model: &mut VecModel<usize>, list: &mut FixedListView, op: Op) {
    let len = model.as_slice().len();
    match op {
        Op::Insert { at, count } => {
            let at = at.min(len);
            model.insert_many(at, 0..count).unwrap();
            list.sync(model).unwrap();
        }
        Op::Remove { at, count } => {
            if len == 0 {
                return;
            }
            let at = at % len;
            let count = count.min(len - at);
            model.remove_range(at, count).unwrap();
            list.sync(model).unwrap();
        }
        Op::Scroll(y) => {
            list.scroll_to(0.0, f64::from(y));
        }
        Op::Resize(height) => {
            list.set_visible_size(200.0, f64::from(height));
        }
        Op::Current(index) => {
            list.set_current_item(index);
        }
    }
}

fn expected_rows(len: usize, scroll_y: f64, height: f64) -> Vec<usize> {
    if height <= 0.0 {
        return Vec::new();
    }
    (0..len)
        .filter(|&i| {
            let top = i as f64 * ROW;
            top < scroll_y + height && top + ROW > scroll_y
        })
        .collect()
}

proptest! {
    #[test]
    fn live_rows_match_the_window(
        initial in 0_usize..300,
        ops in prop::collection::vec(op(), 1..30),
    ) {
        let mut model: VecModel<usize> = (0..initial).collect();
        let config = ListViewConfig {
            row_height: ROW,
            spacing: 0.0,
            ..ListViewConfig::default()
        };
        let mut list = ListView::fixed(&model, config).unwrap();
        list.set_visible_size(200.0, 150.0);

        for op in ops {
            apply(&mut model, &mut list, op);

            let len = model.as_slice().len();
            let state = list.scroll().state();
            let max_scroll = (len as f64 * ROW - state.visible_height).max(0.0);
            prop_assert_eq!(list.len(), len);
            prop_assert!(state.scroll_y >= 0.0 && state.scroll_y <= max_scroll);

            let live: Vec<usize> = list.live_items().map(|item| item.index).collect();
            prop_assert_eq!(live, expected_rows(len, state.scroll_y, state.visible_height));

            let current = list.current_item();
            prop_assert!(current >= -1 && current < len as isize);
        }
    }

    #[test]
    fn anchored_insert_above_the_window_only_moves_rows(
        len in 10_usize..2_000,
        scroll in 0_u32..60_000,
        at in 0_usize..2_000,
        count in 1_usize..5,
    ) {
        let mut model: VecModel<usize> = (0..len).collect();
        let config = ListViewConfig {
            row_height: ROW,
            spacing: 0.0,
            anchor_on_shift: true,
            ..ListViewConfig::default()
        };
        let mut list = ListView::fixed(&model, config).unwrap();
        list.set_visible_size(200.0, 150.0);
        list.scroll_to(0.0, f64::from(scroll));
        let before: Vec<_> = list.live_items().collect();
        let first = before.first().map_or(0, |item| item.index);
        if first == 0 {
            return Ok(());
        }

        model.insert_many(at % first, 0..count).unwrap();
        let changes = list.sync(&model).unwrap();
        let shift = count as f64 * ROW;
        prop_assert!(changes.to_create.is_empty());
        prop_assert!(changes.to_destroy.is_empty());
        prop_assert_eq!(changes.scroll_adjustment, shift);

        let after: Vec<_> = list.live_items().collect();
        prop_assert_eq!(after.len(), before.len());
        for (old, new) in before.iter().zip(&after) {
            prop_assert_eq!(new.slot, old.slot);
            prop_assert_eq!(new.index, old.index + count);
            prop_assert_eq!(new.rect.y0, old.rect.y0 + shift);
            prop_assert_eq!(new.viewport_rect, old.viewport_rect);
        }
    }
}
