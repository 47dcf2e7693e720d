// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `sightline_virtual_list`: scroll recompute and structural edits.

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::Rect;
use sightline_virtual_list::{
    ExtentModel, FixedExtentModel, PrefixSumExtentModel, Virtualizer,
};

const SIZES: [usize; 2] = [100_000, 1_000_000];

fn window(scroll_y: f64) -> Rect {
    Rect::new(0.0, scroll_y, 400.0, scroll_y + 800.0)
}

fn measured(len: usize) -> PrefixSumExtentModel {
    // Rows of 20, 30, 40 and 50.
    let heights = (0..len).map(|i| 20.0 + (i % 4) as f64 * 10.0);
    PrefixSumExtentModel::from_extents(heights, 1.0).unwrap()
}

/// Scrolls through the list in small steps, the common case for wheel input.
fn scroll_steps<E: ExtentModel>(list: &mut Virtualizer<E>, steps: usize, delta: f64) -> usize {
    let mut y = 0.0;
    let mut churn = 0;
    for _ in 0..steps {
        y += delta;
        let changes = list.recompute(window(y));
        churn += changes.to_create.len() + changes.to_destroy.len();
    }
    churn
}

fn bench_recompute(c: &mut Criterion) {
    let mut group = c.benchmark_group("virtual_list/recompute");
    for len in SIZES {
        group.bench_function(BenchmarkId::new("fixed/steps", len), |b| {
            let mut list = Virtualizer::new(FixedExtentModel::new(len, 30.0).unwrap());
            list.set_cross_extent(400.0);
            b.iter(|| {
                list.recompute(window(0.0));
                black_box(scroll_steps(&mut list, 100, 17.0))
            });
        });

        group.bench_function(BenchmarkId::new("prefix_sum/steps", len), |b| {
            let mut list = Virtualizer::new(measured(len)).with_overscan(200.0);
            list.set_cross_extent(400.0);
            b.iter(|| {
                list.recompute(window(0.0));
                black_box(scroll_steps(&mut list, 100, 17.0))
            });
        });

        group.bench_function(BenchmarkId::new("prefix_sum/jump", len), |b| {
            let mut list = Virtualizer::new(measured(len));
            list.set_cross_extent(400.0);
            let end = list.content_extent() - 800.0;
            b.iter(|| {
                black_box(list.recompute(window(0.0)));
                black_box(list.recompute(window(end * 0.5)));
                black_box(list.recompute(window(end)));
            });
        });
    }
    group.finish();
}

fn bench_edits(c: &mut Criterion) {
    let mut group = c.benchmark_group("virtual_list/edit");
    for len in SIZES {
        group.bench_function(BenchmarkId::new("prefix_sum/update", len), |b| {
            let mut list = Virtualizer::new(measured(len));
            list.set_cross_extent(400.0);
            list.recompute(window(1000.0));
            let mut i = 0_usize;
            b.iter(|| {
                i = (i + 7919) % len;
                let height = if i % 2 == 0 { 25.0 } else { 35.0 };
                black_box(list.update(i, &mut |_: usize| height).unwrap())
            });
        });

        group.bench_function(BenchmarkId::new("prefix_sum/insert", len), |b| {
            b.iter_batched(
                || {
                    let mut list = Virtualizer::new(measured(len));
                    list.set_cross_extent(400.0);
                    list.recompute(window(1000.0));
                    list
                },
                |mut list| black_box(list.insert(len / 2, 10, &mut |_: usize| 30.0).unwrap()),
                BatchSize::LargeInput,
            );
        });

        group.bench_function(BenchmarkId::new("fixed/insert_before_window", len), |b| {
            let mut list = Virtualizer::new(FixedExtentModel::new(len, 30.0).unwrap())
                .with_anchor_on_shift(true);
            list.set_cross_extent(400.0);
            list.recompute(window(15_000.0));
            b.iter(|| black_box(list.insert(0, 1, &mut |_: usize| 30.0).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_recompute, bench_edits);
criterion_main!(benches);
