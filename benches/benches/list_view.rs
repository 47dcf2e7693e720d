// Copyright 2025 the Sightline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for `sightline_scroll::ListView`: full scroll steps and model syncs.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sightline_model::VecModel;
use sightline_scroll::{ListView, ListViewConfig};

fn config() -> ListViewConfig {
    ListViewConfig {
        row_height: 24.0,
        ..ListViewConfig::default()
    }
    .with_overscan(120.0)
}

fn bench_scroll_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_view/scroll");
    for len in [10_000_usize, 1_000_000] {
        let model: VecModel<usize> = (0..len).collect();
        group.bench_function(BenchmarkId::new("fixed/wheel", len), |b| {
            let mut list = ListView::fixed(&model, config()).unwrap();
            list.set_visible_size(400.0, 800.0);
            b.iter(|| {
                list.scroll_to(0.0, 0.0);
                for _ in 0..50 {
                    black_box(list.scroll_by(0.0, 40.0));
                }
            });
        });

        group.bench_function(BenchmarkId::new("variable/wheel", len), |b| {
            let mut list = ListView::variable(&model, config()).unwrap();
            list.set_visible_size(400.0, 800.0);
            b.iter(|| {
                list.scroll_to(0.0, 0.0);
                for _ in 0..50 {
                    black_box(list.scroll_by(0.0, 40.0));
                }
            });
        });
    }
    group.finish();
}

fn bench_sync(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_view/sync");
    let len = 100_000_usize;
    group.bench_function(BenchmarkId::new("fixed/push_pop", len), |b| {
        let mut model: VecModel<usize> = (0..len).collect();
        let mut list = ListView::fixed(&model, config()).unwrap();
        list.set_visible_size(400.0, 800.0);
        list.scroll_to(0.0, 12_000.0);
        b.iter(|| {
            model.insert(0, 0).unwrap();
            black_box(list.sync(&model).unwrap());
            model.remove(0).unwrap();
            black_box(list.sync(&model).unwrap());
        });
    });
    group.finish();
}

criterion_group!(benches, bench_scroll_step, bench_sync);
criterion_main!(benches);
