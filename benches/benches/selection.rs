// Copyright 2026 the Pinplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use pinplan_pins::PinId;
use pinplan_selection::Selection;

fn bench_replace(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection/replace");

    // `replace_with` de-duplicates by scanning; `replace_with_hashed` is linear.
    for len in [64_usize, 512, 2_048, 10_000] {
        let keys: Vec<PinId> = (0..len).map(|i| PinId::from(format!("P{i}"))).collect();
        group.throughput(Throughput::Elements(len as u64));

        if len <= 2_048 {
            group.bench_with_input(BenchmarkId::new("replace_with", len), &keys, |b, keys| {
                b.iter_batched(
                    Selection::<PinId>::new,
                    |mut sel| {
                        sel.replace_with(keys.iter().cloned());
                        black_box(sel);
                    },
                    BatchSize::LargeInput,
                );
            });
        }

        group.bench_with_input(
            BenchmarkId::new("replace_with_hashed", len),
            &keys,
            |b, keys| {
                b.iter_batched(
                    Selection::<PinId>::new,
                    |mut sel| {
                        sel.replace_with_hashed(keys.iter().cloned());
                        black_box(sel);
                    },
                    BatchSize::LargeInput,
                );
            },
        );
    }

    group.finish();
}

fn bench_prune(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection/retain");
    let keys: Vec<PinId> = (0..5_000).map(|i| PinId::from(format!("P{i}"))).collect();
    group.bench_function("drop_half", |b| {
        b.iter_batched(
            || {
                let mut sel = Selection::new();
                sel.replace_with_hashed(keys.iter().cloned());
                sel
            },
            |mut sel| {
                let mut keep = false;
                sel.retain(|_| {
                    keep = !keep;
                    keep
                });
                black_box(sel);
            },
            BatchSize::LargeInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_replace, bench_prune);
criterion_main!(benches);
