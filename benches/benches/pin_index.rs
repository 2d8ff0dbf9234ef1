// Copyright 2026 the Pinplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use pinplan_grid::{GridAddress, RowScheme};
use pinplan_pins::{Pin, PinId, PinIndex};

fn gen_pins(side: u32) -> Vec<Pin> {
    let scheme = RowScheme::Jedec;
    let mut pins = Vec::with_capacity((side * side) as usize);
    for r in 0..side {
        let row = scheme.index_to_row(r);
        for c in 1..=side {
            let id = format!("{row}{c}");
            pins.push(
                Pin::new(id.clone(), id.clone(), GridAddress::new(row.clone(), c))
                    .with_bank(format!("{}", r / 8))
                    .with_function(format!("IO_L{c}P_{row}"))
                    .with_signal(format!("net_{id}")),
            );
        }
    }
    pins
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("pin_index/build");
    for side in [16_u32, 32, 64, 100] {
        let pins = gen_pins(side);
        group.throughput(Throughput::Elements(pins.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(pins.len()), &pins, |b, pins| {
            b.iter(|| black_box(PinIndex::build(pins, RowScheme::Jedec)));
        });
    }
    group.finish();
}

fn bench_lookups(c: &mut Criterion) {
    let mut group = c.benchmark_group("pin_index/lookup");
    let pins = gen_pins(100);
    let index = PinIndex::build(&pins, RowScheme::Jedec);
    let probes: Vec<PinId> = pins.iter().step_by(37).map(|p| p.id.clone()).collect();

    group.bench_function("find_by_id", |b| {
        b.iter(|| {
            for id in &probes {
                black_box(index.find_by_id(id));
            }
        });
    });
    group.bench_function("find_by_cell", |b| {
        b.iter(|| {
            for r in (0..100).step_by(7) {
                for col in (1..=100).step_by(7) {
                    black_box(index.find_by_cell(r, col));
                }
            }
        });
    });
    group.bench_function("find_by_bank", |b| {
        b.iter(|| black_box(index.find_by_bank(Some("7")).len()));
    });
    group.finish();
}

criterion_group!(benches, bench_build, bench_lookups);
criterion_main!(benches);
