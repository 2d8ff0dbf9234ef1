// Copyright 2026 the Pinplan Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Vec2};
use pinplan_canvas::PinCanvas;
use pinplan_cull::{CullEngine, LodTier};
use pinplan_grid::{GridAddress, RowScheme};
use pinplan_pins::{Package, PackageGeometry, Pin, PinId};
use pinplan_selection::Selection;
use pinplan_view2d::Viewport2D;

/// `side * side` pins in 16 square banks.
fn gen_package(side: u32) -> Package {
    let scheme = RowScheme::Alphabetic;
    let bank_side = side.div_ceil(4).max(1);
    let mut pins = Vec::new();
    for r in 0..side {
        let row = scheme.index_to_row(r);
        for c in 1..=side {
            let bank = (r / bank_side) * 4 + (c - 1) / bank_side;
            let id = format!("{row}{c}");
            pins.push(
                Pin::new(id.clone(), id, GridAddress::new(row.clone(), c))
                    .with_bank(format!("{bank}")),
            );
        }
    }
    Package::new(PackageGeometry::default(), pins)
}

fn viewport(package: &Package, zoom: f64) -> Viewport2D {
    let mut vp = Viewport2D::new(Rect::new(0.0, 0.0, 1920.0, 1080.0));
    vp.set_world_bounds(package.content_bounds());
    vp.set_zoom(zoom);
    vp.set_pan(Vec2::new(-300.0, 200.0));
    vp
}

fn bench_cull_bands(c: &mut Criterion) {
    let mut group = c.benchmark_group("cull/10k_pins");
    let package = gen_package(100);
    let engine = CullEngine::new();
    let selection: Vec<PinId> = package
        .pins()
        .iter()
        .step_by(97)
        .map(|p| p.id.clone())
        .collect();
    group.throughput(Throughput::Elements(package.len() as u64));

    for (tier, zoom) in [
        (LodTier::UltraLow, 0.15),
        (LodTier::Low, 0.3),
        (LodTier::Medium, 0.7),
        (LodTier::High, 1.5),
        (LodTier::UltraHigh, 3.0),
    ] {
        let vp = viewport(&package, zoom);
        group.bench_with_input(BenchmarkId::new("cull", tier), &vp, |b, vp| {
            b.iter(|| black_box(engine.cull(&package, vp, tier, &selection)));
        });
    }

    group.finish();
}

fn bench_frame_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("canvas/frame_plan");
    let mut canvas = PinCanvas::new(Rect::new(0.0, 0.0, 1920.0, 1080.0));
    canvas.load_package(gen_package(100));
    let mut selection = Selection::new();
    selection.replace_with(["A1", "B2", "C3"].map(PinId::from));

    for zoom in [0.15, 0.7, 3.0] {
        canvas.viewport_mut().set_zoom(zoom);
        // Alternate between two pans so the cache never hits.
        group.bench_function(BenchmarkId::new("uncached", zoom), |b| {
            let mut flip = false;
            b.iter(|| {
                flip = !flip;
                let target = if flip {
                    Point::new(2_000.0, 2_000.0)
                } else {
                    Point::new(6_000.0, 6_000.0)
                };
                canvas.viewport_mut().center_on(target);
                black_box(canvas.frame(&selection).pins.len())
            });
        });
        group.bench_function(BenchmarkId::new("cached", zoom), |b| {
            b.iter(|| black_box(canvas.frame(&selection).pins.len()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_cull_bands, bench_frame_plan);
criterion_main!(benches);
