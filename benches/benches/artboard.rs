// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use understory_artboard::{
    Alignment, Fit, FitResolver, HitMapper, Matrix2D, RenderSession, TransformStack, resolve,
};

const FITS: [Fit; 7] = [
    Fit::Fill,
    Fit::Contain,
    Fit::Cover,
    Fit::FitWidth,
    Fit::FitHeight,
    Fit::ScaleDown,
    Fit::None,
];

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("artboard/resolve");
    let content = Rect::new(0.0, 0.0, 500.0, 300.0);
    let dest = Rect::new(0.0, 60.0, 390.0, 844.0);

    for fit in FITS {
        let id = BenchmarkId::new("uncached", format!("{fit:?}"));
        group.bench_with_input(id, &fit, |b, &fit| {
            b.iter(|| resolve(black_box(content), black_box(dest), fit, Alignment::CENTER));
        });
    }

    // Hypothesis: steady-state layouts hit the cache and skip the fit math.
    group.bench_function("cached_steady_layout", |b| {
        let mut resolver = FitResolver::new();
        b.iter(|| {
            resolver.resolve(
                black_box(content),
                black_box(dest),
                Fit::Contain,
                Alignment::CENTER,
            )
        });
    });
    group.finish();
}

fn bench_stack(c: &mut Criterion) {
    let mut group = c.benchmark_group("artboard/stack");
    for depth in [4usize, 64, 1_024] {
        group.throughput(Throughput::Elements(depth as u64));
        let id = BenchmarkId::new("save_restore", depth);
        group.bench_with_input(id, &depth, |b, &depth| {
            let mut stack = TransformStack::new();
            let step = Matrix2D::new(1.01, 0.0, 0.0, 0.99, 0.5, -0.5);
            b.iter(|| {
                for _ in 0..depth {
                    stack.save(black_box(step));
                }
                for _ in 0..depth {
                    black_box(stack.restore().ok());
                }
            });
        });
    }
    group.finish();
}

fn bench_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("artboard/session");
    let content = Rect::new(0.0, 0.0, 500.0, 500.0);
    let dest = Rect::new(0.0, 0.0, 1170.0, 2532.0);

    for copies in [1u32, 16, 256] {
        group.throughput(Throughput::Elements(u64::from(copies)));
        group.bench_with_input(BenchmarkId::new("frame", copies), &copies, |b, &copies| {
            let mut session = RenderSession::new();
            b.iter(|| {
                session
                    .begin(dest, content, Fit::Contain, Alignment::CENTER)
                    .ok();
                for i in 0..copies {
                    session.save(Matrix2D::translate(f64::from(i), 0.0)).ok();
                    session.draw(black_box).ok();
                    session.restore().ok();
                }
                session.end().ok();
            });
        });
    }
    group.finish();
}

fn bench_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("artboard/hit");
    let content = Rect::new(0.0, 0.0, 500.0, 300.0);
    let dest = Rect::new(0.0, 0.0, 390.0, 844.0);
    let touches: Vec<Point> = (0..256)
        .map(|i| Point::new(f64::from(i % 16) * 24.0, f64::from(i / 16) * 52.0))
        .collect();
    group.throughput(Throughput::Elements(touches.len() as u64));

    group.bench_function("cached_mapper", |b| {
        let mapper = HitMapper::new(content, dest, Fit::Cover, Alignment::CENTER);
        b.iter(|| {
            for &p in &touches {
                black_box(mapper.to_content_inside(p).ok());
            }
        });
    });
    group.bench_function("recompute_per_touch", |b| {
        b.iter(|| {
            for &p in &touches {
                black_box(
                    understory_artboard::map_point_to_content(
                        p,
                        content,
                        dest,
                        Fit::Cover,
                        Alignment::CENTER,
                    )
                    .ok(),
                );
            }
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_resolve,
    bench_stack,
    bench_session,
    bench_hit
);
criterion_main!(benches);
