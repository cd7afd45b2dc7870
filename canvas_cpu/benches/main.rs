// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![allow(missing_docs, reason = "Not needed for benchmarks")]
#![allow(clippy::cast_possible_truncation, reason = "not critical for benchmarks")]

use canvas_common::color::palette::css::{BLUE, RED};
use canvas_common::colour::GradientStops;
use canvas_common::geometry::{Line, LineSource, Polygon};
use canvas_common::kurbo::{Circle, Rect};
use canvas_cpu::brush::{Brush, Gradient, GradientBrush};
use canvas_cpu::filler::PolygonFiller;
use canvas_cpu::scanner::{LineScanner, Scanner};
use canvas_cpu::{Canvas, RenderSettings, Rotation};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SEED: [u8; 32] = [0; 32];
const SIZE: u32 = 256;

/// A random polygon with `n` corners within the canvas.
fn random_polygon(n: usize) -> Vec<Line> {
    let mut rng = StdRng::from_seed(SEED);
    let polygon = Polygon::new((0..n).map(|_| {
        (
            rng.gen_range(0.0..SIZE as f32),
            rng.gen_range(0.0..SIZE as f32),
        )
    }));

    let mut lines = vec![];
    polygon.push_lines(0.25, &mut lines);
    lines
}

fn scan(c: &mut Criterion) {
    let mut g = c.benchmark_group("scan");

    for n in [4, 32, 256] {
        let lines = random_polygon(n);
        let mut scanner = LineScanner::new();

        g.bench_function(format!("polygon_{n}"), |b| {
            b.iter(|| {
                scanner.begin();
                scanner.scan(black_box(&lines));
                black_box(scanner.row_count());
            });
        });
    }

    let lines = random_polygon(256);
    let mut scanner = LineScanner::new();
    scanner.begin();
    scanner.scan(&lines);
    let mut filler = PolygonFiller::default();
    let mut spans = vec![];
    let clip = canvas_common::rect::Rect::new(0, 0, SIZE as i32, SIZE as i32);

    g.bench_function("fill_256", |b| {
        b.iter(|| {
            spans.clear();
            filler.fill(scanner.scan_lines(), &clip, &mut spans);
            black_box(spans.len());
        });
    });

    g.finish();
}

fn brush(c: &mut Criterion) {
    let mut g = c.benchmark_group("brush");

    for kind in [Gradient::Horizontal, Gradient::Circular, Gradient::Conical] {
        let mut brush =
            GradientBrush::new(kind, SIZE, SIZE, GradientStops::two(RED, BLUE)).unwrap();
        let settings =
            RenderSettings::new(canvas_common::rect::Rect::new(0, 0, SIZE as i32, SIZE as i32));

        g.bench_function(format!("{kind:?}_read_line"), |b| {
            let session = brush.session(&settings);
            b.iter(|| {
                for y in 0..SIZE as i32 {
                    black_box(session.read_line(0, y, SIZE as usize));
                }
            });
        });

        let rotated = settings.with_rotation(Rotation::new(30.0));
        g.bench_function(format!("{kind:?}_read_line_rotated"), |b| {
            let session = brush.session(&rotated);
            b.iter(|| {
                for y in 0..SIZE as i32 {
                    black_box(session.read_line(0, y, SIZE as usize));
                }
            });
        });
    }

    g.finish();
}

fn canvas(c: &mut Criterion) {
    let mut g = c.benchmark_group("canvas");
    let mut canvas = Canvas::new(SIZE, SIZE);
    let mut brush = GradientBrush::new(Gradient::Horizontal, 1, 1, GradientStops::two(RED, BLUE))
        .unwrap();

    g.bench_function("fill_rect", |b| {
        b.iter(|| {
            canvas.fill_rect(&Rect::new(16.0, 16.0, 240.0, 240.0), &mut brush);
        });
    });

    g.bench_function("fill_circle", |b| {
        b.iter(|| {
            canvas.fill(&Circle::new((128.0, 128.0), 100.0), &mut brush);
        });
    });

    g.finish();
}

criterion_group!(s, scan);
criterion_group!(b, brush);
criterion_group!(f, canvas);
criterion_main!(s, b, f);
