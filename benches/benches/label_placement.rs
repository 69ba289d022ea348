// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Size};
use wayfinder_label::backends::{FlatVec, Grid};
use wayfinder_label::{Backend, LabelCandidate, LabelConfig, place_labels_with};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

const SURFACE: Size = Size::new(1600.0, 1000.0);

/// Pins scattered over the surface with 24px hit boxes.
fn gen_candidates(count: usize) -> Vec<LabelCandidate<usize>> {
    let mut rng = Rng::new(0x3C6E_F35F_4750_2932);
    (0..count)
        .map(|i| {
            let anchor = Point::new(rng.next_f64() * SURFACE.width, rng.next_f64() * SURFACE.height);
            let hit_box = Rect::from_center_size(anchor, Size::new(24.0, 24.0));
            LabelCandidate::new(i, anchor, hit_box)
        })
        .collect()
}

fn bench_place_labels(c: &mut Criterion) {
    fn bench<B: Backend + Default>(b: &mut criterion::Bencher, candidates: &[LabelCandidate<usize>]) {
        let config = LabelConfig::default();
        let center = Point::new(SURFACE.width / 2.0, SURFACE.height / 2.0);
        b.iter(|| {
            let placed = place_labels_with::<usize, B>(candidates, &config, center);
            black_box(placed.iter().filter(|a| a.visible).count())
        });
    }

    let mut group = c.benchmark_group("place_labels");
    for &n in &[50usize, 200, 1_000] {
        let candidates = gen_candidates(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(BenchmarkId::new("FlatVec", n), |b| {
            bench::<FlatVec>(b, &candidates);
        });
        group.bench_function(BenchmarkId::new("Grid", n), |b| {
            bench::<Grid>(b, &candidates);
        });
    }
    group.finish();
}

fn bench_flip_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("flip_depth");
    let candidates = gen_candidates(400);
    let center = Point::new(SURFACE.width / 2.0, SURFACE.height / 2.0);
    for depth in 0..=4 {
        let config = LabelConfig {
            max_flip_depth: depth,
            ..LabelConfig::default()
        };
        group.bench_function(BenchmarkId::from_parameter(depth), |b| {
            b.iter(|| {
                let placed = place_labels_with::<usize, Grid>(&candidates, &config, center);
                black_box(placed.iter().filter(|a| a.visible).count())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_place_labels, bench_flip_depth);
criterion_main!(benches);
