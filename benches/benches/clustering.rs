// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;
use wayfinder_cluster::{cluster, effective_radius};

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

/// Points spread uniformly over a 2000x1400 floor plan.
fn gen_uniform_points(count: usize) -> Vec<(String, Point)> {
    let mut rng = Rng::new(0x81FD_BEE7_94F0_AF1A);
    (0..count)
        .map(|i| {
            let p = Point::new(rng.next_f64() * 2000.0, rng.next_f64() * 1400.0);
            (format!("p{i}"), p)
        })
        .collect()
}

/// Points grouped around a few hot spots, like booths around stages.
fn gen_clustered_points(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<(String, Point)> {
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    for c in 0..n_clusters {
        let (cx, cy) = (rng.next_f64() * 2000.0, rng.next_f64() * 1400.0);
        for i in 0..per_cluster {
            let dx = (rng.next_f64() - 0.5) * spread;
            let dy = (rng.next_f64() - 0.5) * spread;
            out.push((format!("c{c}-{i}"), Point::new(cx + dx, cy + dy)));
        }
    }
    out
}

fn bench_cluster_by_zoom(c: &mut Criterion) {
    let mut group = c.benchmark_group("cluster_uniform");
    for &n in &[100usize, 1_000, 5_000] {
        let points = gen_uniform_points(n);
        group.throughput(Throughput::Elements(n as u64));
        for &zoom in &[1.0, 4.0, 16.0] {
            let radius = effective_radius(40.0, zoom);
            group.bench_function(BenchmarkId::new(format!("zoom{zoom}"), n), |b| {
                b.iter(|| black_box(cluster(&points, radius).len()));
            });
        }
    }
    group.finish();
}

fn bench_cluster_hot_spots(c: &mut Criterion) {
    let mut group = c.benchmark_group("cluster_hot_spots");
    for &per_cluster in &[10usize, 50, 200] {
        let points = gen_clustered_points(20, per_cluster, 120.0);
        group.throughput(Throughput::Elements(points.len() as u64));
        group.bench_function(BenchmarkId::from_parameter(points.len()), |b| {
            b.iter(|| black_box(cluster(&points, 40.0).len()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_cluster_by_zoom, bench_cluster_hot_spots);
criterion_main!(benches);
