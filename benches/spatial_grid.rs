//! Benchmarks for the neighbor search behind the connection renderer.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use aether::prelude::*;
use aether::{find_connections, Particle, SpatialHashGrid};

fn population(count: usize, bounds: Vec2) -> Vec<Particle> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..count).map(|_| Particle::new(bounds, &mut rng)).collect()
}

fn brute_force_pairs(particles: &[Particle], max_distance: f32) -> usize {
    let mut count = 0;
    for (i, a) in particles.iter().enumerate() {
        for (j, b) in particles.iter().enumerate() {
            if i != j && a.position().distance(b.position()) < max_distance {
                count += 1;
            }
        }
    }
    count
}

fn bench_neighbor_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("neighbor_search");
    let bounds = Vec2::new(1920.0, 1080.0);
    let max_distance = 1080.0 / 6.0;

    for count in [35, 200, 1000] {
        let particles = population(count, bounds);

        group.bench_with_input(BenchmarkId::new("spatial_grid", count), &particles, |b, particles| {
            b.iter(|| black_box(find_connections(particles, max_distance).len()))
        });

        group.bench_with_input(BenchmarkId::new("brute_force", count), &particles, |b, particles| {
            b.iter(|| black_box(brute_force_pairs(particles, max_distance)))
        });
    }

    group.finish();
}

fn bench_grid_rebuild(c: &mut Criterion) {
    let particles = population(1000, Vec2::new(1920.0, 1080.0));

    c.bench_function("grid_rebuild_1000", |b| {
        b.iter(|| {
            let grid = SpatialHashGrid::from_positions(180.0, particles.iter().map(Particle::position));
            black_box(grid.cell_count())
        })
    });
}

fn bench_frame(c: &mut Criterion) {
    let mut backdrop = Backdrop::new(BackdropConfig::default().with_seed(1));
    backdrop.start(Some(Viewport::new(1280.0, 720.0)));
    let mut canvas = Recorder::new(1280, 720);
    let mut overlay = Recorder::new(1280, 720);
    let mut t = 0.0;

    c.bench_function("frame_recorder_1280x720", |b| {
        b.iter(|| {
            canvas.clear_commands();
            overlay.clear_commands();
            t += 16.0;
            black_box(backdrop.frame(t, &mut canvas, &mut overlay))
        })
    });
}

criterion_group!(benches, bench_neighbor_search, bench_grid_rebuild, bench_frame);
criterion_main!(benches);
