//! Property tests for the geometric invariants.

use aether::grid_overlay::{GridGeometry, GridParams};
use aether::{InputSnapshot, Particle, SpatialHashGrid, Vec2};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn coord() -> impl Strategy<Value = f32> {
    -2000.0_f32..2000.0
}

fn point() -> impl Strategy<Value = Vec2> {
    (coord(), coord()).prop_map(|(x, y)| Vec2::new(x, y))
}

proptest! {
    #[test]
    fn particles_stay_inside_bounds(
        width in 1.0_f32..2000.0,
        height in 1.0_f32..2000.0,
        seed in any::<u64>(),
        steps in prop::collection::vec((point(), any::<bool>(), 0.0_f32..250.0), 1..60),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let bounds = Vec2::new(width, height);
        let mut particle = Particle::new(bounds, &mut rng);
        let mut time_ms = 0.0_f64;

        for (pointer, hovering, delta) in steps {
            time_ms += delta as f64;
            let input = InputSnapshot { pointer, hovering, scroll: 0.0 };
            particle.update(&input, delta, time_ms, &mut rng);

            let pos = particle.position();
            prop_assert!(pos.x >= 0.0 && pos.x <= width, "x={} outside 0..{}", pos.x, width);
            prop_assert!(pos.y >= 0.0 && pos.y <= height, "y={} outside 0..{}", pos.y, height);
            prop_assert!(particle.hue() >= 180.0 && particle.hue() <= 270.0);
            prop_assert!(particle.opacity() <= 1.0);
        }
    }

    #[test]
    fn grid_query_has_no_false_negatives(
        cell in 1.0_f32..300.0,
        points in prop::collection::vec(point(), 0..80),
        query in point(),
        radius in 0.0_f32..400.0,
    ) {
        let grid = SpatialHashGrid::from_positions(cell, points.iter().copied());
        prop_assert_eq!(grid.len(), points.len());

        let found = grid.nearby(query, radius);
        for (i, p) in points.iter().enumerate() {
            if p.distance(query) <= radius {
                prop_assert!(found.contains(&i), "missed {} at distance {}", i, p.distance(query));
            }
        }
    }

    #[test]
    fn particle_count_is_clamped(width in -100.0_f32..10_000.0, height in -100.0_f32..10_000.0) {
        let count = aether::particle_count(width, height);
        prop_assert!((12..=35).contains(&count));
        prop_assert!(aether::connection_distance(width, height) > 0.0);
    }

    #[test]
    fn overlay_geometry_is_finite(
        width in 0.0_f32..4000.0,
        height in 0.0_f32..4000.0,
        scroll in 0.0_f32..10_000.0,
        pointer in point(),
        elapsed in 0.0_f32..10_000.0,
    ) {
        let g = GridGeometry::compute(&GridParams { width, height, scroll, pointer, elapsed });
        prop_assert!(g.frame.x.is_finite() && g.frame.y.is_finite());
        prop_assert!(g.frame.width >= 0.0 && g.frame.height >= 0.0);
        prop_assert!(g.breathe >= 0.97 - 1e-6 && g.breathe <= 1.03 + 1e-6);
    }
}
