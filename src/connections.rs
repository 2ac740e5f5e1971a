//! Distance-attenuated edges between nearby particles.
//!
//! Each frame a fresh [`SpatialHashGrid`] is built over the particle
//! positions, then every particle queries its neighborhood and gets an edge
//! to each neighbor closer than the connection distance.
//!
//! Pairs are visited from both ends, so every edge is drawn twice. Together
//! with the wide glow pass on larger particles this doubles the intensity of
//! edges between big nodes, which is the look the backdrop ships with.

use crate::particle::Particle;
use crate::spatial::SpatialHashGrid;
use crate::surface::{Paint, Surface};

/// Peak edge opacity, reached at zero distance.
pub const OPACITY_SCALE: f32 = 0.2;
/// Edge width as a fraction of the smaller endpoint's size.
pub const WIDTH_SCALE: f32 = 0.8;
/// An edge gets a glow pass when either endpoint is larger than this.
pub const GLOW_SIZE_THRESHOLD: f32 = 1.0;

const GLOW_WIDTH_SCALE: f32 = 3.0;
const GLOW_ALPHA_SCALE: f32 = 0.25;

/// One directed edge between two particles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    /// Index of the particle the edge starts at.
    pub from: usize,
    /// Index of the neighbor.
    pub to: usize,
    /// Euclidean distance between the two, in pixels.
    pub distance: f32,
    /// Stroke alpha, fading to zero at the connection distance.
    pub opacity: f32,
    /// Stroke width in pixels.
    pub width: f32,
    /// Whether the wide low-alpha pass is drawn under this edge.
    pub glow: bool,
}

/// Edge opacity at `distance`: a linear falloff from [`OPACITY_SCALE`] down
/// to zero at `max_distance`. `None` when the pair is too far apart.
pub fn connection_opacity(distance: f32, max_distance: f32) -> Option<f32> {
    if !(distance.is_finite() && max_distance > 0.0) || distance >= max_distance {
        return None;
    }
    Some((1.0 - distance / max_distance) * OPACITY_SCALE)
}

/// Every directed edge for the current particle positions.
///
/// Both `(a, b)` and `(b, a)` appear for each qualifying pair.
pub fn find_connections(particles: &[Particle], max_distance: f32) -> Vec<Connection> {
    if particles.len() < 2 || !(max_distance > 0.0) {
        return Vec::new();
    }

    let grid = SpatialHashGrid::from_positions(max_distance, particles.iter().map(Particle::position));

    let mut connections = Vec::new();
    for (i, a) in particles.iter().enumerate() {
        for j in grid.nearby(a.position(), max_distance) {
            if j == i {
                continue;
            }
            let b = &particles[j];
            let distance = a.position().distance(b.position());
            let Some(opacity) = connection_opacity(distance, max_distance) else {
                continue;
            };
            connections.push(Connection {
                from: i,
                to: j,
                distance,
                opacity,
                width: a.size().min(b.size()) * WIDTH_SCALE,
                glow: a.size() > GLOW_SIZE_THRESHOLD || b.size() > GLOW_SIZE_THRESHOLD,
            });
        }
    }
    connections
}

/// Draw all edges with gradient strokes. Returns the number of edges drawn.
pub fn draw_connections<S: Surface + ?Sized>(surface: &mut S, particles: &[Particle], max_distance: f32) -> usize {
    let connections = find_connections(particles, max_distance);

    for c in &connections {
        let (a, b) = (&particles[c.from], &particles[c.to]);
        let (start, end) = (a.position(), b.position());

        if c.glow {
            let alpha = c.opacity * GLOW_ALPHA_SCALE;
            surface.stroke_line(
                start,
                end,
                c.width * GLOW_WIDTH_SCALE,
                Paint::Linear {
                    start,
                    end,
                    from: a.color().with_alpha(alpha),
                    to: b.color().with_alpha(alpha),
                },
            );
        }

        surface.stroke_line(
            start,
            end,
            c.width,
            Paint::Linear {
                start,
                end,
                from: a.color().with_alpha(c.opacity),
                to: b.color().with_alpha(c.opacity),
            },
        );
    }

    connections.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, Recorder};
    use glam::Vec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn particle_at(rng: &mut StdRng, x: f32, y: f32) -> Particle {
        Particle::new(Vec2::new(300.0, 300.0), rng).at(Vec2::new(x, y))
    }

    #[test]
    fn test_opacity_law() {
        assert_eq!(connection_opacity(0.0, 50.0), Some(0.2));
        assert!((connection_opacity(25.0, 50.0).unwrap() - 0.1).abs() < 1e-6);
        assert_eq!(connection_opacity(50.0, 50.0), None);
        assert_eq!(connection_opacity(75.0, 50.0), None);
        assert_eq!(connection_opacity(10.0, 0.0), None);
        assert_eq!(connection_opacity(f32::NAN, 50.0), None);
    }

    #[test]
    fn test_two_particle_scenario() {
        let mut rng = StdRng::seed_from_u64(1);
        let particles = vec![particle_at(&mut rng, 10.0, 10.0), particle_at(&mut rng, 40.0, 40.0)];

        let connections = find_connections(&particles, 50.0);
        assert_eq!(connections.len(), 2);
        assert!(connections.iter().any(|c| c.from == 0 && c.to == 1));
        assert!(connections.iter().any(|c| c.from == 1 && c.to == 0));

        for c in &connections {
            assert!((c.distance - 42.426).abs() < 1e-2);
            assert!((c.opacity - 0.0303).abs() < 1e-3);
        }
    }

    #[test]
    fn test_far_pair_not_connected() {
        let mut rng = StdRng::seed_from_u64(2);
        let particles = vec![particle_at(&mut rng, 0.0, 0.0), particle_at(&mut rng, 50.0, 0.0)];
        assert!(find_connections(&particles, 50.0).is_empty());
    }

    #[test]
    fn test_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(3);
        let particles: Vec<Particle> = (0..35)
            .map(|_| Particle::new(Vec2::new(300.0, 300.0), &mut rng))
            .collect();
        let max = 50.0;

        let mut expected = Vec::new();
        for (i, a) in particles.iter().enumerate() {
            for (j, b) in particles.iter().enumerate() {
                if i != j && a.position().distance(b.position()) < max {
                    expected.push((i, j));
                }
            }
        }
        let mut found: Vec<(usize, usize)> = find_connections(&particles, max)
            .iter()
            .map(|c| (c.from, c.to))
            .collect();
        found.sort_unstable();
        expected.sort_unstable();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_width_and_glow() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut a = particle_at(&mut rng, 10.0, 10.0);
        let mut b = particle_at(&mut rng, 20.0, 10.0);
        a.set_size(0.5);
        b.set_size(0.9);
        let quiet = find_connections(&[a.clone(), b.clone()], 50.0);
        assert!(quiet.iter().all(|c| !c.glow));
        assert!((quiet[0].width - 0.4).abs() < 1e-6);

        b.set_size(1.5);
        let lit = find_connections(&[a, b], 50.0);
        assert!(lit.iter().all(|c| c.glow));
    }

    #[test]
    fn test_draw_emits_doubled_edges_with_glow() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut a = particle_at(&mut rng, 10.0, 10.0);
        let mut b = particle_at(&mut rng, 40.0, 40.0);
        a.set_size(2.0);
        b.set_size(0.7);
        let particles = vec![a, b];

        let mut rec = Recorder::new(300, 300);
        let drawn = draw_connections(&mut rec, &particles, 50.0);
        assert_eq!(drawn, 2);
        // glow + line per direction
        assert_eq!(rec.lines().count(), 4);

        let widths: Vec<f32> = rec
            .lines()
            .map(|c| match c {
                DrawCommand::StrokeLine { width, .. } => *width,
                _ => unreachable!(),
            })
            .collect();
        assert!((widths[0] - 0.7 * WIDTH_SCALE * GLOW_WIDTH_SCALE).abs() < 1e-5);
        assert!((widths[1] - 0.7 * WIDTH_SCALE).abs() < 1e-5);

        if let DrawCommand::StrokeLine { paint: Paint::Linear { from, to, .. }, .. } = &rec.commands()[1] {
            let expected = (1.0 - 42.426 / 50.0) * OPACITY_SCALE;
            assert!((from.a - expected).abs() < 1e-3);
            assert!((to.a - expected).abs() < 1e-3);
        } else {
            panic!("expected a gradient stroke");
        }
    }

    #[test]
    fn test_empty_and_single() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut rec = Recorder::new(10, 10);
        assert_eq!(draw_connections(&mut rec, &[], 50.0), 0);
        assert_eq!(draw_connections(&mut rec, &[particle_at(&mut rng, 1.0, 1.0)], 50.0), 0);
        assert!(rec.commands().is_empty());
    }
}
