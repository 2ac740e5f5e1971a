//! Integration tests for the backdrop lifecycle and frame output.

use aether::prelude::*;
use aether::{connection_distance, find_connections, particle_count, DrawCommand, InputSnapshot};

fn running(width: f32, height: f32, seed: u64) -> Backdrop {
    let mut backdrop = Backdrop::new(BackdropConfig::default().with_seed(seed));
    assert!(backdrop.start(Some(Viewport::new(width, height))));
    backdrop
}

fn run_frames(backdrop: &mut Backdrop, frames: u32, width: u32, height: u32) -> (Recorder, Recorder) {
    let mut canvas = Recorder::new(width, height);
    let mut overlay = Recorder::new(width, height);
    for i in 0..frames {
        canvas.clear_commands();
        overlay.clear_commands();
        backdrop.frame(i as f64 * 16.0, &mut canvas, &mut overlay);
    }
    (canvas, overlay)
}

// ============================================================================
// Sizing
// ============================================================================

#[test]
fn test_population_follows_surface_area() {
    assert_eq!(particle_count(1000.0, 800.0), 35);
    assert_eq!(particle_count(800.0, 500.0), 18);
    assert_eq!(particle_count(0.0, 0.0), 12);
    assert_eq!(connection_distance(1200.0, 600.0), 100.0);

    let backdrop = running(800.0, 500.0, 1);
    assert_eq!(backdrop.particles().len(), 18);
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn test_missing_surface_is_a_no_op() {
    let mut backdrop = Backdrop::new(BackdropConfig::default());
    assert!(!backdrop.start(None));
    assert_eq!(backdrop.state(), BackdropState::Idle);

    let mut canvas = Recorder::new(100, 100);
    let mut overlay = Recorder::new(100, 100);
    assert!(!backdrop.frame(0.0, &mut canvas, &mut overlay));
    assert!(canvas.commands().is_empty());
}

#[test]
fn test_stop_then_frames_draw_nothing() {
    let mut backdrop = running(600.0, 400.0, 2);
    run_frames(&mut backdrop, 5, 600, 400);
    backdrop.stop();

    let (canvas, overlay) = run_frames(&mut backdrop, 5, 600, 400);
    assert!(canvas.commands().is_empty());
    assert!(overlay.commands().is_empty());
    assert_eq!(backdrop.last_connection_count(), 0);
}

#[test]
fn test_restart_after_stop() {
    let mut backdrop = running(600.0, 400.0, 3);
    backdrop.stop();
    assert!(backdrop.start(Some(Viewport::new(1000.0, 800.0))));
    assert_eq!(backdrop.particles().len(), 35);
    assert_eq!(backdrop.clock().frame(), 0);
}

#[test]
fn test_resize_rebuilds_population_within_new_bounds() {
    let mut backdrop = running(300.0, 300.0, 4);
    run_frames(&mut backdrop, 3, 300, 300);

    backdrop.resize(900.0, 700.0);
    assert_eq!(backdrop.particles().len(), particle_count(900.0, 700.0));
    for p in backdrop.particles() {
        let pos = p.position();
        assert!(pos.x >= 0.0 && pos.x <= 900.0);
        assert!(pos.y >= 0.0 && pos.y <= 700.0);
    }
}

// ============================================================================
// Input
// ============================================================================

#[test]
fn test_input_reaches_the_frame() {
    let mut backdrop = running(400.0, 400.0, 5);
    backdrop.set_pointer(Vec2::new(200.0, 200.0));
    backdrop.set_scroll(120.0);

    assert_eq!(
        backdrop.input(),
        InputSnapshot {
            pointer: Vec2::new(200.0, 200.0),
            hovering: true,
            scroll: 120.0,
        }
    );

    backdrop.set_hovering(false);
    assert!(!backdrop.input().hovering);
}

#[test]
fn test_hover_grows_nearby_particles() {
    let mut backdrop = running(1000.0, 200.0, 6);
    let pointer = Vec2::new(500.0, 100.0);
    let radius = 1000.0 / aether::particle::INFLUENCE_DIVISOR;
    backdrop.set_pointer(pointer);

    // The first frame has a zero delta, so nobody moves
    run_frames(&mut backdrop, 1, 1000, 200);

    let mut affected = 0;
    for p in backdrop.particles() {
        if p.position().distance(pointer) < radius {
            affected += 1;
            assert!(p.size() > p.base_size());
        }
    }
    assert!(affected > 0);
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_connection_count_matches_directed_edges() {
    let mut backdrop = running(500.0, 500.0, 7);
    let distance = backdrop.config().connection_distance(500.0, 500.0);
    let expected = find_connections(backdrop.particles(), distance).len();

    run_frames(&mut backdrop, 1, 500, 500);
    assert_eq!(backdrop.last_connection_count(), expected);
    assert_eq!(expected % 2, 0);
}

#[test]
fn test_overlay_is_cleared_then_drawn() {
    let mut backdrop = running(800.0, 600.0, 8);
    let (_, overlay) = run_frames(&mut backdrop, 2, 800, 600);
    let cmds = overlay.commands();
    assert_eq!(cmds.len(), 4);
    assert!(matches!(cmds[0], DrawCommand::Clear(c) if c == Hsla::TRANSPARENT));
    assert!(matches!(cmds[1], DrawCommand::StrokeRect { .. }));
    assert_eq!(overlay.lines().count(), 2);
}

#[test]
fn test_raster_frame_is_opaque() {
    let mut backdrop = running(160.0, 120.0, 9);
    let mut canvas = Raster::new(160, 120);
    let mut overlay = Raster::new(160, 120);
    for i in 0..4 {
        backdrop.frame(i as f64 * 16.0, &mut canvas, &mut overlay);
    }
    canvas.composite_over(&overlay);
    assert!(canvas.image().pixels().all(|p| p[3] == 255));
}
