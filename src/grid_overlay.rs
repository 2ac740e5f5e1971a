//! Golden-ratio guide grid drawn on its own layer.
//!
//! Stateless: the geometry is a pure function of the surface size, scroll
//! offset, pointer position and elapsed time, recomputed every frame.
//!
//! ```text
//!   +-----------------------------+   frame inset by size / φ⁴, breathing
//!   |        |                    |
//!   |--------+--------------------|   horizontal guide at height / φ²
//!   |        |                    |
//!   +-----------------------------+
//!            ^ vertical guide at width / φ
//! ```

use glam::Vec2;

use crate::color::Hsla;
use crate::surface::{Paint, Rect, Surface};

/// The golden ratio.
pub const PHI: f32 = 1.618_034;

const BREATH_RATE: f32 = 0.5;
const BREATH_DEPTH: f32 = 0.03;
/// Largest frame offset caused by the pointer, in pixels.
const MAX_SKEW: f32 = 8.0;
/// Frame moves up by this fraction of the scroll offset.
const PARALLAX_RATE: f32 = 0.1;
const WOBBLE: f32 = 3.0;

const FRAME_COLOR: Hsla = Hsla::new(230.0, 45.0, 72.0, 0.07);
const GUIDE_COLOR: Hsla = Hsla::new(255.0, 55.0, 70.0, 0.06);
const LINE_WIDTH: f32 = 1.0;

/// Inputs of one overlay frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridParams {
    /// Surface width in pixels.
    pub width: f32,
    /// Surface height in pixels.
    pub height: f32,
    /// Vertical scroll offset in pixels.
    pub scroll: f32,
    /// Pointer position in surface pixels.
    pub pointer: Vec2,
    /// Elapsed time in seconds.
    pub elapsed: f32,
}

/// Computed overlay geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    /// Outer frame, inset from the surface edges.
    pub frame: Rect,
    /// X of the vertical guide.
    pub golden_x: f32,
    /// Y of the horizontal guide.
    pub golden_y: f32,
    /// Current breathing scale applied to the margins.
    pub breathe: f32,
    /// Surface size after the non-negative guard.
    pub size: Vec2,
}

impl GridGeometry {
    /// Geometry of the overlay for one frame.
    pub fn compute(params: &GridParams) -> Self {
        let size = Vec2::new(non_negative(params.width), non_negative(params.height));
        let elapsed = if params.elapsed.is_finite() { params.elapsed } else { 0.0 };
        let scroll = non_negative(params.scroll);

        let breathe = 1.0 + (elapsed * BREATH_RATE).sin() * BREATH_DEPTH;
        let margin = size / PHI.powi(4) * breathe;

        let skew = if size.x > 0.0 && size.y > 0.0 && params.pointer.is_finite() {
            let center = size * 0.5;
            ((params.pointer - center) / center).clamp(Vec2::NEG_ONE, Vec2::ONE) * MAX_SKEW
        } else {
            Vec2::ZERO
        };
        let parallax = -scroll * PARALLAX_RATE;

        let frame = Rect::new(
            margin.x + skew.x,
            margin.y + skew.y + parallax,
            size.x - margin.x * 2.0,
            size.y - margin.y * 2.0,
        );

        let golden_x = size.x / PHI + (elapsed * 0.8).sin() * WOBBLE + skew.x;
        let golden_y = size.y / (PHI * PHI) + (elapsed * 0.6 + 1.0).cos() * WOBBLE + skew.y + parallax;

        Self {
            frame,
            golden_x,
            golden_y,
            breathe,
            size,
        }
    }
}

fn non_negative(v: f32) -> f32 {
    if v.is_finite() {
        v.max(0.0)
    } else {
        0.0
    }
}

/// Draw the frame and both guides. Nothing is drawn on an empty surface.
pub fn draw_parallax_grid<S: Surface + ?Sized>(surface: &mut S, params: &GridParams) {
    let geometry = GridGeometry::compute(params);
    let size = geometry.size;
    if size.x <= 0.0 || size.y <= 0.0 {
        return;
    }

    surface.stroke_rect(geometry.frame, LINE_WIDTH, FRAME_COLOR);
    surface.stroke_line(
        Vec2::new(geometry.golden_x, 0.0),
        Vec2::new(geometry.golden_x, size.y),
        LINE_WIDTH,
        Paint::Solid(GUIDE_COLOR),
    );
    surface.stroke_line(
        Vec2::new(0.0, geometry.golden_y),
        Vec2::new(size.x, geometry.golden_y),
        LINE_WIDTH,
        Paint::Solid(GUIDE_COLOR),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCommand, Recorder};

    fn params() -> GridParams {
        GridParams {
            width: 1000.0,
            height: 800.0,
            scroll: 0.0,
            pointer: Vec2::new(500.0, 400.0),
            elapsed: 0.0,
        }
    }

    #[test]
    fn test_centered_pointer_has_no_skew() {
        let g = GridGeometry::compute(&params());
        let margin = 1000.0 / PHI.powi(4);
        assert_eq!(g.breathe, 1.0);
        assert!((g.frame.x - margin).abs() < 1e-3);
        assert!((g.frame.width - (1000.0 - margin * 2.0)).abs() < 1e-3);
        assert!((g.golden_x - 1000.0 / PHI).abs() < 1e-3);
    }

    #[test]
    fn test_breathing_stays_small() {
        for step in 0..200 {
            let g = GridGeometry::compute(&GridParams {
                elapsed: step as f32 * 0.1,
                ..params()
            });
            assert!(g.breathe >= 1.0 - BREATH_DEPTH - 1e-6 && g.breathe <= 1.0 + BREATH_DEPTH + 1e-6);
        }
    }

    #[test]
    fn test_scroll_moves_frame_up() {
        let still = GridGeometry::compute(&params());
        let scrolled = GridGeometry::compute(&GridParams {
            scroll: 300.0,
            ..params()
        });
        assert!((still.frame.y - scrolled.frame.y - 30.0).abs() < 1e-3);
        assert!((still.golden_y - scrolled.golden_y - 30.0).abs() < 1e-3);
        assert_eq!(still.golden_x, scrolled.golden_x);
    }

    #[test]
    fn test_pointer_skew_is_bounded() {
        let far = GridGeometry::compute(&GridParams {
            pointer: Vec2::new(1e6, -1e6),
            ..params()
        });
        let still = GridGeometry::compute(&params());
        assert!((far.frame.x - still.frame.x - MAX_SKEW).abs() < 1e-3);
        assert!((far.frame.y - still.frame.y + MAX_SKEW).abs() < 1e-3);
    }

    #[test]
    fn test_degenerate_dimensions() {
        let g = GridGeometry::compute(&GridParams {
            width: -20.0,
            height: f32::NAN,
            ..params()
        });
        assert_eq!(g.size, Vec2::ZERO);
        assert_eq!(g.frame.width, 0.0);
        assert_eq!(g.frame.height, 0.0);

        let mut rec = Recorder::new(0, 0);
        draw_parallax_grid(
            &mut rec,
            &GridParams {
                width: 0.0,
                height: 0.0,
                ..params()
            },
        );
        assert!(rec.commands().is_empty());
    }

    #[test]
    fn test_draws_frame_and_two_guides() {
        let mut rec = Recorder::new(1000, 800);
        draw_parallax_grid(&mut rec, &params());
        assert_eq!(rec.commands().len(), 3);
        assert!(matches!(rec.commands()[0], DrawCommand::StrokeRect { .. }));
        assert_eq!(rec.lines().count(), 2);
    }
}
