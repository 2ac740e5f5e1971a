//! # Aether - ambient particle backdrop
//!
//! A slowly drifting field of glowing particles joined by faint gradient
//! lines, with a golden-ratio guide grid floating above it. Particles wander
//! toward random targets, gather around the pointer while it hovers, pulse
//! and shift hue over time.
//!
//! Everything is drawn through the [`Surface`] trait. The crate ships a
//! software [`Raster`] (used by the native window and the snapshot
//! exporter) and a [`Recorder`] that captures draw calls.
//!
//! ## Quick Start
//!
//! ```
//! use aether::prelude::*;
//!
//! let mut backdrop = Backdrop::new(BackdropConfig::default().with_seed(7));
//! let mut canvas = Raster::new(320, 200);
//! let mut overlay = Raster::new(320, 200);
//!
//! backdrop.start(Some(Viewport::new(320.0, 200.0)));
//! backdrop.set_pointer(Vec2::new(160.0, 100.0));
//! for frame in 0..10 {
//!     backdrop.frame(frame as f64 * 16.0, &mut canvas, &mut overlay);
//! }
//! canvas.composite_over(&overlay);
//!
//! assert_eq!(backdrop.particles().len(), 12);
//! ```
//!
//! ## Frame pipeline
//!
//! Each [`Backdrop::frame`] call:
//!
//! 1. clears the canvas and paints a vignette
//! 2. connects every pair of particles closer than the connection distance,
//!    found through a [`SpatialHashGrid`]
//! 3. updates and draws each particle
//! 4. redraws the guide grid on the overlay surface
//!
//! ## Sizing
//!
//! | Quantity | Rule |
//! |----------|------|
//! | Particle count | `clamp(floor(width * height / 22000), 12, 35)` |
//! | Connection distance | `min(width, height) / 6` |
//! | Particle bounds | the surface size at (re)initialization |

pub mod backdrop;
pub mod color;
pub mod config;
pub mod connections;
mod error;
pub mod export;
mod gpu;
pub mod grid_overlay;
pub mod input;
pub mod particle;
pub mod spatial;
pub mod surface;
pub mod time;
pub mod window;

pub use backdrop::{connection_distance, particle_count, Backdrop, BackdropState, Viewport};
pub use color::Hsla;
pub use config::BackdropConfig;
pub use connections::{draw_connections, find_connections, Connection};
pub use error::{ExportError, GpuError, RunError};
pub use glam::Vec2;
pub use grid_overlay::{draw_parallax_grid, GridGeometry, GridParams};
pub use input::{Input, InputSnapshot};
pub use particle::Particle;
pub use spatial::SpatialHashGrid;
pub use surface::{DrawCommand, GradientStop, Paint, Raster, Recorder, Rect, Surface};
pub use time::FrameClock;

/// Convenient re-exports for common usage.
///
/// ```
/// use aether::prelude::*;
/// ```
pub mod prelude {
    pub use crate::backdrop::{Backdrop, BackdropState, Viewport};
    pub use crate::color::Hsla;
    pub use crate::config::BackdropConfig;
    pub use crate::surface::{Raster, Recorder, Surface};
    pub use glam::Vec2;
}
