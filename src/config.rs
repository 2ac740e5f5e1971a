//! Backdrop configuration.
//!
//! Defaults reproduce the shipped look; the builder methods exist for hosts
//! that want a denser field, a different palette behind it, or a fixed seed.
//!
//! ```
//! use aether::BackdropConfig;
//!
//! let config = BackdropConfig::default()
//!     .with_particle_range(20, 60)
//!     .with_overlay(false);
//!
//! assert_eq!(config.particle_count(1000.0, 800.0), 36);
//! ```

use crate::color::Hsla;

/// One particle per this many square pixels.
pub const DENSITY_DIVISOR: f32 = 22_000.0;
/// Fewest particles on any surface.
pub const MIN_PARTICLES: usize = 12;
/// Most particles on any surface.
pub const MAX_PARTICLES: usize = 35;
/// Connection distance is `min(width, height) / CONNECTION_DIVISOR`.
pub const CONNECTION_DIVISOR: f32 = 6.0;

/// Tunables for a [`Backdrop`](crate::Backdrop).
#[derive(Debug, Clone, PartialEq)]
pub struct BackdropConfig {
    /// Surface area in square pixels per particle.
    pub density_divisor: f32,
    /// Lower bound on the population. Wins over `max_particles` if they cross.
    pub min_particles: usize,
    /// Upper bound on the population.
    pub max_particles: usize,
    /// Connection distance is `min(width, height) / connection_divisor`.
    pub connection_divisor: f32,
    /// Color the canvas is cleared to each frame.
    pub background: Hsla,
    /// Alpha of the darkened corners (0 disables the vignette).
    pub vignette_strength: f32,
    /// Whether the golden-ratio guide grid is drawn.
    pub overlay: bool,
    /// Fixed RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            density_divisor: DENSITY_DIVISOR,
            min_particles: MIN_PARTICLES,
            max_particles: MAX_PARTICLES,
            connection_divisor: CONNECTION_DIVISOR,
            background: Hsla::new(235.0, 35.0, 6.0, 1.0),
            vignette_strength: 0.55,
            overlay: true,
            seed: None,
        }
    }
}

impl BackdropConfig {
    /// Same as [`Default::default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the particle count clamp. `max` is raised to `min` if smaller,
    /// which is also how [`particle_count`](Self::particle_count) reads
    /// hand-built configs.
    pub fn with_particle_range(mut self, min: usize, max: usize) -> Self {
        self.min_particles = min;
        self.max_particles = max.max(min);
        self
    }

    /// Square pixels per particle. Non-positive values are ignored.
    pub fn with_density_divisor(mut self, divisor: f32) -> Self {
        if divisor > 0.0 {
            self.density_divisor = divisor;
        }
        self
    }

    /// Connection distance is `min(width, height) / divisor`. Non-positive
    /// values are ignored.
    pub fn with_connection_divisor(mut self, divisor: f32) -> Self {
        if divisor > 0.0 {
            self.connection_divisor = divisor;
        }
        self
    }

    /// Color the canvas is cleared to.
    pub fn with_background(mut self, color: Hsla) -> Self {
        self.background = color;
        self
    }

    /// Corner darkening alpha, clamped to 0-1.
    pub fn with_vignette(mut self, strength: f32) -> Self {
        self.vignette_strength = strength.clamp(0.0, 1.0);
        self
    }

    /// Toggle the golden-ratio guide grid.
    pub fn with_overlay(mut self, enabled: bool) -> Self {
        self.overlay = enabled;
        self
    }

    /// Seed the particle RNG for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Particle population for a surface: `clamp(area / density, min, max)`.
    ///
    /// Dimensions are raised to at least 1 first.
    pub fn particle_count(&self, width: f32, height: f32) -> usize {
        let area = guard(width) * guard(height);
        let raw = (area / self.density_divisor).floor() as usize;
        raw.max(self.min_particles).min(self.max_particles.max(self.min_particles))
    }

    /// Neighbor radius for connections: `min(width, height) / divisor`.
    ///
    /// Never exceeds the surface diagonal; divisors that are not positive
    /// and finite fall back to [`CONNECTION_DIVISOR`].
    pub fn connection_distance(&self, width: f32, height: f32) -> f32 {
        let (width, height) = (guard(width), guard(height));
        let divisor = if self.connection_divisor.is_finite() && self.connection_divisor > 0.0 {
            self.connection_divisor
        } else {
            CONNECTION_DIVISOR
        };
        let diagonal = width.hypot(height);
        (width.min(height) / divisor).min(diagonal)
    }
}

/// Raise a dimension to at least 1, mapping non-finite values to 1.
pub(crate) fn guard(v: f32) -> f32 {
    if v.is_finite() {
        v.max(1.0)
    } else {
        1.0
    }
}
