//! The animation orchestrator.
//!
//! [`Backdrop`] owns the particle population, the input holder, the frame
//! clock and the RNG, and runs the per-frame pipeline:
//!
//! 1. clear the canvas and paint the vignette
//! 2. draw connections against the positions at the start of the frame
//! 3. update and draw every particle
//! 4. redraw the guide grid on the overlay layer
//!
//! It is a two-state machine. `start()` moves Idle → Running and `stop()`
//! moves back; while Idle, input is ignored and frames draw nothing.

use glam::Vec2;
use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::SeedableRng;
use winit::event::WindowEvent;

use crate::color::Hsla;
use crate::config::{guard, BackdropConfig};
use crate::connections::draw_connections;
use crate::grid_overlay::{draw_parallax_grid, GridParams};
use crate::input::{Input, InputSnapshot};
use crate::particle::Particle;
use crate::surface::{GradientStop, Rect, Surface};
use crate::time::FrameClock;

/// Particle population for a surface with the default configuration.
pub fn particle_count(width: f32, height: f32) -> usize {
    BackdropConfig::default().particle_count(width, height)
}

/// Connection distance for a surface with the default configuration.
pub fn connection_distance(width: f32, height: f32) -> f32 {
    BackdropConfig::default().connection_distance(width, height)
}

/// Size of the drawing surface in pixels. Each axis is at least 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
}

impl Viewport {
    /// Non-positive or non-finite dimensions become 1.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: guard(width),
            height: guard(height),
        }
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Width and height as a vector.
    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Lifecycle state of a [`Backdrop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackdropState {
    /// No frame scheduled, input ignored.
    Idle,
    /// Frames are drawn and input is tracked.
    Running,
}

/// The animated particle backdrop.
#[derive(Debug)]
pub struct Backdrop {
    config: BackdropConfig,
    state: BackdropState,
    viewport: Viewport,
    particles: Vec<Particle>,
    input: Input,
    clock: FrameClock,
    rng: StdRng,
    last_connections: usize,
}

impl Backdrop {
    /// Create an idle backdrop. Nothing is drawn until [`start`](Self::start).
    pub fn new(config: BackdropConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            state: BackdropState::Idle,
            viewport: Viewport::new(1.0, 1.0),
            particles: Vec::new(),
            input: Input::new(),
            clock: FrameClock::new(),
            rng,
            last_connections: 0,
        }
    }

    /// Start animating on a surface of the given size.
    ///
    /// `None` means the surface is not available yet: the backdrop stays
    /// Idle and nothing happens. Returns whether the backdrop is running.
    pub fn start(&mut self, viewport: Option<Viewport>) -> bool {
        if self.is_running() {
            return true;
        }
        let Some(viewport) = viewport else {
            debug!("Backdrop start skipped: no drawing surface");
            return false;
        };

        self.viewport = viewport;
        self.input.reset();
        self.clock.reset();
        self.populate();
        self.state = BackdropState::Running;
        info!(
            "Backdrop started at {}x{} with {} particles",
            viewport.width(),
            viewport.height(),
            self.particles.len()
        );
        debug!("Clearing to {}", self.config.background);
        true
    }

    /// Stop animating and drop the population. No further frames draw.
    pub fn stop(&mut self) {
        if !self.is_running() {
            return;
        }
        self.state = BackdropState::Idle;
        self.particles.clear();
        self.input.reset();
        self.last_connections = 0;
        info!("Backdrop stopped");
    }

    /// Adopt a new surface size and rebuild the population.
    ///
    /// Only meaningful while Running; ignored otherwise.
    pub fn resize(&mut self, width: f32, height: f32) {
        if !self.is_running() {
            debug!("Ignoring resize to {}x{} while idle", width, height);
            return;
        }
        self.viewport = Viewport::new(width, height);
        self.populate();
        info!(
            "Backdrop resized to {}x{}, {} particles",
            self.viewport.width(),
            self.viewport.height(),
            self.particles.len()
        );
    }

    /// Feed a window event into the input holder. Ignored while Idle.
    pub fn handle_event(&mut self, event: &WindowEvent) -> bool {
        self.is_running() && self.input.handle_event(event)
    }

    /// Record the pointer position in surface pixels. Ignored while Idle.
    pub fn set_pointer(&mut self, position: Vec2) {
        if self.is_running() {
            self.input.set_pointer(position);
        }
    }

    /// Record whether the pointer is over the surface. Ignored while Idle.
    pub fn set_hovering(&mut self, hovering: bool) {
        if self.is_running() {
            self.input.set_hovering(hovering);
        }
    }

    /// Record the vertical scroll offset in pixels. Ignored while Idle.
    pub fn set_scroll(&mut self, offset: f32) {
        if self.is_running() {
            self.input.set_scroll(offset);
        }
    }

    /// Draw one frame at host time `timestamp_ms`.
    ///
    /// Particles, connections and the vignette go to `canvas`; the guide
    /// grid goes to `overlay`, which is cleared to transparent first.
    /// Returns whether another frame should be scheduled.
    pub fn frame<C, O>(&mut self, timestamp_ms: f64, canvas: &mut C, overlay: &mut O) -> bool
    where
        C: Surface + ?Sized,
        O: Surface + ?Sized,
    {
        if !self.is_running() {
            debug!("Frame requested while idle");
            return false;
        }

        let (elapsed_ms, delta_ms) = self.clock.tick(timestamp_ms);
        let input = self.input.snapshot();
        let size = self.viewport.size();

        canvas.clear(self.config.background);
        draw_vignette(canvas, size, self.config.background, self.config.vignette_strength);

        let distance = self.config.connection_distance(size.x, size.y);
        self.last_connections = draw_connections(canvas, &self.particles, distance);

        for particle in &mut self.particles {
            particle.update(&input, delta_ms, elapsed_ms, &mut self.rng);
            particle.draw(canvas);
        }

        overlay.clear(Hsla::TRANSPARENT);
        if self.config.overlay {
            draw_parallax_grid(
                overlay,
                &GridParams {
                    width: size.x,
                    height: size.y,
                    scroll: input.scroll,
                    pointer: input.pointer,
                    elapsed: self.clock.elapsed_secs(),
                },
            );
        }

        trace!(
            "frame {}: {} connections, {:.1} fps",
            self.clock.frame(),
            self.last_connections,
            self.clock.fps()
        );
        true
    }

    fn populate(&mut self) {
        let count = self
            .config
            .particle_count(self.viewport.width(), self.viewport.height());
        let bounds = self.viewport.size();
        self.particles = (0..count).map(|_| Particle::new(bounds, &mut self.rng)).collect();
    }

    /// Current lifecycle state.
    #[inline]
    pub fn state(&self) -> BackdropState {
        self.state
    }

    /// Whether frames are being drawn.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == BackdropState::Running
    }

    /// The live population (empty while Idle).
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Surface size the population was built for.
    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The configuration this backdrop was created with.
    #[inline]
    pub fn config(&self) -> &BackdropConfig {
        &self.config
    }

    /// The input values the next frame will see.
    #[inline]
    pub fn input(&self) -> InputSnapshot {
        self.input.snapshot()
    }

    /// Frame timing since the last `start()`.
    #[inline]
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Directed edges drawn in the last frame (each pair counts twice).
    #[inline]
    pub fn last_connection_count(&self) -> usize {
        self.last_connections
    }
}

impl Default for Backdrop {
    fn default() -> Self {
        Self::new(BackdropConfig::default())
    }
}

/// Darken the corners with a radial gradient over the whole surface.
fn draw_vignette<S: Surface + ?Sized>(surface: &mut S, size: Vec2, background: Hsla, strength: f32) {
    if strength <= 0.0 {
        return;
    }
    let shade = Hsla::new(background.h, background.s, 1.0, 0.0);
    let center = size * 0.5;
    surface.fill_radial_gradient(
        Rect::new(0.0, 0.0, size.x, size.y),
        center,
        center.length(),
        &[
            GradientStop::new(0.0, shade),
            GradientStop::new(0.55, shade),
            GradientStop::new(1.0, shade.with_alpha(strength)),
        ],
    );
}
