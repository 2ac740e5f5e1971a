//! Individual backdrop particles.
//!
//! A particle steers toward a waypoint with exponentially smoothed velocity,
//! wobbles on top of that with a small orbit and two time-keyed waves, and
//! swells while the pointer hovers nearby. Its waypoint is re-picked on a
//! countdown that runs inside [`Particle::update`], so there is no timer to
//! cancel when the population is dropped.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use crate::color::Hsla;
use crate::input::InputSnapshot;
use crate::surface::{GradientStop, Rect, Surface};

/// Pointer influence radius is `width / INFLUENCE_DIVISOR`.
pub const INFLUENCE_DIVISOR: f32 = 3.5;

/// Share of the current value kept each tick by the smoothing law.
pub const RETAIN: f32 = 0.92;
/// Share pulled toward the goal each tick. `RETAIN + PULL == 1`.
pub const PULL: f32 = 0.08;

/// Lower bound of the retarget interval, in milliseconds (inclusive).
pub const RETARGET_MIN_MS: f32 = 4000.0;
/// Upper bound of the retarget interval, in milliseconds (exclusive).
pub const RETARGET_MAX_MS: f32 = 12000.0;
/// New waypoints land within this fraction of the surface size.
pub const RETARGET_REACH: f32 = 0.3;

/// Lowest hue in degrees (blue).
pub const HUE_MIN: f32 = 180.0;
/// Highest hue in degrees (violet).
pub const HUE_MAX: f32 = 270.0;
/// Largest hue step taken on a retarget.
pub const HUE_DRIFT: f32 = 20.0;

/// Glow radius as a multiple of the current size.
pub const GLOW_SCALE: f32 = 6.0;
/// Solid core radius as a multiple of the current size.
pub const CORE_SCALE: f32 = 0.8;

/// Reference frame length the per-frame constants are tuned for.
const FRAME_MS: f32 = 16.0;
const SEEK_GAIN: f32 = 0.0008;
const POINTER_PULL: f32 = 0.03;
const HOVER_GROWTH: f32 = 1.5;
const HOVER_BRIGHTEN: f32 = 0.35;
const ORBIT_AMPLITUDE: f32 = 0.12;
const WAVE_AMPLITUDE: f32 = 0.08;
const BOUNCE_DAMPING: f32 = 0.5;
const BOUNCE_RECENTER: f32 = 0.5;

/// One animated point of the backdrop.
#[derive(Debug, Clone)]
pub struct Particle {
    position: Vec2,
    target: Vec2,
    speed: Vec2,
    bounds: Vec2,

    size: f32,
    base_size: f32,
    opacity: f32,
    base_opacity: f32,
    hue: f32,
    color: Hsla,

    /// Phase of the circular wobble.
    angle: f32,
    /// Angular rate of the wobble, radians per millisecond.
    angular_velocity: f32,
    unique_offset: f32,
    mouse_influence: f32,

    /// Milliseconds until the next retarget.
    retarget_in: f32,
}

impl Particle {
    /// Create a particle at a uniform random position inside `bounds`.
    ///
    /// `bounds` is the surface size; each axis is raised to at least 1.
    pub fn new<R: Rng + ?Sized>(bounds: Vec2, rng: &mut R) -> Self {
        let bounds = bounds.max(Vec2::ONE);
        let position = Vec2::new(rng.gen_range(0.0..=bounds.x), rng.gen_range(0.0..=bounds.y));
        let base_size = rng.gen_range(0.6..2.4);
        let base_opacity = rng.gen_range(0.2..0.6);
        let hue = rng.gen_range(HUE_MIN..=HUE_MAX);

        let mut particle = Self {
            position,
            target: position,
            speed: Vec2::ZERO,
            bounds,
            size: base_size,
            base_size,
            opacity: base_opacity,
            base_opacity,
            hue,
            color: derive_color(hue, base_size, base_opacity),
            angle: rng.gen_range(0.0..TAU),
            angular_velocity: rng.gen_range(0.0004..0.0016),
            unique_offset: rng.gen_range(0.0..1000.0),
            mouse_influence: rng.gen_range(0.4..1.0),
            retarget_in: retarget_interval(rng),
        };
        particle.target = particle.pick_target(rng);
        particle
    }

    /// Move the particle to `position` (clamped into bounds) and park its
    /// waypoint there.
    #[cfg(test)]
    pub(crate) fn at(mut self, position: Vec2) -> Self {
        self.position = position.clamp(Vec2::ZERO, self.bounds);
        self.target = self.position;
        self.speed = Vec2::ZERO;
        self
    }

    /// Advance one frame.
    ///
    /// `delta_ms` is the frame length and `time_ms` the elapsed clock time
    /// that keys the wave motion. Pointer influence applies only while
    /// `input.hovering` is set.
    pub fn update<R: Rng + ?Sized>(&mut self, input: &InputSnapshot, delta_ms: f32, time_ms: f64, rng: &mut R) {
        let delta = if delta_ms.is_finite() { delta_ms.max(0.0) } else { 0.0 };
        let frames = delta / FRAME_MS;

        self.retarget_in -= delta;
        if self.retarget_in <= 0.0 {
            self.retarget(rng);
        }

        let influence_radius = self.bounds.x / INFLUENCE_DIVISOR;
        let to_pointer = input.pointer - self.position;
        let distance = to_pointer.length();

        if input.hovering && distance < influence_radius {
            let proximity = 1.0 - distance / influence_radius;
            self.target += to_pointer * proximity * self.mouse_influence * POINTER_PULL;
            self.target = self.target.clamp(Vec2::ZERO, self.bounds);
            self.size = self.base_size * (1.0 + proximity * HOVER_GROWTH);
            self.opacity = (self.base_opacity + proximity * HOVER_BRIGHTEN).min(1.0);
        } else {
            self.size = self.size * RETAIN + self.base_size * PULL;
            self.opacity = self.opacity * RETAIN + self.base_opacity * PULL;
        }
        self.color = derive_color(self.hue, self.size, self.opacity);

        let seek = (self.target - self.position) * SEEK_GAIN * delta;
        self.speed = self.speed * RETAIN + seek * PULL;

        self.angle = (self.angle + self.angular_velocity * delta) % TAU;
        let orbit = Vec2::new(self.angle.cos(), self.angle.sin()) * ORBIT_AMPLITUDE;
        let t = time_ms as f32;
        let wave = Vec2::new(
            (t * 0.0007 + self.unique_offset).sin(),
            (t * 0.0009 + self.unique_offset * 1.3).cos(),
        ) * WAVE_AMPLITUDE;

        let next = self.position + self.speed + (orbit + wave) * frames;

        if next.x < 0.0 || next.x > self.bounds.x {
            self.speed.x *= -BOUNCE_DAMPING;
            self.target.x += (self.bounds.x * 0.5 - self.target.x) * BOUNCE_RECENTER;
        }
        if next.y < 0.0 || next.y > self.bounds.y {
            self.speed.y *= -BOUNCE_DAMPING;
            self.target.y += (self.bounds.y * 0.5 - self.target.y) * BOUNCE_RECENTER;
        }

        self.position = next.clamp(Vec2::ZERO, self.bounds);
    }

    /// Paint the glow and the solid core.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let glow_radius = self.size * GLOW_SCALE;
        surface.fill_radial_gradient(
            Rect::around(self.position, glow_radius),
            self.position,
            glow_radius,
            &[
                GradientStop::new(0.0, self.color.fade(0.6)),
                GradientStop::new(0.4, self.color.fade(0.2)),
                GradientStop::new(1.0, self.color.with_alpha(0.0)),
            ],
        );
        surface.fill_circle(self.position, self.size * CORE_SCALE, self.color);
    }

    /// Pick a new waypoint, drift the hue and restart the countdown.
    pub(crate) fn retarget<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.target = self.pick_target(rng);
        self.hue = (self.hue + rng.gen_range(-HUE_DRIFT..=HUE_DRIFT)).clamp(HUE_MIN, HUE_MAX);
        self.color = derive_color(self.hue, self.size, self.opacity);
        self.retarget_in = retarget_interval(rng);
    }

    #[cfg(test)]
    pub(crate) fn set_size(&mut self, size: f32) {
        self.size = size;
        self.color = derive_color(self.hue, self.size, self.opacity);
    }

    fn pick_target<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        let reach = self.bounds * RETARGET_REACH;
        let offset = Vec2::new(
            rng.gen_range(-1.0..=1.0) * reach.x,
            rng.gen_range(-1.0..=1.0) * reach.y,
        );
        (self.position + offset).clamp(Vec2::ZERO, self.bounds)
    }

    /// Current position in surface pixels.
    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Waypoint the particle is drifting toward.
    #[inline]
    pub fn target(&self) -> Vec2 {
        self.target
    }

    /// Smoothed velocity, pixels per frame.
    #[inline]
    pub fn speed(&self) -> Vec2 {
        self.speed
    }

    /// Surface size the particle is confined to.
    #[inline]
    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    /// Current radius scale.
    #[inline]
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Resting radius scale.
    #[inline]
    pub fn base_size(&self) -> f32 {
        self.base_size
    }

    /// Current opacity.
    #[inline]
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Resting opacity.
    #[inline]
    pub fn base_opacity(&self) -> f32 {
        self.base_opacity
    }

    /// Hue in degrees, within [`HUE_MIN`, `HUE_MAX`].
    #[inline]
    pub fn hue(&self) -> f32 {
        self.hue
    }

    /// Color derived from the current hue, size and opacity.
    #[inline]
    pub fn color(&self) -> Hsla {
        self.color
    }

    /// Sensitivity to the pointer, fixed at creation.
    #[inline]
    pub fn mouse_influence(&self) -> f32 {
        self.mouse_influence
    }

    /// Milliseconds left before the next retarget.
    #[inline]
    pub fn retarget_in(&self) -> f32 {
        self.retarget_in
    }
}

fn retarget_interval<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen_range(RETARGET_MIN_MS..RETARGET_MAX_MS)
}

/// Bigger particles read more saturated, brighter ones lighter.
fn derive_color(hue: f32, size: f32, opacity: f32) -> Hsla {
    Hsla::new(
        hue,
        (65.0 + size * 5.0).min(100.0),
        (60.0 + opacity * 15.0).min(85.0),
        opacity.clamp(0.0, 1.0),
    )
}
