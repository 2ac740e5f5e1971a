//! Structured colors for particles, connections and guide lines.
//!
//! Colors are kept as HSL plus alpha until the moment they are drawn.
//! Deriving a faded variant is a field assignment via [`Hsla::with_alpha`],
//! and conversion to RGB happens only inside a [`Surface`](crate::surface::Surface).

use std::fmt;

use glam::{Vec3, Vec4};

/// A color in HSL space with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsla {
    /// Hue in degrees. Any value is accepted and wrapped into `[0, 360)`.
    pub h: f32,
    /// Saturation in percent (0-100).
    pub s: f32,
    /// Lightness in percent (0-100).
    pub l: f32,
    /// Alpha (0.0-1.0).
    pub a: f32,
}

impl Hsla {
    /// Fully transparent black.
    pub const TRANSPARENT: Hsla = Hsla::new(0.0, 0.0, 0.0, 0.0);

    /// Build a color from hue (degrees), saturation and lightness (percent) and alpha.
    pub const fn new(h: f32, s: f32, l: f32, a: f32) -> Self {
        Self { h, s, l, a }
    }

    /// Same hue, saturation and lightness with a different alpha.
    #[inline]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Scale the current alpha by `factor`.
    #[inline]
    pub fn fade(self, factor: f32) -> Self {
        self.with_alpha(self.a * factor)
    }

    /// Convert to RGB (0.0-1.0 per channel), ignoring alpha.
    pub fn to_rgb(&self) -> Vec3 {
        let h = self.h.rem_euclid(360.0) / 360.0;
        let s = (self.s / 100.0).clamp(0.0, 1.0);
        let l = (self.l / 100.0).clamp(0.0, 1.0);

        if s == 0.0 {
            return Vec3::splat(l);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        Vec3::new(
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
        )
    }

    /// Convert to RGBA (0.0-1.0 per channel).
    pub fn to_rgba(&self) -> Vec4 {
        self.to_rgb().extend(self.a.clamp(0.0, 1.0))
    }

    /// Linear interpolation of every component, hue included.
    ///
    /// Hues in this crate live in a narrow band, so no shortest-arc handling.
    pub fn lerp(self, other: Hsla, t: f32) -> Hsla {
        let t = t.clamp(0.0, 1.0);
        Hsla {
            h: self.h + (other.h - self.h) * t,
            s: self.s + (other.s - self.s) * t,
            l: self.l + (other.l - self.l) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

impl fmt::Display for Hsla {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsla({:.1}, {:.1}%, {:.1}%, {:.3})",
            self.h, self.s, self.l, self.a
        )
    }
}
