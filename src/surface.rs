//! 2D drawing surfaces.
//!
//! Everything the backdrop paints goes through the [`Surface`] trait, which
//! covers the handful of canvas primitives the renderers need. Two
//! implementations ship with the crate:
//!
//! - [`Raster`] - a software rasterizer over an [`image::RgbaImage`] with
//!   anti-aliased edges and source-over alpha blending. This is what the
//!   native window and the snapshot exporter draw into.
//! - [`Recorder`] - keeps a list of [`DrawCommand`]s instead of pixels.
//!   Useful for inspecting draw order and parameters.

use glam::{Vec2, Vec4};
use image::{Rgba, RgbaImage};

use crate::color::Hsla;

/// Axis-aligned rectangle in surface pixels. Width and height are never negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Negative sizes clamp to zero.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Square bounding box of a circle.
    pub fn around(center: Vec2, radius: f32) -> Self {
        let r = radius.max(0.0);
        Self::new(center.x - r, center.y - r, r * 2.0, r * 2.0)
    }

    /// Top-left corner.
    #[inline]
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Bottom-right corner.
    #[inline]
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y + self.height)
    }
}

/// A color stop of a radial gradient. `offset` runs 0.0 (center) to 1.0 (edge).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Position along the radius, 0.0 to 1.0.
    pub offset: f32,
    /// Color at that position.
    pub color: Hsla,
}

impl GradientStop {
    /// Stop `color` at `offset`.
    pub const fn new(offset: f32, color: Hsla) -> Self {
        Self { offset, color }
    }
}

/// How a stroke is colored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    /// One color along the whole stroke.
    Solid(Hsla),
    /// Linear gradient from `from` at `start` to `to` at `end`.
    Linear {
        start: Vec2,
        end: Vec2,
        from: Hsla,
        to: Hsla,
    },
}

impl Paint {
    /// Color of the paint at point `p`.
    pub fn color_at(&self, p: Vec2) -> Hsla {
        match *self {
            Paint::Solid(c) => c,
            Paint::Linear { start, end, from, to } => {
                let axis = end - start;
                let len_sq = axis.length_squared();
                if len_sq <= f32::EPSILON {
                    return from;
                }
                let t = ((p - start).dot(axis) / len_sq).clamp(0.0, 1.0);
                from.lerp(to, t)
            }
        }
    }
}

/// Sample a sorted list of gradient stops at `t`.
pub fn sample_stops(stops: &[GradientStop], t: f32) -> Hsla {
    let Some(first) = stops.first() else {
        return Hsla::TRANSPARENT;
    };
    if t <= first.offset {
        return first.color;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = b.offset - a.offset;
            if span <= f32::EPSILON {
                return b.color;
            }
            return a.color.lerp(b.color, (t - a.offset) / span);
        }
    }
    stops[stops.len() - 1].color
}

/// The drawing primitives used by the backdrop renderers.
pub trait Surface {
    /// Surface size in pixels.
    fn size(&self) -> (u32, u32);

    /// Fill the whole surface with `color`, replacing what was there.
    fn clear(&mut self, color: Hsla);

    /// Fill `rect` with a radial gradient centered at `center`. Points further
    /// than `radius` take the color of the last stop.
    fn fill_radial_gradient(&mut self, rect: Rect, center: Vec2, radius: f32, stops: &[GradientStop]);

    /// Fill a disc with an anti-aliased edge.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Hsla);

    /// Stroke a straight segment with round-ish caps.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, paint: Paint);

    /// Stroke the outline of `rect`.
    fn stroke_rect(&mut self, rect: Rect, width: f32, color: Hsla) {
        let (min, max) = (rect.min(), rect.max());
        let paint = Paint::Solid(color);
        self.stroke_line(min, Vec2::new(max.x, min.y), width, paint);
        self.stroke_line(Vec2::new(max.x, min.y), max, width, paint);
        self.stroke_line(max, Vec2::new(min.x, max.y), width, paint);
        self.stroke_line(Vec2::new(min.x, max.y), min, width, paint);
    }
}

// ============================================================================
// Raster
// ============================================================================

/// Software rasterizer writing straight-alpha RGBA8 pixels.
#[derive(Debug, Clone)]
pub struct Raster {
    image: RgbaImage,
}

impl Raster {
    /// Create a transparent raster. Zero dimensions are bumped to 1.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width.max(1), height.max(1)),
        }
    }

    /// Reallocate to a new size, dropping the current contents.
    pub fn resize(&mut self, width: u32, height: u32) {
        let (width, height) = (width.max(1), height.max(1));
        if self.image.dimensions() != (width, height) {
            self.image = RgbaImage::new(width, height);
        }
    }

    /// The pixels drawn so far.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        self.image.get_pixel_checked(x, y).copied()
    }

    /// Draw `overlay` on top of this raster with source-over blending.
    ///
    /// Only the overlapping region is composited when sizes differ.
    pub fn composite_over(&mut self, overlay: &Raster) {
        let (w, h) = self.image.dimensions();
        let (ow, oh) = overlay.image.dimensions();
        for y in 0..h.min(oh) {
            for x in 0..w.min(ow) {
                let src = overlay.image.get_pixel(x, y);
                if src[3] == 0 {
                    continue;
                }
                let color = Vec4::new(
                    src[0] as f32 / 255.0,
                    src[1] as f32 / 255.0,
                    src[2] as f32 / 255.0,
                    src[3] as f32 / 255.0,
                );
                self.blend(x, y, color, 1.0);
            }
        }
    }

    /// Source-over blend of a straight-alpha color with partial coverage.
    fn blend(&mut self, x: u32, y: u32, color: Vec4, coverage: f32) {
        let sa = (color.w * coverage).clamp(0.0, 1.0);
        if sa <= 0.0 {
            return;
        }
        let dst = self.image.get_pixel_mut(x, y);
        let da = dst[3] as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        if out_a <= 0.0 {
            *dst = Rgba([0, 0, 0, 0]);
            return;
        }
        let mut out = [0u8; 4];
        for (i, channel) in out.iter_mut().take(3).enumerate() {
            let s = color[i].clamp(0.0, 1.0);
            let d = dst[i] as f32 / 255.0;
            let v = (s * sa + d * da * (1.0 - sa)) / out_a;
            *channel = (v * 255.0).round().clamp(0.0, 255.0) as u8;
        }
        out[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
        *dst = Rgba(out);
    }

    /// Pixel index range covering `[min, max]`, clipped to the image.
    fn span(&self, min: Vec2, max: Vec2) -> Option<(u32, u32, u32, u32)> {
        let (w, h) = self.image.dimensions();
        if !(min.is_finite() && max.is_finite()) {
            return None;
        }
        let x0 = min.x.floor().max(0.0);
        let y0 = min.y.floor().max(0.0);
        let x1 = max.x.ceil().min(w as f32);
        let y1 = max.y.ceil().min(h as f32);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}

#[inline]
fn pixel_center(x: u32, y: u32) -> Vec2 {
    Vec2::new(x as f32 + 0.5, y as f32 + 0.5)
}

impl Surface for Raster {
    fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn clear(&mut self, color: Hsla) {
        let rgba = color.to_rgba() * 255.0;
        let px = Rgba([
            rgba.x.round() as u8,
            rgba.y.round() as u8,
            rgba.z.round() as u8,
            rgba.w.round() as u8,
        ]);
        for p in self.image.pixels_mut() {
            *p = px;
        }
    }

    fn fill_radial_gradient(&mut self, rect: Rect, center: Vec2, radius: f32, stops: &[GradientStop]) {
        if stops.is_empty() {
            return;
        }
        let Some((x0, y0, x1, y1)) = self.span(rect.min(), rect.max()) else {
            return;
        };
        let radius = radius.max(f32::EPSILON);
        for y in y0..y1 {
            for x in x0..x1 {
                let p = pixel_center(x, y);
                let t = (p.distance(center) / radius).min(1.0);
                let color = sample_stops(stops, t);
                if color.a > 0.0 {
                    self.blend(x, y, color.to_rgba(), 1.0);
                }
            }
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Hsla) {
        if radius <= 0.0 {
            return;
        }
        let pad = Vec2::splat(radius + 1.0);
        let Some((x0, y0, x1, y1)) = self.span(center - pad, center + pad) else {
            return;
        };
        let rgba = color.to_rgba();
        for y in y0..y1 {
            for x in x0..x1 {
                let coverage = (radius + 0.5 - pixel_center(x, y).distance(center)).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(x, y, rgba, coverage);
                }
            }
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, paint: Paint) {
        if width <= 0.0 {
            return;
        }
        let half = width * 0.5;
        // Hairlines keep a one pixel footprint and fade with their width instead.
        let (reach, thin) = if width < 1.0 { (0.5, width) } else { (half, 1.0) };
        let pad = Vec2::splat(reach + 1.0);
        let Some((x0, y0, x1, y1)) = self.span(from.min(to) - pad, from.max(to) + pad) else {
            return;
        };

        let seg = to - from;
        let len_sq = seg.length_squared();
        for y in y0..y1 {
            for x in x0..x1 {
                let p = pixel_center(x, y);
                let t = if len_sq > f32::EPSILON {
                    ((p - from).dot(seg) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let dist = p.distance(from + seg * t);
                let coverage = (reach + 0.5 - dist).clamp(0.0, 1.0) * thin;
                if coverage > 0.0 {
                    self.blend(x, y, paint.color_at(p).to_rgba(), coverage);
                }
            }
        }
    }
}

// ============================================================================
// Recorder
// ============================================================================

/// A recorded call on a [`Surface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Hsla),
    RadialGradient {
        rect: Rect,
        center: Vec2,
        radius: f32,
        stops: Vec<GradientStop>,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Hsla,
    },
    StrokeLine {
        from: Vec2,
        to: Vec2,
        width: f32,
        paint: Paint,
    },
    StrokeRect {
        rect: Rect,
        width: f32,
        color: Hsla,
    },
}

/// Surface that records draw calls instead of rasterizing them.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl Recorder {
    /// Empty recorder reporting the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Recorded calls, in draw order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Forget everything recorded so far.
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// All recorded line strokes, in draw order.
    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokeLine { .. }))
    }
}

impl Surface for Recorder {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Hsla) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_radial_gradient(&mut self, rect: Rect, center: Vec2, radius: f32, stops: &[GradientStop]) {
        self.commands.push(DrawCommand::RadialGradient {
            rect,
            center,
            radius,
            stops: stops.to_vec(),
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Hsla) {
        self.commands.push(DrawCommand::FillCircle { center, radius, color });
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, paint: Paint) {
        self.commands.push(DrawCommand::StrokeLine { from, to, width, paint });
    }

    fn stroke_rect(&mut self, rect: Rect, width: f32, color: Hsla) {
        self.commands.push(DrawCommand::StrokeRect { rect, width, color });
    }
}
