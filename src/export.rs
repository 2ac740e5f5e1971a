//! Headless snapshot export.
//!
//! Runs the backdrop for a number of synthetic 16 ms frames on software
//! rasters and writes the composited result to an image file. The pointer
//! follows a slow circle around the center so the hover behavior shows up
//! in the output.

use std::path::Path;

use glam::Vec2;
use log::info;

use crate::backdrop::{Backdrop, Viewport};
use crate::config::BackdropConfig;
use crate::error::ExportError;
use crate::surface::{Raster, Surface};

/// Synthetic frame interval in milliseconds.
pub const FRAME_INTERVAL_MS: f64 = 16.0;

/// Render `frames` frames at `width` x `height` and return the final image.
///
/// The canvas and the overlay are composited into one raster.
pub fn render_frames(config: BackdropConfig, width: u32, height: u32, frames: u32) -> Raster {
    let mut backdrop = Backdrop::new(config);
    let mut canvas = Raster::new(width, height);
    let mut overlay = Raster::new(width, height);
    let (w, h) = canvas.size();
    let (w, h) = (w as f32, h as f32);

    backdrop.start(Some(Viewport::new(w, h)));
    let center = Vec2::new(w, h) * 0.5;
    let orbit = center.min_element() * 0.5;

    for i in 0..frames.max(1) {
        let angle = i as f32 * 0.02;
        backdrop.set_pointer(center + Vec2::new(angle.cos(), angle.sin()) * orbit);
        backdrop.frame(i as f64 * FRAME_INTERVAL_MS, &mut canvas, &mut overlay);
    }

    canvas.composite_over(&overlay);
    canvas
}

/// Render a snapshot and save it to `path`. The format follows the extension.
pub fn render_snapshot(
    config: BackdropConfig,
    width: u32,
    height: u32,
    frames: u32,
    path: impl AsRef<Path>,
) -> Result<(), ExportError> {
    let path = path.as_ref();
    let raster = render_frames(config, width, height, frames);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    raster.image().save(path)?;
    info!(
        "Wrote {}x{} snapshot after {} frames to {}",
        raster.size().0,
        raster.size().1,
        frames.max(1),
        path.display()
    );
    Ok(())
}
