//! Error types for the fallible edges of the crate.
//!
//! The simulation itself never fails. Errors only come from presenting
//! frames on a GPU surface, from the native window host and from writing
//! snapshots to disk.

use thiserror::Error;

/// Errors that can occur while setting up GPU presentation.
#[derive(Debug, Error)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    #[error("failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    #[error("no compatible GPU adapter found")]
    NoAdapter,
    /// Failed to create GPU device.
    #[error("failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),
}

/// Errors that can occur while exporting a snapshot.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The image encoder rejected the frame.
    #[error("failed to encode snapshot: {0}")]
    Image(#[from] image::ImageError),
    /// The output file or its directory could not be written.
    #[error("failed to write snapshot: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur when running the native host.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to create or run the event loop.
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    /// Failed to create the window.
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    /// GPU setup failed.
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
    /// Failed to write a snapshot.
    #[error(transparent)]
    Export(#[from] ExportError),
}
