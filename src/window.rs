//! Native window host.
//!
//! Opens a winit window, rasterizes the backdrop on the CPU each redraw and
//! hands the result to the [`Presenter`]. Without a usable GPU the backdrop
//! never leaves Idle and the window stays blank until closed.

use std::sync::Arc;
use std::time::Instant;

use log::{debug, info, warn};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::backdrop::{Backdrop, Viewport};
use crate::config::BackdropConfig;
use crate::error::RunError;
use crate::gpu::Presenter;
use crate::surface::Raster;

const TITLE: &str = "Aether";

/// Open a window and animate the backdrop until it is closed.
pub fn run(config: BackdropConfig) -> Result<(), RunError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct App {
    window: Option<Arc<Window>>,
    presenter: Option<Presenter>,
    backdrop: Backdrop,
    canvas: Raster,
    overlay: Raster,
    started_at: Instant,
    error: Option<RunError>,
}

impl App {
    fn new(config: BackdropConfig) -> Self {
        Self {
            window: None,
            presenter: None,
            backdrop: Backdrop::new(config),
            canvas: Raster::new(1, 1),
            overlay: Raster::new(1, 1),
            started_at: Instant::now(),
            error: None,
        }
    }

    fn resize_layers(&mut self, width: u32, height: u32) {
        self.canvas.resize(width, height);
        self.overlay.resize(width, height);
    }

    fn request_redraw(&self) {
        if self.backdrop.is_running() {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(presenter) = &mut self.presenter else {
            return;
        };
        let timestamp_ms = self.started_at.elapsed().as_secs_f64() * 1000.0;
        if !self.backdrop.frame(timestamp_ms, &mut self.canvas, &mut self.overlay) {
            return;
        }
        self.canvas.composite_over(&self.overlay);

        match presenter.present(&self.canvas) {
            Ok(_) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (width, height) = presenter.size();
                presenter.resize(width, height);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                warn!("GPU out of memory, closing");
                self.backdrop.stop();
                event_loop.exit();
                return;
            }
            Err(e) => warn!("Present error: {:?}", e),
        }
        self.request_redraw();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title(TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.error = Some(e.into());
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        match pollster::block_on(Presenter::new(window)) {
            Ok(presenter) => self.presenter = Some(presenter),
            Err(e) => warn!("No drawing surface, backdrop stays idle: {}", e),
        }

        let viewport = self.presenter.as_ref().map(|presenter| {
            let (width, height) = presenter.size();
            Viewport::new(width as f32, height as f32)
        });
        if let Some(presenter) = &self.presenter {
            let (width, height) = presenter.size();
            self.resize_layers(width, height);
        }

        self.started_at = Instant::now();
        if self.backdrop.start(viewport) {
            info!("Window opened");
        }
        self.request_redraw();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.backdrop.stop();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(presenter) = &mut self.presenter {
                    presenter.resize(size.width, size.height);
                }
                if size.width > 0 && size.height > 0 {
                    self.resize_layers(size.width, size.height);
                    self.backdrop.resize(size.width as f32, size.height as f32);
                } else {
                    debug!("Ignoring zero-sized resize");
                }
                self.request_redraw();
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            other => {
                self.backdrop.handle_event(&other);
            }
        }
    }
}
