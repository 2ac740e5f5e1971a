//! Pointer and scroll input for the backdrop.
//!
//! Event handlers only record the latest values into an [`Input`] holder.
//! Once per tick the orchestrator takes an immutable [`InputSnapshot`] and
//! threads it through the frame, so nothing in the simulation reads shared
//! mutable state mid-frame.

use glam::Vec2;
use winit::event::{MouseScrollDelta, WindowEvent};

/// Pixels of virtual scroll per wheel line.
const LINE_SCROLL_PX: f32 = 40.0;

/// The input values one frame sees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputSnapshot {
    /// Pointer position in surface pixels.
    pub pointer: Vec2,
    /// Whether the pointer is over the surface.
    pub hovering: bool,
    /// Vertical scroll offset in pixels (never negative).
    pub scroll: f32,
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self {
            pointer: Vec2::ZERO,
            hovering: false,
            scroll: 0.0,
        }
    }
}

/// Latest pointer and scroll state, written by event handlers.
#[derive(Debug, Default)]
pub struct Input {
    pointer: Vec2,
    hovering: bool,
    scroll: f32,
}

impl Input {
    /// Empty holder: pointer at the origin, not hovering, no scroll.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy out the current values for one frame.
    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            pointer: self.pointer,
            hovering: self.hovering,
            scroll: self.scroll,
        }
    }

    /// Record a pointer move. A move implies the pointer is over the surface.
    pub fn set_pointer(&mut self, position: Vec2) {
        if position.is_finite() {
            self.pointer = position;
            self.hovering = true;
        }
    }

    /// Record whether the pointer is over the surface.
    pub fn set_hovering(&mut self, hovering: bool) {
        self.hovering = hovering;
    }

    /// Set the absolute scroll offset. Negative values clamp to zero.
    pub fn set_scroll(&mut self, offset: f32) {
        if offset.is_finite() {
            self.scroll = offset.max(0.0);
        }
    }

    /// Add a relative scroll amount (positive scrolls down the page).
    pub fn scroll_by(&mut self, amount: f32) {
        self.set_scroll(self.scroll + amount);
    }

    /// Forget everything, e.g. after the backdrop stops.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Translate a window event. Returns `true` if the event was consumed.
    ///
    /// Wheel deltas accumulate into a virtual page offset: scrolling the
    /// wheel toward the user moves the page down.
    pub fn handle_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.set_pointer(Vec2::new(position.x as f32, position.y as f32));
                true
            }
            WindowEvent::CursorEntered { .. } => {
                self.set_hovering(true);
                true
            }
            WindowEvent::CursorLeft { .. } => {
                self.set_hovering(false);
                true
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let amount = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -*y * LINE_SCROLL_PX,
                    MouseScrollDelta::PixelDelta(pos) => -pos.y as f32,
                };
                self.scroll_by(amount);
                true
            }
            _ => false,
        }
    }
}
