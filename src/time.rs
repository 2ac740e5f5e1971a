//! Frame timing driven by host timestamps.
//!
//! The host hands every frame a monotonically increasing timestamp in
//! milliseconds (a redraw callback's clock). [`FrameClock`] turns those into
//! elapsed time, a per-frame delta, a frame counter and an FPS estimate.
//!
//! # Example
//!
//! ```
//! use aether::time::FrameClock;
//!
//! let mut clock = FrameClock::new();
//! clock.tick(1000.0); // first frame: delta is 0
//! let (elapsed, delta) = clock.tick(1016.0);
//!
//! assert_eq!(elapsed, 16.0);
//! assert_eq!(delta, 16.0);
//! assert_eq!(clock.frame(), 2);
//! ```

/// Largest delta reported for one frame, in milliseconds.
///
/// A stalled host (hidden window, debugger) would otherwise hand the
/// simulation one huge step.
pub const MAX_DELTA_MS: f64 = 100.0;

/// Timing state for the frame loop.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Timestamp of the first tick.
    start: Option<f64>,
    /// Timestamp of the previous tick.
    last: Option<f64>,
    /// Elapsed time since the first tick, in ms.
    elapsed_ms: f64,
    /// Clamped time since the previous tick, in ms.
    delta_ms: f32,
    /// Total ticks since start.
    frame_count: u64,
    /// Calculated FPS (updated periodically).
    fps: f32,
    /// Frame count at last FPS update.
    fps_frame_count: u64,
    /// Timestamp of last FPS calculation.
    fps_update_time: f64,
    /// How often to update the FPS estimate, in ms.
    fps_update_interval: f64,
}

impl FrameClock {
    /// A clock that has not ticked yet.
    pub fn new() -> Self {
        Self {
            start: None,
            last: None,
            elapsed_ms: 0.0,
            delta_ms: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: 0.0,
            fps_update_interval: 500.0,
        }
    }

    /// Advance to `timestamp_ms`. Call once per frame.
    ///
    /// Returns `(elapsed_ms, delta_ms)`. Timestamps that go backwards or are
    /// not finite yield a zero delta.
    pub fn tick(&mut self, timestamp_ms: f64) -> (f64, f32) {
        let now = if timestamp_ms.is_finite() {
            timestamp_ms
        } else {
            self.last.unwrap_or(0.0)
        };
        let start = *self.start.get_or_insert(now);
        if self.frame_count == 0 {
            self.fps_update_time = now;
        }

        let raw_delta = self.last.map_or(0.0, |last| now - last);
        self.delta_ms = raw_delta.clamp(0.0, MAX_DELTA_MS) as f32;
        if now >= self.last.unwrap_or(now) {
            self.last = Some(now);
        }
        self.elapsed_ms = (self.last.unwrap_or(now) - start).max(0.0);
        self.frame_count += 1;

        let since_fps = now - self.fps_update_time;
        if since_fps >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = (frames_since as f64 / (since_fps / 1000.0)) as f32;
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        (self.elapsed_ms, self.delta_ms)
    }

    /// Elapsed time since the first tick, in milliseconds.
    #[inline]
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Elapsed time since the first tick, in seconds.
    #[inline]
    pub fn elapsed_secs(&self) -> f32 {
        (self.elapsed_ms / 1000.0) as f32
    }

    /// Delta of the last tick, in milliseconds.
    #[inline]
    pub fn delta_ms(&self) -> f32 {
        self.delta_ms
    }

    /// Ticks since the last reset.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Frames per second, refreshed every half second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Forget all history; the next tick counts as the first frame.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_has_zero_delta() {
        let mut clock = FrameClock::new();
        let (elapsed, delta) = clock.tick(5000.0);
        assert_eq!(elapsed, 0.0);
        assert_eq!(delta, 0.0);
        assert_eq!(clock.frame(), 1);
    }

    #[test]
    fn test_delta_and_elapsed() {
        let mut clock = FrameClock::new();
        clock.tick(100.0);
        clock.tick(116.0);
        let (elapsed, delta) = clock.tick(132.5);
        assert_eq!(delta, 16.5);
        assert_eq!(elapsed, 32.5);
        assert!((clock.elapsed_secs() - 0.0325).abs() < 1e-6);
    }

    #[test]
    fn test_delta_is_clamped() {
        let mut clock = FrameClock::new();
        clock.tick(0.0);
        let (_, delta) = clock.tick(10_000.0);
        assert_eq!(delta, MAX_DELTA_MS as f32);
    }

    #[test]
    fn test_backwards_timestamp() {
        let mut clock = FrameClock::new();
        clock.tick(200.0);
        let (elapsed, delta) = clock.tick(150.0);
        assert_eq!(delta, 0.0);
        assert_eq!(elapsed, 0.0);
        let (_, delta) = clock.tick(216.0);
        assert_eq!(delta, 16.0);
    }

    #[test]
    fn test_fps_estimate() {
        let mut clock = FrameClock::new();
        for i in 0..=60 {
            clock.tick(i as f64 * 1000.0 / 60.0);
        }
        assert!((clock.fps() - 60.0).abs() < 2.0);
    }

    #[test]
    fn test_reset() {
        let mut clock = FrameClock::new();
        clock.tick(0.0);
        clock.tick(16.0);
        clock.reset();
        assert_eq!(clock.frame(), 0);
        let (_, delta) = clock.tick(9999.0);
        assert_eq!(delta, 0.0);
    }
}
