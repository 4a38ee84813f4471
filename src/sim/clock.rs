//! Frame clock
//!
//! Turns host timestamps (milliseconds, as handed to a requestAnimationFrame
//! callback) into a clamped per-frame delta in seconds.

use crate::consts::MAX_FRAME_DT;

/// Tracks the previous frame timestamp
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_time_ms: Option<f64>,
    frames: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to `now_ms` and return the delta to simulate, in `[0, MAX_FRAME_DT]`.
    ///
    /// The first frame has no predecessor and advances by zero. A stalled host
    /// (backgrounded tab) advances by at most `MAX_FRAME_DT`; a clock that runs
    /// backwards advances by zero.
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_time_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_time_ms = Some(now_ms);
        self.frames += 1;
        clamp_dt(dt)
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

/// Clamp a raw delta into the simulated range. NaN becomes zero.
#[inline]
pub fn clamp_dt(dt: f32) -> f32 {
    if dt.is_nan() {
        return 0.0;
    }
    dt.clamp(0.0, MAX_FRAME_DT)
}
