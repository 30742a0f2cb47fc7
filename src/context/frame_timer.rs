//=========================================================================
// Frame Timer
//=========================================================================
//
// Monotonic per-frame timing for the render thread. Ticked once per frame
// just before the engine's update and handed to it by reference.
//
//=========================================================================

use std::time::{Duration, Instant};

/// Frame timing as seen from the render thread.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    start: Instant,
    last_tick: Instant,
    time_per_frame: Duration,
    frames: u64,
}

impl FrameTimer {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_tick: now,
            time_per_frame: Duration::ZERO,
            frames: 0,
        }
    }

    /// Marks the start of a new frame.
    pub fn tick(&mut self) {
        let now = Instant::now();
        self.time_per_frame = now - self.last_tick;
        self.last_tick = now;
        self.frames += 1;
    }

    /// Time between the last two ticks.
    pub fn time_per_frame(&self) -> Duration {
        self.time_per_frame
    }

    /// Frames ticked since the timer started.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Time since the timer started.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Instantaneous frame rate, or `0.0` before the first measured frame.
    pub fn frame_rate(&self) -> f64 {
        let secs = self.time_per_frame.as_secs_f64();
        if secs > 0.0 {
            1.0 / secs
        } else {
            0.0
        }
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
