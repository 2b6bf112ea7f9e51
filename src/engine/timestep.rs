// src/engine/timestep.rs
use std::time::Instant;

use crate::error::GameError;

/// Sixty simulation steps per second.
pub const DEFAULT_FIXED_TIMESTEP: f32 = 0.0166666;

/// Longest frame time fed into the accumulator; longer stalls are dropped.
pub const MAX_FRAME_TIME: f32 = 0.25;

// A simple struct to help with timing
pub struct Timer {
    last_instant: Instant,
}

impl Timer {
    pub fn new() -> Self {
        Self {
            last_instant: Instant::now(),
        }
    }

    // Calculate the delta time since the last call
    pub fn delta(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now - self.last_instant;
        self.last_instant = now;
        dt.as_secs_f32()
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

/// Drains variable frame times in fixed-size simulation steps.
///
/// Whatever is left over after the last whole step is carried into the next
/// frame.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f32,
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(step: f32) -> Result<Self, GameError> {
        if !step.is_finite() || step <= 0.0 {
            return Err(GameError::InvalidTimestep(step));
        }
        Ok(Self {
            step,
            accumulator: 0.0,
        })
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Time carried over from previous frames, always below one step.
    pub fn remainder(&self) -> f32 {
        self.accumulator
    }

    /// Add a frame's elapsed time and return how many fixed steps are due.
    ///
    /// Negative or non-finite frame times count as zero, and anything above
    /// [`MAX_FRAME_TIME`] is clamped to it.
    pub fn accumulate(&mut self, frame_time: f32) -> u32 {
        let frame_time = if frame_time.is_finite() {
            frame_time.clamp(0.0, MAX_FRAME_TIME)
        } else {
            log::warn!("Ignoring non-finite frame time {}", frame_time);
            0.0
        };

        let pending = self.accumulator + frame_time;
        let steps = (pending / self.step).floor();
        self.accumulator = (pending - steps * self.step).max(0.0);
        steps as u32
    }
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self {
            step: DEFAULT_FIXED_TIMESTEP,
            accumulator: 0.0,
        }
    }
}
