use std::time::Duration;

use log::warn;

/// Paces the native loop to at most `target_fps` frames per second.
///
/// The limiter only decides how long to wait after a frame; simulated time
/// always advances by the configured fixed step.
#[derive(Debug, Clone, Copy)]
pub struct FrameLimiter {
    frame_budget: Duration,
}

impl FrameLimiter {
    pub fn new(target_fps: u32) -> Self {
        let fps = if target_fps == 0 {
            warn!("target_fps of 0 requested, using 60");
            60
        } else {
            target_fps
        };
        Self {
            frame_budget: Duration::from_secs_f64(1.0 / fps as f64),
        }
    }

    pub fn frame_budget(&self) -> Duration {
        self.frame_budget
    }

    /// Time left to wait after a frame that took `elapsed`. Zero when the
    /// frame ran over budget; lost time is never caught up.
    pub fn remaining(&self, elapsed: Duration) -> Duration {
        self.frame_budget.saturating_sub(elapsed)
    }
}
