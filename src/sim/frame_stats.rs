//! Frame-rate diagnostics
//!
//! Purely observational: nothing here feeds back into the simulation.

use serde::{Deserialize, Serialize};

use crate::consts::FPS_REFRESH_FRAMES;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameStats {
    /// Frames recorded so far
    pub frames: u64,
    /// Displayed figure, refreshed every few frames so it stays readable
    pub fps: u32,
    /// Rate derived from the most recent frame
    pub instant_fps: u32,
    /// Frames that came in under the healthy minimum
    pub slow_frames: u64,
}

impl FrameStats {
    /// Record one frame of `dt` seconds. Zero, negative and non-finite
    /// frames are skipped.
    pub fn record(&mut self, dt: f32, min_healthy_fps: u32) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }

        let fps = (1.0 / dt).round() as u32;
        self.instant_fps = fps;
        if fps < min_healthy_fps {
            self.slow_frames += 1;
            log::warn!("Frame rate is {}", fps);
        }

        if self.frames % FPS_REFRESH_FRAMES == 0 {
            self.fps = fps;
        }
        self.frames += 1;
    }
}
