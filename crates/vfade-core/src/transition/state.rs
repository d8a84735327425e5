use crate::consts::FACTOR_ONE;
use crate::error::Result;

use super::config::{FadeDirection, TransitionConfig};

/// Frame-counted progress of one fade.
///
/// The factor is a 16.16 fixed-point weight in `[0, FACTOR_ONE]`. It moves by
/// `step_per_frame` once per processed frame while the frame index lies in the
/// inclusive window `[start_frame, stop_frame]`, and is clamped after every
/// update. Progress depends only on how many frames have been processed, never
/// on timestamps, and there is no way to seek.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionState {
    config: TransitionConfig,
    factor: i32,
    step_per_frame: i32,
    frame_index: u64,
    stop_frame: u64,
}

impl TransitionState {
    pub fn new(config: TransitionConfig) -> Self {
        let config = config.normalized();
        let step = (FACTOR_ONE as u64 / config.duration_frames) as i32;
        let (factor, step_per_frame) = match config.direction {
            FadeDirection::In => (0, step),
            FadeDirection::Out => (FACTOR_ONE, -step),
        };
        Self {
            config,
            factor,
            step_per_frame,
            frame_index: 0,
            stop_frame: config.start_frame.saturating_add(config.duration_frames),
        }
    }

    /// Construct from a direction token (`"in"` or `"out"`) and frame counts.
    pub fn from_args(direction: &str, start_frame: u64, duration_frames: u64) -> Result<Self> {
        TransitionConfig::from_parts(direction, start_frame, duration_frames).map(Self::new)
    }

    /// Weight to blend the frame about to be rendered with.
    pub fn current_factor(&self) -> i32 {
        self.factor
    }

    /// Record that one frame has been processed.
    ///
    /// Each call stands for exactly one rendered frame; calling it twice for
    /// the same frame advances the fade twice.
    pub fn advance(&mut self) {
        if self.is_active() {
            self.factor = if self.frame_index == self.stop_frame - 1 {
                // Lands on the rail even when 65536 is not a multiple of the duration.
                self.target_factor()
            } else {
                (self.factor + self.step_per_frame).clamp(0, FACTOR_ONE)
            };
        }
        self.frame_index += 1;
    }

    /// True if the next `advance()` falls inside the fade window.
    pub fn is_active(&self) -> bool {
        self.frame_index >= self.config.start_frame && self.frame_index <= self.stop_frame
    }

    /// True once every frame of the window has been processed.
    pub fn is_complete(&self) -> bool {
        self.frame_index > self.stop_frame
    }

    /// Factor the fade ends on: full image for fade-in, black for fade-out.
    pub fn target_factor(&self) -> i32 {
        match self.config.direction {
            FadeDirection::In => FACTOR_ONE,
            FadeDirection::Out => 0,
        }
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn stop_frame(&self) -> u64 {
        self.stop_frame
    }

    pub fn step_per_frame(&self) -> i32 {
        self.step_per_frame
    }

    pub fn config(&self) -> &TransitionConfig {
        &self.config
    }
}
