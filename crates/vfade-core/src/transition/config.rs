use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::MIN_FADE_FRAMES;
use crate::error::{FadeError, Result};

/// Which rail the fade starts from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FadeDirection {
    /// From black up to the source image.
    In,
    /// From the source image down to black.
    Out,
}

impl fmt::Display for FadeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::In => write!(f, "in"),
            Self::Out => write!(f, "out"),
        }
    }
}

impl FromStr for FadeDirection {
    type Err = FadeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "in" => Ok(Self::In),
            "out" => Ok(Self::Out),
            other => Err(FadeError::InvalidDirection(other.to_string())),
        }
    }
}

/// Where and how long a single fade runs, counted in frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionConfig {
    pub direction: FadeDirection,
    /// Index of the first frame that moves the factor.
    #[serde(default)]
    pub start_frame: u64,
    /// Length of the fade; 0 is treated as 1.
    #[serde(default = "default_duration")]
    pub duration_frames: u64,
}

fn default_duration() -> u64 {
    MIN_FADE_FRAMES
}

impl TransitionConfig {
    pub fn new(direction: FadeDirection, start_frame: u64, duration_frames: u64) -> Self {
        Self {
            direction,
            start_frame,
            duration_frames,
        }
        .normalized()
    }

    /// Build from the three logical fields, validating the direction token.
    pub fn from_parts(direction: &str, start_frame: u64, duration_frames: u64) -> Result<Self> {
        Ok(Self::new(direction.parse()?, start_frame, duration_frames))
    }

    /// Parse the compact `direction:start:frames` form, e.g. `in:0:30`.
    pub fn parse(args: &str) -> Result<Self> {
        let parts: Vec<&str> = args.trim().split(':').map(str::trim).collect();
        let [direction, start, frames] = parts.as_slice() else {
            return Err(FadeError::InvalidArgs(args.to_string()));
        };
        let start_frame = start
            .parse::<u64>()
            .map_err(|_| FadeError::InvalidArgs(args.to_string()))?;
        let duration_frames = frames
            .parse::<u64>()
            .map_err(|_| FadeError::InvalidArgs(args.to_string()))?;
        Self::from_parts(direction, start_frame, duration_frames)
    }

    /// Copy with a zero duration coerced to one frame.
    pub fn normalized(self) -> Self {
        Self {
            duration_frames: self.duration_frames.max(MIN_FADE_FRAMES),
            ..self
        }
    }
}

impl FromStr for TransitionConfig {
    type Err = FadeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for TransitionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.direction, self.start_frame, self.duration_frames
        )
    }
}
