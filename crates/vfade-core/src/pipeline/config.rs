use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::chain::FadeChain;
use crate::io::source::RawParams;
use crate::transition::{FadeDirection, TransitionConfig};

/// Everything needed to fade one clip from `input` into `output`.
///
/// Plain values come before the `raw` table and the `fades` array so the
/// struct serializes to valid TOML.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Blend each frame in slices of this many rows instead of all at once.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slice_height: Option<usize>,
    /// Split large frames across the Rayon pool.
    #[serde(default)]
    pub parallel: bool,
    /// Stop after this many frames.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    /// Geometry of headerless raw input; ignored for YUV4MPEG2.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<RawParams>,
    #[serde(default)]
    pub fades: Vec<TransitionConfig>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("input.y4m"),
            output: PathBuf::from("output.y4m"),
            slice_height: None,
            parallel: false,
            limit: None,
            raw: None,
            fades: vec![TransitionConfig::new(FadeDirection::In, 0, 25)],
        }
    }
}

impl PipelineConfig {
    /// Fresh fade chain for one pass over the clip.
    pub fn chain(&self) -> FadeChain {
        FadeChain::new(&self.fades).with_parallel(self.parallel)
    }
}
