pub mod apply;
pub mod config;
pub mod curve;
pub mod info;
pub mod run;
pub mod snapshot;

use std::str::FromStr;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Args;
use vfade_core::frame::PixelFormat;
use vfade_core::io::source::RawParams;
use vfade_core::pipeline::config::PipelineConfig;
use vfade_core::pipeline::run_pipeline_reported;

use crate::progress::BarReporter;
use crate::summary::{print_pipeline_summary, print_run_result};

/// Geometry flags for headerless raw video input.
#[derive(Args, Clone, Debug, Default)]
pub struct RawArgs {
    /// Pixel format of raw input (e.g. yuv420p, rgb24)
    #[arg(long)]
    pub format: Option<PixelFormat>,

    /// Frame size of raw input as WIDTHxHEIGHT (e.g. 1920x1080)
    #[arg(long)]
    pub size: Option<FrameSize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameSize {
    pub width: usize,
    pub height: usize,
}

impl FromStr for FrameSize {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
        let width = w.trim().parse().map_err(|_| format!("bad width '{w}'"))?;
        let height = h.trim().parse().map_err(|_| format!("bad height '{h}'"))?;
        Ok(Self { width, height })
    }
}

impl RawArgs {
    pub fn params(&self) -> Result<Option<RawParams>> {
        match (self.format, self.size) {
            (Some(format), Some(size)) => Ok(Some(RawParams {
                format,
                width: size.width,
                height: size.height,
            })),
            (None, None) => Ok(None),
            _ => bail!("--format and --size must be given together"),
        }
    }
}

/// Print the plan, run it with a progress bar, print what happened.
fn execute(config: &PipelineConfig) -> Result<()> {
    print_pipeline_summary(config);

    let reporter = Arc::new(BarReporter::new());
    let summary = run_pipeline_reported(config, reporter.clone())?;
    reporter.finish();

    print_run_result(&summary, config);
    Ok(())
}
