use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use vfade_core::pipeline::config::PipelineConfig;
use vfade_core::transition::TransitionConfig;

use super::RawArgs;

#[derive(Args)]
pub struct ApplyArgs {
    /// Input video (.y4m, or raw video with --format and --size)
    pub file: PathBuf,

    /// Fade as "in|out:start:frames" (e.g. "in:0:30"); repeat or comma-separate to chain
    #[arg(long = "fade", required = true, value_delimiter = ',')]
    pub fades: Vec<TransitionConfig>,

    #[command(flatten)]
    pub raw: RawArgs,

    /// Blend each frame in slices of this many rows
    #[arg(long)]
    pub slice_height: Option<usize>,

    /// Spread large frames across all cores
    #[arg(long)]
    pub parallel: bool,

    /// Stop after this many frames
    #[arg(long)]
    pub limit: Option<u64>,

    /// Output file path (.y4m, anything else is written as raw video)
    #[arg(short, long, default_value = "faded.y4m")]
    pub output: PathBuf,
}

pub fn run(args: &ApplyArgs) -> Result<()> {
    let config = PipelineConfig {
        input: args.file.clone(),
        output: args.output.clone(),
        slice_height: args.slice_height,
        parallel: args.parallel,
        limit: args.limit,
        raw: args.raw.params()?,
        fades: args.fades.clone(),
    };
    super::execute(&config)
}
