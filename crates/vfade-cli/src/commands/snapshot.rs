use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use vfade_core::io::image_io::save_frame_image;
use vfade_core::pipeline::config::PipelineConfig;
use vfade_core::pipeline::render_frame;
use vfade_core::transition::TransitionConfig;

use super::RawArgs;

#[derive(Args)]
pub struct SnapshotArgs {
    /// Input video (.y4m, or raw video with --format and --size)
    pub file: PathBuf,

    /// Zero-based index of the frame to export
    #[arg(long, default_value = "0")]
    pub frame: u64,

    /// Fade as "in|out:start:frames"; repeat or comma-separate to chain
    #[arg(long = "fade", value_delimiter = ',')]
    pub fades: Vec<TransitionConfig>,

    #[command(flatten)]
    pub raw: RawArgs,

    /// Output image path (PNG, TIFF, ...)
    #[arg(short, long, default_value = "snapshot.png")]
    pub output: PathBuf,
}

/// Export one frame, faded exactly as the full pipeline would fade it.
pub fn run(args: &SnapshotArgs) -> Result<()> {
    let config = PipelineConfig {
        input: args.file.clone(),
        output: args.output.clone(),
        slice_height: None,
        parallel: false,
        limit: None,
        raw: args.raw.params()?,
        fades: args.fades.clone(),
    };

    let frame = render_frame(&config, args.frame)
        .with_context(|| format!("Failed to render frame {}", args.frame))?;
    save_frame_image(&frame, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!(
        "Frame {} ({}x{} {}) saved to {}",
        args.frame,
        frame.width(),
        frame.height(),
        frame.format(),
        args.output.display()
    );
    Ok(())
}
