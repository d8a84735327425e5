use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use vfade_core::frame::PixelFormat;
use vfade_core::io::source::RawParams;
use vfade_core::pipeline::config::PipelineConfig;
use vfade_core::transition::{FadeDirection, TransitionConfig};

#[derive(Args)]
pub struct ConfigArgs {
    /// Write config to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Print or save a full example PipelineConfig as TOML.
pub fn run(args: &ConfigArgs) -> Result<()> {
    let config = PipelineConfig {
        input: PathBuf::from("input.yuv"),
        output: PathBuf::from("output.y4m"),
        slice_height: Some(16),
        parallel: true,
        limit: None,
        raw: Some(RawParams {
            format: PixelFormat::Yuv420p,
            width: 1920,
            height: 1080,
        }),
        fades: vec![
            TransitionConfig::new(FadeDirection::In, 0, 25),
            TransitionConfig::new(FadeDirection::Out, 975, 25),
        ],
    };
    let toml_str = toml::to_string_pretty(&config)?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &toml_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        println!("Default config saved to {}", path.display());
    } else {
        print!("{}", toml_str);
    }

    Ok(())
}
