use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;
use vfade_core::pipeline::config::PipelineConfig;

#[derive(Args)]
pub struct RunArgs {
    /// Pipeline config file (TOML)
    #[arg(short, long)]
    pub config: PathBuf,

    /// Override the output path from the config
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: &RunArgs) -> Result<()> {
    let contents = std::fs::read_to_string(&args.config)
        .with_context(|| format!("Failed to read config {}", args.config.display()))?;
    let mut config: PipelineConfig = toml::from_str(&contents).context("Invalid pipeline config")?;
    if let Some(ref output) = args.output {
        config.output = output.clone();
    }
    debug!(path = %args.config.display(), fades = config.fades.len(), "Loaded pipeline config");
    super::execute(&config)
}
