mod commands;
mod progress;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "vfade", about = "Frame-accurate fade to and from black for raw video")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show stream format and geometry
    Info(commands::info::InfoArgs),
    /// Fade a video from command-line options
    Apply(commands::apply::ApplyArgs),
    /// Fade a video from a TOML pipeline config
    Run(commands::run::RunArgs),
    /// Print an example pipeline config
    Config(commands::config::ConfigArgs),
    /// Print the per-frame fade factor
    Curve(commands::curve::CurveArgs),
    /// Export one faded frame as an image
    Snapshot(commands::snapshot::SnapshotArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Apply(args) => commands::apply::run(args),
        Commands::Run(args) => commands::run::run(args),
        Commands::Config(args) => commands::config::run(args),
        Commands::Curve(args) => commands::curve::run(args),
        Commands::Snapshot(args) => commands::snapshot::run(args),
    }
}
