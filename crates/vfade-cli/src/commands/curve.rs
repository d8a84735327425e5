use anyhow::Result;
use clap::Args;
use vfade_core::consts::FACTOR_ONE;
use vfade_core::transition::{TransitionConfig, TransitionState};

#[derive(Args)]
pub struct CurveArgs {
    /// Fade as "in|out:start:frames"; repeat or comma-separate to chain
    #[arg(long = "fade", required = true, value_delimiter = ',')]
    pub fades: Vec<TransitionConfig>,

    /// Number of frames to print (default: through the last fade window, plus one)
    #[arg(long)]
    pub frames: Option<u64>,
}

/// Print the factor each fade applies to every frame, without touching video.
pub fn run(args: &CurveArgs) -> Result<()> {
    let mut states: Vec<TransitionState> =
        args.fades.iter().copied().map(TransitionState::new).collect();
    let frames = args.frames.unwrap_or_else(|| {
        states
            .iter()
            .map(|s| s.stop_frame().saturating_add(2))
            .max()
            .unwrap_or(0)
    });

    let header: Vec<String> = states
        .iter()
        .map(|s| format!("{:>18}", s.config().to_string()))
        .collect();
    println!("{:>8}{}", "frame", header.join(""));

    for frame in 0..frames {
        let cells: Vec<String> = states
            .iter()
            .map(|s| {
                let factor = s.current_factor();
                let pct = factor as f64 * 100.0 / FACTOR_ONE as f64;
                format!("{:>10} {:>6.2}%", factor, pct)
            })
            .collect();
        println!("{:>8}{}", frame, cells.join(""));
        for state in &mut states {
            state.advance();
        }
    }

    Ok(())
}
