use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use vfade_core::io::source::FrameSource;

use super::RawArgs;

#[derive(Args)]
pub struct InfoArgs {
    /// Input video (.y4m, or raw video with --format and --size)
    pub file: PathBuf,

    #[command(flatten)]
    pub raw: RawArgs,

    /// Read the whole stream to count frames (YUV4MPEG2 has no frame count)
    #[arg(long)]
    pub count: bool,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let raw = args.raw.params()?;
    let mut source = FrameSource::open(&args.file, raw.as_ref())
        .with_context(|| format!("Failed to open {}", args.file.display()))?;
    let info = source.info();

    println!("File:        {}", args.file.display());
    println!("Container:   {}", info.container);
    println!("Format:      {}", info.format);
    println!("Dimensions:  {}x{}", info.width, info.height);

    let fmt = info.format.info();
    println!(
        "Chroma:      {}",
        if info.format.is_planar() {
            format!("1/{} x 1/{}", 1 << fmt.hsub, 1 << fmt.vsub)
        } else {
            format!("packed, {} bytes per pixel", fmt.group_size)
        }
    );
    println!(
        "Range:       {}",
        if info.format.is_full_range() { "full" } else { "limited" }
    );
    if let Some((num, den)) = info.frame_rate {
        println!("Frame rate:  {num}/{den}");
    }

    let frame_count = match info.frame_count {
        Some(count) => Some(count),
        None if args.count => {
            let mut count = 0usize;
            while source.next_frame()?.is_some() {
                count += 1;
            }
            Some(count)
        }
        None => None,
    };
    if let Some(count) = frame_count {
        println!("Frames:      {count}");
        let frame_bytes = info.format.frame_byte_size(info.width, info.height);
        let total_mb = (frame_bytes * count) as f64 / (1024.0 * 1024.0);
        println!("Data size:   {:.1} MB", total_mb);
    }

    Ok(())
}
