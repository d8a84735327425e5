use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{FadeError, Result};
use crate::frame::VideoFrame;
use crate::io::source::{FrameSink, FrameSource};

use super::config::PipelineConfig;
use super::types::{NoOpReporter, PipelineStage, PipelineSummary, ProgressReporter};

/// Run the fade pipeline with a thread-safe progress reporter.
///
/// Frames are read, faded and written strictly in stream order; the fade
/// chain sees every frame exactly once.
pub fn run_pipeline_reported(
    config: &PipelineConfig,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<PipelineSummary> {
    if config.input == config.output {
        return Err(FadeError::Pipeline(format!(
            "output would overwrite input {}",
            config.input.display()
        )));
    }

    reporter.begin_stage(PipelineStage::Opening, None);
    let mut source = FrameSource::open(&config.input, config.raw.as_ref())?;
    let stream = source.info();
    let mut sink = FrameSink::create(&config.output, &source)?;
    reporter.finish_stage();

    info!(
        container = %stream.container,
        format = %stream.format,
        width = stream.width,
        height = stream.height,
        frames = ?stream.frame_count,
        fades = config.fades.len(),
        "Reading input"
    );

    let mut chain = config.chain();
    let total = match (stream.frame_count, config.limit) {
        (Some(count), Some(limit)) => Some(count.min(limit as usize)),
        (Some(count), None) => Some(count),
        (None, limit) => limit.map(|l| l as usize),
    };
    reporter.begin_stage(PipelineStage::Fading, total);

    let mut frames = 0u64;
    let mut faded_frames = 0u64;
    while config.limit.map_or(true, |limit| frames < limit) {
        let Some(mut frame) = source.next_frame()? else {
            break;
        };
        if chain.will_modify() {
            faded_frames += 1;
        }
        chain.process_frame(&mut frame, config.slice_height)?;
        sink.write_frame(&frame)?;
        frames += 1;
        reporter.advance(frames as usize);
    }
    reporter.finish_stage();

    reporter.begin_stage(PipelineStage::Finalizing, None);
    sink.finish()?;
    reporter.finish_stage();

    info!(frames, faded_frames, output = %config.output.display(), "Fade complete");

    Ok(PipelineSummary {
        container: stream.container,
        format: stream.format,
        width: stream.width,
        height: stream.height,
        frames,
        faded_frames,
    })
}

/// Run the fade pipeline without progress reporting.
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineSummary> {
    run_pipeline_reported(config, Arc::new(NoOpReporter))
}

/// Render frame `index` of the input as it would leave the pipeline.
///
/// Fades are frame-counted, so every earlier frame is run through the chain
/// first; nothing is written.
pub fn render_frame(config: &PipelineConfig, index: u64) -> Result<VideoFrame> {
    let mut source = FrameSource::open(&config.input, config.raw.as_ref())?;
    let mut chain = config.chain();
    let mut seen = 0usize;
    while let Some(mut frame) = source.next_frame()? {
        let factors = chain.factors();
        chain.process_frame(&mut frame, config.slice_height)?;
        if frame.index == index {
            debug!(index, ?factors, "Rendered frame");
            return Ok(frame);
        }
        seen += 1;
    }
    Err(FadeError::FrameIndexOutOfRange {
        index: index as usize,
        total: seen,
    })
}
