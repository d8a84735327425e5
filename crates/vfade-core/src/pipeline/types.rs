use crate::frame::PixelFormat;
use crate::io::source::Container;

/// Pipeline processing stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    Opening,
    Fading,
    Finalizing,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Opening => write!(f, "Opening input"),
            Self::Fading => write!(f, "Fading frames"),
            Self::Finalizing => write!(f, "Writing output"),
        }
    }
}

/// What a completed run did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineSummary {
    pub container: Container,
    pub format: PixelFormat,
    pub width: usize,
    pub height: usize,
    /// Frames read, processed and written.
    pub frames: u64,
    /// Frames at least one fade darkened.
    pub faded_frames: u64,
}

/// Thread-safe progress reporting for the pipeline.
///
/// Implementors can use this to drive progress bars, logging, or any other
/// UI feedback. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new pipeline stage has started. `total_items` is the number of
    /// work items in this stage (e.g., frame count), if known.
    fn begin_stage(&self, _stage: PipelineStage, _total_items: Option<usize>) {}

    /// One work item within the current stage has completed.
    fn advance(&self, _items_done: usize) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// No-op progress reporter, used when `run_pipeline` delegates.
pub(super) struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
