pub mod config;
mod orchestrator;
mod types;

pub use orchestrator::{render_frame, run_pipeline, run_pipeline_reported};
pub use types::{PipelineStage, PipelineSummary, ProgressReporter};
