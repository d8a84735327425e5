use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use vfade_core::pipeline::{PipelineStage, ProgressReporter};

const BAR_TEMPLATE: &str = "{msg:16} [{bar:40}] {pos}/{len} frames";
const SPINNER_TEMPLATE: &str = "{msg:16} {spinner} {pos} frames";

/// Drives a terminal progress bar from pipeline callbacks.
pub struct BarReporter {
    bar: ProgressBar,
}

impl BarReporter {
    pub fn new() -> Self {
        Self {
            bar: ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr()),
        }
    }

    pub fn finish(&self) {
        self.bar.finish_with_message("Done");
    }
}

impl Default for BarReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for BarReporter {
    fn begin_stage(&self, stage: PipelineStage, total_items: Option<usize>) {
        let template = match total_items {
            Some(total) => {
                self.bar.set_length(total as u64);
                BAR_TEMPLATE
            }
            None => {
                self.bar.unset_length();
                SPINNER_TEMPLATE
            }
        };
        if let Ok(style) = ProgressStyle::default_bar().template(template) {
            self.bar.set_style(style.progress_chars("=> "));
        }
        self.bar.set_position(0);
        self.bar.set_message(stage.to_string());
    }

    fn advance(&self, items_done: usize) {
        self.bar.set_position(items_done as u64);
    }

    fn finish_stage(&self) {
        self.bar.tick();
    }
}
