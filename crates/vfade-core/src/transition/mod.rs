//! Frame-counted transition progress.
//!
//! A transition owns its progress state exclusively; callers read the
//! current factor, render the frame, then advance exactly once.

pub mod config;
pub mod state;

pub use config::{FadeDirection, TransitionConfig};
pub use state::TransitionState;

/// The transition styles the pipeline can run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransitionKind {
    /// Scale luma and packed RGB toward 0 and chroma toward 128.
    FadeToBlack(TransitionState),
}

impl TransitionKind {
    pub fn fade(config: TransitionConfig) -> Self {
        Self::FadeToBlack(TransitionState::new(config))
    }

    pub fn state(&self) -> &TransitionState {
        match self {
            Self::FadeToBlack(state) => state,
        }
    }

    pub fn current_factor(&self) -> i32 {
        self.state().current_factor()
    }

    pub fn advance(&mut self) {
        match self {
            Self::FadeToBlack(state) => state.advance(),
        }
    }
}

impl std::fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FadeToBlack(state) => write!(f, "fade={}", state.config()),
        }
    }
}
