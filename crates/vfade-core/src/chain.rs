use tracing::trace;

use crate::blend::{blend, blend_par};
use crate::consts::FACTOR_ONE;
use crate::error::{FadeError, Result};
use crate::frame::VideoFrame;
use crate::transition::{TransitionConfig, TransitionKind};

/// One fade effect instance: a transition plus the frames it has seen.
#[derive(Clone, Debug)]
pub struct FadeFilter {
    kind: TransitionKind,
    parallel: bool,
}

impl FadeFilter {
    pub fn new(config: TransitionConfig) -> Self {
        Self {
            kind: TransitionKind::fade(config),
            parallel: false,
        }
    }

    /// Spread the rows of large frames across the Rayon pool.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn kind(&self) -> &TransitionKind {
        &self.kind
    }

    pub fn current_factor(&self) -> i32 {
        self.kind.current_factor()
    }

    /// Blend luma rows `[top, top + height)` of the current frame.
    ///
    /// May be called several times per frame with disjoint slices; the
    /// factor does not move until [`FadeFilter::end_frame`].
    pub fn draw_slice(&self, frame: &mut VideoFrame, top: usize, height: usize) -> Result<()> {
        let factor = self.current_factor();
        let mut planes = frame.planes_mut();
        if self.parallel {
            blend_par(factor, &mut planes, top, height)
        } else {
            blend(factor, &mut planes, top, height)
        }
    }

    /// Mark the current frame as done and step the transition.
    pub fn end_frame(&mut self) {
        self.kind.advance();
    }

    /// Blend the whole frame, then advance.
    pub fn process_frame(&mut self, frame: &mut VideoFrame) -> Result<()> {
        let height = frame.height();
        self.draw_slice(frame, 0, height)?;
        trace!(
            frame = frame.index,
            factor = self.current_factor(),
            "Fade applied"
        );
        self.end_frame();
        Ok(())
    }

    /// Blend the frame in consecutive slices of `slice_height` rows, then advance.
    pub fn process_slices(&mut self, frame: &mut VideoFrame, slice_height: usize) -> Result<()> {
        if slice_height == 0 {
            return Err(FadeError::InvalidRegion("slice height must be at least 1".into()));
        }
        let height = frame.height();
        let mut top = 0;
        while top < height {
            let rows = slice_height.min(height - top);
            self.draw_slice(frame, top, rows)?;
            top += rows;
        }
        trace!(
            frame = frame.index,
            factor = self.current_factor(),
            slices = height.div_ceil(slice_height),
            "Fade applied in slices"
        );
        self.end_frame();
        Ok(())
    }
}

/// Fades applied one after another to every frame, e.g. a fade-in at the
/// head of a clip and a fade-out at its tail.
#[derive(Clone, Debug, Default)]
pub struct FadeChain {
    filters: Vec<FadeFilter>,
}

impl FadeChain {
    pub fn new(configs: &[TransitionConfig]) -> Self {
        Self {
            filters: configs.iter().copied().map(FadeFilter::new).collect(),
        }
    }

    /// Parse a comma-separated list such as `in:0:25,out:975:25`.
    pub fn parse(list: &str) -> Result<Self> {
        let configs = list
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(TransitionConfig::parse)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(&configs))
    }

    pub fn with_parallel(self, parallel: bool) -> Self {
        Self {
            filters: self
                .filters
                .into_iter()
                .map(|f| f.with_parallel(parallel))
                .collect(),
        }
    }

    pub fn push(&mut self, filter: FadeFilter) {
        self.filters.push(filter);
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn filters(&self) -> &[FadeFilter] {
        &self.filters
    }

    /// Factor each fade will use for the next frame.
    pub fn factors(&self) -> Vec<i32> {
        self.filters.iter().map(FadeFilter::current_factor).collect()
    }

    /// True when any fade will darken the next frame.
    pub fn will_modify(&self) -> bool {
        self.filters
            .iter()
            .any(|f| f.current_factor() < FACTOR_ONE)
    }

    /// Run every fade over `frame` in order, whole-frame or slice by slice.
    pub fn process_frame(
        &mut self,
        frame: &mut VideoFrame,
        slice_height: Option<usize>,
    ) -> Result<()> {
        for filter in &mut self.filters {
            match slice_height {
                Some(rows) => filter.process_slices(frame, rows)?,
                None => filter.process_frame(frame)?,
            }
        }
        Ok(())
    }
}
