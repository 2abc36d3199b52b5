//! Core traits for sample-series stages
//!
//! Every preprocessing stage (filtering, smoothing) consumes a borrowed sample
//! slice and returns a freshly allocated sequence; the input is never mutated.

use crate::error::Result;
use crate::sample::Sample;

/// Properties of a stage that don't depend on the input
pub trait StageProperties {
    /// Name of the stage, used in logs and diagnostics
    fn stage_name(&self) -> &'static str;

    /// Minimum number of samples the stage needs to do useful work
    ///
    /// Shorter inputs are passed through unchanged rather than rejected.
    fn minimum_sample_size(&self) -> usize {
        0
    }
}

/// A transformation from one sample series to another
pub trait SeriesStage: StageProperties {
    /// Apply the stage, returning a new sequence
    fn apply(&self, samples: &[Sample]) -> Result<Vec<Sample>>;

    /// Apply the stage to several independent series
    fn apply_batch(&self, series: &[&[Sample]]) -> Result<Vec<Vec<Sample>>> {
        series.iter().map(|samples| self.apply(samples)).collect()
    }
}

/// Run `stages` in order, feeding each one the output of the previous
pub fn apply_stages(stages: &[&dyn SeriesStage], samples: &[Sample]) -> Result<Vec<Sample>> {
    let mut current = samples.to_vec();
    for stage in stages {
        current = stage.apply(&current)?;
        tracing::trace!(stage = stage.stage_name(), len = current.len(), "stage applied");
    }
    Ok(current)
}
