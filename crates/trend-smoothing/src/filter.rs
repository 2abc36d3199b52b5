//! Accuracy filtering
//!
//! Drops samples whose reported accuracy is unknown (zero or negative) or
//! worse than a configured ceiling.

use trend_core::{Error, Result, Sample, SeriesStage, StageProperties};
use tracing::debug;

/// Default accuracy ceiling, in the unit the device reports accuracy in
pub const DEFAULT_MAX_ACCURACY: f32 = 50.0;

/// Keeps samples with `0 < accuracy <= ceiling`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccuracyFilter {
    max_accuracy: f32,
}

impl Default for AccuracyFilter {
    fn default() -> Self {
        Self {
            max_accuracy: DEFAULT_MAX_ACCURACY,
        }
    }
}

impl AccuracyFilter {
    /// Create a filter with the given ceiling
    ///
    /// A NaN ceiling keeps nothing; use [`AccuracyFilter::try_new`] to reject it.
    pub fn new(max_accuracy: f32) -> Self {
        Self { max_accuracy }
    }

    /// Create a filter, rejecting a non-finite or non-positive ceiling
    pub fn try_new(max_accuracy: f32) -> Result<Self> {
        if !max_accuracy.is_finite() || max_accuracy <= 0.0 {
            return Err(Error::InvalidArgument(format!(
                "Accuracy ceiling must be finite and positive, got {max_accuracy}"
            )));
        }
        Ok(Self::new(max_accuracy))
    }

    pub fn max_accuracy(&self) -> f32 {
        self.max_accuracy
    }

    /// Whether a single sample passes the filter
    pub fn accepts(&self, sample: &Sample) -> bool {
        sample.has_known_accuracy() && sample.accuracy() <= self.max_accuracy
    }

    /// Order-preserving subsequence of accepted samples
    pub fn filter(&self, samples: &[Sample]) -> Vec<Sample> {
        let kept: Vec<Sample> = samples.iter().copied().filter(|s| self.accepts(s)).collect();
        debug!(
            kept = kept.len(),
            dropped = samples.len() - kept.len(),
            ceiling = self.max_accuracy,
            "accuracy filter applied"
        );
        kept
    }
}

impl StageProperties for AccuracyFilter {
    fn stage_name(&self) -> &'static str {
        "accuracy-filter"
    }
}

impl SeriesStage for AccuracyFilter {
    fn apply(&self, samples: &[Sample]) -> Result<Vec<Sample>> {
        Ok(self.filter(samples))
    }
}
