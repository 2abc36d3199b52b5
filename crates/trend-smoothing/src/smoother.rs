//! Centered weighted moving average
//!
//! Near the array edges only the taps that land inside the series are used
//! and the sum is divided by the weight actually applied, so boundary values
//! are not attenuated.

use crate::window::{generate_weights, validate_window_size, WindowSizeEstimator, WindowType};
use trend_core::{values, Error, Result, Sample, SegmentThresholds, SeriesStage, StageProperties};
use tracing::debug;

/// Weighted smoother with a fixed odd-length window
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedSmoother {
    weights: Vec<f64>,
}

impl WeightedSmoother {
    /// Create a smoother from explicit weights
    ///
    /// Fails with `InvalidArgument` for an even or shorter-than-three window,
    /// or for negative/non-finite weights.
    pub fn new(weights: Vec<f64>) -> Result<Self> {
        validate_window_size(weights.len())?;
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(Error::InvalidArgument(
                "Window weights must be finite and non-negative".to_string(),
            ));
        }
        Ok(Self { weights })
    }

    /// Smoother with a generated window of `size` taps
    pub fn with_window(
        size: usize,
        window_type: WindowType,
        thresholds: &SegmentThresholds,
    ) -> Result<Self> {
        Self::new(generate_weights(size, window_type, thresholds)?)
    }

    /// Smoother whose window length is estimated from `samples`
    pub fn adaptive(
        samples: &[Sample],
        window_type: WindowType,
        thresholds: &SegmentThresholds,
    ) -> Result<Self> {
        let size = WindowSizeEstimator::default().estimate(&values(samples), thresholds);
        Self::with_window(size, window_type, thresholds)
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn window_size(&self) -> usize {
        self.weights.len()
    }

    /// Smooth `samples`, returning a new series with identical metadata
    pub fn smooth(&self, samples: &[Sample]) -> Vec<Sample> {
        if samples.len() < self.minimum_sample_size() {
            return samples.to_vec();
        }
        let smoothed = smooth_values(&values(samples), &self.weights);
        debug!(len = samples.len(), window = self.window_size(), "series smoothed");
        samples
            .iter()
            .zip(smoothed)
            .map(|(sample, value)| sample.with_value(value))
            .collect()
    }
}

impl StageProperties for WeightedSmoother {
    fn stage_name(&self) -> &'static str {
        "weighted-smoother"
    }

    fn minimum_sample_size(&self) -> usize {
        3
    }
}

impl SeriesStage for WeightedSmoother {
    fn apply(&self, samples: &[Sample]) -> Result<Vec<Sample>> {
        Ok(self.smooth(samples))
    }
}

/// Weighted moving average with edge renormalization
///
/// `weights` must have odd length; the caller validates it.
fn smooth_values(values: &[f64], weights: &[f64]) -> Vec<f64> {
    let n = values.len() as isize;
    let k = (weights.len() / 2) as isize;
    (0..n)
        .map(|i| {
            let mut sum = 0.0;
            let mut used = 0.0;
            for j in -k..=k {
                let idx = i + j;
                if idx < 0 || idx >= n {
                    continue;
                }
                let w = weights[(j + k) as usize];
                sum += values[idx as usize] * w;
                used += w;
            }
            if used > 0.0 {
                sum / used
            } else {
                values[i as usize]
            }
        })
        .collect()
}
