use crate::config::TrendParameters;
use crate::segmenter::TrendSegmenter;
use crate::visualization::{NullSegmentationVisualizer, SegmentationVisualizer};
use trend_core::{Result, SegmentThresholds};
use trend_smoothing::{WindowType, MIN_WINDOW_SIZE};

/// Builder for configuring and creating trend segmenters.
pub struct TrendSegmenterBuilder<V> {
    visualizer: V,
    params: TrendParameters,
}

impl Default for TrendSegmenterBuilder<NullSegmentationVisualizer> {
    fn default() -> Self {
        Self::new(NullSegmentationVisualizer)
    }
}

impl<V> TrendSegmenterBuilder<V>
where
    V: SegmentationVisualizer,
{
    /// Creates a new segmenter builder.
    ///
    /// # Arguments
    /// * `visualizer` - The visualizer for optional stage recording
    pub fn new(visualizer: V) -> Self {
        Self {
            visualizer,
            params: TrendParameters::default(),
        }
    }

    /// Start from an existing parameter set.
    pub fn parameters(mut self, params: TrendParameters) -> Self {
        self.params = params;
        self
    }

    /// Sets the accuracy ceiling.
    ///
    /// Non-positive ceilings are raised to the smallest positive value.
    pub fn max_accuracy(mut self, max_accuracy: f32) -> Self {
        self.params.max_accuracy = max_accuracy.max(f32::MIN_POSITIVE);
        self
    }

    pub fn window_type(mut self, window_type: WindowType) -> Self {
        self.params.window_type = window_type;
        self
    }

    /// Uses a fixed window instead of estimating one.
    ///
    /// The size is rounded up to the next odd value of at least 3.
    pub fn window_size(mut self, size: usize) -> Self {
        self.params.window_size = Some(size.max(MIN_WINDOW_SIZE) | 1);
        self
    }

    /// Estimate the window from the data (the default).
    pub fn adaptive_window(mut self) -> Self {
        self.params.window_size = None;
        self
    }

    /// Sets the derivative dead-zone (clamped to be non-negative).
    pub fn epsilon(mut self, epsilon: f64) -> Self {
        self.params.epsilon = epsilon.max(0.0);
        self
    }

    /// Uses fixed thresholds instead of deriving them.
    pub fn thresholds(mut self, thresholds: SegmentThresholds) -> Self {
        self.params.thresholds = Some(thresholds);
        self
    }

    /// Derive thresholds as `factor` times the population standard deviation.
    pub fn std_dev_factor(mut self, factor: f64) -> Self {
        self.params.thresholds = None;
        self.params.std_dev_factor = factor.max(0.0);
        self
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.params.unit = unit.into();
        self
    }

    /// Builds the configured segmenter.
    pub fn build(self) -> Result<TrendSegmenter<V>> {
        TrendSegmenter::with_visualizer(self.params, self.visualizer)
    }
}

/// Convenience function for creating a segmenter with default parameters.
pub fn default_segmenter() -> TrendSegmenter {
    TrendSegmenter::default()
}

/// Convenience function for creating a segmenter with fixed thresholds.
pub fn segmenter_with_thresholds(thresholds: SegmentThresholds) -> Result<TrendSegmenter> {
    TrendSegmenterBuilder::default().thresholds(thresholds).build()
}
