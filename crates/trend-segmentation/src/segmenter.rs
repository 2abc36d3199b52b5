//! The segmentation pipeline
//!
//! filter -> thresholds -> smooth -> extrema -> segments -> gap fill -> cumulative

use crate::config::TrendParameters;
use crate::cumulative::CumulativeStatisticsMapper;
use crate::extrema::ExtremumDetector;
use crate::gap_filler::{verify_coverage, GapFiller};
use crate::segments::SegmentBuilder;
use crate::traits::{ConfigurableSegmenter, SegmenterProperties};
use crate::types::{SegmentationResult, TrendSegment};
use crate::visualization::{NullSegmentationVisualizer, SegmentationVisualizer};
use trend_core::{values, Error, Result, Sample, SegmentThresholds};
use trend_smoothing::{AccuracyFilter, WeightedSmoother};
use tracing::{debug, instrument, warn};

/// Fewest filtered samples that produce segments
pub const MIN_SEGMENTATION_SAMPLES: usize = 3;

/// Splits a sample series into UP / DOWN / CONSTANT segments
#[derive(Debug, Clone)]
pub struct TrendSegmenter<V = NullSegmentationVisualizer> {
    params: TrendParameters,
    visualizer: V,
}

impl TrendSegmenter<NullSegmentationVisualizer> {
    /// Create a segmenter with validated parameters
    pub fn new(params: TrendParameters) -> Result<Self> {
        Self::with_visualizer(params, NullSegmentationVisualizer)
    }
}

impl Default for TrendSegmenter<NullSegmentationVisualizer> {
    fn default() -> Self {
        Self {
            params: TrendParameters::default(),
            visualizer: NullSegmentationVisualizer,
        }
    }
}

impl<V: SegmentationVisualizer> TrendSegmenter<V> {
    /// Create a segmenter that reports every stage to `visualizer`
    pub fn with_visualizer(params: TrendParameters, visualizer: V) -> Result<Self> {
        params.validate()?;
        Ok(Self { params, visualizer })
    }

    pub fn visualizer(&self) -> &V {
        &self.visualizer
    }

    pub fn into_visualizer(self) -> V {
        self.visualizer
    }

    /// Segment `samples` without recording anything
    pub fn segment(&self, samples: &[Sample]) -> Result<SegmentationResult> {
        run_pipeline(&self.params, samples, &mut NullSegmentationVisualizer)
    }

    /// Segment `samples`, feeding each stage to the visualizer
    pub fn segment_recorded(&mut self, samples: &[Sample]) -> Result<SegmentationResult> {
        let Self { params, visualizer } = self;
        run_pipeline(params, samples, visualizer)
    }
}

impl<V> SegmenterProperties for TrendSegmenter<V> {
    fn algorithm_name(&self) -> &'static str {
        "extrema-trend-segmentation"
    }

    fn minimum_sample_size(&self) -> usize {
        MIN_SEGMENTATION_SAMPLES
    }
}

impl<V: Default> ConfigurableSegmenter for TrendSegmenter<V> {
    type Parameters = TrendParameters;

    fn with_parameters(params: Self::Parameters) -> Self {
        Self {
            params,
            visualizer: V::default(),
        }
    }

    fn parameters(&self) -> &Self::Parameters {
        &self.params
    }

    fn set_parameters(&mut self, params: Self::Parameters) {
        self.params = params;
    }
}

#[instrument(skip_all, fields(samples = samples.len(), max_accuracy = params.max_accuracy))]
fn run_pipeline<W: SegmentationVisualizer>(
    params: &TrendParameters,
    samples: &[Sample],
    visualizer: &mut W,
) -> Result<SegmentationResult> {
    params.validate()?;

    let filtered = AccuracyFilter::try_new(params.max_accuracy)?.filter(samples);
    validate_samples(&filtered)?;
    if filtered.len() < MIN_SEGMENTATION_SAMPLES {
        debug!(filtered = filtered.len(), "too few usable samples, no segments");
        return Ok(SegmentationResult::degenerate(filtered));
    }
    let filtered_values = values(&filtered);

    let thresholds = resolve_thresholds(params, &filtered_values)?;
    let recording = visualizer.is_enabled();
    if recording {
        visualizer.record_thresholds(&thresholds)?;
    }

    let smoother = match params.window_size {
        Some(size) => WeightedSmoother::with_window(size, params.window_type, &thresholds)?,
        None => WeightedSmoother::adaptive(&filtered, params.window_type, &thresholds)?,
    };
    let smoothed = smoother.smooth(&filtered);
    if recording {
        visualizer.record_series(&filtered_values, &values(&smoothed), smoother.window_size())?;
    }

    let extrema = ExtremumDetector::new(params.epsilon)?.detect(&smoothed);
    if recording {
        visualizer.record_derivatives(&extrema.derivatives)?;
        visualizer.record_extrema(&extrema.extrema, extrema.synthesized_tail)?;
    }

    let segments = SegmentBuilder::new(thresholds).build(&smoothed, &extrema.extrema)?;
    let segments = GapFiller::new(thresholds).fill(segments, &smoothed)?;
    if cfg!(debug_assertions) {
        verify_coverage(&segments, &smoothed)?;
    }
    if recording {
        visualizer.record_segments(&segments)?;
    }

    let cumulative =
        CumulativeStatisticsMapper::new(params.unit.as_str()).map(&segments, &smoothed)?;
    let trend_segments = segments
        .into_iter()
        .zip(cumulative.statistics)
        .map(|(segment, statistics)| TrendSegment {
            segment,
            statistics,
        })
        .collect::<Vec<_>>();

    debug!(
        filtered = filtered.len(),
        window = smoother.window_size(),
        extrema = extrema.extrema.len(),
        segments = trend_segments.len(),
        "segmentation complete"
    );

    Ok(SegmentationResult {
        segments: trend_segments,
        cumulative: cumulative.table,
        totals: cumulative.totals,
        filtered,
        smoothed,
        extrema: extrema.extrema,
        thresholds: Some(thresholds),
        window_size: Some(smoother.window_size()),
    })
}

/// Reject kept samples with non-finite values or timestamps that go backwards
fn validate_samples(samples: &[Sample]) -> Result<()> {
    if samples.iter().any(|s| !s.value().is_finite()) {
        return Err(Error::non_finite("Sample values"));
    }
    if let Some(pair) = samples
        .windows(2)
        .find(|pair| pair[1].timestamp() < pair[0].timestamp())
    {
        return Err(Error::InvalidArgument(format!(
            "Timestamps must be non-decreasing: {} is followed by {}",
            pair[0], pair[1]
        )));
    }
    Ok(())
}

fn resolve_thresholds(params: &TrendParameters, values: &[f64]) -> Result<SegmentThresholds> {
    let thresholds = match params.thresholds {
        Some(thresholds) => thresholds,
        None => SegmentThresholds::from_population_std_dev(values, params.std_dev_factor)?,
    };
    if thresholds.max_amplitude() == 0.0 {
        warn!("amplitude thresholds are zero, every non-zero swing is a trend");
    } else {
        debug!(
            ascending = thresholds.min_ascending_amplitude,
            descending = thresholds.min_descending_amplitude,
            "thresholds resolved"
        );
    }
    Ok(thresholds)
}
