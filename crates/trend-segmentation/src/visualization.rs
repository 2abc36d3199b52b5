//! Visualization interface for the segmentation pipeline
//!
//! Chart collaborators implement [`SegmentationVisualizer`] to observe the
//! intermediate stages of a run without the engine depending on any plotting
//! library. The default [`NullSegmentationVisualizer`] compiles to nothing.

use trend_core::{Extremum, Result, Segment, SegmentThresholds};

/// Hooks called at each stage of a segmentation run
pub trait SegmentationVisualizer {
    /// Record the filtered and smoothed value series
    fn record_series(
        &mut self,
        filtered: &[f64],
        smoothed: &[f64],
        window_size: usize,
    ) -> Result<()>;

    /// Record the derivative series; `None` marks a zero-duration step
    fn record_derivatives(&mut self, derivatives: &[Option<f64>]) -> Result<()>;

    /// Record the thresholds the run is using
    fn record_thresholds(&mut self, thresholds: &SegmentThresholds) -> Result<()>;

    /// Record the detected extrema
    fn record_extrema(&mut self, extrema: &[Extremum], synthesized_tail: bool) -> Result<()>;

    /// Record the final gap-filled segments
    fn record_segments(&mut self, segments: &[Segment]) -> Result<()>;

    /// Generate and save visualizations
    ///
    /// Returns paths to generated files (if any)
    fn save_visualizations(&self, output_prefix: &str) -> Result<Vec<String>>;

    /// Check if this visualizer is active
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Visualizer that records nothing
#[derive(Default, Clone, Copy, Debug)]
pub struct NullSegmentationVisualizer;

impl SegmentationVisualizer for NullSegmentationVisualizer {
    #[inline(always)]
    fn record_series(&mut self, _: &[f64], _: &[f64], _: usize) -> Result<()> {
        Ok(())
    }

    #[inline(always)]
    fn record_derivatives(&mut self, _: &[Option<f64>]) -> Result<()> {
        Ok(())
    }

    #[inline(always)]
    fn record_thresholds(&mut self, _: &SegmentThresholds) -> Result<()> {
        Ok(())
    }

    #[inline(always)]
    fn record_extrema(&mut self, _: &[Extremum], _: bool) -> Result<()> {
        Ok(())
    }

    #[inline(always)]
    fn record_segments(&mut self, _: &[Segment]) -> Result<()> {
        Ok(())
    }

    #[inline(always)]
    fn save_visualizations(&self, _: &str) -> Result<Vec<String>> {
        Ok(vec![])
    }

    #[inline(always)]
    fn is_enabled(&self) -> bool {
        false
    }
}

/// In-memory visualizer that keeps the last recorded stage data
///
/// `save_visualizations` writes the recorded data as a JSON document.
#[derive(Debug, Clone, Default)]
pub struct RecordingVisualizer {
    pub filtered: Vec<f64>,
    pub smoothed: Vec<f64>,
    pub window_size: usize,
    pub derivatives: Vec<Option<f64>>,
    pub thresholds: Option<SegmentThresholds>,
    pub extrema: Vec<Extremum>,
    pub synthesized_tail: bool,
    pub segments: Vec<Segment>,
}

impl SegmentationVisualizer for RecordingVisualizer {
    fn record_series(
        &mut self,
        filtered: &[f64],
        smoothed: &[f64],
        window_size: usize,
    ) -> Result<()> {
        self.filtered = filtered.to_vec();
        self.smoothed = smoothed.to_vec();
        self.window_size = window_size;
        Ok(())
    }

    fn record_derivatives(&mut self, derivatives: &[Option<f64>]) -> Result<()> {
        self.derivatives = derivatives.to_vec();
        Ok(())
    }

    fn record_thresholds(&mut self, thresholds: &SegmentThresholds) -> Result<()> {
        self.thresholds = Some(*thresholds);
        Ok(())
    }

    fn record_extrema(&mut self, extrema: &[Extremum], synthesized_tail: bool) -> Result<()> {
        self.extrema = extrema.to_vec();
        self.synthesized_tail = synthesized_tail;
        Ok(())
    }

    fn record_segments(&mut self, segments: &[Segment]) -> Result<()> {
        self.segments = segments.to_vec();
        Ok(())
    }

    fn save_visualizations(&self, output_prefix: &str) -> Result<Vec<String>> {
        let path = format!("{output_prefix}_segmentation.json");
        let document = serde_json::json!({
            "filtered": self.filtered,
            "smoothed": self.smoothed,
            "window_size": self.window_size,
            "derivatives": self.derivatives,
            "thresholds": self.thresholds,
            "extrema": self.extrema,
            "synthesized_tail": self.synthesized_tail,
            "segments": self.segments,
        });
        std::fs::write(&path, serde_json::to_string_pretty(&document)?)?;
        Ok(vec![path])
    }
}
