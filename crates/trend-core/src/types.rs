//! Value types shared by every stage of the segmentation pipeline

use crate::error::{Error, Result};
use crate::sample::Sample;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default multiplier applied to the population standard deviation when
/// deriving amplitude thresholds from the data
pub const DEFAULT_STD_DEV_FACTOR: f64 = 0.2;

/// Direction of a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trend {
    /// Ascending
    Up,
    /// Descending
    Down,
    /// Flat or an insignificant change
    Constant,
}

impl Trend {
    /// All trend types, in accumulator order
    pub const ALL: [Trend; 3] = [Trend::Up, Trend::Down, Trend::Constant];

    /// Dense index used for per-trend accumulators
    pub fn ordinal(self) -> usize {
        match self {
            Trend::Up => 0,
            Trend::Down => 1,
            Trend::Constant => 2,
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Up => write!(f, "Up"),
            Trend::Down => write!(f, "Down"),
            Trend::Constant => write!(f, "Constant"),
        }
    }
}

/// Kind of a local extremum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExtremumKind {
    Min,
    Max,
}

impl ExtremumKind {
    pub fn opposite(self) -> Self {
        match self {
            ExtremumKind::Min => ExtremumKind::Max,
            ExtremumKind::Max => ExtremumKind::Min,
        }
    }
}

/// A local minimum or maximum of the smoothed series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extremum {
    /// Position in the smoothed sample array
    pub sample_index: usize,
    pub kind: ExtremumKind,
}

impl Extremum {
    pub fn new(sample_index: usize, kind: ExtremumKind) -> Self {
        Self { sample_index, kind }
    }

    pub fn min(sample_index: usize) -> Self {
        Self::new(sample_index, ExtremumKind::Min)
    }

    pub fn max(sample_index: usize) -> Self {
        Self::new(sample_index, ExtremumKind::Max)
    }
}

/// Amplitude and rate thresholds a span must reach to count as a trend
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SegmentThresholds {
    pub min_ascending_amplitude: f64,
    /// Minimum mean rate (value units per second) of an ascending span; 0 disables the gate
    pub min_ascending_derivative: f64,
    pub min_descending_amplitude: f64,
    /// Minimum mean rate (value units per second, absolute) of a descending span
    ///
    /// 0 disables the gate.
    pub min_descending_derivative: f64,
}

impl SegmentThresholds {
    /// Create validated thresholds
    pub fn new(
        min_ascending_amplitude: f64,
        min_ascending_derivative: f64,
        min_descending_amplitude: f64,
        min_descending_derivative: f64,
    ) -> Result<Self> {
        let thresholds = Self {
            min_ascending_amplitude,
            min_ascending_derivative,
            min_descending_amplitude,
            min_descending_derivative,
        };
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Same amplitude threshold in both directions, rate gating disabled
    pub fn symmetric(amplitude: f64) -> Result<Self> {
        Self::new(amplitude, 0.0, amplitude, 0.0)
    }

    /// Derive amplitude thresholds as `populationStdDev(values) * factor`
    ///
    /// Derivative thresholds are left at zero.
    pub fn from_population_std_dev(values: &[f64], factor: f64) -> Result<Self> {
        if !factor.is_finite() || factor < 0.0 {
            return Err(Error::negative_threshold("std_dev_factor", factor));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(Error::non_finite("values"));
        }
        let amplitude = crate::math::population_std_dev(values) * factor;
        Self::symmetric(amplitude)
    }

    /// Set the rate thresholds
    pub fn with_derivatives(mut self, ascending: f64, descending: f64) -> Result<Self> {
        self.min_ascending_derivative = ascending;
        self.min_descending_derivative = descending;
        self.validate()?;
        Ok(self)
    }

    /// Check that every threshold is finite and non-negative
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("min_ascending_amplitude", self.min_ascending_amplitude),
            ("min_ascending_derivative", self.min_ascending_derivative),
            ("min_descending_amplitude", self.min_descending_amplitude),
            ("min_descending_derivative", self.min_descending_derivative),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::negative_threshold(name, value));
            }
        }
        Ok(())
    }

    /// Largest of the two amplitude thresholds
    pub fn max_amplitude(&self) -> f64 {
        self.min_ascending_amplitude.max(self.min_descending_amplitude)
    }

    /// Amplitude threshold for a trend direction; `Constant` has none
    pub fn amplitude_for(&self, trend: Trend) -> f64 {
        match trend {
            Trend::Up => self.min_ascending_amplitude,
            Trend::Down => self.min_descending_amplitude,
            Trend::Constant => 0.0,
        }
    }

    pub fn derivative_for(&self, trend: Trend) -> f64 {
        match trend {
            Trend::Up => self.min_ascending_derivative,
            Trend::Down => self.min_descending_derivative,
            Trend::Constant => 0.0,
        }
    }

    /// Amplitude threshold for the direction of `delta`
    pub fn amplitude_for_delta(&self, delta: f64) -> f64 {
        if delta >= 0.0 {
            self.min_ascending_amplitude
        } else {
            self.min_descending_amplitude
        }
    }

    /// Classify a value change against the amplitude thresholds
    ///
    /// With `strict` the change must exceed the threshold, otherwise reaching it
    /// is enough. A zero change is always [`Trend::Constant`].
    pub fn classify_delta(&self, delta: f64, strict: bool) -> Trend {
        if delta == 0.0 || !delta.is_finite() {
            return Trend::Constant;
        }
        let threshold = self.amplitude_for_delta(delta);
        let significant = if strict {
            delta.abs() > threshold
        } else {
            delta.abs() >= threshold
        };
        match (significant, delta > 0.0) {
            (true, true) => Trend::Up,
            (true, false) => Trend::Down,
            (false, _) => Trend::Constant,
        }
    }
}

/// A contiguous span of the sample array classified with one trend
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    start_index: usize,
    end_index: usize,
    start_time: i64,
    end_time: i64,
    start_value: f64,
    end_value: f64,
    trend: Trend,
}

impl Segment {
    /// Create a segment, enforcing `start_index <= end_index` and `start_time <= end_time`
    pub fn new(
        start_index: usize,
        end_index: usize,
        start_time: i64,
        end_time: i64,
        start_value: f64,
        end_value: f64,
        trend: Trend,
    ) -> Result<Self> {
        if start_index > end_index {
            return Err(Error::InvalidArgument(format!(
                "Segment start index {start_index} is after end index {end_index}"
            )));
        }
        if start_time > end_time {
            return Err(Error::InvalidArgument(format!(
                "Segment start time {start_time} is after end time {end_time}"
            )));
        }
        Ok(Self {
            start_index,
            end_index,
            start_time,
            end_time,
            start_value,
            end_value,
            trend,
        })
    }

    /// Segment spanning `samples[start_index..=end_index]`
    pub fn spanning(
        samples: &[Sample],
        start_index: usize,
        end_index: usize,
        trend: Trend,
    ) -> Result<Self> {
        let (start, end) = match (samples.get(start_index), samples.get(end_index)) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                return Err(Error::InvalidArgument(format!(
                    "Segment {start_index}..={end_index} is outside {} samples",
                    samples.len()
                )))
            }
        };
        Self::new(
            start_index,
            end_index,
            start.timestamp(),
            end.timestamp(),
            start.value(),
            end.value(),
            trend,
        )
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }

    pub fn end_index(&self) -> usize {
        self.end_index
    }

    pub fn start_time(&self) -> i64 {
        self.start_time
    }

    pub fn end_time(&self) -> i64 {
        self.end_time
    }

    pub fn start_value(&self) -> f64 {
        self.start_value
    }

    pub fn end_value(&self) -> f64 {
        self.end_value
    }

    pub fn trend(&self) -> Trend {
        self.trend
    }

    /// Same span with a different trend
    pub fn with_trend(mut self, trend: Trend) -> Self {
        self.trend = trend;
        self
    }

    pub fn duration_ms(&self) -> i64 {
        self.end_time - self.start_time
    }

    /// Signed change from the first to the last sample
    pub fn value_delta(&self) -> f64 {
        self.end_value - self.start_value
    }

    /// Number of samples covered, boundaries included
    pub fn sample_count(&self) -> usize {
        self.end_index - self.start_index + 1
    }

    /// Whether `next` starts exactly where this segment ends
    pub fn is_adjacent_to(&self, next: &Segment) -> bool {
        self.end_index == next.start_index && self.end_time == next.start_time
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}..={}] {}ms..{}ms ({:.3} -> {:.3})",
            self.trend,
            self.start_index,
            self.end_index,
            self.start_time,
            self.end_time,
            self.start_value,
            self.end_value
        )
    }
}

/// Per-segment statistics with running totals scoped to the segment's trend type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendStatistics {
    pub trend: Trend,
    pub abs_delta_of_this_segment: f32,
    pub cumulative_abs_delta_for_this_trend_type: f32,
    pub occurrence_count_for_this_trend_type: usize,
}

/// Scope of a per-sample cumulative value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CumulativeProcessedDataType {
    /// Resets to zero at each segment boundary
    FromSegmentStart,
    /// Accumulates across the whole track
    All,
}

/// A cumulative value attached to one sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativeStatistics {
    pub value: f32,
    pub value_accuracy: f32,
    pub unit: String,
}

impl CumulativeStatistics {
    pub fn new(value: f32, value_accuracy: f32, unit: impl Into<String>) -> Self {
        Self {
            value,
            value_accuracy,
            unit: unit.into(),
        }
    }
}
