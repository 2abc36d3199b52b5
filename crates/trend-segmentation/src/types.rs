//! Result types for segmentation

use crate::cumulative::{CumulativeTable, TrendTotals};
use serde::{Deserialize, Serialize};
use std::fmt;
use trend_core::{Extremum, Sample, Segment, SegmentThresholds, Trend, TrendStatistics};

/// A segment together with its trend statistics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendSegment {
    pub segment: Segment,
    pub statistics: TrendStatistics,
}

impl TrendSegment {
    pub fn trend(&self) -> Trend {
        self.segment.trend()
    }
}

impl fmt::Display for TrendSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} |Δ|={:.3} (#{} {}, total {:.3})",
            self.segment,
            self.statistics.abs_delta_of_this_segment,
            self.statistics.occurrence_count_for_this_trend_type,
            self.statistics.trend,
            self.statistics.cumulative_abs_delta_for_this_trend_type
        )
    }
}

/// Output of a segmentation run
///
/// A run over fewer than three usable samples is degenerate: it carries the
/// filtered samples but no segments, statistics or window.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SegmentationResult {
    /// Gap-filled segments ordered by start time
    pub segments: Vec<TrendSegment>,
    pub cumulative: CumulativeTable,
    pub totals: TrendTotals,
    pub filtered: Vec<Sample>,
    /// Smoothed samples; segment indices point into this series
    pub smoothed: Vec<Sample>,
    pub extrema: Vec<Extremum>,
    pub thresholds: Option<SegmentThresholds>,
    pub window_size: Option<usize>,
}

impl SegmentationResult {
    /// Empty result for a series too short to segment
    pub fn degenerate(filtered: Vec<Sample>) -> Self {
        Self {
            filtered,
            ..Default::default()
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segments with the given trend
    pub fn segments_of(&self, trend: Trend) -> impl Iterator<Item = &TrendSegment> {
        self.segments.iter().filter(move |s| s.trend() == trend)
    }

    pub fn count(&self, trend: Trend) -> usize {
        self.totals.get(trend).count
    }

    /// Total absolute change over all segments of `trend`
    pub fn total_abs_delta(&self, trend: Trend) -> f64 {
        self.totals.get(trend).cumulative_abs_delta
    }

    /// Time span covered by the segments, in milliseconds
    pub fn covered_span(&self) -> Option<(i64, i64)> {
        match (self.segments.first(), self.segments.last()) {
            (Some(first), Some(last)) => {
                Some((first.segment.start_time(), last.segment.end_time()))
            }
            _ => None,
        }
    }
}

impl fmt::Display for SegmentationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_degenerate() {
            return write!(f, "No segments ({} usable samples)", self.filtered.len());
        }
        write!(
            f,
            "{} segments over {} samples (window {}): ",
            self.segments.len(),
            self.smoothed.len(),
            self.window_size.unwrap_or(0)
        )?;
        let parts: Vec<String> = Trend::ALL
            .iter()
            .map(|t| {
                format!(
                    "{} {}x {:.3}",
                    t,
                    self.count(*t),
                    self.total_abs_delta(*t)
                )
            })
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trend_core::test_data::TestTracks;

    #[test]
    fn test_degenerate_result() {
        let result = SegmentationResult::degenerate(TestTracks::ramp(2, 1.0));
        assert!(result.is_degenerate());
        assert_eq!(result.filtered.len(), 2);
        assert!(result.covered_span().is_none());
        assert_eq!(result.to_string(), "No segments (2 usable samples)");
    }

    #[test]
    fn test_trend_segment_display() {
        let samples = TestTracks::from_values(&[0.0, 2.5]);
        let segment = TrendSegment {
            segment: Segment::spanning(&samples, 0, 1, Trend::Up).unwrap(),
            statistics: TrendStatistics {
                trend: Trend::Up,
                abs_delta_of_this_segment: 2.5,
                cumulative_abs_delta_for_this_trend_type: 2.5,
                occurrence_count_for_this_trend_type: 1,
            },
        };
        let text = segment.to_string();
        assert!(text.contains("|Δ|=2.500"));
        assert!(text.contains("#1"));
    }
}
