//! Segment construction from extrema pairs
//!
//! Consecutive extrema are paired and each pair is a candidate: `Min -> Max`
//! for an ascending span, `Max -> Min` for a descending one. Candidates that
//! miss the amplitude (or rate) thresholds are dropped here and the hole is
//! patched later by the gap filler. The spans before the first extremum and
//! after the last accepted segment become boundary segments.

use trend_core::{Extremum, ExtremumKind, Result, Sample, Segment, SegmentThresholds, Trend};
use tracing::{debug, trace};

/// Outcome of evaluating one extrema pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate {
    Accepted(Trend),
    /// Directional pair that missed the thresholds
    Rejected(Trend),
    /// Two extrema of the same kind
    SameKind,
}

/// Builds trend segments from a smoothed series and its extrema
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SegmentBuilder {
    thresholds: SegmentThresholds,
}

impl SegmentBuilder {
    pub fn new(thresholds: SegmentThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &SegmentThresholds {
        &self.thresholds
    }

    /// Decide whether the span `first -> second` is a trend segment
    pub fn evaluate(&self, samples: &[Sample], first: Extremum, second: Extremum) -> Candidate {
        let trend = match (first.kind, second.kind) {
            (ExtremumKind::Min, ExtremumKind::Max) => Trend::Up,
            (ExtremumKind::Max, ExtremumKind::Min) => Trend::Down,
            _ => return Candidate::SameKind,
        };
        let endpoints = (
            samples.get(first.sample_index),
            samples.get(second.sample_index),
        );
        let (start, end) = match endpoints {
            (Some(start), Some(end)) => (start, end),
            _ => return Candidate::Rejected(trend),
        };

        let delta = end.value() - start.value();
        let directional = match trend {
            Trend::Up => delta > 0.0,
            _ => delta < 0.0,
        };
        if !directional || delta.abs() < self.thresholds.amplitude_for(trend) {
            return Candidate::Rejected(trend);
        }

        let min_rate = self.thresholds.derivative_for(trend);
        if min_rate > 0.0 {
            let seconds = start.seconds_until(end);
            // A jump with no elapsed time has an unbounded rate
            let rate = if seconds > 0.0 {
                delta.abs() / seconds
            } else {
                f64::INFINITY
            };
            if rate < min_rate {
                return Candidate::Rejected(trend);
            }
        }
        Candidate::Accepted(trend)
    }

    /// Build the segments of `samples` delimited by `extrema`
    ///
    /// The result is sorted by start index but is not guaranteed to cover the
    /// whole series.
    pub fn build(&self, samples: &[Sample], extrema: &[Extremum]) -> Result<Vec<Segment>> {
        let n = samples.len();
        if n < 2 {
            return Ok(Vec::new());
        }
        let last_index = n - 1;

        let first = match extrema.first() {
            Some(first) => first,
            None => return Ok(vec![self.boundary(samples, 0, last_index)?]),
        };

        let mut segments = Vec::with_capacity(extrema.len() + 1);
        if first.sample_index > 0 {
            segments.push(self.boundary(samples, 0, first.sample_index)?);
        }

        let mut rejected = 0_usize;
        for pair in extrema.windows(2) {
            match self.evaluate(samples, pair[0], pair[1]) {
                Candidate::Accepted(trend) => {
                    trace!(
                        start = pair[0].sample_index,
                        end = pair[1].sample_index,
                        %trend,
                        "candidate accepted"
                    );
                    segments.push(Segment::spanning(
                        samples,
                        pair[0].sample_index,
                        pair[1].sample_index,
                        trend,
                    )?);
                }
                Candidate::Rejected(trend) => {
                    trace!(
                        start = pair[0].sample_index,
                        end = pair[1].sample_index,
                        %trend,
                        "candidate rejected"
                    );
                    rejected += 1;
                }
                Candidate::SameKind => {}
            }
        }

        let covered_to = segments.iter().map(Segment::end_index).max().unwrap_or(0);
        if covered_to < last_index {
            segments.push(self.boundary(samples, covered_to, last_index)?);
        }

        segments.sort_by_key(Segment::start_index);
        debug!(
            segments = segments.len(),
            rejected,
            "segments built"
        );
        Ok(segments)
    }

    /// Boundary segment classified by its net change, inclusive of the threshold
    fn boundary(&self, samples: &[Sample], start: usize, end: usize) -> Result<Segment> {
        let segment = Segment::spanning(samples, start, end, Trend::Constant)?;
        let trend = self.thresholds.classify_delta(segment.value_delta(), false);
        Ok(segment.with_trend(trend))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extrema::ExtremumDetector;
    use trend_core::test_data::TestTracks;
    use trend_core::values;

    fn build(values: &[f64], thresholds: SegmentThresholds) -> Vec<Segment> {
        let samples = TestTracks::from_values(values);
        let extrema = ExtremumDetector::default().detect(&samples).extrema;
        SegmentBuilder::new(thresholds).build(&samples, &extrema).unwrap()
    }

    fn summary(segments: &[Segment]) -> Vec<(usize, usize, Trend)> {
        segments
            .iter()
            .map(|s| (s.start_index(), s.end_index(), s.trend()))
            .collect()
    }

    #[test]
    fn test_zigzag_segments() {
        let values = [0.0, 10.0, 5.0, 15.0];
        let thresholds = SegmentThresholds::from_population_std_dev(&values, 0.2).unwrap();
        let segments = build(&values, thresholds);

        assert_eq!(
            summary(&segments),
            vec![(0, 1, Trend::Up), (1, 2, Trend::Down), (2, 3, Trend::Up)]
        );
    }

    #[test]
    fn test_no_extrema_gives_whole_range() {
        let ramp = TestTracks::ramp(50, 1.0);
        let thresholds =
            SegmentThresholds::from_population_std_dev(&values(&ramp), 0.2).unwrap();
        let segments = SegmentBuilder::new(thresholds).build(&ramp, &[]).unwrap();
        assert_eq!(summary(&segments), vec![(0, 49, Trend::Up)]);

        let flat = TestTracks::flat(10, 3.0);
        let segments = SegmentBuilder::default().build(&flat, &[]).unwrap();
        assert_eq!(summary(&segments), vec![(0, 9, Trend::Constant)]);
    }

    #[test]
    fn test_short_input_has_no_segments() {
        let one = TestTracks::from_values(&[1.0]);
        assert!(SegmentBuilder::default().build(&one, &[]).unwrap().is_empty());
        assert!(SegmentBuilder::default().build(&[], &[]).unwrap().is_empty());
    }

    #[test]
    fn test_single_peak_has_leading_and_trailing() {
        let segments = build(
            &values(&TestTracks::hill(21, 40.0)),
            SegmentThresholds::symmetric(5.0).unwrap(),
        );
        assert_eq!(
            summary(&segments),
            vec![(0, 10, Trend::Up), (10, 20, Trend::Down)]
        );
    }

    #[test]
    fn test_small_swing_rejected() {
        // The dip 10 -> 9.5 -> 20 is too shallow for a threshold of 2
        let values = [0.0, 10.0, 9.5, 20.0, 0.0];
        let segments = build(&values, SegmentThresholds::symmetric(2.0).unwrap());

        // Max@1 -> Min@2 rejected, Min@2 -> Max@3 accepted; the synthesized
        // tail is a Max, so the last span is a boundary segment
        assert_eq!(
            summary(&segments),
            vec![(0, 1, Trend::Up), (2, 3, Trend::Up), (3, 4, Trend::Down)]
        );
    }

    #[test]
    fn test_rate_gate() {
        let samples = TestTracks::from_values(&[0.0, 10.0, 0.0, 10.0, 0.0]);
        let extrema = [Extremum::max(1), Extremum::min(2)];

        let slow = SegmentThresholds::symmetric(1.0)
            .unwrap()
            .with_derivatives(0.0, 20.0)
            .unwrap();
        assert_eq!(
            SegmentBuilder::new(slow).evaluate(&samples, extrema[0], extrema[1]),
            Candidate::Rejected(Trend::Down)
        );

        let fast = slow.with_derivatives(0.0, 5.0).unwrap();
        assert_eq!(
            SegmentBuilder::new(fast).evaluate(&samples, extrema[0], extrema[1]),
            Candidate::Accepted(Trend::Down)
        );
    }

    #[test]
    fn test_same_kind_and_wrong_direction() {
        let samples = TestTracks::from_values(&[0.0, 5.0, 3.0, 1.0]);
        let builder = SegmentBuilder::default();
        assert_eq!(
            builder.evaluate(&samples, Extremum::min(0), Extremum::min(3)),
            Candidate::SameKind
        );
        // Labelled Min -> Max but the value falls
        assert_eq!(
            builder.evaluate(&samples, Extremum::min(1), Extremum::max(3)),
            Candidate::Rejected(Trend::Up)
        );
    }

    #[test]
    fn test_boundary_uses_inclusive_threshold() {
        let samples = TestTracks::from_values(&[0.0, 2.0]);
        let builder = SegmentBuilder::new(SegmentThresholds::symmetric(2.0).unwrap());
        let segments = builder.build(&samples, &[]).unwrap();
        assert_eq!(segments[0].trend(), Trend::Up);
    }

    #[test]
    fn test_out_of_range_extremum_is_an_error() {
        let samples = TestTracks::from_values(&[0.0, 1.0, 0.0]);
        let result = SegmentBuilder::default().build(&samples, &[Extremum::max(7)]);
        assert!(result.is_err());
    }
}
