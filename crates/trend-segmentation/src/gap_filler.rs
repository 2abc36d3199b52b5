//! Gapless cover of the series
//!
//! Wherever two consecutive segments do not share a boundary sample (and at
//! the head and tail of the series) a connector segment is inserted. The
//! connector is classified by the net change across the gap, which must
//! strictly exceed the amplitude threshold to count as a trend.

use trend_core::{Error, Result, Sample, Segment, SegmentThresholds, Trend};
use tracing::debug;

/// Inserts connector segments between non-adjacent segments
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GapFiller {
    thresholds: SegmentThresholds,
}

impl GapFiller {
    pub fn new(thresholds: SegmentThresholds) -> Self {
        Self { thresholds }
    }

    /// Fill every gap in `segments` so they cover `samples` exactly
    ///
    /// Returns `Computation` if two segments overlap.
    pub fn fill(&self, mut segments: Vec<Segment>, samples: &[Sample]) -> Result<Vec<Segment>> {
        let n = samples.len();
        if n < 2 {
            return Ok(segments);
        }
        let last_index = n - 1;
        segments.sort_by_key(Segment::start_index);

        let (first, last) = match (segments.first(), segments.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => {
                debug!("no segments, whole range connector");
                return Ok(vec![self.connector(samples, 0, last_index)?]);
            }
        };

        let mut filled = Vec::with_capacity(segments.len() * 2 + 1);
        if first.start_index() > 0 {
            filled.push(self.connector(samples, 0, first.start_index())?);
        }

        for pair in segments.windows(2) {
            let (earlier, later) = (pair[0], pair[1]);
            filled.push(earlier);
            if earlier.end_index() > later.start_index() {
                return Err(Error::Computation(format!(
                    "Segments overlap: {earlier} and {later}"
                )));
            }
            if earlier.end_index() != later.start_index() {
                filled.push(self.connector(samples, earlier.end_index(), later.start_index())?);
            }
        }
        filled.push(last);

        if last.end_index() < last_index {
            filled.push(self.connector(samples, last.end_index(), last_index)?);
        }

        filled.sort_by_key(|s| (s.start_time(), s.start_index()));
        debug!(
            connectors = filled.len() - segments.len(),
            segments = filled.len(),
            "gaps filled"
        );
        Ok(filled)
    }

    /// Connector over `start..=end` classified with the strict threshold
    fn connector(&self, samples: &[Sample], start: usize, end: usize) -> Result<Segment> {
        let segment = Segment::spanning(samples, start, end, Trend::Constant)?;
        let trend = self.thresholds.classify_delta(segment.value_delta(), true);
        Ok(segment.with_trend(trend))
    }
}

/// Check that `segments` form an exact, ordered, gapless cover of `samples`
pub fn verify_coverage(segments: &[Segment], samples: &[Sample]) -> Result<()> {
    let (first_sample, last_sample) = match (samples.first(), samples.last()) {
        (Some(first), Some(last)) => (first, last),
        _ if segments.is_empty() => return Ok(()),
        _ => {
            return Err(Error::Computation(
                "Segments present for an empty series".to_string(),
            ))
        }
    };
    let (first, last) = match (segments.first(), segments.last()) {
        (Some(first), Some(last)) => (first, last),
        _ if samples.len() < 2 => return Ok(()),
        _ => {
            return Err(Error::Computation(format!(
                "No segments cover {} samples",
                samples.len()
            )))
        }
    };

    if first.start_index() != 0 || first.start_time() != first_sample.timestamp() {
        return Err(Error::Computation(format!(
            "First segment {first} does not start at the first sample"
        )));
    }
    if last.end_index() != samples.len() - 1 || last.end_time() != last_sample.timestamp() {
        return Err(Error::Computation(format!(
            "Last segment {last} does not end at the final sample"
        )));
    }
    for pair in segments.windows(2) {
        if !pair[0].is_adjacent_to(&pair[1]) {
            return Err(Error::Computation(format!(
                "Segments {} and {} are not adjacent",
                pair[0], pair[1]
            )));
        }
    }
    Ok(())
}
