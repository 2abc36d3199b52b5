//! Per-trend totals and per-sample cumulative deltas
//!
//! One forward pass over the gap-filled segments. Each trend type has its own
//! accumulator; the per-sample table carries the signed change since the
//! start of the enclosing segment and since the start of the track.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use trend_core::{
    CumulativeProcessedDataType, CumulativeStatistics, Error, Result, Sample, Segment, Trend,
    TrendStatistics,
};
use tracing::debug;

/// Running absolute change and occurrence count for one trend type
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrendAccumulator {
    pub cumulative_abs_delta: f64,
    pub count: usize,
}

impl TrendAccumulator {
    fn add(&mut self, abs_delta: f64) {
        self.cumulative_abs_delta += abs_delta;
        self.count += 1;
    }
}

/// Final accumulators for every trend type
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrendTotals {
    pub up: TrendAccumulator,
    pub down: TrendAccumulator,
    pub constant: TrendAccumulator,
}

impl TrendTotals {
    pub fn get(&self, trend: Trend) -> &TrendAccumulator {
        match trend {
            Trend::Up => &self.up,
            Trend::Down => &self.down,
            Trend::Constant => &self.constant,
        }
    }

    fn get_mut(&mut self, trend: Trend) -> &mut TrendAccumulator {
        match trend {
            Trend::Up => &mut self.up,
            Trend::Down => &mut self.down,
            Trend::Constant => &mut self.constant,
        }
    }

    /// Number of segments over all trend types
    pub fn segment_count(&self) -> usize {
        Trend::ALL.iter().map(|t| self.get(*t).count).sum()
    }
}

/// Cumulative values attached to one sample
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SampleCumulative {
    pub from_segment_start: Option<CumulativeStatistics>,
    pub all: Option<CumulativeStatistics>,
}

impl SampleCumulative {
    pub fn get(&self, kind: CumulativeProcessedDataType) -> Option<&CumulativeStatistics> {
        match kind {
            CumulativeProcessedDataType::FromSegmentStart => self.from_segment_start.as_ref(),
            CumulativeProcessedDataType::All => self.all.as_ref(),
        }
    }
}

/// Cumulative statistics keyed by sample index and scope
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CumulativeTable {
    entries: BTreeMap<usize, SampleCumulative>,
}

impl CumulativeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Statistic of `kind` for the sample with original index `sample_index`
    pub fn get(
        &self,
        sample_index: usize,
        kind: CumulativeProcessedDataType,
    ) -> Option<&CumulativeStatistics> {
        self.entries.get(&sample_index).and_then(|e| e.get(kind))
    }

    pub fn from_segment_start(&self, sample_index: usize) -> Option<f32> {
        self.get(sample_index, CumulativeProcessedDataType::FromSegmentStart)
            .map(|s| s.value)
    }

    pub fn all(&self, sample_index: usize) -> Option<f32> {
        self.get(sample_index, CumulativeProcessedDataType::All)
            .map(|s| s.value)
    }

    pub fn insert(
        &mut self,
        sample_index: usize,
        kind: CumulativeProcessedDataType,
        statistics: CumulativeStatistics,
    ) {
        let entry = self.entries.entry(sample_index).or_default();
        match kind {
            CumulativeProcessedDataType::FromSegmentStart => {
                entry.from_segment_start = Some(statistics)
            }
            CumulativeProcessedDataType::All => entry.all = Some(statistics),
        }
    }

    /// Number of samples with at least one entry
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&usize, &SampleCumulative)> {
        self.entries.iter()
    }
}

/// Everything produced by one mapping pass
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CumulativeOutput {
    /// One entry per input segment, same order
    pub statistics: Vec<TrendStatistics>,
    pub table: CumulativeTable,
    pub totals: TrendTotals,
}

/// Computes trend totals and per-sample cumulative deltas
#[derive(Debug, Clone, PartialEq)]
pub struct CumulativeStatisticsMapper {
    unit: String,
}

impl Default for CumulativeStatisticsMapper {
    fn default() -> Self {
        Self::new("m")
    }
}

impl CumulativeStatisticsMapper {
    pub fn new(unit: impl Into<String>) -> Self {
        Self { unit: unit.into() }
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Map gap-filled `segments` over the `samples` they index into
    pub fn map(&self, segments: &[Segment], samples: &[Sample]) -> Result<CumulativeOutput> {
        let mut output = CumulativeOutput {
            statistics: Vec::with_capacity(segments.len()),
            ..Default::default()
        };
        let mut carried_all = 0.0_f64;

        for (k, segment) in segments.iter().enumerate() {
            if segment.end_index() >= samples.len() {
                return Err(Error::InvalidArgument(format!(
                    "Segment {segment} is outside {} samples",
                    samples.len()
                )));
            }

            let abs_delta = segment.value_delta().abs();
            let accumulator = output.totals.get_mut(segment.trend());
            accumulator.add(abs_delta);
            output.statistics.push(TrendStatistics {
                trend: segment.trend(),
                abs_delta_of_this_segment: abs_delta as f32,
                cumulative_abs_delta_for_this_trend_type: accumulator.cumulative_abs_delta as f32,
                occurrence_count_for_this_trend_type: accumulator.count,
            });

            if k == 0 {
                self.record(&mut output.table, &samples[segment.start_index()], 0.0, 0.0);
            }

            let mut from_start = 0.0_f64;
            for i in segment.start_index() + 1..=segment.end_index() {
                from_start += samples[i].value() - samples[i - 1].value();
                self.record(
                    &mut output.table,
                    &samples[i],
                    from_start,
                    carried_all + from_start,
                );
            }
            carried_all += from_start;
        }

        debug!(
            segments = segments.len(),
            samples = output.table.len(),
            up = output.totals.up.count,
            down = output.totals.down.count,
            constant = output.totals.constant.count,
            "cumulative statistics mapped"
        );
        Ok(output)
    }

    fn record(&self, table: &mut CumulativeTable, sample: &Sample, from_start: f64, all: f64) {
        table.insert(
            sample.index(),
            CumulativeProcessedDataType::FromSegmentStart,
            CumulativeStatistics::new(from_start as f32, sample.accuracy(), self.unit.as_str()),
        );
        table.insert(
            sample.index(),
            CumulativeProcessedDataType::All,
            CumulativeStatistics::new(all as f32, sample.accuracy(), self.unit.as_str()),
        );
    }
}
