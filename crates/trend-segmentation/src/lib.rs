//! Trend segmentation and cumulative statistics
//!
//! Splits a time-ordered sample series into a gapless sequence of UP, DOWN and
//! CONSTANT segments and computes per-trend and per-sample cumulative values.
//!
//! ## Pipeline
//!
//! 1. **Accuracy filter**: samples with unknown or poor accuracy are dropped
//! 2. **Thresholds**: fixed, or derived from the standard deviation of the filtered values
//! 3. **Smoothing**: adaptive (or fixed) odd-length weighted moving average
//! 4. **Extrema**: sign changes of the time-derivative with an epsilon dead-zone
//! 5. **Segments**: extrema pairs accepted against amplitude and rate thresholds
//! 6. **Gap filling**: connector segments restore a total cover of the series
//! 7. **Cumulative statistics**: per-trend totals and per-sample running deltas
//!
//! ## Usage
//!
//! ```rust
//! use trend_core::{from_triples, Trend};
//! use trend_segmentation::TrendSegmenterBuilder;
//!
//! let samples = from_triples(&[
//!     (0, 0.0, 1.0),
//!     (1000, 10.0, 1.0),
//!     (2000, 5.0, 1.0),
//!     (3000, 15.0, 1.0),
//! ]);
//! let segmenter = TrendSegmenterBuilder::default().unit("m").build().unwrap();
//! let result = segmenter.segment(&samples).unwrap();
//!
//! assert_eq!(result.count(Trend::Down), 1);
//! assert_eq!(result.covered_span(), Some((0, 3000)));
//! ```

pub mod builder;
pub mod config;
pub mod cumulative;
pub mod extrema;
pub mod gap_filler;
pub mod segmenter;
pub mod segments;
pub mod traits;
pub mod types;
pub mod visualization;

pub use builder::{default_segmenter, segmenter_with_thresholds, TrendSegmenterBuilder};
pub use config::{TrendParameters, DEFAULT_UNIT};
pub use cumulative::{
    CumulativeOutput, CumulativeStatisticsMapper, CumulativeTable, SampleCumulative,
    TrendAccumulator, TrendTotals,
};
pub use extrema::{ExtremaResult, ExtremumDetector};
pub use gap_filler::{verify_coverage, GapFiller};
pub use segmenter::{TrendSegmenter, MIN_SEGMENTATION_SAMPLES};
pub use segments::{Candidate, SegmentBuilder};
pub use traits::{ConfigurableSegmenter, SegmenterProperties};
pub use types::{SegmentationResult, TrendSegment};
pub use visualization::{
    NullSegmentationVisualizer, RecordingVisualizer, SegmentationVisualizer,
};
