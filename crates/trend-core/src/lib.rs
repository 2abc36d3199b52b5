//! Core sample model and value types for trend segmentation
//!
//! This crate holds everything the pipeline stages share: the immutable
//! [`Sample`], the trend/segment/statistics value types, the unified
//! [`Error`], a handful of numeric helpers and the [`SeriesStage`] trait that
//! filtering and smoothing stages implement.
//!
//! # Example
//!
//! ```rust
//! use trend_core::{Sample, SegmentThresholds, Trend};
//!
//! let samples = vec![
//!     Sample::new(0, 0, 0.0, 1.0),
//!     Sample::new(1, 1000, 10.0, 1.0),
//!     Sample::new(2, 2000, 5.0, 1.0),
//! ];
//! let values = trend_core::values(&samples);
//! let thresholds = SegmentThresholds::from_population_std_dev(&values, 0.2).unwrap();
//! assert_eq!(thresholds.classify_delta(10.0, false), Trend::Up);
//! ```

pub mod error;
pub mod math;
pub mod sample;
pub mod traits;
pub mod types;

#[cfg(feature = "test-utils")]
pub mod test_data;

// Re-export core types
pub use error::{Error, Result};
pub use math::DEFAULT_EPSILON;
pub use sample::{from_triples, values, Sample};
pub use traits::{apply_stages, SeriesStage, StageProperties};
pub use types::{
    CumulativeProcessedDataType, CumulativeStatistics, Extremum, ExtremumKind, Segment,
    SegmentThresholds, Trend, TrendStatistics, DEFAULT_STD_DEV_FACTOR,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::{
        CumulativeProcessedDataType, CumulativeStatistics, Extremum, ExtremumKind, Result,
        Sample, Segment, SegmentThresholds, SeriesStage, StageProperties, Trend,
        TrendStatistics,
    };
}
