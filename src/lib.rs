//! # trend-stats
//!
//! Trend segmentation and cumulative statistics for timestamped measurements
//! such as GPS altitude tracks.
//!
//! This crate re-exports the workspace members:
//!
//! - [`core`]: sample model, value types, errors and numeric helpers
//! - [`smoothing`]: accuracy filter, adaptive window estimation, weighted smoother
//! - [`segmentation`]: extrema, segments, gap filling, cumulative statistics and the pipeline
//!
//! ## Quick Start
//!
//! ```rust
//! use trend_stats::prelude::*;
//!
//! let samples = trend_stats::core::from_triples(&[
//!     (0, 0.0, 1.0),
//!     (1000, 10.0, 1.0),
//!     (2000, 5.0, 1.0),
//!     (3000, 15.0, 1.0),
//! ]);
//! let result = TrendSegmenter::default().segment(&samples).unwrap();
//!
//! assert!(result.count(Trend::Up) >= 1);
//! assert!(result.count(Trend::Down) >= 1);
//! ```

pub use trend_core as core;
pub use trend_segmentation as segmentation;
pub use trend_smoothing as smoothing;

pub use trend_core::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use trend_core::prelude::*;
    pub use trend_segmentation::{
        CumulativeTable, SegmentationResult, SegmentationVisualizer, TrendParameters,
        TrendSegment, TrendSegmenter, TrendSegmenterBuilder, TrendTotals,
    };
    pub use trend_smoothing::{AccuracyFilter, WeightedSmoother, WindowType};
}
