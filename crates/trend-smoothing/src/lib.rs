//! Preprocessing stages for trend segmentation
//!
//! This crate provides the stages that run before extremum detection:
//!
//! - **Accuracy filtering**: drops samples with unknown or poor accuracy
//! - **Adaptive window estimation**: picks an odd window length from a lag-energy scan
//!   damped by the amplitude thresholds
//! - **Window weights**: triangular, Hanning or Gaussian, normalized to sum to one
//! - **Weighted smoothing**: centered moving average with edge renormalization
//!
//! ## Usage
//!
//! ```rust
//! use trend_core::{from_triples, SegmentThresholds};
//! use trend_smoothing::{AccuracyFilter, WeightedSmoother, WindowType};
//!
//! let samples = from_triples(&[
//!     (0, 0.0, 1.0),
//!     (1000, 10.0, 0.0),
//!     (2000, 5.0, 1.0),
//!     (3000, 15.0, 1.0),
//! ]);
//! let filtered = AccuracyFilter::default().filter(&samples);
//! assert_eq!(filtered.len(), 3);
//!
//! let thresholds = SegmentThresholds::symmetric(1.0).unwrap();
//! let smoother =
//!     WeightedSmoother::adaptive(&filtered, WindowType::Triangular, &thresholds).unwrap();
//! let smoothed = smoother.smooth(&filtered);
//! assert_eq!(smoothed.len(), filtered.len());
//! ```

pub mod filter;
pub mod smoother;
pub mod window;

pub use filter::{AccuracyFilter, DEFAULT_MAX_ACCURACY};
pub use smoother::WeightedSmoother;
pub use window::{
    damping_factor, default_gaussian_sigma, generate_weights, validate_window_size,
    WindowSizeEstimator, WindowType, MIN_WINDOW_SIZE,
};
