//! Adaptive window estimation and window weights
//!
//! The window length is chosen from the data: a lag-energy scan looks for the
//! scale at which samples differ the most (a coarse proxy for the dominant
//! oscillation period), and the result is damped for series whose significant
//! amplitude changes are large so real swings are not smoothed away.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use trend_core::math::{lag_energy, nearest_odd_at_least, population_variance};
use trend_core::{Error, Result, SegmentThresholds};
use tracing::debug;

/// Smallest usable window
pub const MIN_WINDOW_SIZE: usize = 3;

/// Shape of the smoothing window
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WindowType {
    /// `1 - |n - c| / c`
    #[default]
    Triangular,
    /// `0.5 - 0.5 cos(2πn / (size - 1))`
    Hanning,
    /// `exp(-0.5 ((n - c) / (sigma c))^2)`; `sigma` defaults to `0.4 + 0.1 size / 25`
    Gaussian {
        #[serde(default)]
        sigma: Option<f64>,
    },
}

impl WindowType {
    /// Gaussian window with the size-dependent default sigma
    pub fn gaussian() -> Self {
        WindowType::Gaussian { sigma: None }
    }

    pub fn name(&self) -> &'static str {
        match self {
            WindowType::Triangular => "triangular",
            WindowType::Hanning => "hanning",
            WindowType::Gaussian { .. } => "gaussian",
        }
    }

    /// Raw (unnormalized) weight of tap `n` in a window of `size`
    fn raw_weight(&self, n: usize, size: usize) -> f64 {
        let center = (size - 1) as f64 / 2.0;
        let x = n as f64;
        match *self {
            WindowType::Triangular => 1.0 - (x - center).abs() / center,
            WindowType::Hanning => 0.5 - 0.5 * (2.0 * PI * x / (size - 1) as f64).cos(),
            WindowType::Gaussian { sigma } => {
                let sigma = sigma.unwrap_or_else(|| default_gaussian_sigma(size));
                let z = (x - center) / (sigma * center);
                (-0.5 * z * z).exp()
            }
        }
    }
}

/// Default Gaussian sigma for a window of `size`
pub fn default_gaussian_sigma(size: usize) -> f64 {
    0.4 + 0.1 * (size as f64 / 25.0)
}

/// `1 / (1 + max(minAscAmp, minDescAmp))`
pub fn damping_factor(thresholds: &SegmentThresholds) -> f64 {
    1.0 / (1.0 + thresholds.max_amplitude())
}

/// Check that `size` is a usable window length
pub fn validate_window_size(size: usize) -> Result<()> {
    if size < MIN_WINDOW_SIZE {
        return Err(Error::window_too_small(size));
    }
    if size % 2 == 0 {
        return Err(Error::even_window(size));
    }
    Ok(())
}

/// Generate `size` window weights summing to one
///
/// The weights are scaled by the amplitude damping factor before being
/// renormalized.
pub fn generate_weights(
    size: usize,
    window_type: WindowType,
    thresholds: &SegmentThresholds,
) -> Result<Vec<f64>> {
    validate_window_size(size)?;
    if let WindowType::Gaussian { sigma: Some(sigma) } = window_type {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(Error::InvalidArgument(format!(
                "Gaussian sigma must be finite and positive, got {sigma}"
            )));
        }
    }

    let damping = damping_factor(thresholds);
    let mut weights: Vec<f64> = (0..size)
        .map(|n| window_type.raw_weight(n, size).max(0.0) * damping)
        .collect();

    let total: f64 = weights.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return Err(Error::Computation(format!(
            "{} window of size {size} has no positive weight",
            window_type.name()
        )));
    }
    weights.iter_mut().for_each(|w| *w /= total);
    Ok(weights)
}

/// Chooses the smoothing window length from the data
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSizeEstimator {
    min_window: usize,
}

impl Default for WindowSizeEstimator {
    fn default() -> Self {
        Self {
            min_window: MIN_WINDOW_SIZE,
        }
    }
}

impl WindowSizeEstimator {
    /// Estimator with a custom lower bound (rounded up to an odd value, at least 3)
    pub fn with_min_window(min_window: usize) -> Self {
        let min_window = min_window.max(MIN_WINDOW_SIZE) | 1;
        Self { min_window }
    }

    pub fn min_window(&self) -> usize {
        self.min_window
    }

    /// Mean squared difference for every scale `1..=N/2`; entry `s - 1` holds scale `s`
    pub fn lag_energies(&self, values: &[f64]) -> Vec<f64> {
        (1..=values.len() / 2)
            .filter_map(|lag| lag_energy(values, lag))
            .collect()
    }

    /// Scale with the maximum lag energy, bounded below by the minimum window
    ///
    /// The search starts at scale 2; ties keep the first scale found.
    pub fn dominant_lag(&self, values: &[f64]) -> usize {
        let energies = self.lag_energies(values);
        let mut best_lag = self.min_window;
        let mut best_energy = f64::NEG_INFINITY;
        for (offset, &energy) in energies.iter().enumerate().skip(1) {
            if energy > best_energy {
                best_energy = energy;
                best_lag = offset + 1;
            }
        }
        best_lag.max(self.min_window)
    }

    /// Odd window length for `values`
    pub fn estimate(&self, values: &[f64], thresholds: &SegmentThresholds) -> usize {
        if values.len() < 4 || population_variance(values) == 0.0 {
            debug!(
                len = values.len(),
                window = self.min_window,
                "degenerate series, minimum window"
            );
            return self.min_window;
        }
        let lag = self.dominant_lag(values);
        let damped = lag as f64 * damping_factor(thresholds);
        let window = nearest_odd_at_least(damped, self.min_window);
        debug!(lag, damped, window, "window size estimated");
        window
    }

    /// Window length for `values`, failing when there is too little data to scan
    pub fn try_estimate(&self, values: &[f64], thresholds: &SegmentThresholds) -> Result<usize> {
        if values.len() < MIN_WINDOW_SIZE {
            return Err(Error::InsufficientData {
                expected: MIN_WINDOW_SIZE,
                actual: values.len(),
            });
        }
        Ok(self.estimate(values, thresholds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn no_thresholds() -> SegmentThresholds {
        SegmentThresholds::default()
    }

    #[test]
    fn test_rejects_even_and_short_windows() {
        for size in [0, 1, 2] {
            assert!(matches!(
                generate_weights(size, WindowType::Triangular, &no_thresholds()),
                Err(Error::InvalidArgument(_))
            ));
        }
        assert!(generate_weights(4, WindowType::Hanning, &no_thresholds()).is_err());
        assert!(generate_weights(10, WindowType::gaussian(), &no_thresholds()).is_err());
    }

    #[test]
    fn test_triangular_shape() {
        let weights = generate_weights(5, WindowType::Triangular, &no_thresholds()).unwrap();
        // Raw weights 0, 0.5, 1, 0.5, 0
        assert_relative_eq!(weights[0], 0.0);
        assert_relative_eq!(weights[1], 0.25);
        assert_relative_eq!(weights[2], 0.5);
        assert_relative_eq!(weights[3], 0.25);
    }

    #[test]
    fn test_hanning_is_symmetric() {
        let weights = generate_weights(7, WindowType::Hanning, &no_thresholds()).unwrap();
        for i in 0..3 {
            assert_relative_eq!(weights[i], weights[6 - i], epsilon = 1e-12);
        }
        assert!(weights[3] > weights[2]);
    }

    #[test]
    fn test_gaussian_default_and_custom_sigma() {
        assert_relative_eq!(default_gaussian_sigma(25), 0.5);
        let narrow =
            generate_weights(9, WindowType::Gaussian { sigma: Some(0.2) }, &no_thresholds())
                .unwrap();
        let wide = generate_weights(9, WindowType::gaussian(), &no_thresholds()).unwrap();
        assert!(narrow[4] > wide[4]);
        assert!(
            generate_weights(9, WindowType::Gaussian { sigma: Some(0.0) }, &no_thresholds())
                .is_err()
        );
    }

    #[test]
    fn test_weights_sum_to_one_with_damping() {
        let thresholds = SegmentThresholds::symmetric(12.5).unwrap();
        for window_type in [WindowType::Triangular, WindowType::Hanning, WindowType::gaussian()] {
            for size in (3..41).step_by(2) {
                let weights = generate_weights(size, window_type, &thresholds).unwrap();
                assert_eq!(weights.len(), size);
                assert_relative_eq!(weights.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_dominant_lag_on_short_series() {
        let estimator = WindowSizeEstimator::default();
        // Scale 1 has the most energy but the search starts at scale 2
        assert_eq!(estimator.dominant_lag(&[0.0, 10.0, 5.0, 15.0]), 3);
        assert_eq!(estimator.dominant_lag(&[1.0, 2.0]), 3);
    }

    #[test]
    fn test_estimate_ramp() {
        // Lag energy of a ramp grows with the lag, so the largest scale wins
        let values: Vec<f64> = (0..100).map(|i| i as f64).collect();
        let estimator = WindowSizeEstimator::default();
        assert_eq!(estimator.dominant_lag(&values), 50);

        let thresholds = SegmentThresholds::from_population_std_dev(&values, 0.2).unwrap();
        let window = estimator.estimate(&values, &thresholds);
        assert_eq!(window, 7);
        assert_eq!(estimator.estimate(&values, &no_thresholds()), 51);
    }

    #[test]
    fn test_estimate_flat_and_short() {
        let estimator = WindowSizeEstimator::default();
        assert_eq!(estimator.estimate(&[4.0; 50], &no_thresholds()), 3);
        assert_eq!(estimator.estimate(&[1.0, 2.0], &no_thresholds()), 3);
        assert!(matches!(
            estimator.try_estimate(&[1.0, 2.0], &no_thresholds()),
            Err(Error::InsufficientData { expected: 3, actual: 2 })
        ));
    }

    #[test]
    fn test_min_window_is_odd() {
        assert_eq!(WindowSizeEstimator::with_min_window(4).min_window(), 5);
        assert_eq!(WindowSizeEstimator::with_min_window(1).min_window(), 3);
        assert_eq!(WindowSizeEstimator::with_min_window(7).min_window(), 7);
    }
}
