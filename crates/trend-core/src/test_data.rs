//! Synthetic tracks for tests and benchmarks
//!
//! All generators are seeded so every test run sees the same samples.

use crate::sample::Sample;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal, Uniform};

/// Standard synthetic tracks
pub struct TestTracks;

impl TestTracks {
    /// Sample interval used by the generators, in milliseconds
    pub const INTERVAL_MS: i64 = 1000;

    /// Track from explicit values, one second apart, accuracy 1.0
    pub fn from_values(values: &[f64]) -> Vec<Sample> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| Sample::new(i, i as i64 * Self::INTERVAL_MS, v, 1.0))
            .collect()
    }

    /// Strictly increasing ramp `0, step, 2*step, ...`
    pub fn ramp(len: usize, step: f64) -> Vec<Sample> {
        let values: Vec<f64> = (0..len).map(|i| i as f64 * step).collect();
        Self::from_values(&values)
    }

    /// Constant track
    pub fn flat(len: usize, value: f64) -> Vec<Sample> {
        Self::from_values(&vec![value; len])
    }

    /// Climb of `height` over `len / 2` samples followed by an equal descent
    pub fn hill(len: usize, height: f64) -> Vec<Sample> {
        let half = (len / 2).max(1) as f64;
        let values: Vec<f64> = (0..len)
            .map(|i| {
                let x = i as f64;
                if x <= half {
                    height * x / half
                } else {
                    height * (2.0 - x / half)
                }
            })
            .collect();
        Self::from_values(&values)
    }

    /// Sinusoidal altitude profile with Gaussian noise
    ///
    /// `periods` full oscillations of `amplitude` around `base`, noise with
    /// standard deviation `noise`.
    pub fn noisy_hills(
        len: usize,
        base: f64,
        amplitude: f64,
        periods: f64,
        noise: f64,
        seed: u64,
    ) -> Vec<Sample> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let noise_dist = Normal::new(0.0, noise.max(f64::MIN_POSITIVE)).unwrap();
        let accuracy = Uniform::new(2.0_f32, 12.0_f32);
        (0..len)
            .map(|i| {
                let phase = i as f64 / len.max(1) as f64 * periods * std::f64::consts::TAU;
                let value = base + amplitude * phase.sin() + noise_dist.sample(&mut rng);
                Sample::new(
                    i,
                    i as i64 * Self::INTERVAL_MS,
                    value,
                    accuracy.sample(&mut rng),
                )
            })
            .collect()
    }

    /// Noisy track where a fraction of samples report unknown or poor accuracy
    pub fn with_accuracy_dropouts(
        len: usize,
        dropout_fraction: f64,
        poor_accuracy: f32,
        seed: u64,
    ) -> Vec<Sample> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::noisy_hills(len, 200.0, 40.0, 2.0, 1.5, seed)
            .into_iter()
            .map(|s| {
                if rng.gen_bool(dropout_fraction.clamp(0.0, 1.0)) {
                    let accuracy = if rng.gen_bool(0.5) { 0.0 } else { poor_accuracy };
                    Sample::new(s.index(), s.timestamp(), s.value(), accuracy)
                } else {
                    s
                }
            })
            .collect()
    }

    /// Random walk with irregular (but non-decreasing) timestamps
    pub fn random_walk(len: usize, seed: u64) -> Vec<Sample> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let step = Normal::new(0.0, 2.0).unwrap();
        let mut t = 0_i64;
        let mut v = 100.0;
        (0..len)
            .map(|i| {
                let sample = Sample::new(i, t, v, 5.0);
                t += rng.gen_range(0..3000);
                v += step.sample(&mut rng);
                sample
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generators_are_deterministic() {
        assert_eq!(
            TestTracks::noisy_hills(50, 100.0, 10.0, 1.0, 0.5, 7),
            TestTracks::noisy_hills(50, 100.0, 10.0, 1.0, 0.5, 7)
        );
        assert_eq!(TestTracks::random_walk(20, 3), TestTracks::random_walk(20, 3));
    }

    #[test]
    fn test_random_walk_timestamps_non_decreasing() {
        let track = TestTracks::random_walk(200, 11);
        assert!(track
            .windows(2)
            .all(|w| w[0].timestamp() <= w[1].timestamp()));
    }

    #[test]
    fn test_hill_peaks_in_the_middle() {
        let track = TestTracks::hill(21, 50.0);
        let peak = track
            .iter()
            .max_by(|a, b| a.value().total_cmp(&b.value()))
            .unwrap();
        assert_eq!(peak.index(), 10);
    }
}
