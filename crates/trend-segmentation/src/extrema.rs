//! Local extremum detection
//!
//! A discrete time-derivative of the smoothed series is reduced to signs with
//! an epsilon dead-zone. A minimum is reported where the sign turns from
//! negative to positive, a maximum where it turns from positive to negative.
//! Zero signs (flat runs) are skipped. A zero-duration gap clears the last
//! sign, so no extremum is asserted across it, and extrema alternate only
//! within a stretch of positive-duration steps.

use trend_core::math::sign_with_dead_zone;
use trend_core::{Error, Extremum, ExtremumKind, Result, Sample, DEFAULT_EPSILON};
use tracing::debug;

/// Extrema of a series together with the derivatives they were found from
#[derive(Debug, Clone, PartialEq)]
pub struct ExtremaResult {
    /// Extrema ordered by sample index
    pub extrema: Vec<Extremum>,
    /// `derivatives[k]` is the rate between samples `k` and `k + 1`
    ///
    /// `None` across a zero-duration gap.
    pub derivatives: Vec<Option<f64>>,
    /// Whether the last extremum was synthesized at the final sample
    pub synthesized_tail: bool,
}

impl ExtremaResult {
    pub fn is_empty(&self) -> bool {
        self.extrema.is_empty()
    }

    pub fn len(&self) -> usize {
        self.extrema.len()
    }
}

/// Finds local minima and maxima of a smoothed series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtremumDetector {
    epsilon: f64,
}

impl Default for ExtremumDetector {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl ExtremumDetector {
    /// Detector with a custom dead-zone
    pub fn new(epsilon: f64) -> Result<Self> {
        if !epsilon.is_finite() || epsilon < 0.0 {
            return Err(Error::InvalidArgument(format!(
                "Epsilon must be finite and non-negative, got {epsilon}"
            )));
        }
        Ok(Self { epsilon })
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Rate of change (value units per second) between consecutive samples
    ///
    /// Pairs without positive elapsed time yield `None`.
    pub fn derivatives(&self, samples: &[Sample]) -> Vec<Option<f64>> {
        samples
            .windows(2)
            .map(|pair| {
                let seconds = pair[0].seconds_until(&pair[1]);
                if seconds > 0.0 {
                    Some((pair[1].value() - pair[0].value()) / seconds)
                } else {
                    None
                }
            })
            .collect()
    }

    /// Dead-zoned signs of `derivatives`
    pub fn signs(&self, derivatives: &[Option<f64>]) -> Vec<Option<i8>> {
        derivatives
            .iter()
            .map(|d| d.map(|v| sign_with_dead_zone(v, self.epsilon)))
            .collect()
    }

    /// Locate the extrema of `samples`
    pub fn detect(&self, samples: &[Sample]) -> ExtremaResult {
        let derivatives = self.derivatives(samples);
        let signs = self.signs(&derivatives);

        let mut extrema = Vec::new();
        let mut last_sign = 0_i8;
        for (k, sign) in signs.iter().enumerate() {
            let sign = match sign {
                Some(0) => continue,
                Some(s) => *s,
                None => {
                    last_sign = 0;
                    continue;
                }
            };
            if last_sign != 0 && sign != last_sign {
                // The run with the new sign starts at sample k
                let kind = if last_sign < 0 {
                    ExtremumKind::Min
                } else {
                    ExtremumKind::Max
                };
                extrema.push(Extremum::new(k, kind));
            }
            last_sign = sign;
        }

        let synthesized_tail = synthesize_tail(&mut extrema, samples.len());
        debug!(
            count = extrema.len(),
            synthesized_tail,
            "extrema detected"
        );

        ExtremaResult {
            extrema,
            derivatives,
            synthesized_tail,
        }
    }
}

/// Close out a series whose last extremum is before the final sample
///
/// The synthesized extremum takes the opposite kind of the second-to-last
/// found extremum. This is an approximation: a turning point flattened by
/// smoothing can make it misdescribe the true shape of the tail.
fn synthesize_tail(extrema: &mut Vec<Extremum>, len: usize) -> bool {
    if extrema.len() < 2 || len == 0 {
        return false;
    }
    let last_index = len - 1;
    let last = extrema[extrema.len() - 1];
    if last.sample_index >= last_index {
        return false;
    }
    let second_to_last = extrema[extrema.len() - 2];
    extrema.push(Extremum::new(last_index, second_to_last.kind.opposite()));
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use trend_core::test_data::TestTracks;
    use trend_core::from_triples;

    #[test]
    fn test_zigzag_extrema() {
        let samples = TestTracks::from_values(&[0.0, 10.0, 5.0, 15.0]);
        let result = ExtremumDetector::default().detect(&samples);

        assert_eq!(
            &result.extrema[..2],
            &[Extremum::max(1), Extremum::min(2)]
        );
        // Tail synthesized at the final sample, opposite of the second-to-last kind
        assert!(result.synthesized_tail);
        assert_eq!(result.extrema[2], Extremum::min(3));
    }

    #[test]
    fn test_monotonic_has_no_extrema() {
        let samples = TestTracks::ramp(100, 0.5);
        let result = ExtremumDetector::default().detect(&samples);
        assert!(result.is_empty());
        assert!(!result.synthesized_tail);
    }

    #[test]
    fn test_flat_has_zero_signs() {
        let samples = TestTracks::flat(25, 88.0);
        let detector = ExtremumDetector::default();
        let result = detector.detect(&samples);

        assert!(result.is_empty());
        assert!(detector
            .signs(&result.derivatives)
            .iter()
            .all(|s| *s == Some(0)));
    }

    #[test]
    fn test_single_extremum_not_closed_out() {
        let samples = TestTracks::hill(21, 40.0);
        let result = ExtremumDetector::default().detect(&samples);
        assert_eq!(result.extrema, vec![Extremum::max(10)]);
        assert!(!result.synthesized_tail);
    }

    #[test]
    fn test_plateau_extremum_at_end_of_plateau() {
        let samples = TestTracks::from_values(&[0.0, 2.0, 2.0, 2.0, 0.0, 1.0]);
        let result = ExtremumDetector::default().detect(&samples);
        assert_eq!(result.extrema[0], Extremum::max(3));
        assert_eq!(result.extrema[1], Extremum::min(4));
        // Min@4 is before the final sample, so one is synthesized there
        assert_eq!(result.extrema.len(), 3);
        assert_eq!(result.extrema[2].sample_index, 5);
    }

    #[test]
    fn test_zero_duration_gap_is_skipped() {
        // The drop from 10 to 0 happens within the same millisecond
        let samples = from_triples(&[
            (0, 0.0, 1.0),
            (1000, 10.0, 1.0),
            (1000, 0.0, 1.0),
            (2000, 20.0, 1.0),
        ]);
        let detector = ExtremumDetector::default();
        let result = detector.detect(&samples);

        assert_eq!(result.derivatives[1], None);
        assert!(result.is_empty());
    }

    #[test]
    fn test_no_extremum_across_duplicated_timestamp() {
        // Peak at sample 1, then the value drops within the same millisecond
        let samples = from_triples(&[
            (0, 0.0, 1.0),
            (1000, 10.0, 1.0),
            (1000, 0.0, 1.0),
            (2000, -5.0, 1.0),
            (3000, -10.0, 1.0),
        ]);
        let result = ExtremumDetector::default().detect(&samples);

        assert_eq!(
            result.derivatives,
            vec![Some(10.0), None, Some(-5.0), Some(-5.0)]
        );
        assert!(result.is_empty());
        assert!(!result.synthesized_tail);
    }

    #[test]
    fn test_detection_resumes_after_zero_duration_gap() {
        let samples = from_triples(&[
            (0, 0.0, 1.0),
            (1000, 5.0, 1.0),
            (1000, 6.0, 1.0),
            (2000, 9.0, 1.0),
            (3000, 2.0, 1.0),
        ]);
        let result = ExtremumDetector::default().detect(&samples);
        assert_eq!(result.extrema, vec![Extremum::max(3)]);
    }

    #[test]
    fn test_dead_zone_suppresses_tiny_wiggles() {
        let samples = TestTracks::from_values(&[5.0, 5.0 + 1e-15, 5.0, 5.0 + 1e-15, 5.0]);
        assert!(ExtremumDetector::default().detect(&samples).is_empty());

        let loose = ExtremumDetector::new(0.0).unwrap();
        assert!(!loose.detect(&samples).is_empty());
    }

    #[test]
    fn test_rejects_bad_epsilon() {
        assert!(ExtremumDetector::new(-1.0).is_err());
        assert!(ExtremumDetector::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_extrema_alternate() {
        let samples = TestTracks::noisy_hills(500, 100.0, 25.0, 3.0, 3.0, 17);
        let result = ExtremumDetector::default().detect(&samples);
        let found = if result.synthesized_tail {
            &result.extrema[..result.len() - 1]
        } else {
            &result.extrema[..]
        };
        assert!(found.len() > 2);
        assert!(found.windows(2).all(|w| w[0].kind != w[1].kind));
        assert!(found.windows(2).all(|w| w[0].sample_index < w[1].sample_index));
    }
}
