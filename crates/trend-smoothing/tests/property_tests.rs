//! Property-based tests for filtering, window generation and smoothing

use proptest::prelude::*;
use trend_core::{values, Sample, SegmentThresholds};
use trend_smoothing::{generate_weights, AccuracyFilter, WeightedSmoother, WindowType};

fn window_type_strategy() -> impl Strategy<Value = WindowType> {
    prop_oneof![
        Just(WindowType::Triangular),
        Just(WindowType::Hanning),
        Just(WindowType::gaussian()),
        (0.05f64..2.0).prop_map(|sigma| WindowType::Gaussian { sigma: Some(sigma) }),
    ]
}

fn samples_strategy() -> impl Strategy<Value = Vec<Sample>> {
    prop::collection::vec((-500.0f64..500.0, -5.0f32..120.0), 0..150).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (v, a))| Sample::new(i, i as i64 * 1000, v, a))
            .collect()
    })
}

proptest! {
    // Property: every valid window sums to one
    #[test]
    fn prop_weights_normalized(
        half in 1usize..60,
        window_type in window_type_strategy(),
        amplitude in 0.0f64..100.0,
    ) {
        let size = 2 * half + 1;
        let thresholds = SegmentThresholds::symmetric(amplitude).unwrap();
        let weights = generate_weights(size, window_type, &thresholds).unwrap();
        let total: f64 = weights.iter().sum();
        prop_assert!((total - 1.0).abs() < 1e-9, "sum was {}", total);
        prop_assert!(weights.iter().all(|w| *w >= 0.0));
    }

    // Property: filtering twice equals filtering once
    #[test]
    fn prop_filter_idempotent(samples in samples_strategy(), ceiling in 0.1f32..100.0) {
        let filter = AccuracyFilter::new(ceiling);
        let once = filter.filter(&samples);
        let twice = filter.filter(&once);
        prop_assert_eq!(&once, &twice);
        prop_assert!(once.iter().all(|s| s.accuracy() > 0.0 && s.accuracy() <= ceiling));
    }

    // Property: a weighted average never leaves the input range
    #[test]
    fn prop_smoothing_stays_within_bounds(
        samples in samples_strategy(),
        half in 1usize..10,
        window_type in window_type_strategy(),
    ) {
        let smoother = WeightedSmoother::with_window(
            2 * half + 1,
            window_type,
            &SegmentThresholds::default(),
        ).unwrap();
        let input = values(&samples);
        let output = values(&smoother.smooth(&samples));
        prop_assert_eq!(input.len(), output.len());
        if let (Some(lo), Some(hi)) = (
            input.iter().copied().reduce(f64::min),
            input.iter().copied().reduce(f64::max),
        ) {
            for v in output {
                prop_assert!(v >= lo - 1e-9 && v <= hi + 1e-9);
            }
        }
    }
}
