//! Property-based tests for the core numeric helpers and value types

use proptest::prelude::*;
use trend_core::math::{nearest_odd_at_least, population_std_dev};
use trend_core::{SegmentThresholds, Trend};

proptest! {
    // Property: the rounded window is always odd and never below the floor
    #[test]
    fn prop_nearest_odd_is_odd_and_bounded(x in -100.0f64..10_000.0) {
        let odd = nearest_odd_at_least(x, 3);
        prop_assert_eq!(odd % 2, 1);
        prop_assert!(odd >= 3);
        if x > 3.0 {
            prop_assert!((odd as f64 - x).abs() <= 1.0 + 1e-9);
        }
    }

    // Property: derived thresholds are non-negative and shift invariant
    #[test]
    fn prop_derived_thresholds_shift_invariant(
        values in prop::collection::vec(-1000.0f64..1000.0, 2..200),
        shift in -500.0f64..500.0,
    ) {
        let base = SegmentThresholds::from_population_std_dev(&values, 0.2).unwrap();
        let shifted: Vec<f64> = values.iter().map(|v| v + shift).collect();
        let moved = SegmentThresholds::from_population_std_dev(&shifted, 0.2).unwrap();

        prop_assert!(base.min_ascending_amplitude >= 0.0);
        prop_assert!((base.min_ascending_amplitude - moved.min_ascending_amplitude).abs() < 1e-6);
        prop_assert!(population_std_dev(&values) >= 0.0);
    }

    // Property: classification is antisymmetric for symmetric thresholds
    #[test]
    fn prop_classification_antisymmetric(delta in -50.0f64..50.0, amplitude in 0.0f64..20.0) {
        let thresholds = SegmentThresholds::symmetric(amplitude).unwrap();
        let up = thresholds.classify_delta(delta, false);
        let down = thresholds.classify_delta(-delta, false);
        let expected = match up {
            Trend::Up => Trend::Down,
            Trend::Down => Trend::Up,
            Trend::Constant => Trend::Constant,
        };
        prop_assert_eq!(down, expected);
    }
}

#[test]
fn test_thresholds_deserialize_from_json() {
    let json = r#"{
        "min_ascending_amplitude": 1.5,
        "min_ascending_derivative": 0.0,
        "min_descending_amplitude": 2.5,
        "min_descending_derivative": 0.1
    }"#;
    let thresholds: SegmentThresholds = serde_json::from_str(json).unwrap();
    assert!(thresholds.validate().is_ok());
    assert_eq!(thresholds.max_amplitude(), 2.5);
}
