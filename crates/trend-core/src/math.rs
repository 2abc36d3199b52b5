//! Numeric helpers shared across the segmentation crates

/// Default dead-zone for derivative signs
///
/// Looser than float rounding error so that flat runs register as zero.
pub const DEFAULT_EPSILON: f64 = 1e-12;

/// Population variance (divides by `n`); zero for fewer than two values
pub fn population_variance(values: &[f64]) -> f64 {
    use statrs::statistics::Statistics;

    if values.len() < 2 {
        return 0.0;
    }
    values.iter().population_variance()
}

/// Population standard deviation (divides by `n`); zero for fewer than two values
pub fn population_std_dev(values: &[f64]) -> f64 {
    population_variance(values).sqrt()
}

/// Mean squared difference between values `lag` positions apart
///
/// Returns `None` when the lag leaves no pairs.
pub fn lag_energy(values: &[f64], lag: usize) -> Option<f64> {
    if lag == 0 || lag >= values.len() {
        return None;
    }
    let pairs = values.len() - lag;
    let sum: f64 = values
        .iter()
        .zip(&values[lag..])
        .map(|(a, b)| (a - b) * (a - b))
        .sum();
    Some(sum / pairs as f64)
}

/// Sign of `value` with a dead-zone: `|value| <= epsilon` maps to 0
pub fn sign_with_dead_zone(value: f64, epsilon: f64) -> i8 {
    if value.abs() <= epsilon {
        0
    } else if value > 0.0 {
        1
    } else {
        -1
    }
}

/// Nearest odd integer to `x`, bounded below by `min_odd`
///
/// Non-finite input yields `min_odd`.
pub fn nearest_odd_at_least(x: f64, min_odd: usize) -> usize {
    if !x.is_finite() || x <= min_odd as f64 {
        return min_odd;
    }
    // Odd numbers are 2k + 1; pick the closest k
    let k = ((x - 1.0) / 2.0).round() as usize;
    (2 * k + 1).max(min_odd)
}
