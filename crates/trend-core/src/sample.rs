//! The scalar sample model
//!
//! A [`Sample`] is one timestamped measurement (altitude, speed, ...) together
//! with the accuracy the device reported for it. Samples are immutable: every
//! stage that changes a value builds a new sample with [`Sample::with_value`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// One timestamped scalar measurement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    index: usize,
    timestamp: i64,
    value: f64,
    accuracy: f32,
}

impl Sample {
    /// Create a new sample
    ///
    /// `timestamp` is in milliseconds. An `accuracy` of zero or below means the
    /// device did not report one.
    pub fn new(index: usize, timestamp: i64, value: f64, accuracy: f32) -> Self {
        Self {
            index,
            timestamp,
            value,
            accuracy,
        }
    }

    /// Position of the sample in the original ingested track
    pub fn index(&self) -> usize {
        self.index
    }

    /// Timestamp in milliseconds
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn accuracy(&self) -> f32 {
        self.accuracy
    }

    /// Whether the device reported an accuracy for this sample
    pub fn has_known_accuracy(&self) -> bool {
        self.accuracy > 0.0
    }

    /// Copy of this sample carrying a different value
    pub fn with_value(&self, value: f64) -> Self {
        Self { value, ..*self }
    }

    /// Seconds elapsed from `self` to `later`
    pub fn seconds_until(&self, later: &Sample) -> f64 {
        (later.timestamp - self.timestamp) as f64 / 1000.0
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sample {{ index: {}, t: {}ms, value: {:.3}, accuracy: {:.1} }}",
            self.index, self.timestamp, self.value, self.accuracy
        )
    }
}

/// Extract the values of a sample slice
pub fn values(samples: &[Sample]) -> Vec<f64> {
    samples.iter().map(Sample::value).collect()
}

/// Build samples from `(timestamp, value, accuracy)` triples, numbering them in order
pub fn from_triples(triples: &[(i64, f64, f32)]) -> Vec<Sample> {
    triples
        .iter()
        .enumerate()
        .map(|(i, &(t, v, a))| Sample::new(i, t, v, a))
        .collect()
}
