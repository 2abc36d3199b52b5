//! Pipeline parameters

use serde::{Deserialize, Serialize};
use std::path::Path;
use trend_core::{Error, Result, SegmentThresholds, DEFAULT_EPSILON, DEFAULT_STD_DEV_FACTOR};
use trend_smoothing::{validate_window_size, WindowType, DEFAULT_MAX_ACCURACY};

/// Unit attached to cumulative statistics unless configured otherwise
pub const DEFAULT_UNIT: &str = "m";

/// Parameters of a segmentation run
///
/// Missing fields take their defaults when deserialized, so a partial JSON
/// document such as `{"max_accuracy": 20.0}` is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendParameters {
    /// Samples with accuracy above this ceiling are dropped
    pub max_accuracy: f32,
    pub window_type: WindowType,
    /// Fixed window length; `None` estimates it from the data
    pub window_size: Option<usize>,
    /// Dead-zone applied to derivative signs
    pub epsilon: f64,
    /// Fixed thresholds; `None` derives them from the filtered values
    pub thresholds: Option<SegmentThresholds>,
    /// Multiplier on the population standard deviation for derived thresholds
    pub std_dev_factor: f64,
    pub unit: String,
}

impl Default for TrendParameters {
    fn default() -> Self {
        Self {
            max_accuracy: DEFAULT_MAX_ACCURACY,
            window_type: WindowType::default(),
            window_size: None,
            epsilon: DEFAULT_EPSILON,
            thresholds: None,
            std_dev_factor: DEFAULT_STD_DEV_FACTOR,
            unit: DEFAULT_UNIT.to_string(),
        }
    }
}

impl TrendParameters {
    /// Check every value; returns `InvalidArgument` on the first bad one
    pub fn validate(&self) -> Result<()> {
        if !self.max_accuracy.is_finite() || self.max_accuracy <= 0.0 {
            return Err(Error::InvalidArgument(format!(
                "Accuracy ceiling must be finite and positive, got {}",
                self.max_accuracy
            )));
        }
        if let Some(size) = self.window_size {
            validate_window_size(size)?;
        }
        if let WindowType::Gaussian { sigma: Some(sigma) } = self.window_type {
            if !sigma.is_finite() || sigma <= 0.0 {
                return Err(Error::InvalidArgument(format!(
                    "Gaussian sigma must be finite and positive, got {sigma}"
                )));
            }
        }
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(Error::InvalidArgument(format!(
                "Epsilon must be finite and non-negative, got {}",
                self.epsilon
            )));
        }
        if let Some(thresholds) = &self.thresholds {
            thresholds.validate()?;
        }
        if !self.std_dev_factor.is_finite() || self.std_dev_factor < 0.0 {
            return Err(Error::negative_threshold("std_dev_factor", self.std_dev_factor));
        }
        Ok(())
    }

    /// Parse and validate parameters from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        let params: Self = serde_json::from_str(json)?;
        params.validate().map_err(|e| Error::Config(e.to_string()))?;
        Ok(params)
    }

    /// Read, parse and validate parameters from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
