//! Pipeline configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, Result};

/// Number of predicted periods when nothing else is configured.
pub const DEFAULT_PERIODS: usize = 24;

/// Size of each growth averaging window.
pub const DEFAULT_WINDOW: usize = 12;

/// Value used to pad an empty model output.
pub const DEFAULT_FILL_VALUE: f64 = 50.0;

pub const DEFAULT_MIN_DEMAND: f64 = 0.0;
pub const DEFAULT_MAX_DEMAND: f64 = 100.0;

/// Confidence reported for predictions produced by a fitted model.
pub const DEFAULT_CONFIDENCE_SCORE: f64 = 95.0;

/// Configuration for one pipeline run.
///
/// Every field has a default, so a JSON file only needs the fields it
/// overrides.
///
/// # Example
///
/// ```
/// use demand_forecast::PipelineConfig;
///
/// let config = PipelineConfig::default().with_periods(36).with_window(18);
/// assert!(config.validate().is_ok());
///
/// let config = PipelineConfig::default().with_periods(12);
/// assert!(config.validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Number of predicted periods.
    pub periods: usize,
    /// Length of each growth window; `periods` must cover two windows.
    pub window: usize,
    /// Padding value when the model produced nothing.
    pub fill_value: f64,
    /// Lower demand bound.
    pub min_demand: f64,
    /// Upper demand bound.
    pub max_demand: f64,
    /// Reported confidence score.
    pub confidence_score: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            periods: DEFAULT_PERIODS,
            window: DEFAULT_WINDOW,
            fill_value: DEFAULT_FILL_VALUE,
            min_demand: DEFAULT_MIN_DEMAND,
            max_demand: DEFAULT_MAX_DEMAND,
            confidence_score: DEFAULT_CONFIDENCE_SCORE,
        }
    }
}

impl PipelineConfig {
    /// Load a configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| ForecastError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json(&text)
    }

    /// Parse a configuration from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| ForecastError::Config(e.to_string()))
    }

    pub fn with_periods(mut self, periods: usize) -> Self {
        self.periods = periods;
        self
    }

    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    pub fn with_bounds(mut self, min_demand: f64, max_demand: f64) -> Self {
        self.min_demand = min_demand;
        self.max_demand = max_demand;
        self
    }

    pub fn with_fill_value(mut self, fill_value: f64) -> Self {
        self.fill_value = fill_value;
        self
    }

    /// Check the configuration before any model is touched.
    pub fn validate(&self) -> Result<()> {
        if self.periods == 0 {
            return Err(ForecastError::InvalidParameter(
                "periods must be positive".to_string(),
            ));
        }
        if self.window == 0 {
            return Err(ForecastError::InvalidParameter(
                "window must be positive".to_string(),
            ));
        }
        let needed = self.window.checked_mul(2).ok_or_else(|| {
            ForecastError::InvalidParameter(format!("window {} is too large", self.window))
        })?;
        if self.periods < needed {
            return Err(ForecastError::InvalidParameter(format!(
                "periods ({}) must cover two growth windows of {}",
                self.periods, self.window
            )));
        }
        if !self.min_demand.is_finite()
            || !self.max_demand.is_finite()
            || self.min_demand < 0.0
            || self.min_demand >= self.max_demand
        {
            return Err(ForecastError::InvalidParameter(format!(
                "demand bounds [{}, {}] are not a valid non-negative range",
                self.min_demand, self.max_demand
            )));
        }
        if !self.fill_value.is_finite() {
            return Err(ForecastError::InvalidParameter(
                "fill value must be finite".to_string(),
            ));
        }
        if !self.confidence_score.is_finite() {
            return Err(ForecastError::InvalidParameter(
                "confidence score must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = PipelineConfig::default();
        assert_eq!(config.periods, 24);
        assert_eq!(config.window, 12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = PipelineConfig::from_json(r#"{"periods": 36}"#).unwrap();
        assert_eq!(config.periods, 36);
        assert_eq!(config.window, 12);
        assert_eq!(config.fill_value, 50.0);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = PipelineConfig::from_json("{periods: }").unwrap_err();
        assert!(matches!(err, ForecastError::Config(_)));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = PipelineConfig::from_file("/nonexistent/demand-forecast.json").unwrap_err();
        assert!(matches!(err, ForecastError::Config(_)));
    }

    #[test]
    fn validate_rejects_bad_windows_and_bounds() {
        assert!(PipelineConfig::default().with_periods(0).validate().is_err());
        assert!(PipelineConfig::default().with_window(0).validate().is_err());
        assert!(PipelineConfig::default().with_window(13).validate().is_err());
        assert!(PipelineConfig::default()
            .with_bounds(100.0, 0.0)
            .validate()
            .is_err());
        assert!(PipelineConfig::default()
            .with_bounds(-1.0, 100.0)
            .validate()
            .is_err());
        assert!(PipelineConfig::default()
            .with_fill_value(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn oversized_window_is_rejected_without_overflow() {
        let err = PipelineConfig::default()
            .with_window(usize::MAX / 2 + 1)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ForecastError::InvalidParameter(_)));

        let err = PipelineConfig::default()
            .with_periods(usize::MAX)
            .with_window(usize::MAX)
            .validate()
            .unwrap_err();
        assert!(matches!(err, ForecastError::InvalidParameter(_)));
    }
}
