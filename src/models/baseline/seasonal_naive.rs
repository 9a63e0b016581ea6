//! Seasonal naive forecasting model.

use serde::{Deserialize, Serialize};

use crate::core::RawForecast;
use crate::error::{ModelError, ModelResult};
use crate::models::{Capabilities, CountPredict};

/// Seasonal naive forecaster that repeats the last full season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalNaive {
    /// Last observed season, oldest first. Its length is the period.
    pub season: Vec<f64>,
}

impl SeasonalNaive {
    pub fn new(season: Vec<f64>) -> ModelResult<Self> {
        let model = Self { season };
        model.validate()?;
        Ok(model)
    }

    /// Seasonal period.
    pub fn period(&self) -> usize {
        self.season.len()
    }

    pub fn validate(&self) -> ModelResult<()> {
        if self.season.is_empty() {
            return Err(ModelError::InvalidState(
                "season must not be empty".to_string(),
            ));
        }
        if self.season.iter().any(|x| !x.is_finite()) {
            return Err(ModelError::InvalidState(
                "season contains non-finite values".to_string(),
            ));
        }
        Ok(())
    }
}

impl CountPredict for SeasonalNaive {
    fn predict(&self, n_periods: usize) -> ModelResult<RawForecast> {
        if self.season.is_empty() {
            return Err(ModelError::InvalidState(
                "season must not be empty".to_string(),
            ));
        }
        let predictions = self.season.iter().copied().cycle().take(n_periods).collect();
        Ok(RawForecast::Sequence(predictions))
    }
}

impl Capabilities for SeasonalNaive {
    fn name(&self) -> &str {
        "SeasonalNaive"
    }

    fn as_count_predict(&self) -> Option<&dyn CountPredict> {
        Some(self)
    }
}
