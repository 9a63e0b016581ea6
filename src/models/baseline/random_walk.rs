//! Random walk with drift forecasting model.

use serde::{Deserialize, Serialize};

use crate::core::RawForecast;
use crate::error::{ModelError, ModelResult};
use crate::models::{Capabilities, CountPredict};

/// Random walk with drift.
///
/// Forecast: `ŷ_{t+h} = y_t + h × drift`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RandomWalkWithDrift {
    /// Last observed value.
    pub last: f64,
    /// Average change per period over the fitted sample.
    pub drift: f64,
}

impl RandomWalkWithDrift {
    pub fn new(last: f64, drift: f64) -> ModelResult<Self> {
        let model = Self { last, drift };
        model.validate()?;
        Ok(model)
    }

    pub fn validate(&self) -> ModelResult<()> {
        if !self.last.is_finite() || !self.drift.is_finite() {
            return Err(ModelError::InvalidState(
                "last value and drift must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

impl CountPredict for RandomWalkWithDrift {
    fn predict(&self, n_periods: usize) -> ModelResult<RawForecast> {
        let predictions = (1..=n_periods)
            .map(|h| self.last + (h as f64) * self.drift)
            .collect();
        Ok(RawForecast::Sequence(predictions))
    }
}

impl Capabilities for RandomWalkWithDrift {
    fn name(&self) -> &str {
        "RandomWalkWithDrift"
    }

    fn as_count_predict(&self) -> Option<&dyn CountPredict> {
        Some(self)
    }
}
