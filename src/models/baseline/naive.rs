//! Naive forecasting model.
//!
//! The naive method forecasts the last observed value for all future periods.

use serde::{Deserialize, Serialize};

use crate::core::RawForecast;
use crate::error::{ModelError, ModelResult};
use crate::models::{Capabilities, CountPredict};

/// Naive forecaster that repeats the last value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Naive {
    /// Last observed value.
    pub last: f64,
}

impl Naive {
    pub fn new(last: f64) -> ModelResult<Self> {
        let model = Self { last };
        model.validate()?;
        Ok(model)
    }

    pub fn validate(&self) -> ModelResult<()> {
        if !self.last.is_finite() {
            return Err(ModelError::InvalidState(
                "last value must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

impl CountPredict for Naive {
    fn predict(&self, n_periods: usize) -> ModelResult<RawForecast> {
        Ok(RawForecast::Sequence(vec![self.last; n_periods]))
    }
}

impl Capabilities for Naive {
    fn name(&self) -> &str {
        "Naive"
    }

    fn as_count_predict(&self) -> Option<&dyn CountPredict> {
        Some(self)
    }
}
