//! Precomputed forecast tables invoked directly with the period count.

use serde::{Deserialize, Serialize};

use crate::core::{RawForecast, RawValue};
use crate::error::ModelResult;
use crate::models::{Capabilities, DirectCall};

/// Stored output of a forecast table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TableOutput {
    Scalar(f64),
    Values(Vec<RawValue>),
}

/// A forecast computed ahead of time and replayed on every call.
///
/// The table ignores the requested period count; length reconciliation
/// happens during normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastTable {
    pub output: TableOutput,
}

impl ForecastTable {
    pub fn scalar(value: f64) -> Self {
        Self {
            output: TableOutput::Scalar(value),
        }
    }

    pub fn values(values: Vec<RawValue>) -> Self {
        Self {
            output: TableOutput::Values(values),
        }
    }
}

impl DirectCall for ForecastTable {
    fn call(&self, _periods: usize) -> ModelResult<RawForecast> {
        Ok(match &self.output {
            TableOutput::Scalar(value) => RawForecast::Scalar(*value),
            TableOutput::Values(values) if values.is_empty() => RawForecast::Empty,
            TableOutput::Values(values) => RawForecast::Values(values.clone()),
        })
    }
}

impl Capabilities for ForecastTable {
    fn name(&self) -> &str {
        "ForecastTable"
    }

    fn as_direct_call(&self) -> Option<&dyn DirectCall> {
        Some(self)
    }
}
