//! Raw model output, before normalization.

use serde::{Deserialize, Serialize};

use super::Forecast;

/// Whatever a model's extraction method hands back.
///
/// The set of shapes is closed; the normalizer matches on it exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum RawForecast {
    /// A single value, broadcast to every period.
    Scalar(f64),
    /// An ordered sequence of values.
    Sequence(Vec<f64>),
    /// A forecast wrapper converted through [`Forecast::into_values`].
    Series(Forecast),
    /// Loosely typed elements that still need numeric coercion.
    Values(Vec<RawValue>),
    /// The model produced nothing.
    Empty,
}

impl RawForecast {
    /// Short shape name used in log events.
    pub fn shape(&self) -> &'static str {
        match self {
            RawForecast::Scalar(_) => "scalar",
            RawForecast::Sequence(_) => "sequence",
            RawForecast::Series(_) => "series",
            RawForecast::Values(_) => "values",
            RawForecast::Empty => "empty",
        }
    }
}

impl From<f64> for RawForecast {
    fn from(value: f64) -> Self {
        RawForecast::Scalar(value)
    }
}

impl From<Vec<f64>> for RawForecast {
    fn from(values: Vec<f64>) -> Self {
        RawForecast::Sequence(values)
    }
}

impl From<Forecast> for RawForecast {
    fn from(forecast: Forecast) -> Self {
        RawForecast::Series(forecast)
    }
}

/// A single loosely typed output element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl RawValue {
    /// Coerce to a real number.
    ///
    /// Numeric text is parsed, booleans map to `1.0`/`0.0`. Null, non-numeric
    /// text and NaN have no real value.
    pub fn to_f64(&self) -> Option<f64> {
        let value = match self {
            RawValue::Null => return None,
            RawValue::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            RawValue::Number(x) => *x,
            RawValue::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        (!value.is_nan()).then_some(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}
