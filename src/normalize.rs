//! Conversion of raw model output into a fixed-length bounded sequence.
//!
//! Normalization runs in three passes:
//! 1. coerce the raw output into an ordered sequence of reals
//! 2. pad with the last value (or the fill value) / truncate to `periods`
//! 3. clamp `|x|` into the demand bounds
//!
//! Negative forecasts are folded onto their magnitude rather than rejected.
//! Demand is a percentage-like index, so this lossy policy is intentional.

use tracing::debug;

use crate::config::{PipelineConfig, DEFAULT_FILL_VALUE, DEFAULT_MAX_DEMAND, DEFAULT_MIN_DEMAND};
use crate::core::RawForecast;
use crate::error::{ForecastError, Result};

/// A sequence of exactly `periods` demand values inside the demand bounds.
///
/// Only [`Normalizer::normalize`] constructs it.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedForecast {
    values: Vec<f64>,
}

impl NormalizedForecast {
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.values
    }
}

/// Normalizes raw model output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalizer {
    periods: usize,
    fill_value: f64,
    min_demand: f64,
    max_demand: f64,
}

impl Normalizer {
    /// Create a normalizer with the default fill value and `[0, 100]` bounds.
    pub fn new(periods: usize) -> Self {
        Self {
            periods,
            fill_value: DEFAULT_FILL_VALUE,
            min_demand: DEFAULT_MIN_DEMAND,
            max_demand: DEFAULT_MAX_DEMAND,
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            periods: config.periods,
            fill_value: config.fill_value,
            min_demand: config.min_demand,
            max_demand: config.max_demand,
        }
    }

    pub fn periods(&self) -> usize {
        self.periods
    }

    /// Run all three normalization passes.
    pub fn normalize(&self, raw: RawForecast) -> Result<NormalizedForecast> {
        if self.periods == 0 {
            return Err(ForecastError::InvalidParameter(
                "periods must be positive".to_string(),
            ));
        }

        let shape = raw.shape();
        let mut values = coerce(raw, self.periods)?;
        let produced = values.len();
        reconcile_length(&mut values, self.periods, self.fill_value);

        let folded = values.iter().filter(|x| x.is_sign_negative()).count();
        for value in &mut values {
            *value = clamp_demand(*value, self.min_demand, self.max_demand);
        }

        debug!(
            shape,
            produced,
            periods = self.periods,
            folded,
            "normalized model output"
        );
        Ok(NormalizedForecast { values })
    }
}

/// Coerce raw output into an ordered sequence of reals.
///
/// A scalar is broadcast to `periods` copies. Any element without a real
/// value (null, non-numeric text, NaN) fails the whole conversion.
pub fn coerce(raw: RawForecast, periods: usize) -> Result<Vec<f64>> {
    let values = match raw {
        RawForecast::Scalar(value) => vec![value; periods],
        RawForecast::Sequence(values) => values,
        RawForecast::Series(forecast) => forecast.into_values(),
        RawForecast::Values(values) => values
            .iter()
            .enumerate()
            .map(|(idx, value)| {
                value.to_f64().ok_or_else(|| {
                    ForecastError::NormalizationFailure(format!(
                        "element {idx} ({value:?}) is not a real number"
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?,
        RawForecast::Empty => Vec::new(),
    };

    if let Some(idx) = values.iter().position(|x| x.is_nan()) {
        return Err(ForecastError::NormalizationFailure(format!(
            "element {idx} is NaN"
        )));
    }
    Ok(values)
}

/// Pad with the last value (or `fill_value` when empty), or truncate, so
/// that `values.len() == periods`.
pub fn reconcile_length(values: &mut Vec<f64>, periods: usize, fill_value: f64) {
    if values.len() < periods {
        let last = values.last().copied().unwrap_or(fill_value);
        values.resize(periods, last);
    } else {
        values.truncate(periods);
    }
}

/// Fold negatives onto their magnitude, then clamp into `[min, max]`.
pub fn clamp_demand(value: f64, min: f64, max: f64) -> f64 {
    value.abs().max(min).min(max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Forecast, RawValue};

    #[test]
    fn scalar_is_broadcast() {
        let normalized = Normalizer::new(24)
            .normalize(RawForecast::Scalar(42.5))
            .unwrap();
        assert_eq!(normalized.as_slice(), &[42.5; 24]);
    }

    #[test]
    fn short_output_is_padded_with_last_value() {
        let normalized = Normalizer::new(24)
            .normalize(RawForecast::Sequence(vec![7.0; 10]))
            .unwrap();
        assert_eq!(normalized.len(), 24);
        assert!(normalized.as_slice()[10..].iter().all(|&x| x == 7.0));
    }

    #[test]
    fn long_output_is_truncated() {
        let raw: Vec<f64> = (0..30).map(|i| i as f64).collect();
        let normalized = Normalizer::new(24)
            .normalize(RawForecast::Sequence(raw.clone()))
            .unwrap();
        assert_eq!(normalized.as_slice(), &raw[..24]);
    }

    #[test]
    fn empty_output_is_filled() {
        let normalized = Normalizer::new(24).normalize(RawForecast::Empty).unwrap();
        assert_eq!(normalized.as_slice(), &[50.0; 24]);

        let normalized = Normalizer::new(24)
            .normalize(RawForecast::Sequence(vec![]))
            .unwrap();
        assert_eq!(normalized.as_slice(), &[50.0; 24]);
    }

    #[test]
    fn values_are_folded_and_clamped() {
        let mut raw = vec![-5.0, 200.0];
        raw.extend(std::iter::repeat(50.0).take(22));
        let normalized = Normalizer::new(24)
            .normalize(RawForecast::Series(Forecast::from_values(raw)))
            .unwrap();
        assert_eq!(&normalized.as_slice()[..3], &[5.0, 100.0, 50.0]);
    }

    #[test]
    fn infinite_values_clamp_to_the_upper_bound() {
        assert_eq!(clamp_demand(f64::INFINITY, 0.0, 100.0), 100.0);
        assert_eq!(clamp_demand(f64::NEG_INFINITY, 0.0, 100.0), 100.0);
        assert_eq!(clamp_demand(-0.0, 0.0, 100.0), 0.0);
    }

    #[test]
    fn loosely_typed_values_are_coerced() {
        let raw = RawForecast::Values(vec![
            RawValue::Number(10.0),
            RawValue::Text("20.5".to_string()),
            RawValue::Bool(true),
        ]);
        let normalized = Normalizer::new(4).normalize(raw).unwrap();
        assert_eq!(normalized.as_slice(), &[10.0, 20.5, 1.0, 1.0]);
    }

    #[test]
    fn non_numeric_elements_fail() {
        let raw = RawForecast::Values(vec![RawValue::Number(10.0), RawValue::Null]);
        let err = Normalizer::new(24).normalize(raw).unwrap_err();
        assert!(matches!(err, ForecastError::NormalizationFailure(_)));

        let raw = RawForecast::Values(vec![RawValue::Text("rising".to_string())]);
        assert!(Normalizer::new(24).normalize(raw).is_err());
    }

    #[test]
    fn nan_fails_in_every_shape() {
        assert!(Normalizer::new(24)
            .normalize(RawForecast::Scalar(f64::NAN))
            .is_err());
        assert!(Normalizer::new(24)
            .normalize(RawForecast::Sequence(vec![1.0, f64::NAN]))
            .is_err());
    }

    #[test]
    fn zero_periods_is_rejected() {
        let err = Normalizer::new(0)
            .normalize(RawForecast::Scalar(1.0))
            .unwrap_err();
        assert!(matches!(err, ForecastError::InvalidParameter(_)));
    }

    #[test]
    fn custom_bounds_apply() {
        let config = PipelineConfig::default().with_bounds(10.0, 60.0);
        let normalized = Normalizer::from_config(&config)
            .normalize(RawForecast::Sequence(vec![5.0, 70.0, -30.0]))
            .unwrap();
        assert_eq!(&normalized.as_slice()[..3], &[10.0, 60.0, 30.0]);
    }
}
