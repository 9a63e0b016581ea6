//! Holt's Linear Trend fitted state.
//!
//! Also known as double exponential smoothing; suitable for data with a
//! linear trend but no seasonality.

use serde::{Deserialize, Serialize};

use crate::core::{Forecast, RawForecast};
use crate::error::{ModelError, ModelResult};
use crate::models::{Capabilities, StepForecast};

/// Holt's Linear Trend forecaster, already fitted.
///
/// - Forecast: `ŷ_{t+h} = l_t + h × b_t`
/// - Damped: `ŷ_{t+h} = l_t + (φ + φ² + ... + φ^h) × b_t`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoltLinearTrend {
    /// Final level state.
    pub level: f64,
    /// Final trend state.
    pub trend: f64,
    /// Damping parameter (0 < phi <= 1). None means no damping.
    #[serde(default)]
    pub phi: Option<f64>,
}

impl HoltLinearTrend {
    pub fn new(level: f64, trend: f64) -> ModelResult<Self> {
        let model = Self {
            level,
            trend,
            phi: None,
        };
        model.validate()?;
        Ok(model)
    }

    pub fn damped(level: f64, trend: f64, phi: f64) -> ModelResult<Self> {
        let model = Self {
            level,
            trend,
            phi: Some(phi),
        };
        model.validate()?;
        Ok(model)
    }

    pub fn validate(&self) -> ModelResult<()> {
        if !self.level.is_finite() || !self.trend.is_finite() {
            return Err(ModelError::InvalidState(
                "level and trend must be finite".to_string(),
            ));
        }
        if let Some(phi) = self.phi {
            if !(phi > 0.0 && phi <= 1.0) {
                return Err(ModelError::InvalidState(format!(
                    "damping parameter must be in (0, 1], got {phi}"
                )));
            }
        }
        Ok(())
    }

    /// φ + φ² + ... + φ^h
    fn damped_sum(phi: f64, h: usize) -> f64 {
        if (phi - 1.0).abs() < 1e-10 {
            h as f64
        } else {
            phi * (1.0 - phi.powi(h as i32)) / (1.0 - phi)
        }
    }
}

impl StepForecast for HoltLinearTrend {
    fn forecast(&self, steps: usize) -> ModelResult<RawForecast> {
        let phi = self.phi.unwrap_or(1.0);
        let predictions = (1..=steps)
            .map(|h| self.level + Self::damped_sum(phi, h) * self.trend)
            .collect();
        Ok(RawForecast::Series(Forecast::from_values(predictions)))
    }
}

impl Capabilities for HoltLinearTrend {
    fn name(&self) -> &str {
        if self.phi.is_some() {
            "DampedHolt"
        } else {
            "Holt"
        }
    }

    fn as_step_forecast(&self) -> Option<&dyn StepForecast> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn values(raw: RawForecast) -> Vec<f64> {
        match raw {
            RawForecast::Series(forecast) => forecast.into_values(),
            other => panic!("expected series, got {other:?}"),
        }
    }

    #[test]
    fn holt_extrapolates_trend() {
        let model = HoltLinearTrend::new(50.0, 1.5).unwrap();
        assert_eq!(values(model.forecast(3).unwrap()), vec![51.5, 53.0, 54.5]);
        assert_eq!(model.name(), "Holt");
    }

    #[test]
    fn damping_flattens_the_trend() {
        let model = HoltLinearTrend::damped(50.0, 2.0, 0.5).unwrap();
        let v = values(model.forecast(3).unwrap());
        assert_relative_eq!(v[0], 51.0, epsilon = 1e-12);
        assert_relative_eq!(v[1], 51.5, epsilon = 1e-12);
        assert_relative_eq!(v[2], 51.75, epsilon = 1e-12);
        assert_eq!(model.name(), "DampedHolt");
    }

    #[test]
    fn damping_outside_unit_interval_is_rejected() {
        assert!(HoltLinearTrend::damped(50.0, 2.0, 1.2).is_err());
        assert!(HoltLinearTrend::damped(50.0, 2.0, 0.0).is_err());
        assert!(HoltLinearTrend::new(f64::NAN, 0.0).is_err());
    }
}
