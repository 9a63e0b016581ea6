//! Fitted ARIMA states and the three model shapes built on them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{Forecast, RawForecast};
use crate::error::{ModelError, ModelResult};
use crate::models::arima::diff::{difference, integrate};
use crate::models::{Capabilities, CountPredict, FittedResults, StepForecast};

/// ARIMA model order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArimaOrder {
    /// AR order (p)
    pub p: usize,
    /// Differencing order (d)
    pub d: usize,
    /// MA order (q)
    pub q: usize,
}

impl ArimaOrder {
    pub fn new(p: usize, d: usize, q: usize) -> Self {
        Self { p, d, q }
    }
}

impl Default for ArimaOrder {
    fn default() -> Self {
        Self::new(1, 1, 1)
    }
}

impl fmt::Display for ArimaOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.p, self.d, self.q)
    }
}

/// State of an already fitted ARIMA(p, d, q) model.
///
/// `history` is the tail of the observed series on the original scale and
/// must hold more than `d` points. `residuals` is the tail of in-sample
/// residuals on the differenced scale, most recent last; missing lags count
/// as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArimaState {
    pub order: ArimaOrder,
    #[serde(default)]
    pub ar: Vec<f64>,
    #[serde(default)]
    pub ma: Vec<f64>,
    /// Mean of the differenced series.
    #[serde(default)]
    pub intercept: f64,
    pub history: Vec<f64>,
    #[serde(default)]
    pub residuals: Vec<f64>,
}

impl ArimaState {
    /// Check that the coefficients and history agree with the order.
    pub fn validate(&self) -> ModelResult<()> {
        let ArimaOrder { p, d, q } = self.order;
        if self.ar.len() != p {
            return Err(ModelError::InvalidState(format!(
                "expected {p} AR coefficients, got {}",
                self.ar.len()
            )));
        }
        if self.ma.len() != q {
            return Err(ModelError::InvalidState(format!(
                "expected {q} MA coefficients, got {}",
                self.ma.len()
            )));
        }
        if self.history.len() <= d {
            return Err(ModelError::InvalidState(format!(
                "differencing order {d} needs at least {} observations, got {}",
                d + 1,
                self.history.len()
            )));
        }
        let all_finite = std::iter::once(&self.intercept)
            .chain(&self.ar)
            .chain(&self.ma)
            .chain(&self.history)
            .chain(&self.residuals)
            .all(|x| x.is_finite());
        if !all_finite {
            return Err(ModelError::InvalidState(
                "state contains non-finite values".to_string(),
            ));
        }
        Ok(())
    }

    /// Project the state `horizon` steps forward on the original scale.
    ///
    /// Fails with `InvalidState` if the state disagrees with its order.
    pub fn project(&self, horizon: usize) -> ModelResult<Vec<f64>> {
        self.validate()?;
        if horizon == 0 {
            return Ok(Vec::new());
        }

        let ArimaOrder { p, d, q } = self.order;
        let diff_series = difference(&self.history, d);
        let n = diff_series.len();
        let mut extended = diff_series;

        for step in 0..horizon {
            let t = extended.len();
            let mut pred = self.intercept;

            for i in 0..p {
                if t > i {
                    pred += self.ar[i] * (extended[t - 1 - i] - self.intercept);
                }
            }

            // Future shocks are zero; only lags reaching back into the
            // sample pick up stored residuals.
            for i in 0..q {
                if i >= step {
                    pred += self.ma[i] * self.residual_lag(i - step);
                }
            }

            if !pred.is_finite() {
                return Err(ModelError::Computation(format!(
                    "forecast diverged at step {}",
                    step + 1
                )));
            }
            extended.push(pred);
        }

        Ok(integrate(&extended[n..], &self.history, d))
    }

    /// Residual `lag` steps before the end of the sample (0 = most recent).
    fn residual_lag(&self, lag: usize) -> f64 {
        self.residuals
            .len()
            .checked_sub(lag + 1)
            .map(|idx| self.residuals[idx])
            .unwrap_or(0.0)
    }
}

/// ARIMA model exposing a step-forecast capability.
#[derive(Debug, Clone)]
pub struct Arima {
    state: ArimaState,
    name: String,
}

impl Arima {
    /// Create a model from a fitted state.
    pub fn new(state: ArimaState) -> ModelResult<Self> {
        state.validate()?;
        let name = format!("ARIMA{}", state.order);
        Ok(Self { state, name })
    }

    pub fn order(&self) -> ArimaOrder {
        self.state.order
    }
}

impl StepForecast for Arima {
    fn forecast(&self, steps: usize) -> ModelResult<RawForecast> {
        let values = self.state.project(steps)?;
        Ok(RawForecast::Series(Forecast::from_values(values)))
    }
}

impl Capabilities for Arima {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_step_forecast(&self) -> Option<&dyn StepForecast> {
        Some(self)
    }
}

/// Automatically ordered ARIMA exposing a count-predict capability.
#[derive(Debug, Clone)]
pub struct AutoArima {
    state: ArimaState,
    name: String,
}

impl AutoArima {
    pub fn new(state: ArimaState) -> ModelResult<Self> {
        state.validate()?;
        let name = format!("AutoARIMA{}", state.order);
        Ok(Self { state, name })
    }
}

impl CountPredict for AutoArima {
    fn predict(&self, n_periods: usize) -> ModelResult<RawForecast> {
        self.state.project(n_periods).map(RawForecast::Sequence)
    }
}

impl Capabilities for AutoArima {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_count_predict(&self) -> Option<&dyn CountPredict> {
        Some(self)
    }
}

/// Fitted-results object: in-sample fitted values plus the ARIMA
/// specification they came from.
#[derive(Debug, Clone)]
pub struct ArimaResults {
    state: ArimaState,
    fitted_values: Option<Vec<f64>>,
    spec: String,
}

impl ArimaResults {
    pub fn new(state: ArimaState, fitted_values: Option<Vec<f64>>) -> ModelResult<Self> {
        state.validate()?;
        let spec = format!("ARIMA{}", state.order);
        Ok(Self {
            state,
            fitted_values,
            spec,
        })
    }
}

impl FittedResults for ArimaResults {
    fn fitted_values(&self) -> Option<&[f64]> {
        self.fitted_values.as_deref()
    }

    fn model_spec(&self) -> Option<&str> {
        Some(&self.spec)
    }

    fn forecast(&self, periods: usize) -> ModelResult<RawForecast> {
        let values = self.state.project(periods)?;
        Ok(RawForecast::Series(Forecast::from_values(values)))
    }
}

impl Capabilities for ArimaResults {
    fn name(&self) -> &str {
        "ARIMAResults"
    }

    fn as_fitted_results(&self) -> Option<&dyn FittedResults> {
        Some(self)
    }
}
