//! Capability traits and the prober that picks one extraction method per model.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::core::RawForecast;
use crate::error::{ForecastError, ModelResult, Result};

/// Models that forecast a number of steps ahead.
pub trait StepForecast {
    /// Forecast `steps` periods ahead.
    fn forecast(&self, steps: usize) -> ModelResult<RawForecast>;
}

/// Models that predict a number of future periods.
pub trait CountPredict {
    /// Predict `n_periods` future periods.
    fn predict(&self, n_periods: usize) -> ModelResult<RawForecast>;
}

/// Fitted-results objects: in-sample fitted values plus a reference to the
/// model they were produced by.
pub trait FittedResults {
    /// In-sample fitted values, if the results carry them.
    fn fitted_values(&self) -> Option<&[f64]>;

    /// The underlying model specification, if the results carry one.
    fn model_spec(&self) -> Option<&str>;

    /// Forecast `periods` periods past the end of the fitted sample.
    fn forecast(&self, periods: usize) -> ModelResult<RawForecast>;
}

/// Models that are invoked directly with the period count.
pub trait DirectCall {
    fn call(&self, periods: usize) -> ModelResult<RawForecast>;
}

/// An opaque fitted model and the capabilities it exposes.
///
/// A model may expose several capabilities; [`probe`] resolves them in a
/// fixed precedence order. Every accessor defaults to `None`.
pub trait Capabilities {
    /// Get the model name.
    fn name(&self) -> &str;

    fn as_step_forecast(&self) -> Option<&dyn StepForecast> {
        None
    }

    fn as_count_predict(&self) -> Option<&dyn CountPredict> {
        None
    }

    fn as_fitted_results(&self) -> Option<&dyn FittedResults> {
        None
    }

    fn as_direct_call(&self) -> Option<&dyn DirectCall> {
        None
    }
}

/// The extraction method selected for a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    StepForecast,
    CountPredict,
    FittedResult,
    DirectCallable,
}

impl fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExtractionMethod::StepForecast => "step forecast",
            ExtractionMethod::CountPredict => "count predict",
            ExtractionMethod::FittedResult => "fitted result",
            ExtractionMethod::DirectCallable => "direct call",
        };
        f.write_str(name)
    }
}

/// Select the extraction method for a model.
///
/// Precedence: step forecast, count predict, fitted results (only when both
/// fitted values and a model spec are present), direct call.
pub fn probe(model: &dyn Capabilities) -> Result<ExtractionMethod> {
    if model.as_step_forecast().is_some() {
        return Ok(ExtractionMethod::StepForecast);
    }
    if model.as_count_predict().is_some() {
        return Ok(ExtractionMethod::CountPredict);
    }
    if let Some(results) = model.as_fitted_results() {
        if results.fitted_values().is_some() && results.model_spec().is_some() {
            return Ok(ExtractionMethod::FittedResult);
        }
    }
    if model.as_direct_call().is_some() {
        return Ok(ExtractionMethod::DirectCallable);
    }
    Err(ForecastError::UnsupportedModelKind(model.name().to_string()))
}

/// Boxed opaque model.
pub type BoxedModel = Box<dyn Capabilities + Send + Sync>;

/// A model wrapped together with the extraction method chosen for it.
///
/// The probe runs once in [`ForecastModel::wrap`]; [`ForecastModel::extract`]
/// only dispatches on the recorded method.
pub struct ForecastModel {
    inner: BoxedModel,
    method: ExtractionMethod,
}

impl ForecastModel {
    /// Wrap a model, selecting its extraction method.
    pub fn wrap(inner: BoxedModel) -> Result<Self> {
        let method = probe(inner.as_ref())?;
        debug!(model = inner.name(), %method, "selected extraction method");
        Ok(Self { inner, method })
    }

    /// Wrap a closure as a directly callable model.
    pub fn callable<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(usize) -> ModelResult<RawForecast> + Send + Sync + 'static,
    {
        Self {
            inner: Box::new(Callable::new(name, f)),
            method: ExtractionMethod::DirectCallable,
        }
    }

    /// Get the selected extraction method.
    pub fn method(&self) -> ExtractionMethod {
        self.method
    }

    /// Get the model name.
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Invoke the selected extraction method once.
    pub fn extract(&self, periods: usize) -> Result<RawForecast> {
        let model = self.inner.as_ref();
        let output = match self.method {
            ExtractionMethod::StepForecast => model.as_step_forecast().map(|m| m.forecast(periods)),
            ExtractionMethod::CountPredict => model.as_count_predict().map(|m| m.predict(periods)),
            ExtractionMethod::FittedResult => {
                model.as_fitted_results().map(|m| m.forecast(periods))
            }
            ExtractionMethod::DirectCallable => model.as_direct_call().map(|m| m.call(periods)),
        };

        // Capabilities are stable for a model's lifetime, so a missing one
        // here means the model changed shape after wrapping.
        let output =
            output.ok_or_else(|| ForecastError::UnsupportedModelKind(model.name().to_string()))?;
        output.map_err(|source| ForecastError::ExtractionFailure {
            method: self.method,
            source,
        })
    }
}

impl fmt::Debug for ForecastModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForecastModel")
            .field("name", &self.name())
            .field("method", &self.method)
            .finish()
    }
}

/// A named closure exposed as a directly callable model.
pub struct Callable<F> {
    name: String,
    f: F,
}

impl<F> Callable<F>
where
    F: Fn(usize) -> ModelResult<RawForecast>,
{
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> Capabilities for Callable<F>
where
    F: Fn(usize) -> ModelResult<RawForecast>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn as_direct_call(&self) -> Option<&dyn DirectCall> {
        Some(self)
    }
}

impl<F> DirectCall for Callable<F>
where
    F: Fn(usize) -> ModelResult<RawForecast>,
{
    fn call(&self, periods: usize) -> ModelResult<RawForecast> {
        (self.f)(periods)
    }
}
