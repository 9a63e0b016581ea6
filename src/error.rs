//! Error types for the demand-forecast pipeline.

use thiserror::Error;

use crate::models::ExtractionMethod;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Result type alias for errors raised inside a model's own extraction method.
pub type ModelResult<T> = std::result::Result<T, ModelError>;

/// Errors that can occur while producing a prediction report.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// No model artifact exists for the requested key.
    #[error("model file not found: {name}")]
    ModelNotFound { name: String },

    /// A model artifact exists but could not be read or decoded.
    #[error("error loading model: {0}")]
    ModelLoad(String),

    /// The model exposes none of the supported forecasting capabilities.
    #[error("unsupported model kind: {0} exposes no forecasting capability")]
    UnsupportedModelKind(String),

    /// The model's own extraction method failed.
    #[error("error generating predictions via {method}: {source}")]
    ExtractionFailure {
        method: ExtractionMethod,
        #[source]
        source: ModelError,
    },

    /// Raw model output could not be coerced to real numbers.
    #[error("could not normalize forecast output: {0}")]
    NormalizationFailure(String),

    /// Insufficient data points for the operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Configuration source could not be read or decoded.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised by a fitted model while forecasting.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// The fitted state is inconsistent (wrong coefficient count, empty history, ...).
    #[error("invalid model state: {0}")]
    InvalidState(String),

    /// Numerical failure during the forecast recursion.
    #[error("computation error: {0}")]
    Computation(String),

    /// Failure reported by a directly callable model.
    #[error("{0}")]
    Callable(String),
}
