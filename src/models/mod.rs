//! Fitted forecasting models and the capabilities they expose.

mod traits;

pub mod arima;
pub mod baseline;
pub mod exponential;
pub mod table;

pub use traits::{
    probe, BoxedModel, Callable, Capabilities, CountPredict, DirectCall, ExtractionMethod,
    FittedResults, ForecastModel, StepForecast,
};
