//! Core data structures passed between pipeline stages.

mod forecast;
mod raw;

pub use forecast::Forecast;
pub use raw::{RawForecast, RawValue};
