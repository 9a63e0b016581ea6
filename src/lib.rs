//! # demand-forecast
//!
//! Turns the output of fitted time-series models into a bounded job-demand
//! prediction contract for a web front end.
//!
//! A run for one (industry, experience) pair:
//! 1. load the fitted model and select its extraction method once
//! 2. extract `periods` raw predictions
//! 3. normalize them into exactly `periods` values in `[0, 100]`
//! 4. compute growth over two consecutive averaging windows
//! 5. assemble the report, or an `{ "error": ... }` contract on any failure

pub mod catalog;
pub mod config;
pub mod core;
pub mod error;
pub mod growth;
pub mod loader;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod report;
pub mod utils;

pub use catalog::ModelKey;
pub use config::PipelineConfig;
pub use core::{Forecast, RawForecast, RawValue};
pub use error::{ForecastError, ModelError, Result};
pub use growth::GrowthMetrics;
pub use loader::{ModelLoader, ModelSource};
pub use models::{ExtractionMethod, ForecastModel};
pub use normalize::{NormalizedForecast, Normalizer};
pub use pipeline::Pipeline;
pub use report::{PredictionOutcome, PredictionReport};

pub mod prelude {
    pub use crate::catalog::{ExperienceLevel, Industry, ModelKey};
    pub use crate::config::PipelineConfig;
    pub use crate::core::{RawForecast, RawValue};
    pub use crate::error::{ForecastError, ModelError, Result};
    pub use crate::loader::{InMemorySource, ModelArtifact, ModelLoader, ModelSource};
    pub use crate::models::{Capabilities, ExtractionMethod, ForecastModel};
    pub use crate::pipeline::Pipeline;
    pub use crate::report::PredictionOutcome;
}
