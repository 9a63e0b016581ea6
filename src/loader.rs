//! Locating and decoding fitted model artifacts.
//!
//! Artifacts are JSON documents named
//! `job_forecasting_arima_{industry}_{experience}.json`, tagged by `kind`:
//!
//! ```json
//! { "kind": "arima", "order": { "p": 1, "d": 1, "q": 0 },
//!   "ar": [0.4], "intercept": 0.3, "history": [61.0, 62.5, 63.1] }
//! ```

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::ModelKey;
use crate::error::{ForecastError, ModelResult, Result};
use crate::models::arima::{Arima, ArimaResults, ArimaState, AutoArima};
use crate::models::baseline::{Naive, RandomWalkWithDrift, SeasonalNaive};
use crate::models::exponential::HoltLinearTrend;
use crate::models::table::ForecastTable;
use crate::models::{BoxedModel, ForecastModel};

/// File name prefix shared by all model artifacts.
pub const ARTIFACT_PREFIX: &str = "job_forecasting_arima";

pub const ARTIFACT_EXTENSION: &str = "json";

/// Default directory searched for artifacts.
pub const DEFAULT_MODELS_DIR: &str = "models";

/// Artifact file name for a key.
pub fn artifact_name(key: &ModelKey) -> String {
    format!(
        "{ARTIFACT_PREFIX}_{}_{}.{ARTIFACT_EXTENSION}",
        key.industry, key.experience
    )
}

/// Recover the key from an artifact file name.
pub fn parse_artifact_name(file_name: &str) -> Option<ModelKey> {
    let stem = file_name
        .strip_prefix(ARTIFACT_PREFIX)?
        .strip_prefix('_')?
        .strip_suffix(ARTIFACT_EXTENSION)?
        .strip_suffix('.')?;
    let (industry, experience) = stem.split_once('_')?;
    if industry.is_empty() || experience.is_empty() {
        return None;
    }
    Some(ModelKey::new(industry, experience))
}

/// ARIMA results: a fitted state plus in-sample fitted values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArimaResultsArtifact {
    #[serde(flatten)]
    pub state: ArimaState,
    #[serde(default)]
    pub fitted_values: Option<Vec<f64>>,
}

/// A decoded model artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Arima(ArimaState),
    AutoArima(ArimaState),
    ArimaResults(ArimaResultsArtifact),
    Holt(HoltLinearTrend),
    Naive(Naive),
    Drift(RandomWalkWithDrift),
    SeasonalNaive(SeasonalNaive),
    Table(ForecastTable),
}

impl ModelArtifact {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| ForecastError::ModelLoad(e.to_string()))
    }

    /// Build a fresh model and select its extraction method.
    pub fn into_model(self) -> Result<ForecastModel> {
        let inner = self
            .build()
            .map_err(|e| ForecastError::ModelLoad(e.to_string()))?;
        ForecastModel::wrap(inner)
    }

    fn build(self) -> ModelResult<BoxedModel> {
        let model: BoxedModel = match self {
            ModelArtifact::Arima(state) => Box::new(Arima::new(state)?),
            ModelArtifact::AutoArima(state) => Box::new(AutoArima::new(state)?),
            ModelArtifact::ArimaResults(artifact) => {
                Box::new(ArimaResults::new(artifact.state, artifact.fitted_values)?)
            }
            ModelArtifact::Holt(model) => {
                model.validate()?;
                Box::new(model)
            }
            ModelArtifact::Naive(model) => {
                model.validate()?;
                Box::new(model)
            }
            ModelArtifact::Drift(model) => {
                model.validate()?;
                Box::new(model)
            }
            ModelArtifact::SeasonalNaive(model) => {
                model.validate()?;
                Box::new(model)
            }
            ModelArtifact::Table(model) => Box::new(model),
        };
        Ok(model)
    }
}

/// A model ready for one pipeline run.
#[derive(Debug)]
pub struct LoadedModel {
    pub model: ForecastModel,
    /// Artifact the model came from, reported as `model_used`.
    pub artifact_name: String,
}

/// Anything that can produce a model for a key.
///
/// Each call returns a new model instance; sources never hand out shared
/// model handles.
pub trait ModelSource {
    fn load(&self, key: &ModelKey) -> Result<LoadedModel>;
}

/// Loads artifacts from a directory.
#[derive(Debug, Clone)]
pub struct ModelLoader {
    models_dir: PathBuf,
}

impl ModelLoader {
    pub fn new(models_dir: impl Into<PathBuf>) -> Self {
        Self {
            models_dir: models_dir.into(),
        }
    }

    pub fn models_dir(&self) -> &Path {
        &self.models_dir
    }

    pub fn artifact_path(&self, key: &ModelKey) -> PathBuf {
        self.models_dir.join(artifact_name(key))
    }

    /// Keys of every artifact in the directory, sorted.
    pub fn available(&self) -> Result<Vec<ModelKey>> {
        let entries = fs::read_dir(&self.models_dir).map_err(|e| {
            ForecastError::ModelLoad(format!(
                "models directory {}: {e}",
                self.models_dir.display()
            ))
        })?;

        let mut keys = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ForecastError::ModelLoad(e.to_string()))?;
            let file_name = entry.file_name();
            match file_name.to_str().and_then(parse_artifact_name) {
                Some(key) => keys.push(key),
                None => debug!(file = ?file_name, "skipping non-artifact file"),
            }
        }
        keys.sort();
        Ok(keys)
    }
}

impl Default for ModelLoader {
    fn default() -> Self {
        Self::new(DEFAULT_MODELS_DIR)
    }
}

impl ModelSource for ModelLoader {
    fn load(&self, key: &ModelKey) -> Result<LoadedModel> {
        key.validate()?;
        let name = artifact_name(key);
        let path = self.models_dir.join(&name);
        debug!(path = %path.display(), "loading model artifact");

        let text = fs::read_to_string(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ForecastError::ModelNotFound { name: name.clone() },
            _ => ForecastError::ModelLoad(format!("{name}: {e}")),
        })?;
        let model = ModelArtifact::from_json(&text)
            .and_then(ModelArtifact::into_model)
            .inspect_err(|e| warn!(artifact = %name, error = %e, "rejected model artifact"))?;

        Ok(LoadedModel {
            model,
            artifact_name: name,
        })
    }
}

/// Holds decoded artifacts in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    artifacts: HashMap<ModelKey, ModelArtifact>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: ModelKey, artifact: ModelArtifact) {
        self.artifacts.insert(key, artifact);
    }

    pub fn with(mut self, key: ModelKey, artifact: ModelArtifact) -> Self {
        self.insert(key, artifact);
        self
    }
}

impl ModelSource for InMemorySource {
    fn load(&self, key: &ModelKey) -> Result<LoadedModel> {
        let name = artifact_name(key);
        let artifact = self
            .artifacts
            .get(key)
            .ok_or_else(|| ForecastError::ModelNotFound { name: name.clone() })?;
        Ok(LoadedModel {
            model: artifact.clone().into_model()?,
            artifact_name: name,
        })
    }
}
