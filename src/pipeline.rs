//! End-to-end prediction: extract, normalize, measure growth, assemble.

use tracing::{debug, info, info_span, warn};

use crate::catalog::ModelKey;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::growth::GrowthMetrics;
use crate::loader::ModelSource;
use crate::models::ForecastModel;
use crate::normalize::Normalizer;
use crate::report::{assemble, PredictionOutcome, PredictionReport};

/// A validated pipeline configuration.
///
/// Holds no state between runs; one `Pipeline` can serve any number of
/// keys, each with its own freshly loaded model.
///
/// # Example
///
/// ```
/// use demand_forecast::{ForecastModel, ModelKey, Pipeline, PipelineConfig, RawForecast};
///
/// let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
/// let model = ForecastModel::callable("flat", |_| Ok(RawForecast::Scalar(42.5)));
/// let key = ModelKey::new("Technology", "Entry-level");
///
/// let report = pipeline.run(&key, &model, "flat").unwrap();
/// assert_eq!(report.monthly_predictions.len(), 24);
/// assert_eq!(report.metrics.current_demand, 42.5);
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the pipeline on an already loaded model.
    pub fn run(
        &self,
        key: &ModelKey,
        model: &ForecastModel,
        model_used: &str,
    ) -> Result<PredictionReport> {
        let periods = self.config.periods;
        let raw = model.extract(periods)?;
        debug!(
            model = model.name(),
            method = %model.method(),
            shape = raw.shape(),
            "extracted raw forecast"
        );

        let normalized = Normalizer::from_config(&self.config).normalize(raw)?;
        let metrics = GrowthMetrics::compute_with(
            normalized.as_slice(),
            self.config.window,
            self.config.confidence_score,
        )?;

        Ok(assemble(
            &key.industry,
            &key.experience,
            &normalized,
            metrics,
            model_used,
        ))
    }

    /// Load the model for `key` from `source` and run the pipeline.
    pub fn predict(&self, source: &dyn ModelSource, key: &ModelKey) -> Result<PredictionReport> {
        let _span = info_span!("predict", industry = %key.industry, experience = %key.experience)
            .entered();

        let loaded = source.load(key)?;
        let report = self.run(key, &loaded.model, &loaded.artifact_name)?;
        info!(
            model = %loaded.artifact_name,
            current_demand = report.metrics.current_demand,
            total_growth = report.metrics.total_growth,
            "generated predictions"
        );
        Ok(report)
    }

    /// Like [`Pipeline::predict`], but every failure becomes the error
    /// contract. No partial report is ever returned.
    pub fn respond(&self, source: &dyn ModelSource, key: &ModelKey) -> PredictionOutcome {
        let result = self.predict(source, key);
        if let Err(err) = &result {
            warn!(key = %key, error = %err, "prediction failed");
        }
        PredictionOutcome::from(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RawForecast;
    use crate::error::{ForecastError, ModelError};
    use crate::loader::{InMemorySource, LoadedModel, ModelArtifact};
    use crate::models::baseline::RandomWalkWithDrift;

    fn key() -> ModelKey {
        ModelKey::new("Technology", "Entry-level")
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let err = Pipeline::new(PipelineConfig::default().with_window(20)).unwrap_err();
        assert!(matches!(err, ForecastError::InvalidParameter(_)));
    }

    #[test]
    fn run_produces_bounded_fixed_length_report() {
        let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
        let model = ForecastModel::callable("ramp", |n| {
            Ok(RawForecast::Sequence((0..n).map(|i| i as f64 * 10.0 - 30.0).collect()))
        });

        let report = pipeline.run(&key(), &model, "ramp").unwrap();
        assert_eq!(report.monthly_predictions.len(), 24);
        assert!(report
            .monthly_predictions
            .iter()
            .all(|m| (0.0..=100.0).contains(&m.demand)));
        assert_eq!(report.metrics.current_demand, 30.0);
        assert_eq!(report.model_used, "ramp");
    }

    #[test]
    fn extraction_failure_surfaces_as_error_contract() {
        struct Failing;
        impl ModelSource for Failing {
            fn load(&self, _key: &ModelKey) -> Result<LoadedModel> {
                Ok(LoadedModel {
                    model: ForecastModel::callable("failing", |_| {
                        Err(ModelError::Callable("singular matrix".to_string()))
                    }),
                    artifact_name: "failing".to_string(),
                })
            }
        }

        let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
        let outcome = pipeline.respond(&Failing, &key());
        assert!(!outcome.is_success());
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            json["error"],
            "error generating predictions via direct call: singular matrix"
        );
        assert!(json.get("monthly_predictions").is_none());
    }

    #[test]
    fn predict_uses_artifact_name_as_model_used() {
        let source = InMemorySource::new().with(
            key(),
            ModelArtifact::Drift(RandomWalkWithDrift::new(60.0, 0.5).unwrap()),
        );
        let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
        let report = pipeline.predict(&source, &key()).unwrap();
        assert_eq!(
            report.model_used,
            "job_forecasting_arima_Technology_Entry-level.json"
        );
        assert_eq!(report.metrics.current_demand, 60.5);
    }

    #[test]
    fn longer_horizons_follow_config() {
        let config = PipelineConfig::default().with_periods(36);
        let pipeline = Pipeline::new(config).unwrap();
        let model = ForecastModel::callable("flat", |_| Ok(RawForecast::Scalar(10.0)));
        let report = pipeline.run(&key(), &model, "flat").unwrap();
        assert_eq!(report.monthly_predictions.len(), 36);
        assert_eq!(report.monthly_predictions[35].period_label, "3-12");
    }
}
