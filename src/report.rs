//! Output contract: the prediction report and its error counterpart.

use serde::Serialize;

use crate::error::ForecastError;
use crate::growth::GrowthMetrics;
use crate::normalize::NormalizedForecast;
use crate::utils::round_to;

/// Months per label year in period labels.
const MONTHS_PER_YEAR: usize = 12;

/// One predicted period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyPrediction {
    /// 1-based position in the forecast.
    pub month: u32,
    /// `"{year}-{month}"`, e.g. `"1-1"` for the first period and `"2-12"`
    /// for the 24th.
    pub period_label: String,
    pub demand: f64,
}

/// Successful prediction for one (industry, experience) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionReport {
    pub success: bool,
    pub industry: String,
    pub experience: String,
    #[serde(flatten)]
    pub metrics: GrowthMetrics,
    pub monthly_predictions: Vec<MonthlyPrediction>,
    pub model_used: String,
}

/// Failure contract: a single error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    pub error: String,
}

impl From<&ForecastError> for ErrorReport {
    fn from(err: &ForecastError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

/// Either contract, serialized without a wrapper.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PredictionOutcome {
    Success(PredictionReport),
    Failure(ErrorReport),
}

impl PredictionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PredictionOutcome::Success(_))
    }

    /// Two-space indented JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl From<crate::Result<PredictionReport>> for PredictionOutcome {
    fn from(result: crate::Result<PredictionReport>) -> Self {
        match result {
            Ok(report) => PredictionOutcome::Success(report),
            Err(err) => PredictionOutcome::Failure(ErrorReport::from(&err)),
        }
    }
}

/// Label for the period at 0-based `index`.
pub fn period_label(index: usize) -> String {
    format!(
        "{}-{}",
        index / MONTHS_PER_YEAR + 1,
        index % MONTHS_PER_YEAR + 1
    )
}

/// One entry per normalized value, in order, demand rounded to 2 places.
pub fn monthly_predictions(forecast: &NormalizedForecast) -> Vec<MonthlyPrediction> {
    forecast
        .as_slice()
        .iter()
        .enumerate()
        .map(|(i, &demand)| MonthlyPrediction {
            month: (i + 1) as u32,
            period_label: period_label(i),
            demand: round_to(demand, 2),
        })
        .collect()
}

/// Combine normalized predictions and metrics into the report.
pub fn assemble(
    industry: &str,
    experience: &str,
    forecast: &NormalizedForecast,
    metrics: GrowthMetrics,
    model_used: &str,
) -> PredictionReport {
    PredictionReport {
        success: true,
        industry: industry.to_string(),
        experience: experience.to_string(),
        metrics,
        monthly_predictions: monthly_predictions(forecast),
        model_used: model_used.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RawForecast;
    use crate::normalize::Normalizer;

    fn normalized(values: Vec<f64>) -> NormalizedForecast {
        let periods = values.len();
        Normalizer::new(periods)
            .normalize(RawForecast::Sequence(values))
            .unwrap()
    }

    #[test]
    fn period_labels_run_year_then_month() {
        assert_eq!(period_label(0), "1-1");
        assert_eq!(period_label(11), "1-12");
        assert_eq!(period_label(12), "2-1");
        assert_eq!(period_label(23), "2-12");
    }

    #[test]
    fn monthly_predictions_are_ordered_and_rounded() {
        let entries = monthly_predictions(&normalized(vec![10.126, 20.0, 30.004]));
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].month, 1);
        assert_eq!(entries[0].demand, 10.13);
        assert_eq!(entries[2].month, 3);
        assert_eq!(entries[2].period_label, "1-3");
        assert_eq!(entries[2].demand, 30.0);
    }

    #[test]
    fn report_serializes_flat_contract() {
        let forecast = normalized(vec![50.0; 24]);
        let metrics = GrowthMetrics::compute(forecast.as_slice()).unwrap();
        let report = assemble(
            "Technology",
            "Entry-level",
            &forecast,
            metrics,
            "job_forecasting_arima_Technology_Entry-level.json",
        );

        let json = serde_json::to_value(PredictionOutcome::Success(report)).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["industry"], "Technology");
        assert_eq!(json["current_demand"], 50.0);
        assert_eq!(json["confidence_score"], 95.0);
        assert_eq!(json["monthly_predictions"].as_array().unwrap().len(), 24);
        assert_eq!(json["monthly_predictions"][23]["period_label"], "2-12");
        assert_eq!(json["monthly_predictions"][23]["month"], 24);
        assert!(json.get("metrics").is_none());
    }

    #[test]
    fn failure_serializes_to_error_only() {
        let err = ForecastError::UnsupportedModelKind("opaque".to_string());
        let result: crate::Result<PredictionReport> = Err(err);
        let outcome = PredictionOutcome::from(result);
        assert!(!outcome.is_success());
        assert_eq!(
            outcome.to_json().unwrap(),
            r#"{"error":"unsupported model kind: opaque exposes no forecasting capability"}"#
        );
    }
}
