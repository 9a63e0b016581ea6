//! Growth metrics over fixed averaging windows.

use serde::Serialize;

use crate::config::{DEFAULT_CONFIDENCE_SCORE, DEFAULT_WINDOW};
use crate::error::{ForecastError, Result};
use crate::utils::{mean, percent_change, round_to};

/// Growth figures derived from a normalized prediction sequence.
///
/// All figures are rounded to two decimal places; growth values are
/// percentages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GrowthMetrics {
    /// First predicted value.
    pub current_demand: f64,
    /// Change from the current demand to the first window's mean.
    pub year1_growth: f64,
    /// Change from the first window's mean to the second window's mean.
    pub year2_growth: f64,
    /// Change from the current demand to the second window's mean.
    pub total_growth: f64,
    pub confidence_score: f64,
}

impl GrowthMetrics {
    /// Compute metrics with 12-period windows and the default confidence.
    ///
    /// # Example
    ///
    /// ```
    /// use demand_forecast::GrowthMetrics;
    ///
    /// let mut values = vec![50.0; 12];
    /// values.extend([60.0; 12]);
    /// let metrics = GrowthMetrics::compute(&values).unwrap();
    /// assert_eq!(metrics.year1_growth, 0.0);
    /// assert_eq!(metrics.year2_growth, 20.0);
    /// assert_eq!(metrics.total_growth, 20.0);
    /// ```
    pub fn compute(values: &[f64]) -> Result<Self> {
        Self::compute_with(values, DEFAULT_WINDOW, DEFAULT_CONFIDENCE_SCORE)
    }

    /// Compute metrics over windows `[0, window)` and `[window, 2 × window)`.
    ///
    /// Zero or negative baselines yield zero growth.
    pub fn compute_with(values: &[f64], window: usize, confidence_score: f64) -> Result<Self> {
        if window == 0 {
            return Err(ForecastError::InvalidParameter(
                "window must be positive".to_string(),
            ));
        }
        let needed = window.checked_mul(2).ok_or_else(|| {
            ForecastError::InvalidParameter(format!("window {window} is too large"))
        })?;
        if values.len() < needed {
            return Err(ForecastError::InsufficientData {
                needed,
                got: values.len(),
            });
        }

        let current = values[0];
        let year1_avg = mean(&values[..window]);
        let year2_avg = mean(&values[window..needed]);

        Ok(Self {
            current_demand: round_to(current, 2),
            year1_growth: round_to(percent_change(current, year1_avg), 2),
            year2_growth: round_to(percent_change(year1_avg, year2_avg), 2),
            total_growth: round_to(percent_change(current, year2_avg), 2),
            confidence_score: round_to(confidence_score, 2),
        })
    }
}
