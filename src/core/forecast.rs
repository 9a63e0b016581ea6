//! Point forecast wrapper returned by step-forecasting models.

/// A univariate point forecast.
///
/// Step-forecasting models hand this wrapper back instead of a bare vector;
/// the normalizer reads it through [`Forecast::into_values`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forecast {
    /// Point predictions, one per step.
    point: Vec<f64>,
}

impl Forecast {
    /// Create an empty forecast.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a forecast from point predictions.
    pub fn from_values(values: Vec<f64>) -> Self {
        Self { point: values }
    }

    /// Get the forecast horizon (number of steps).
    pub fn horizon(&self) -> usize {
        self.point.len()
    }

    /// Check if forecast is empty.
    pub fn is_empty(&self) -> bool {
        self.point.is_empty()
    }

    /// Get reference to the point predictions.
    pub fn values(&self) -> &[f64] {
        &self.point
    }

    /// Convert into the ordered sequence of point predictions.
    pub fn into_values(self) -> Vec<f64> {
        self.point
    }
}

impl From<Vec<f64>> for Forecast {
    fn from(values: Vec<f64>) -> Self {
        Self::from_values(values)
    }
}
