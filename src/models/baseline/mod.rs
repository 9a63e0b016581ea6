//! Baseline forecasting models.
//!
//! Simple fitted states that predict a number of future periods.

mod naive;
mod random_walk;
mod seasonal_naive;

pub use naive::Naive;
pub use random_walk::RandomWalkWithDrift;
pub use seasonal_naive::SeasonalNaive;
