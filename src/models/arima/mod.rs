//! ARIMA (Autoregressive Integrated Moving Average) fitted states.
//!
//! One fitted state backs three model shapes, matching how fitted ARIMA
//! models are commonly handed around:
//! - [`Arima`]: forecasts a number of steps ahead
//! - [`AutoArima`]: predicts a number of periods
//! - [`ArimaResults`]: fitted-results object carrying in-sample fitted values

mod diff;
mod model;

pub use diff::{difference, integrate};
pub use model::{Arima, ArimaOrder, ArimaResults, ArimaState, AutoArima};
