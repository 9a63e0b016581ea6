//! Exponential smoothing fitted states.

mod holt;

pub use holt::HoltLinearTrend;
