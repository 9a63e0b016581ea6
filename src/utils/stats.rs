//! Statistical utility functions.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Calculate the mean of a slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Percentage change from `base` to `value`.
///
/// A non-positive base yields zero growth.
///
/// # Example
/// ```
/// use demand_forecast::utils::percent_change;
///
/// assert_eq!(percent_change(50.0, 60.0), 20.0);
/// assert_eq!(percent_change(0.0, 60.0), 0.0);
/// ```
pub fn percent_change(base: f64, value: f64) -> f64 {
    if base > 0.0 {
        (value - base) / base * 100.0
    } else {
        0.0
    }
}

/// Round to `decimals` places on the exact decimal expansion of `value`,
/// exact halves to even.
///
/// Values outside the `Decimal` range (non-finite or beyond ~7.9e28) are
/// returned unchanged.
///
/// # Example
/// ```
/// use demand_forecast::utils::round_to;
///
/// assert_eq!(round_to(0.125, 2), 0.12);
/// assert_eq!(round_to(0.375, 2), 0.38);
/// ```
pub fn round_to(value: f64, decimals: u32) -> f64 {
    Decimal::from_f64_retain(value)
        .map(|d| d.round_dp_with_strategy(decimals, RoundingStrategy::MidpointNearestEven))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}
