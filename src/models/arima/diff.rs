//! Differencing helpers for projecting ARIMA states forward.

/// Difference a series `d` times.
///
/// Each pass shortens the series by one; a series that runs out of points
/// is returned as far as it could be differenced.
pub fn difference(series: &[f64], d: usize) -> Vec<f64> {
    let mut result = series.to_vec();
    for _ in 0..d {
        if result.len() <= 1 {
            break;
        }
        result = result.windows(2).map(|w| w[1] - w[0]).collect();
    }
    result
}

/// Undo `d` rounds of differencing on values that continue `original`.
///
/// `differenced` holds future values on the `d`-times differenced scale;
/// the anchors for each cumulative sum come from the tail of `original`
/// differenced to the matching level.
pub fn integrate(differenced: &[f64], original: &[f64], d: usize) -> Vec<f64> {
    let mut result = differenced.to_vec();
    for level in (0..d).rev() {
        let anchor = difference(original, level).last().copied().unwrap_or(0.0);
        result = result
            .iter()
            .scan(anchor, |acc, &step| {
                *acc += step;
                Some(*acc)
            })
            .collect();
    }
    result
}
