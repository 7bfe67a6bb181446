//! Moving-average primitives shared by the indicator strategies.

/// Simple moving average with end-aligned windows.
///
/// Output element `i` is the mean of `values[i..i + period]`, so the
/// result has `len - period + 1` elements and its last element covers
/// the most recent window. Empty when the input is shorter than the
/// period.
pub fn sma(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return Vec::new();
    }

    values
        .windows(period)
        .map(|window| window.iter().sum::<f64>() / period as f64)
        .collect()
}

/// Exponential moving average seeded with the SMA of the first
/// `period` values; multiplier 2 / (period + 1).
///
/// Every output depends on the entire prefix before it, so callers
/// must recompute from the full series rather than resuming from a
/// partial one. Result has `len - period + 1` elements.
pub fn ema(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || values.len() < period {
        return Vec::new();
    }

    let multiplier = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len() - period + 1);

    // First EMA is SMA
    let mut current = values.iter().take(period).sum::<f64>() / period as f64;
    out.push(current);

    for &value in &values[period..] {
        current = (value - current) * multiplier + current;
        out.push(current);
    }

    out
}
