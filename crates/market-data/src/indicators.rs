//! Derived indicator columns for the replay dataset.
//!
//! Formulas match the dataset preparation pipeline: rolling SMA, span-based
//! EMA, fractional rate of change, and a simple rolling-mean RSI. Each
//! function returns a series aligned to the input, with `None` where the
//! window has not filled yet.

/// Simple Moving Average over a fixed window.
pub fn sma(data: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; data.len()];
    if window == 0 {
        return out;
    }
    for i in (window - 1)..data.len() {
        let sum: f64 = data[i + 1 - window..=i].iter().sum();
        out[i] = Some(sum / window as f64);
    }
    out
}

/// Exponential Moving Average with the given span, seeded from the first
/// value (`alpha = 2 / (span + 1)`). Defined for every index.
pub fn ema(data: &[f64], span: usize) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(data.len());
    if data.is_empty() || span == 0 {
        return vec![None; data.len()];
    }
    let alpha = 2.0 / (span as f64 + 1.0);
    let mut prev = data[0];
    out.push(Some(prev));
    for &value in &data[1..] {
        prev = alpha * value + (1.0 - alpha) * prev;
        out.push(Some(prev));
    }
    out
}

/// Fractional rate of change over `periods` rows: `data[i] / data[i-n] - 1`.
pub fn roc(data: &[f64], periods: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; data.len()];
    if periods == 0 {
        return out;
    }
    for i in periods..data.len() {
        if data[i - periods] != 0.0 {
            out[i] = Some(data[i] / data[i - periods] - 1.0);
        }
    }
    out
}

/// Relative Strength Index using simple rolling means of gains and losses.
/// The loss denominator carries a small epsilon so an all-gain window reads
/// as RSI near 100 instead of dividing by zero.
pub fn rsi(data: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; data.len()];
    if period == 0 || data.len() < period + 1 {
        return out;
    }

    let mut gains = Vec::with_capacity(data.len() - 1);
    let mut losses = Vec::with_capacity(data.len() - 1);
    for i in 1..data.len() {
        let change = data[i] - data[i - 1];
        gains.push(change.max(0.0));
        losses.push((-change).max(0.0));
    }

    for i in period..data.len() {
        let window = (i - period)..i;
        let avg_gain: f64 = gains[window.clone()].iter().sum::<f64>() / period as f64;
        let avg_loss: f64 = losses[window].iter().sum::<f64>() / period as f64;
        let rs = avg_gain / (avg_loss + 1e-8);
        out[i] = Some(100.0 - 100.0 / (1.0 + rs));
    }
    out
}

/// Fill leading `None`s from the first defined value, matching the
/// backfill applied after indicator computation. An all-`None` series is
/// returned unchanged.
pub fn backfill(series: &mut [Option<f64>]) {
    if let Some(first) = series.iter().flatten().next().copied() {
        for slot in series.iter_mut() {
            match slot {
                Some(_) => break,
                None => *slot = Some(first),
            }
        }
    }
}
