// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// EMA gives more weight to recent prices, making it more responsive to new
// information than the Simple Moving Average (SMA).
//
// Formula:
//   multiplier = 2 / (period + 1)
//   EMA_t      = close_t * multiplier + EMA_{t-1} * (1 - multiplier)
//
// The very first EMA value is seeded with the SMA of the first `period` closes.
// =============================================================================

use super::series::latest_defined;
use super::smoothing::{smooth, Smoothing};

/// Compute the EMA series for the given `closes` slice and look-back `period`.
///
/// The output is aligned index-for-index with `closes`: the first
/// `period - 1` entries are NaN, index `period - 1` holds the SMA seed.
///
/// # Edge cases
/// - `period == 0` => empty vec
/// - `closes.len() < period` => empty vec (not a NaN-padded one)
/// - Non-finite closes are gaps: NaN at that index, smoothing resumes at the
///   next defined close.
pub fn calculate_ema(closes: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || closes.len() < period {
        return Vec::new();
    }
    smooth(closes, period, Smoothing::Exponential)
}

/// Most recent defined EMA value, or `None` when it cannot be computed.
pub fn latest_ema(closes: &[f64], period: usize) -> Option<f64> {
    latest_defined(&calculate_ema(closes, period))
}
