// =============================================================================
// Average True Range (ATR)
// =============================================================================
//
// ATR measures market volatility by decomposing the entire range of a bar.
//
// True Range (TR) for each bar:
//   TR_0 = H - L                                   (no previous close)
//   TR_t = max(H - L, |H - prevClose|, |L - prevClose|)
//
// ATR is the smoothed average of TR:
//   ATR_{period-1} = SMA of the first `period` TR values
//   ATR_t          = step(ATR_{t-1}, TR_t)
//
// `calculate_atr` smooths with the EMA factor 2 / (period + 1), which is what
// the market snapshots have always been built with. Wilder's 1 / period
// variant is available through `calculate_atr_with`.
//
// Default period: 14
// =============================================================================

use crate::market_data::Kline;

use super::series::latest_defined;
use super::smoothing::{smooth, Smoothing};

/// True range of every bar, aligned with `klines`.
///
/// A bar with a non-finite high or low, or with `high < low`, has an undefined
/// (NaN) range. When the previous close is missing the bar falls back to
/// `high - low`.
pub fn true_range(klines: &[Kline]) -> Vec<f64> {
    let mut prev_close: Option<f64> = None;
    klines
        .iter()
        .map(|k| {
            let tr = bar_range(k, prev_close);
            prev_close = Some(k.close).filter(|c| c.is_finite());
            tr
        })
        .collect()
}

/// Compute the ATR series for `klines` (oldest first).
///
/// # Edge cases
/// - `period == 0` => empty vec
/// - `klines.len() < period` => empty vec
/// - Undefined bars are gaps: NaN at that index, smoothing resumes at the
///   next defined bar.
pub fn calculate_atr(klines: &[Kline], period: usize) -> Vec<f64> {
    calculate_atr_with(klines, period, Smoothing::Exponential)
}

/// Compute the ATR series with an explicit smoothing rule.
pub fn calculate_atr_with(klines: &[Kline], period: usize, smoothing: Smoothing) -> Vec<f64> {
    if period == 0 || klines.len() < period {
        return Vec::new();
    }

    smooth(&true_range(klines), period, smoothing)
}

/// Most recent ATR as a percentage of the most recent close.
///
/// Useful for comparing volatility across assets with different price scales.
pub fn atr_pct(klines: &[Kline], period: usize) -> Option<f64> {
    let atr = latest_defined(&calculate_atr(klines, period))?;
    let last_close = klines.last()?.close;
    if last_close == 0.0 || !last_close.is_finite() {
        return None;
    }
    Some((atr / last_close) * 100.0)
}

fn bar_range(k: &Kline, prev_close: Option<f64>) -> f64 {
    if !k.high.is_finite() || !k.low.is_finite() || k.high < k.low {
        return f64::NAN;
    }
    let hl = k.high - k.low;
    match prev_close {
        Some(pc) => hl.max((k.high - pc).abs()).max((k.low - pc).abs()),
        None => hl,
    }
}
