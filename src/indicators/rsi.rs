// =============================================================================
// Relative Strength Index (RSI) — Wilder's Smoothing
// =============================================================================
//
// RSI measures the speed and magnitude of recent price changes to evaluate
// whether an asset is overbought or oversold.
//
// Step 1 — Compute price changes (deltas) from consecutive closes.
// Step 2 — Seed average gain / average loss with the SMA of the first `period`
//          gains / losses.
// Step 3 — Apply Wilder's exponential smoothing:
//            avg_gain = (prev_avg_gain * (period - 1) + current_gain) / period
//            avg_loss = (prev_avg_loss * (period - 1) + current_loss) / period
// Step 4 — RS  = avg_gain / avg_loss
//          RSI = 100 - 100 / (1 + RS)
//
// Thresholds:  RSI >= 70 => OVERBOUGHT,  RSI <= 30 => OVERSOLD.
// =============================================================================

use super::smoothing::{Recurrence, Smoothing};

/// Qualitative reading of an RSI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsiZone {
    Overbought,
    Neutral,
    Oversold,
}

impl RsiZone {
    pub fn classify(rsi: f64) -> Self {
        if rsi >= 70.0 {
            Self::Overbought
        } else if rsi <= 30.0 {
            Self::Oversold
        } else {
            Self::Neutral
        }
    }
}

impl std::fmt::Display for RsiZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overbought => write!(f, "OVERBOUGHT"),
            Self::Neutral => write!(f, "NEUTRAL"),
            Self::Oversold => write!(f, "OVERSOLD"),
        }
    }
}

/// Compute the full RSI series for the given `closes` and `period`.
///
/// The result is aligned with `closes`: indices `0..period` are NaN and the
/// first value sits at index `period` (seeded from the first `period` deltas).
///
/// # Edge cases
/// - `period == 0` => empty vec
/// - `closes.len() <= period` => empty vec (need at least `period` deltas)
/// - No losses in the window => 100.0; no movement at all => 50.0.
/// - A delta touching a non-finite close is a gap: NaN at that index, the
///   averages carry over to the next defined delta.
pub fn calculate_rsi(closes: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || closes.len() <= period {
        return Vec::new();
    }

    let mut avg_gain = Recurrence::new(period, Smoothing::Wilder);
    let mut avg_loss = Recurrence::new(period, Smoothing::Wilder);

    let mut result = Vec::with_capacity(closes.len());
    result.push(f64::NAN);

    for w in closes.windows(2) {
        let delta = w[1] - w[0];
        let (gain, loss) = if delta.is_finite() {
            (delta.max(0.0), (-delta).max(0.0))
        } else {
            (f64::NAN, f64::NAN)
        };

        let g = avg_gain.push(gain);
        let l = avg_loss.push(loss);
        result.push(rsi_from_averages(g, l));
    }

    result
}

/// Return the most recent RSI value together with its zone.
///
/// Returns `None` when there is insufficient data or the latest delta is a
/// gap.
pub fn current_rsi(closes: &[f64], period: usize) -> Option<(f64, RsiZone)> {
    let series = calculate_rsi(closes, period);
    let value = *series.last()?;
    if !value.is_finite() {
        return None;
    }
    Some((value, RsiZone::classify(value)))
}

// =============================================================================
// Internal helpers
// =============================================================================

/// Convert average gain / average loss into an RSI value in [0, 100].
///
/// - If both averages are zero, RSI is 50.0 (no movement).
/// - If average loss is zero (only gains), RSI is 100.0.
/// - If average gain is zero (only losses), RSI is 0.0.
/// - NaN when either average is undefined (warm-up or gap).
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if !avg_gain.is_finite() || !avg_loss.is_finite() {
        return f64::NAN;
    }
    if avg_loss == 0.0 && avg_gain == 0.0 {
        50.0
    } else if avg_loss == 0.0 {
        100.0
    } else if avg_gain == 0.0 {
        0.0
    } else {
        let rs = avg_gain / avg_loss;
        (100.0 - 100.0 / (1.0 + rs)).clamp(0.0, 100.0)
    }
}
