// =============================================================================
// Moving Average Convergence / Divergence (MACD)
// =============================================================================
//
//   MACD line  = EMA(fast) - EMA(slow)
//   Signal     = EMA(MACD line, signal)
//   Histogram  = MACD line - Signal
//
// Unlike plain EMA, every MACD output has the same length as the input
// whenever the input is non-empty; undefined positions are NaN.
// =============================================================================

use serde::{Deserialize, Serialize};

use super::ema::calculate_ema;
use super::series::{difference, undefined};

fn default_fast() -> usize {
    12
}

fn default_slow() -> usize {
    26
}

fn default_signal() -> usize {
    9
}

/// Look-back periods of the three EMAs behind MACD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacdConfig {
    /// Fast EMA period (default 12).
    #[serde(default = "default_fast")]
    pub fast: usize,
    /// Slow EMA period (default 26).
    #[serde(default = "default_slow")]
    pub slow: usize,
    /// Signal-line EMA period (default 9).
    #[serde(default = "default_signal")]
    pub signal: usize,
}

impl Default for MacdConfig {
    fn default() -> Self {
        Self {
            fast: default_fast(),
            slow: default_slow(),
            signal: default_signal(),
        }
    }
}

/// The three MACD output series, each `len(closes)` long.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MacdSeries {
    pub macd: Vec<f64>,
    pub signal: Vec<f64>,
    pub histogram: Vec<f64>,
}

impl MacdSeries {
    pub fn len(&self) -> usize {
        self.macd.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macd.is_empty()
    }
}

/// Compute MACD with the canonical 12 / 26 / 9 periods.
pub fn calculate_macd(closes: &[f64]) -> MacdSeries {
    calculate_macd_with(closes, &MacdConfig::default())
}

/// Compute MACD with explicit periods.
///
/// # Edge cases
/// - Empty `closes` => three empty vecs.
/// - Input shorter than a period => that EMA is all NaN, so the dependent
///   outputs are all NaN (still `len(closes)` long).
pub fn calculate_macd_with(closes: &[f64], config: &MacdConfig) -> MacdSeries {
    if closes.is_empty() {
        return MacdSeries::default();
    }

    let fast = ema_full_length(closes, config.fast);
    let slow = ema_full_length(closes, config.slow);
    let macd = difference(&fast, &slow);

    let signal = ema_full_length(&macd, config.signal);
    let histogram = difference(&macd, &signal);

    MacdSeries {
        macd,
        signal,
        histogram,
    }
}

/// EMA normalised to `values.len()`: the empty "insufficient data" result
/// becomes an all-NaN series so MACD operands always line up.
fn ema_full_length(values: &[f64], period: usize) -> Vec<f64> {
    let ema = calculate_ema(values, period);
    if ema.is_empty() {
        undefined(values.len())
    } else {
        ema
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn trend(n: usize) -> Vec<f64> {
        (0..n).map(|i| 100.0 + i as f64 + (i as f64 * 0.4).sin() * 2.0).collect()
    }

    #[test]
    fn macd_empty_input() {
        let out = calculate_macd(&[]);
        assert!(out.macd.is_empty());
        assert!(out.signal.is_empty());
        assert!(out.histogram.is_empty());
        assert!(out.is_empty());
    }

    #[test]
    fn macd_short_input_is_nan_padded() {
        let closes = [100.0, 101.0, 102.0];
        let out = calculate_macd(&closes);
        assert_eq!(out.macd.len(), 3);
        assert_eq!(out.signal.len(), 3);
        assert_eq!(out.histogram.len(), 3);
        assert!(out.macd.iter().all(|v| v.is_nan()));
        assert!(out.signal.iter().all(|v| v.is_nan()));
        assert!(out.histogram.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn macd_between_slow_and_signal_warmup() {
        // 30 closes: MACD line defined from index 25, signal needs 9 of them.
        let out = calculate_macd(&trend(30));
        assert_eq!(out.len(), 30);
        assert!(out.macd[24].is_nan());
        assert!(out.macd[25].is_finite());
        assert!(out.signal.iter().all(|v| v.is_nan()));
        assert!(out.histogram.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn signal_seeds_after_first_complete_macd_window() {
        let out = calculate_macd(&trend(40));
        assert!(out.signal[32].is_nan());
        assert!(out.signal[33].is_finite());

        let seed: f64 = out.macd[25..34].iter().sum::<f64>() / 9.0;
        assert!((out.signal[33] - seed).abs() < 1e-9);
    }

    #[test]
    fn histogram_identity() {
        let out = calculate_macd(&trend(120));
        for i in 0..out.len() {
            if out.histogram[i].is_finite() {
                let diff = out.macd[i] - out.signal[i];
                assert!((out.histogram[i] - diff).abs() < 1e-6, "index {i}");
            }
        }
    }

    #[test]
    fn custom_periods_are_honoured() {
        let cfg = MacdConfig {
            fast: 3,
            slow: 5,
            signal: 2,
        };
        let closes: Vec<f64> = (1..=10).map(|x| x as f64).collect();
        let out = calculate_macd_with(&closes, &cfg);
        assert!(out.macd[3].is_nan());
        assert!(out.macd[4].is_finite());
        assert!(out.signal[4].is_nan());
        assert!(out.signal[5].is_finite());
    }

    #[test]
    fn macd_gap_in_input_yields_nan_at_gap() {
        let mut closes = trend(80);
        closes[60] = f64::NAN;
        let out = calculate_macd(&closes);
        assert_eq!(out.len(), 80);
        assert!(out.macd[60].is_nan());
        assert!(out.histogram[60].is_nan());
        assert!(out.macd[61].is_finite());
        assert!(out.signal[61].is_finite());
        assert!(out.histogram[79].is_finite());
    }

    #[test]
    fn default_config_is_12_26_9() {
        let cfg = MacdConfig::default();
        assert_eq!((cfg.fast, cfg.slow, cfg.signal), (12, 26, 9));
    }

    #[test]
    fn config_deserialises_with_defaults() {
        let cfg: MacdConfig = serde_json::from_str(r#"{ "fast": 5 }"#).unwrap();
        assert_eq!(cfg.fast, 5);
        assert_eq!(cfg.slow, 26);
        assert_eq!(cfg.signal, 9);
    }
}
