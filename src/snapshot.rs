// =============================================================================
// Market Snapshot Bundles
// =============================================================================
//
// Builds the per-timeframe indicator view that downstream consumers (prompt
// rendering, dashboards, storage) read for a single kline series:
//
//   - `SeriesBundle`: the trailing `series_length` values of every series;
//   - `IndicatorSummary`: the latest defined value of every series;
//   - `change`: fractional price change of the last close against the close
//     `change_lookback` bars earlier.
//
// Series that cannot be computed (too few bars for a window) are left out of
// the summary and appear as empty vectors in the bundle.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::indicators::series::{last_n, latest_defined};
use crate::indicators::{calculate_atr, calculate_ema, calculate_macd_with, calculate_rsi};
use crate::market_data::candle::{self, Candle};
use crate::runtime_config::IndicatorConfig;
use crate::types::Timeframe;

/// Trailing windows of every computed series, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeriesBundle {
    pub prices: Vec<f64>,
    pub ema: BTreeMap<String, Vec<f64>>,
    pub macd: Vec<f64>,
    pub rsi: BTreeMap<String, Vec<f64>>,
    pub atr: BTreeMap<String, Vec<f64>>,
    pub volume: Vec<f64>,
}

/// Latest defined value of every computed series.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IndicatorSummary {
    pub ema: BTreeMap<String, f64>,
    pub macd: Option<f64>,
    pub rsi: BTreeMap<String, f64>,
    pub atr: BTreeMap<String, f64>,
}

/// Full indicator view of one kline series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub frame: Timeframe,
    pub candles: usize,
    pub last_price: f64,
    /// Fractional change (0.01 == +1%), 0.0 when the lookback is unavailable.
    pub change: f64,
    pub indicators: IndicatorSummary,
    pub series: SeriesBundle,
}

/// Build the snapshot of `candles` (oldest first) with the windows configured
/// for `frame`.
///
/// Returns `None` when `candles` is empty.
pub fn build_snapshot(
    candles: &[Candle],
    frame: Timeframe,
    config: &IndicatorConfig,
) -> Option<Snapshot> {
    let last_price = candles.last()?.close;
    let windows = config.windows(frame);
    let keep = config.series_length;

    let closes = candle::closes(candles);
    let mut indicators = IndicatorSummary::default();
    let mut series = SeriesBundle {
        prices: last_n(&closes, keep),
        volume: last_n(&candle::volumes(candles), keep),
        ..SeriesBundle::default()
    };

    for &period in &windows.ema {
        let key = format!("EMA{period}");
        let values = calculate_ema(&closes, period);
        record(&key, &values, keep, &mut series.ema, &mut indicators.ema);
    }

    let macd = calculate_macd_with(&closes, &config.macd).macd;
    indicators.macd = latest_defined(&macd);
    series.macd = last_n(&macd, keep);

    for &period in &windows.rsi {
        let key = format!("RSI{period}");
        let values = calculate_rsi(&closes, period);
        record(&key, &values, keep, &mut series.rsi, &mut indicators.rsi);
    }

    if !windows.atr.is_empty() {
        let klines = candle::klines(candles);
        for &period in &windows.atr {
            let key = format!("ATR{period}");
            let values = calculate_atr(&klines, period);
            record(&key, &values, keep, &mut series.atr, &mut indicators.atr);
        }
    }

    let change = price_at(candles, windows.change_lookback)
        .map(|previous| price_change(last_price, previous))
        .unwrap_or(0.0);

    debug!(
        frame = %frame,
        candles = candles.len(),
        ema = indicators.ema.len(),
        rsi = indicators.rsi.len(),
        atr = indicators.atr.len(),
        "snapshot built"
    );

    Some(Snapshot {
        frame,
        candles: candles.len(),
        last_price,
        change,
        indicators,
        series,
    })
}

/// Fractional change from `previous` to `current` (0.01 == +1%).
///
/// Returns 0.0 when `previous` is zero.
pub fn price_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    (current - previous) / previous
}

/// Close of the candle `steps_back` bars before the last one.
///
/// Returns `None` when `steps_back` is zero or reaches past the first candle.
pub fn price_at(candles: &[Candle], steps_back: usize) -> Option<f64> {
    if steps_back == 0 || candles.len() <= steps_back {
        return None;
    }
    Some(candles[candles.len() - 1 - steps_back].close)
}

fn record(
    key: &str,
    values: &[f64],
    keep: usize,
    bundle: &mut BTreeMap<String, Vec<f64>>,
    summary: &mut BTreeMap<String, f64>,
) {
    if values.is_empty() {
        debug!(indicator = key, "insufficient data for window");
    }
    bundle.insert(key.to_string(), last_n(values, keep));
    if let Some(latest) = latest_defined(values) {
        summary.insert(key.to_string(), latest);
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn candles(n: usize) -> Vec<Candle> {
        (0..n)
            .map(|i| {
                let close = 100.0 + i as f64 + (i as f64 * 0.3).sin();
                Candle {
                    open_time: i as i64 * 180_000,
                    open: close - 0.2,
                    high: close + 1.5,
                    low: close - 1.5,
                    close,
                    volume: 1_000.0 + i as f64,
                }
            })
            .collect()
    }

    #[test]
    fn empty_input_has_no_snapshot() {
        let cfg = IndicatorConfig::default();
        assert!(build_snapshot(&[], Timeframe::Intraday, &cfg).is_none());
    }

    #[test]
    fn intraday_snapshot_keys_and_lengths() {
        let cfg = IndicatorConfig::default();
        let data = candles(40);
        let snap = build_snapshot(&data, Timeframe::Intraday, &cfg).unwrap();

        assert_eq!(snap.frame, Timeframe::Intraday);
        assert_eq!(snap.candles, 40);
        assert_eq!(snap.last_price, data[39].close);
        assert_eq!(snap.series.prices.len(), 10);
        assert_eq!(snap.series.volume.len(), 10);
        assert_eq!(snap.series.macd.len(), 10);
        assert_eq!(snap.series.ema["EMA20"].len(), 10);
        assert_eq!(snap.series.rsi["RSI7"].len(), 10);
        assert_eq!(snap.series.rsi["RSI14"].len(), 10);
        assert!(snap.series.atr.is_empty());

        assert!(snap.indicators.ema.contains_key("EMA20"));
        assert!(snap.indicators.rsi.contains_key("RSI7"));
        assert!(snap.indicators.macd.is_some());
        assert_eq!(*snap.series.prices.last().unwrap(), snap.last_price);
    }

    #[test]
    fn long_term_snapshot_omits_uncomputable_windows() {
        let cfg = IndicatorConfig::default();
        let snap = build_snapshot(&candles(30), Timeframe::LongTerm, &cfg).unwrap();

        // 30 bars: EMA50 cannot be computed.
        assert!(snap.series.ema["EMA50"].is_empty());
        assert!(!snap.indicators.ema.contains_key("EMA50"));
        assert!(snap.indicators.ema.contains_key("EMA20"));
        assert!(snap.indicators.atr.contains_key("ATR3"));
        assert!(snap.indicators.atr.contains_key("ATR14"));
        // MACD line is defined from index 25.
        assert!(snap.indicators.macd.is_some());
    }

    #[test]
    fn short_series_has_no_macd() {
        let cfg = IndicatorConfig::default();
        let snap = build_snapshot(&candles(5), Timeframe::Intraday, &cfg).unwrap();
        assert_eq!(snap.indicators.macd, None);
        assert_eq!(snap.series.macd.len(), 5);
        assert_eq!(snap.series.prices.len(), 5);
    }

    #[test]
    fn change_uses_configured_lookback() {
        let cfg = IndicatorConfig::default();
        let data = candles(30);
        let snap = build_snapshot(&data, Timeframe::LongTerm, &cfg).unwrap();
        let expected = (data[29].close - data[28].close) / data[28].close;
        assert!((snap.change - expected).abs() < 1e-12);

        let short = build_snapshot(&data[..10], Timeframe::Intraday, &cfg).unwrap();
        assert_eq!(short.change, 0.0);
    }

    #[test]
    fn price_change_guards_zero_base() {
        assert_eq!(price_change(10.0, 0.0), 0.0);
        assert!((price_change(110.0, 100.0) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn price_at_bounds() {
        let data = candles(3);
        assert_eq!(price_at(&data, 0), None);
        assert_eq!(price_at(&data, 3), None);
        assert_eq!(price_at(&data, 2), Some(data[0].close));
    }

    #[test]
    fn snapshot_serialises_nan_as_null() {
        let cfg = IndicatorConfig::default();
        let snap = build_snapshot(&candles(5), Timeframe::Intraday, &cfg).unwrap();
        let json = serde_json::to_value(&snap).unwrap();
        assert!(json["series"]["macd"][0].is_null());
        assert_eq!(json["frame"], "Intraday");
    }
}
