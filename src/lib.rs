// =============================================================================
// Kline Indicators — technical-indicator computation engine
// =============================================================================
//
// EMA, MACD, RSI and ATR as pure functions over ordered price / OHLC slices,
// plus the snapshot bundles built from them.  The library does no I/O apart
// from `IndicatorConfig::load` / `save`.
// =============================================================================

pub mod indicators;
pub mod market_data;
pub mod runtime_config;
pub mod snapshot;
pub mod types;

pub use indicators::{
    atr_pct, calculate_atr, calculate_atr_with, calculate_ema, calculate_macd,
    calculate_macd_with, calculate_rsi, current_rsi, latest_ema, true_range, MacdConfig,
    MacdSeries, RsiZone, Smoothing,
};
pub use market_data::{Candle, Kline};
pub use runtime_config::{FrameWindows, IndicatorConfig};
pub use snapshot::{build_snapshot, IndicatorSummary, SeriesBundle, Snapshot};
pub use types::Timeframe;
