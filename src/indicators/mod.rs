// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the indicators behind the market
// snapshots.  Every public function takes a borrowed slice and returns an
// owned series aligned with its input; an empty result means "not
// computable" (zero period or too little data), never zero-filled data.

pub mod atr;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod series;
pub mod smoothing;

pub use atr::{atr_pct, calculate_atr, calculate_atr_with, true_range};
pub use ema::{calculate_ema, latest_ema};
pub use macd::{calculate_macd, calculate_macd_with, MacdConfig, MacdSeries};
pub use rsi::{calculate_rsi, current_rsi, RsiZone};
pub use smoothing::Smoothing;
