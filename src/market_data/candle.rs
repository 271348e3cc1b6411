use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// The high / low / close triple that ATR consumes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kline {
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// A single OHLCV candle as delivered by an upstream market snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Bar open time, milliseconds since the Unix epoch.
    #[serde(default)]
    pub open_time: i64,
    #[serde(default)]
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: f64,
}

impl Candle {
    /// Project onto the triple used by ATR (open and volume are dropped).
    pub fn kline(&self) -> Kline {
        Kline {
            high: self.high,
            low: self.low,
            close: self.close,
        }
    }

    /// Open time as a UTC timestamp, `None` when out of chrono's range.
    pub fn opened_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.open_time)
    }
}

/// Close prices, oldest first.
pub fn closes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.close).collect()
}

/// Volumes, oldest first.
pub fn volumes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.volume).collect()
}

/// High / low / close triples, oldest first.
pub fn klines(candles: &[Candle]) -> Vec<Kline> {
    candles.iter().map(Candle::kline).collect()
}
