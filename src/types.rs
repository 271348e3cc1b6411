// =============================================================================
// Shared types used across the indicator crate
// =============================================================================

use serde::{Deserialize, Serialize};

/// Which window set a snapshot is built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    /// Short bars (e.g. 3m): EMA20, RSI7/RSI14.
    Intraday,
    /// Long bars (e.g. 4h): EMA20/EMA50, RSI14, ATR3/ATR14.
    LongTerm,
}

impl Default for Timeframe {
    fn default() -> Self {
        Self::Intraday
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Intraday => write!(f, "Intraday"),
            Self::LongTerm => write!(f, "LongTerm"),
        }
    }
}
