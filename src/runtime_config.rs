// =============================================================================
// Indicator Configuration — window sets for snapshot bundles
// =============================================================================
//
// Holds the MACD periods and the per-timeframe indicator windows used when
// building snapshots.  The indicator functions themselves take no
// configuration; this document only drives the bundle builders and the
// diagnostic binary.
//
// Persistence uses an atomic tmp + rename pattern.  All fields carry
// `#[serde(default)]` so that a partial JSON file fills in the rest.
//
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::indicators::MacdConfig;
use crate::types::Timeframe;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_series_length() -> usize {
    10
}

fn default_intraday() -> FrameWindows {
    FrameWindows {
        ema: vec![20],
        rsi: vec![7, 14],
        atr: Vec::new(),
        change_lookback: 20,
    }
}

fn default_long_term() -> FrameWindows {
    FrameWindows {
        ema: vec![20, 50],
        rsi: vec![14],
        atr: vec![3, 14],
        change_lookback: 1,
    }
}

// =============================================================================
// FrameWindows
// =============================================================================

/// Indicator periods computed for one timeframe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameWindows {
    /// EMA periods, keyed `EMA{n}` in the bundle.
    #[serde(default)]
    pub ema: Vec<usize>,

    /// RSI periods, keyed `RSI{n}`.
    #[serde(default)]
    pub rsi: Vec<usize>,

    /// ATR periods, keyed `ATR{n}`.
    #[serde(default)]
    pub atr: Vec<usize>,

    /// Bars back used for the snapshot's price change.
    #[serde(default)]
    pub change_lookback: usize,
}

// =============================================================================
// IndicatorConfig
// =============================================================================

/// Top-level configuration for snapshot building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    /// MACD fast / slow / signal periods.
    #[serde(default)]
    pub macd: MacdConfig,

    /// Number of trailing values kept in every bundle series.
    #[serde(default = "default_series_length")]
    pub series_length: usize,

    #[serde(default = "default_intraday")]
    pub intraday: FrameWindows,

    #[serde(default = "default_long_term")]
    pub long_term: FrameWindows,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            macd: MacdConfig::default(),
            series_length: default_series_length(),
            intraday: default_intraday(),
            long_term: default_long_term(),
        }
    }
}

impl IndicatorConfig {
    /// Window set for `frame`.
    pub fn windows(&self, frame: Timeframe) -> &FrameWindows {
        match frame {
            Timeframe::Intraday => &self.intraday,
            Timeframe::LongTerm => &self.long_term,
        }
    }

    /// Load configuration from a JSON file at `path`.
    ///
    /// A missing file is an error so the caller can fall back to defaults
    /// with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read indicator config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse indicator config from {}", path.display()))?;

        info!(
            path = %path.display(),
            series_length = config.series_length,
            macd = ?config.macd,
            "indicator config loaded"
        );

        Ok(config)
    }

    /// Persist the configuration to `path` (write to `.tmp`, then rename).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content = serde_json::to_string_pretty(self)
            .context("failed to serialise indicator config to JSON")?;

        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp config to {}", tmp_path.display()))?;

        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to rename tmp config to {}", path.display()))?;

        info!(path = %path.display(), "indicator config saved (atomic)");
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let cfg = IndicatorConfig::default();
        assert_eq!(cfg.macd, MacdConfig::default());
        assert_eq!(cfg.series_length, 10);
        assert_eq!(cfg.intraday.ema, vec![20]);
        assert_eq!(cfg.intraday.rsi, vec![7, 14]);
        assert!(cfg.intraday.atr.is_empty());
        assert_eq!(cfg.intraday.change_lookback, 20);
        assert_eq!(cfg.long_term.ema, vec![20, 50]);
        assert_eq!(cfg.long_term.atr, vec![3, 14]);
        assert_eq!(cfg.long_term.change_lookback, 1);
    }

    #[test]
    fn deserialise_empty_json_uses_defaults() {
        let cfg: IndicatorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, IndicatorConfig::default());
    }

    #[test]
    fn deserialise_partial_json_fills_defaults() {
        let json = r#"{ "series_length": 5, "macd": { "signal": 4 }, "intraday": { "ema": [9] } }"#;
        let cfg: IndicatorConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.series_length, 5);
        assert_eq!(cfg.macd.signal, 4);
        assert_eq!(cfg.macd.fast, 12);
        assert_eq!(cfg.intraday.ema, vec![9]);
        assert!(cfg.intraday.rsi.is_empty());
        assert_eq!(cfg.long_term, default_long_term());
    }

    #[test]
    fn windows_selects_frame() {
        let cfg = IndicatorConfig::default();
        assert_eq!(cfg.windows(Timeframe::Intraday).rsi, vec![7, 14]);
        assert_eq!(cfg.windows(Timeframe::LongTerm).rsi, vec![14]);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("indicators.json");

        let mut cfg = IndicatorConfig::default();
        cfg.series_length = 3;
        cfg.save(&path).unwrap();

        assert!(!path.with_extension("json.tmp").exists());
        let loaded = IndicatorConfig::load(&path).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn load_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = IndicatorConfig::load(dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read indicator config"));
    }
}
