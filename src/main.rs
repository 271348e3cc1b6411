// =============================================================================
// Kline Indicators — diagnostic entry point
// =============================================================================
//
// Reads a JSON array of candles, builds the intraday and long-term snapshots
// and prints them as JSON on stdout.
//
//   kline-indicators <klines.json> [config.json]
//
// The klines path may also come from INDICATOR_KLINES, the config path from
// INDICATOR_CONFIG (both honoured from a `.env` file).
// =============================================================================

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use kline_indicators::{build_snapshot, Candle, IndicatorConfig, Snapshot, Timeframe};

#[derive(Debug, Serialize)]
struct Report {
    intraday: Option<Snapshot>,
    long_term: Option<Snapshot>,
}

fn main() -> Result<()> {
    // ── 1. Environment & logging ─────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let klines_path = args
        .next()
        .or_else(|| std::env::var("INDICATOR_KLINES").ok())
        .map(PathBuf::from)
        .context("usage: kline-indicators <klines.json> [config.json]")?;
    let config_path = args
        .next()
        .or_else(|| std::env::var("INDICATOR_CONFIG").ok())
        .unwrap_or_else(|| "indicators.json".into());

    // ── 2. Config ────────────────────────────────────────────────────────
    let config = IndicatorConfig::load(&config_path).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        IndicatorConfig::default()
    });

    // ── 3. Candles ───────────────────────────────────────────────────────
    let content = std::fs::read_to_string(&klines_path)
        .with_context(|| format!("failed to read klines from {}", klines_path.display()))?;
    let candles: Vec<Candle> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse klines from {}", klines_path.display()))?;

    let first = candles.first().and_then(Candle::opened_at);
    let last = candles.last().and_then(Candle::opened_at);
    info!(
        path = %klines_path.display(),
        count = candles.len(),
        from = ?first,
        to = ?last,
        "klines loaded"
    );
    if candles.is_empty() {
        warn!("no candles in input, nothing to compute");
    }

    // ── 4. Snapshots ─────────────────────────────────────────────────────
    let report = Report {
        intraday: build_snapshot(&candles, Timeframe::Intraday, &config),
        long_term: build_snapshot(&candles, Timeframe::LongTerm, &config),
    };

    let json = serde_json::to_string_pretty(&report).context("failed to serialise report")?;
    println!("{json}");

    Ok(())
}
