// =============================================================================
// Kline TA — Main Entry Point
// =============================================================================
//
// Loads the runtime config, binds one analyzer per configured instrument and
// analyses each instrument's latest bar window on its own task.
// =============================================================================

use std::sync::Arc;

use anyhow::Result;
use tokio::task::JoinSet;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use kline_ta::runtime_config::{InstrumentConfig, RuntimeConfig};
use kline_ta::{Analyzer, BarSource, JsonFileSource, MarketAnalysis, Profile};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path = std::env::var("TA_CONFIG").unwrap_or_else(|_| "ta_config.json".into());
    let mut config = RuntimeConfig::load(&config_path).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        RuntimeConfig::default()
    });

    // Override instruments / profile from env if available.
    if let Ok(syms) = std::env::var("TA_SYMBOLS") {
        let symbols: Vec<String> = syms
            .split(',')
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .collect();
        if !symbols.is_empty() {
            config.instruments = symbols.into_iter().map(InstrumentConfig::new).collect();
        }
    }
    if let Ok(profile) = std::env::var("TA_PROFILE") {
        config.default_profile = profile.parse::<Profile>()?;
    }
    config.validate()?;

    info!(
        instruments = config.instruments.len(),
        timeframe = %config.timeframe,
        default_profile = %config.default_profile,
        "Starting analysis"
    );

    // ── 2. One analyzer per instrument ───────────────────────────────────
    let source: Arc<dyn BarSource> = Arc::new(JsonFileSource::new(&config.bars_dir));
    let mut tasks = JoinSet::new();

    for instrument in &config.instruments {
        let params = match config.params_for(instrument) {
            Ok(p) => p,
            Err(e) => {
                error!(symbol = %instrument.symbol, error = %format!("{e:#}"), "Skipping instrument");
                continue;
            }
        };
        let analyzer = Analyzer::new(instrument.symbol.clone(), config.timeframe.clone(), params);
        let source = source.clone();
        let limit = config.data_points;

        tasks.spawn_blocking(move || run_instrument(source.as_ref(), &analyzer, limit));
    }

    // ── 3. Report ────────────────────────────────────────────────────────
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((_, Ok(Some(analysis)))) => report(&analysis),
            Ok((symbol, Ok(None))) => {
                warn!(symbol = %symbol, "Bar source returned no bars, no analysis produced")
            }
            Ok((symbol, Err(e))) => {
                error!(symbol = %symbol, error = %format!("{e:#}"), "Analysis failed")
            }
            Err(e) => error!(error = %e, "Analysis task panicked"),
        }
    }

    Ok(())
}

/// Fetch and analyse one instrument. The symbol travels with the outcome so
/// every report line can name its instrument.
fn run_instrument(
    source: &dyn BarSource,
    analyzer: &Analyzer,
    limit: usize,
) -> (String, Result<Option<MarketAnalysis>>) {
    let outcome = source
        .fetch_bars(analyzer.symbol(), analyzer.timeframe(), limit)
        .map(|bars| analyzer.analyze(&bars));
    (analyzer.symbol().to_string(), outcome)
}

fn report(analysis: &MarketAnalysis) {
    let snap = &analysis.snapshot;
    info!(
        symbol = %analysis.symbol,
        timeframe = %analysis.timeframe,
        price = analysis.price,
        change_pct = ?analysis.price_change_pct,
        rsi = %snap.rsi,
        macd = format!("{:.4}", snap.macd.line),
        macd_signal = %snap.macd.signal,
        bb_position = %snap.bollinger.position,
        volume_ratio = %snap.volume.ratio,
        trend = %analysis.trend.overall,
        macd_bias = %analysis.trend.macd,
        resistance = analysis.levels.static_resistance,
        support = analysis.levels.static_support,
        "Analysis complete"
    );

    match serde_json::to_string(analysis) {
        Ok(json) => tracing::debug!(symbol = %analysis.symbol, %json, "Full analysis"),
        Err(e) => warn!(error = %e, "Failed to serialise analysis"),
    }
}
