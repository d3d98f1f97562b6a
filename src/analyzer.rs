// =============================================================================
// Analyzer — per-instrument computation context
// =============================================================================
//
// Binds one immutable `IndicatorParams` to one instrument.  Distinct
// instruments get distinct analyzers; nothing is shared between them and no
// state survives between calls.  Every entry point returns `None` for an
// empty bar sequence so "no data" is never mistaken for zero-valued
// indicators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::classification::{classify, TrendAnalysis};
use crate::indicators::{analyze_levels, LevelsAnalysis};
use crate::params::IndicatorParams;
use crate::series::PriceSeries;
use crate::snapshot::{compute_from_series, TechnicalSnapshot};
use crate::types::Bar;

/// Percent distance of the latest close from each SMA.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmaDistances {
    pub short: f64,
    pub medium: f64,
    pub long: f64,
}

impl SmaDistances {
    /// `(price - sma) / sma * 100` for each average; `0.0` where the average
    /// is not positive.
    pub fn new(price: f64, snapshot: &TechnicalSnapshot) -> Self {
        let pct = |sma: f64| {
            if sma > 0.0 {
                (price - sma) / sma * 100.0
            } else {
                0.0
            }
        };
        Self {
            short: pct(snapshot.sma_short),
            medium: pct(snapshot.sma_medium),
            long: pct(snapshot.sma_long),
        }
    }
}

/// Latest bar summary plus every derived analysis for one instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketAnalysis {
    pub symbol: String,
    /// Kline interval the bars were sampled at (e.g. "15m").
    pub timeframe: String,
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    pub high: f64,
    pub low: f64,
    pub volume: f64,
    /// Percent change of the latest close against the previous close.
    /// `None` with a single bar or a non-positive previous close.
    pub price_change_pct: Option<f64>,
    pub sma_distances: SmaDistances,
    pub snapshot: TechnicalSnapshot,
    pub trend: TrendAnalysis,
    pub levels: LevelsAnalysis,
}

/// Indicator engine bound to one instrument and one parameter set.
#[derive(Debug, Clone)]
pub struct Analyzer {
    symbol: String,
    timeframe: String,
    params: IndicatorParams,
}

impl Analyzer {
    pub fn new(symbol: impl Into<String>, timeframe: impl Into<String>, params: IndicatorParams) -> Self {
        Self {
            symbol: symbol.into(),
            timeframe: timeframe.into(),
            params,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn timeframe(&self) -> &str {
        &self.timeframe
    }

    pub fn params(&self) -> &IndicatorParams {
        &self.params
    }

    /// Compute every indicator over `bars`.
    pub fn snapshot(&self, bars: &[Bar]) -> Option<TechnicalSnapshot> {
        let series = PriceSeries::from_bars(bars);
        compute_from_series(&series, &self.params)
    }

    /// Classify `snapshot` against the latest close in `bars`.
    pub fn trend_analysis(&self, bars: &[Bar], snapshot: &TechnicalSnapshot) -> Option<TrendAnalysis> {
        let price = bars.last()?.close;
        Some(classify(snapshot, price))
    }

    /// Static levels over the lookback window plus the snapshot's bands.
    pub fn levels_analysis(&self, bars: &[Bar], snapshot: &TechnicalSnapshot) -> Option<LevelsAnalysis> {
        let price = bars.last()?.close;
        let series = PriceSeries::from_bars(bars);
        Some(analyze_levels(
            &series.highs,
            &series.lows,
            self.params.levels_lookback,
            price,
            &snapshot.bollinger,
        ))
    }

    /// Run the whole pipeline and bundle the results with the latest bar.
    pub fn analyze(&self, bars: &[Bar]) -> Option<MarketAnalysis> {
        let Some(current) = bars.last() else {
            debug!(symbol = %self.symbol, "no bars supplied, skipping analysis");
            return None;
        };

        let series = PriceSeries::from_bars(bars);
        let snapshot = compute_from_series(&series, &self.params)?;
        trace!(symbol = %self.symbol, ?snapshot, "snapshot computed");

        let price = current.close;
        let trend = classify(&snapshot, price);
        let levels = analyze_levels(
            &series.highs,
            &series.lows,
            self.params.levels_lookback,
            price,
            &snapshot.bollinger,
        );

        let price_change_pct = bars
            .len()
            .checked_sub(2)
            .map(|i| bars[i].close)
            .filter(|&prev| prev > 0.0)
            .map(|prev| (price - prev) / prev * 100.0);

        debug!(
            symbol = %self.symbol,
            bars = bars.len(),
            price,
            rsi = %snapshot.rsi,
            overall = %trend.overall,
            macd = %trend.macd,
            "analysis complete"
        );

        Some(MarketAnalysis {
            symbol: self.symbol.clone(),
            timeframe: self.timeframe.clone(),
            timestamp: current.timestamp,
            price,
            high: current.high,
            low: current.low,
            volume: current.volume,
            price_change_pct,
            sma_distances: SmaDistances::new(price, &snapshot),
            snapshot,
            trend,
            levels,
        })
    }
}
