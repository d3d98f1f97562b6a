// =============================================================================
// Kline TA — technical-analysis engine over OHLCV windows
// =============================================================================
//
// Turns an ascending bar window into moving averages, RSI, MACD, Bollinger
// Bands, volume ratio and support/resistance, then classifies the result
// into trend labels and level distances.  Every computation is a pure
// function of the bars and an immutable `IndicatorParams`.
// =============================================================================

pub mod analyzer;
pub mod classification;
pub mod indicators;
pub mod params;
pub mod runtime_config;
pub mod series;
pub mod snapshot;
pub mod source;
pub mod types;

pub use analyzer::{Analyzer, MarketAnalysis, SmaDistances};
pub use classification::TrendAnalysis;
pub use indicators::LevelsAnalysis;
pub use params::{IndicatorParams, ParamOverrides, Profile};
pub use snapshot::{compute_snapshot, TechnicalSnapshot};
pub use source::{BarSource, JsonFileSource};
pub use types::{Bar, Reading};
