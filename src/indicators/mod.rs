// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of every indicator stage.  Each
// function is a deterministic function of its input slices and parameters;
// short or degenerate input resolves to a documented fallback rather than an
// error, and fallbacks are tagged via `Reading` where callers need to tell
// them apart from computed values.

pub mod bollinger;
pub mod levels;
pub mod macd;
pub mod moving_average;
pub mod rsi;
pub mod volume;

pub use bollinger::{calculate_bollinger, BollingerResult};
pub use levels::{analyze_levels, LevelsAnalysis};
pub use macd::{calculate_macd, MacdResult};
pub use moving_average::{calculate_ema, calculate_sma};
pub use rsi::calculate_rsi;
pub use volume::{calculate_volume, VolumeResult};
