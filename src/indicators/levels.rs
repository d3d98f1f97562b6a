// =============================================================================
// Support / Resistance Levels
// =============================================================================
//
// Static levels are the extremes of the trailing lookback window:
//   resistance = max(high[-lookback..])
//   support    = min(low[-lookback..])
//
// Dynamic levels reuse the Bollinger upper / lower bands.  Distances are
// expressed as percentages of the current price (resistance) and of the
// support level respectively:
//   price_vs_resistance = (resistance - price) / price * 100   (room above)
//   price_vs_support    = (price - support) / support * 100    (height above floor)
// =============================================================================

use serde::{Deserialize, Serialize};

use crate::indicators::bollinger::BollingerResult;

/// Static and dynamic levels plus the current price's distance from them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelsAnalysis {
    pub static_resistance: f64,
    pub static_support: f64,
    pub dynamic_resistance: f64,
    pub dynamic_support: f64,
    pub price_vs_resistance: f64,
    pub price_vs_support: f64,
}

/// Return `(resistance, support)` over the last `min(lookback, len)` bars.
///
/// When the window is empty both levels collapse onto `price`.
pub fn static_levels(highs: &[f64], lows: &[f64], lookback: usize, price: f64) -> (f64, f64) {
    let window = lookback.min(highs.len()).min(lows.len());
    if window == 0 {
        return (price, price);
    }

    let resistance = highs[highs.len() - window..]
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    let support = lows[lows.len() - window..]
        .iter()
        .copied()
        .fold(f64::INFINITY, f64::min);

    (resistance, support)
}

/// Percentage distances `(price_vs_resistance, price_vs_support)`.
///
/// Each side is `0.0` when its denominator is not positive.
pub fn level_distances(price: f64, resistance: f64, support: f64) -> (f64, f64) {
    let to_resistance = if price > 0.0 {
        (resistance - price) / price * 100.0
    } else {
        0.0
    };
    let to_support = if support > 0.0 {
        (price - support) / support * 100.0
    } else {
        0.0
    };
    (to_resistance, to_support)
}

/// Combine static levels over the lookback window with the Bollinger bands.
pub fn analyze_levels(
    highs: &[f64],
    lows: &[f64],
    lookback: usize,
    price: f64,
    bands: &BollingerResult,
) -> LevelsAnalysis {
    let (static_resistance, static_support) = static_levels(highs, lows, lookback, price);
    let (price_vs_resistance, price_vs_support) =
        level_distances(price, static_resistance, static_support);

    LevelsAnalysis {
        static_resistance,
        static_support,
        dynamic_resistance: bands.upper,
        dynamic_support: bands.lower,
        price_vs_resistance,
        price_vs_support,
    }
}
