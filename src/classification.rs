// =============================================================================
// Trend Classification
// =============================================================================
//
// Maps a technical snapshot plus the latest close onto categorical labels.
//
// Decision rule (strict inequalities, so every comparison is binary):
//   short_term  = UP   if price > SMA(medium)   else DOWN
//   medium_term = UP   if price > SMA(long)     else DOWN
//   macd        = BULLISH if line > signal      else BEARISH
//   overall     = STRONG_UP when both trends are UP,
//                 STRONG_DOWN when both are DOWN, otherwise RANGING
//
// RSI and band zones bucket the oscillator readings:
//   RSI  > 70 => OVERBOUGHT,  < 30 => OVERSOLD
//   band > 0.7 => UPPER,      < 0.3 => LOWER

use serde::{Deserialize, Serialize};

use crate::snapshot::TechnicalSnapshot;
use crate::types::{BandZone, MacdBias, OverallTrend, RsiZone, Trend};

const RSI_OVERBOUGHT: f64 = 70.0;
const RSI_OVERSOLD: f64 = 30.0;
const BAND_UPPER_ZONE: f64 = 0.7;
const BAND_LOWER_ZONE: f64 = 0.3;

/// Categorical view of one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendAnalysis {
    pub short_term: Trend,
    pub medium_term: Trend,
    pub macd: MacdBias,
    pub overall: OverallTrend,
    pub rsi_level: f64,
    pub rsi_zone: RsiZone,
    pub band_zone: BandZone,
}

pub fn classify(snapshot: &TechnicalSnapshot, price: f64) -> TrendAnalysis {
    let short_term = trend_against(price, snapshot.sma_medium);
    let medium_term = trend_against(price, snapshot.sma_long);

    let macd = if snapshot.macd.line > snapshot.macd.signal.value() {
        MacdBias::Bullish
    } else {
        MacdBias::Bearish
    };

    let overall = match (short_term, medium_term) {
        (Trend::Up, Trend::Up) => OverallTrend::StrongUp,
        (Trend::Down, Trend::Down) => OverallTrend::StrongDown,
        _ => OverallTrend::Ranging,
    };

    let rsi_level = snapshot.rsi.value();

    TrendAnalysis {
        short_term,
        medium_term,
        macd,
        overall,
        rsi_level,
        rsi_zone: rsi_zone(rsi_level),
        band_zone: band_zone(snapshot.bollinger.position.value()),
    }
}

fn trend_against(price: f64, average: f64) -> Trend {
    if price > average {
        Trend::Up
    } else {
        Trend::Down
    }
}

pub fn rsi_zone(rsi: f64) -> RsiZone {
    if rsi > RSI_OVERBOUGHT {
        RsiZone::Overbought
    } else if rsi < RSI_OVERSOLD {
        RsiZone::Oversold
    } else {
        RsiZone::Neutral
    }
}

pub fn band_zone(position: f64) -> BandZone {
    if position > BAND_UPPER_ZONE {
        BandZone::Upper
    } else if position < BAND_LOWER_ZONE {
        BandZone::Lower
    } else {
        BandZone::Middle
    }
}
