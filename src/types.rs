// =============================================================================
// Shared types used across the kline analytics engine
// =============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One sampled period of market activity (OHLCV).
///
/// Sequences of bars are expected in ascending timestamp order; the engine
/// never sorts them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: f64,
}

/// A numeric indicator output that is either genuinely computed or a
/// configured substitute applied because the input was too short or
/// numerically degenerate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Reading {
    Computed(f64),
    Fallback(f64),
}

impl Reading {
    /// The numeric value, regardless of how it was produced.
    pub fn value(self) -> f64 {
        match self {
            Self::Computed(v) | Self::Fallback(v) => v,
        }
    }

    pub fn is_fallback(self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

impl std::fmt::Display for Reading {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Computed(v) => write!(f, "{v:.4}"),
            Self::Fallback(v) => write!(f, "{v:.4} (fallback)"),
        }
    }
}

/// Direction of price relative to a moving average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Up,
    Down,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Up => write!(f, "UP"),
            Self::Down => write!(f, "DOWN"),
        }
    }
}

/// MACD line relative to its signal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MacdBias {
    Bullish,
    Bearish,
}

impl std::fmt::Display for MacdBias {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bullish => write!(f, "BULLISH"),
            Self::Bearish => write!(f, "BEARISH"),
        }
    }
}

/// Composite of the short- and medium-term trends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverallTrend {
    StrongUp,
    StrongDown,
    Ranging,
}

impl std::fmt::Display for OverallTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StrongUp => write!(f, "STRONG_UP"),
            Self::StrongDown => write!(f, "STRONG_DOWN"),
            Self::Ranging => write!(f, "RANGING"),
        }
    }
}

/// Overbought / oversold bucket of an RSI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RsiZone {
    Overbought,
    Neutral,
    Oversold,
}

impl std::fmt::Display for RsiZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overbought => write!(f, "OVERBOUGHT"),
            Self::Neutral => write!(f, "NEUTRAL"),
            Self::Oversold => write!(f, "OVERSOLD"),
        }
    }
}

/// Which third of the Bollinger channel the latest close sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BandZone {
    Upper,
    Middle,
    Lower,
}

impl std::fmt::Display for BandZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Upper => write!(f, "UPPER"),
            Self::Middle => write!(f, "MIDDLE"),
            Self::Lower => write!(f, "LOWER"),
        }
    }
}
