// =============================================================================
// Indicator Parameter Set — immutable periods, multipliers and fallbacks
// =============================================================================
//
// One `IndicatorParams` value is bound to each analysed instrument.  It is
// never mutated after construction, so a single instance may be shared by
// concurrent computations.  Three named presets are provided; any field may
// be tuned per instrument through `ParamOverrides`.
//
// All fields carry `#[serde(default)]` pointing at the "default" preset so
// that a partial JSON object always deserialises into a complete set.
// =============================================================================

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_sma_short_period() -> usize {
    5
}

fn default_sma_medium_period() -> usize {
    20
}

fn default_sma_long_period() -> usize {
    50
}

fn default_ema_fast_period() -> usize {
    12
}

fn default_ema_slow_period() -> usize {
    26
}

fn default_macd_signal_period() -> usize {
    9
}

fn default_rsi_period() -> usize {
    14
}

fn default_rsi_neutral_value() -> f64 {
    50.0
}

fn default_rsi_max_value() -> f64 {
    100.0
}

fn default_bb_period() -> usize {
    20
}

fn default_bb_std_dev() -> f64 {
    2.0
}

fn default_bb_min_threshold() -> f64 {
    0.0001
}

fn default_bb_default_position() -> f64 {
    0.5
}

fn default_bb_upper_adjust() -> f64 {
    1.001
}

fn default_bb_lower_adjust() -> f64 {
    0.999
}

fn default_volume_ma_period() -> usize {
    20
}

fn default_volume_ratio() -> f64 {
    1.0
}

fn default_levels_lookback() -> usize {
    20
}

// =============================================================================
// Profile
// =============================================================================

/// Named parameter presets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Industry-standard periods.
    #[default]
    Default,
    /// Shorter periods and lookback; reacts faster to new bars.
    Aggressive,
    /// Longer periods and lookback plus a wider band multiplier.
    Conservative,
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Aggressive => write!(f, "aggressive"),
            Self::Conservative => write!(f, "conservative"),
        }
    }
}

impl std::str::FromStr for Profile {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "aggressive" => Ok(Self::Aggressive),
            "conservative" => Ok(Self::Conservative),
            other => bail!("unknown indicator profile '{other}' (expected default, aggressive or conservative)"),
        }
    }
}

impl Profile {
    pub fn params(self) -> IndicatorParams {
        match self {
            Self::Default => IndicatorParams::default(),
            Self::Aggressive => IndicatorParams::aggressive(),
            Self::Conservative => IndicatorParams::conservative(),
        }
    }
}

// =============================================================================
// IndicatorParams
// =============================================================================

/// Periods, multipliers and fallback values for one analysed instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorParams {
    // --- Simple moving averages ---------------------------------------------

    /// Short SMA (5-period equivalent).
    #[serde(default = "default_sma_short_period")]
    pub sma_short_period: usize,

    /// Medium SMA (20-period equivalent); drives the short-term trend label.
    #[serde(default = "default_sma_medium_period")]
    pub sma_medium_period: usize,

    /// Long SMA (50-period equivalent); drives the medium-term trend label.
    #[serde(default = "default_sma_long_period")]
    pub sma_long_period: usize,

    // --- Exponential moving averages ----------------------------------------

    #[serde(default = "default_ema_fast_period")]
    pub ema_fast_period: usize,

    #[serde(default = "default_ema_slow_period")]
    pub ema_slow_period: usize,

    // --- MACD ---------------------------------------------------------------

    #[serde(default = "default_ema_fast_period")]
    pub macd_fast_period: usize,

    #[serde(default = "default_ema_slow_period")]
    pub macd_slow_period: usize,

    #[serde(default = "default_macd_signal_period")]
    pub macd_signal_period: usize,

    // --- RSI ----------------------------------------------------------------

    #[serde(default = "default_rsi_period")]
    pub rsi_period: usize,

    /// Returned when history is too short or the series is flat.
    #[serde(default = "default_rsi_neutral_value")]
    pub rsi_neutral_value: f64,

    /// Oscillator ceiling.
    #[serde(default = "default_rsi_max_value")]
    pub rsi_max_value: f64,

    // --- Bollinger Bands ----------------------------------------------------

    #[serde(default = "default_bb_period")]
    pub bb_period: usize,

    /// Standard-deviation multiplier for the band offset.
    #[serde(default = "default_bb_std_dev")]
    pub bb_std_dev: f64,

    /// Band widths at or below this yield `bb_default_position`.
    #[serde(default = "default_bb_min_threshold")]
    pub bb_min_threshold: f64,

    #[serde(default = "default_bb_default_position")]
    pub bb_default_position: f64,

    /// Applied to the middle band when the window has zero variance.
    #[serde(default = "default_bb_upper_adjust")]
    pub bb_upper_adjust: f64,

    #[serde(default = "default_bb_lower_adjust")]
    pub bb_lower_adjust: f64,

    // --- Volume -------------------------------------------------------------

    #[serde(default = "default_volume_ma_period")]
    pub volume_ma_period: usize,

    /// Returned when the volume average is zero.
    #[serde(default = "default_volume_ratio")]
    pub default_volume_ratio: f64,

    // --- Support / resistance -----------------------------------------------

    #[serde(default = "default_levels_lookback")]
    pub levels_lookback: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            sma_short_period: default_sma_short_period(),
            sma_medium_period: default_sma_medium_period(),
            sma_long_period: default_sma_long_period(),
            ema_fast_period: default_ema_fast_period(),
            ema_slow_period: default_ema_slow_period(),
            macd_fast_period: default_ema_fast_period(),
            macd_slow_period: default_ema_slow_period(),
            macd_signal_period: default_macd_signal_period(),
            rsi_period: default_rsi_period(),
            rsi_neutral_value: default_rsi_neutral_value(),
            rsi_max_value: default_rsi_max_value(),
            bb_period: default_bb_period(),
            bb_std_dev: default_bb_std_dev(),
            bb_min_threshold: default_bb_min_threshold(),
            bb_default_position: default_bb_default_position(),
            bb_upper_adjust: default_bb_upper_adjust(),
            bb_lower_adjust: default_bb_lower_adjust(),
            volume_ma_period: default_volume_ma_period(),
            default_volume_ratio: default_volume_ratio(),
            levels_lookback: default_levels_lookback(),
        }
    }
}

impl IndicatorParams {
    /// Short-horizon preset.
    pub fn aggressive() -> Self {
        Self {
            sma_short_period: 3,
            sma_medium_period: 10,
            sma_long_period: 30,
            rsi_period: 10,
            bb_period: 15,
            volume_ma_period: 15,
            levels_lookback: 15,
            ..Self::default()
        }
    }

    /// Long-horizon preset.
    pub fn conservative() -> Self {
        Self {
            sma_short_period: 10,
            sma_medium_period: 30,
            sma_long_period: 100,
            rsi_period: 21,
            bb_period: 30,
            bb_std_dev: 2.5,
            volume_ma_period: 30,
            levels_lookback: 30,
            ..Self::default()
        }
    }

    /// Reject parameter sets that would make a stage meaningless.
    ///
    /// Periods must be non-zero, multipliers and thresholds non-negative,
    /// and the RSI neutral value must lie within `[0, rsi_max_value]`.
    pub fn validate(&self) -> Result<()> {
        let periods = [
            ("sma_short_period", self.sma_short_period),
            ("sma_medium_period", self.sma_medium_period),
            ("sma_long_period", self.sma_long_period),
            ("ema_fast_period", self.ema_fast_period),
            ("ema_slow_period", self.ema_slow_period),
            ("macd_fast_period", self.macd_fast_period),
            ("macd_slow_period", self.macd_slow_period),
            ("macd_signal_period", self.macd_signal_period),
            ("rsi_period", self.rsi_period),
            ("bb_period", self.bb_period),
            ("volume_ma_period", self.volume_ma_period),
            ("levels_lookback", self.levels_lookback),
        ];
        for (name, value) in periods {
            if value == 0 {
                bail!("{name} must be greater than zero");
            }
        }

        if !(self.rsi_max_value.is_finite() && self.rsi_max_value > 0.0) {
            bail!("rsi_max_value must be positive, got {}", self.rsi_max_value);
        }
        if !(0.0..=self.rsi_max_value).contains(&self.rsi_neutral_value) {
            bail!(
                "rsi_neutral_value {} outside [0, {}]",
                self.rsi_neutral_value,
                self.rsi_max_value
            );
        }
        if !(self.bb_std_dev.is_finite() && self.bb_std_dev > 0.0) {
            bail!("bb_std_dev must be positive, got {}", self.bb_std_dev);
        }
        if !(self.bb_min_threshold.is_finite() && self.bb_min_threshold >= 0.0) {
            bail!("bb_min_threshold must be non-negative, got {}", self.bb_min_threshold);
        }
        if self.bb_upper_adjust < self.bb_lower_adjust {
            bail!(
                "bb_upper_adjust {} is below bb_lower_adjust {}",
                self.bb_upper_adjust,
                self.bb_lower_adjust
            );
        }
        if !self.default_volume_ratio.is_finite() || self.default_volume_ratio < 0.0 {
            bail!("default_volume_ratio must be non-negative, got {}", self.default_volume_ratio);
        }

        Ok(())
    }
}

// =============================================================================
// ParamOverrides
// =============================================================================

/// Sparse per-instrument adjustments applied on top of a preset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamOverrides {
    pub sma_short_period: Option<usize>,
    pub sma_medium_period: Option<usize>,
    pub sma_long_period: Option<usize>,
    pub ema_fast_period: Option<usize>,
    pub ema_slow_period: Option<usize>,
    pub macd_fast_period: Option<usize>,
    pub macd_slow_period: Option<usize>,
    pub macd_signal_period: Option<usize>,
    pub rsi_period: Option<usize>,
    pub rsi_neutral_value: Option<f64>,
    pub rsi_max_value: Option<f64>,
    pub bb_period: Option<usize>,
    pub bb_std_dev: Option<f64>,
    pub bb_min_threshold: Option<f64>,
    pub bb_default_position: Option<f64>,
    pub bb_upper_adjust: Option<f64>,
    pub bb_lower_adjust: Option<f64>,
    pub volume_ma_period: Option<usize>,
    pub default_volume_ratio: Option<f64>,
    pub levels_lookback: Option<usize>,
}

impl ParamOverrides {
    /// Produce a new parameter set from `base` with every present override
    /// substituted.  `base` itself is left untouched.
    pub fn apply(&self, base: &IndicatorParams) -> IndicatorParams {
        IndicatorParams {
            sma_short_period: self.sma_short_period.unwrap_or(base.sma_short_period),
            sma_medium_period: self.sma_medium_period.unwrap_or(base.sma_medium_period),
            sma_long_period: self.sma_long_period.unwrap_or(base.sma_long_period),
            ema_fast_period: self.ema_fast_period.unwrap_or(base.ema_fast_period),
            ema_slow_period: self.ema_slow_period.unwrap_or(base.ema_slow_period),
            macd_fast_period: self.macd_fast_period.unwrap_or(base.macd_fast_period),
            macd_slow_period: self.macd_slow_period.unwrap_or(base.macd_slow_period),
            macd_signal_period: self.macd_signal_period.unwrap_or(base.macd_signal_period),
            rsi_period: self.rsi_period.unwrap_or(base.rsi_period),
            rsi_neutral_value: self.rsi_neutral_value.unwrap_or(base.rsi_neutral_value),
            rsi_max_value: self.rsi_max_value.unwrap_or(base.rsi_max_value),
            bb_period: self.bb_period.unwrap_or(base.bb_period),
            bb_std_dev: self.bb_std_dev.unwrap_or(base.bb_std_dev),
            bb_min_threshold: self.bb_min_threshold.unwrap_or(base.bb_min_threshold),
            bb_default_position: self.bb_default_position.unwrap_or(base.bb_default_position),
            bb_upper_adjust: self.bb_upper_adjust.unwrap_or(base.bb_upper_adjust),
            bb_lower_adjust: self.bb_lower_adjust.unwrap_or(base.bb_lower_adjust),
            volume_ma_period: self.volume_ma_period.unwrap_or(base.volume_ma_period),
            default_volume_ratio: self.default_volume_ratio.unwrap_or(base.default_volume_ratio),
            levels_lookback: self.levels_lookback.unwrap_or(base.levels_lookback),
        }
    }
}
