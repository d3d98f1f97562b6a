// =============================================================================
// Runtime Configuration — instruments, profiles and bar-source settings
// =============================================================================
//
// Describes which instruments the driver analyses and which parameter set
// each one is bound to.  Every instrument selects a named profile (falling
// back to `default_profile`) and may override individual parameters.
//
// All fields carry `#[serde(default)]` so that a minimal or older config file
// still deserialises.
// =============================================================================

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::params::{IndicatorParams, ParamOverrides, Profile};

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_bars_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_timeframe() -> String {
    "15m".to_string()
}

fn default_data_points() -> usize {
    100
}

fn default_instruments() -> Vec<InstrumentConfig> {
    vec![InstrumentConfig::new("BTC-USDT"), InstrumentConfig::new("ETH-USDT")]
}

// =============================================================================
// InstrumentConfig
// =============================================================================

/// One analysed instrument and how its parameters are chosen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentConfig {
    pub symbol: String,

    /// Preset for this instrument; `None` uses the config-wide default.
    #[serde(default)]
    pub profile: Option<Profile>,

    /// Individual parameters replacing the preset's values.
    #[serde(default)]
    pub overrides: ParamOverrides,
}

impl InstrumentConfig {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            profile: None,
            overrides: ParamOverrides::default(),
        }
    }
}

// =============================================================================
// RuntimeConfig
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Directory holding `<symbol>_<timeframe>.json` bar files.
    #[serde(default = "default_bars_dir")]
    pub bars_dir: PathBuf,

    /// Kline interval requested from the bar source.
    #[serde(default = "default_timeframe")]
    pub timeframe: String,

    /// Maximum number of most-recent bars analysed per instrument.
    #[serde(default = "default_data_points")]
    pub data_points: usize,

    /// Profile for instruments that do not name one.
    #[serde(default)]
    pub default_profile: Profile,

    #[serde(default = "default_instruments")]
    pub instruments: Vec<InstrumentConfig>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            bars_dir: default_bars_dir(),
            timeframe: default_timeframe(),
            data_points: default_data_points(),
            default_profile: Profile::default(),
            instruments: default_instruments(),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// If the file does not exist, returns an error so the caller can fall
    /// back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read runtime config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse runtime config from {}", path.display()))?;

        info!(
            path = %path.display(),
            instruments = config.instruments.len(),
            default_profile = %config.default_profile,
            "runtime config loaded"
        );

        Ok(config)
    }

    /// Build and validate the parameter set bound to `instrument`.
    pub fn params_for(&self, instrument: &InstrumentConfig) -> Result<IndicatorParams> {
        let profile = instrument.profile.unwrap_or(self.default_profile);
        let params = instrument.overrides.apply(&profile.params());
        params
            .validate()
            .with_context(|| format!("invalid indicator parameters for {}", instrument.symbol))?;
        Ok(params)
    }

    /// Check settings that do not depend on a single instrument.
    pub fn validate(&self) -> Result<()> {
        if self.data_points == 0 {
            bail!("data_points must be greater than zero");
        }
        if self.timeframe.trim().is_empty() {
            bail!("timeframe must not be empty");
        }
        for instrument in &self.instruments {
            if instrument.symbol.trim().is_empty() {
                bail!("instrument symbol must not be empty");
            }
        }
        Ok(())
    }
}
