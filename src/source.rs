// =============================================================================
// Bar Sources — where kline windows come from
// =============================================================================
//
// The engine only needs an ordered bar window per instrument.  Exchange REST
// clients live outside this crate; they plug in by implementing `BarSource`.
// `JsonFileSource` reads pre-fetched windows from disk, one file per
// `(symbol, timeframe)` pair.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::types::Bar;

/// Supplier of ascending-ordered OHLCV windows.
pub trait BarSource: Send + Sync {
    /// Return at most `limit` of the most recent bars for `symbol`,
    /// oldest first.
    fn fetch_bars(&self, symbol: &str, timeframe: &str, limit: usize) -> Result<Vec<Bar>>;
}

/// Reads `<dir>/<symbol>_<timeframe>.json`, each a JSON array of bars.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    dir: PathBuf,
}

impl JsonFileSource {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, symbol: &str, timeframe: &str) -> PathBuf {
        self.dir.join(format!("{symbol}_{timeframe}.json"))
    }
}

impl BarSource for JsonFileSource {
    fn fetch_bars(&self, symbol: &str, timeframe: &str, limit: usize) -> Result<Vec<Bar>> {
        let path = self.path_for(symbol, timeframe);

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read bars from {}", path.display()))?;
        let mut bars: Vec<Bar> = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse bars from {}", path.display()))?;

        if bars.windows(2).any(|w| w[1].timestamp < w[0].timestamp) {
            warn!(symbol, path = %path.display(), "bars are not in ascending timestamp order");
        }

        let start = bars.len().saturating_sub(limit);
        bars.drain(..start);

        debug!(symbol, timeframe, bars = bars.len(), "bars loaded");
        Ok(bars)
    }
}
