// =============================================================================
// Volume Moving Average and Ratio
// =============================================================================
//
//   ma    = SMA(volume, period)
//   ratio = last_volume / ma
//
// A zero (or empty) average substitutes the configured default ratio, which
// reads as "neutral" participation.

use serde::{Deserialize, Serialize};

use super::moving_average::calculate_sma;
use crate::types::Reading;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeResult {
    pub ma: f64,
    pub ratio: Reading,
}

pub fn calculate_volume(volumes: &[f64], period: usize, default_ratio: f64) -> VolumeResult {
    let ma = calculate_sma(volumes, period);

    let ratio = match volumes.last() {
        Some(&current) if ma > 0.0 => Reading::Computed(current / ma),
        _ => Reading::Fallback(default_ratio),
    };

    VolumeResult { ma, ratio }
}
