// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Bollinger Bands consist of a middle band (SMA), an upper band (SMA + k*σ),
// and a lower band (SMA - k*σ).  σ is the population standard deviation over
// the same window as the middle band, and the window shrinks to the available
// history exactly like the SMA does.
//
// A zero-variance window would collapse the bands onto the middle; in that
// case they are replaced by `middle * upper_adjust` / `middle * lower_adjust`
// so the channel keeps a strictly positive width for a positive middle.
//
// Position = (last - lower) / (upper - lower).  Not clamped: a close outside
// the channel yields a value below 0 or above 1.

use serde::{Deserialize, Serialize};

use super::moving_average::calculate_sma;
use crate::params::IndicatorParams;
use crate::types::Reading;

/// Result of a Bollinger Band calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerResult {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
    /// Where the latest close sits inside the channel (0 = lower, 1 = upper).
    pub position: Reading,
}

/// Calculate the bands for `closes` using the Bollinger fields of `params`.
///
/// An empty input yields all-zero bands with the default position.
pub fn calculate_bollinger(closes: &[f64], params: &IndicatorParams) -> BollingerResult {
    let default_position = Reading::Fallback(params.bb_default_position);

    let period = params.bb_period.min(closes.len());
    if period == 0 {
        return BollingerResult {
            upper: 0.0,
            middle: 0.0,
            lower: 0.0,
            position: default_position,
        };
    }

    let middle = calculate_sma(closes, period);

    let window = &closes[closes.len() - period..];
    let variance = window.iter().map(|x| (x - middle).powi(2)).sum::<f64>() / period as f64;
    let std_dev = variance.sqrt();

    let mut upper = middle + std_dev * params.bb_std_dev;
    let mut lower = middle - std_dev * params.bb_std_dev;

    if upper == lower {
        upper = middle * params.bb_upper_adjust;
        lower = middle * params.bb_lower_adjust;
    }

    let width = upper - lower;
    let position = match closes.last() {
        Some(&last) if upper > lower && width > params.bb_min_threshold => {
            Reading::Computed((last - lower) / width)
        }
        _ => default_position,
    };

    BollingerResult {
        upper,
        middle,
        lower,
        position,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bollinger_basic() {
        let closes: Vec<f64> = (1..=20).map(|x| x as f64).collect();
        let bb = calculate_bollinger(&closes, &IndicatorParams::default());
        assert!(bb.upper > bb.middle);
        assert!(bb.lower < bb.middle);
        assert!((bb.middle - 10.5).abs() < 1e-10);
        // Population variance of 1..=20 is (20^2 - 1) / 12.
        let sd = (399.0_f64 / 12.0).sqrt();
        assert!((bb.upper - (10.5 + 2.0 * sd)).abs() < 1e-10);
        assert!((bb.lower - (10.5 - 2.0 * sd)).abs() < 1e-10);
        assert!(!bb.position.is_fallback());
    }

    #[test]
    fn bollinger_empty_input() {
        let bb = calculate_bollinger(&[], &IndicatorParams::default());
        assert_eq!(bb.middle, 0.0);
        assert_eq!(bb.position, Reading::Fallback(0.5));
    }

    #[test]
    fn bollinger_zero_variance_uses_adjust_factors() {
        // Fifteen identical closes with period 20.
        let closes = vec![100.0; 15];
        let bb = calculate_bollinger(&closes, &IndicatorParams::default());
        assert!((bb.middle - 100.0).abs() < 1e-10);
        assert!((bb.upper - 100.0 * 1.001).abs() < 1e-10);
        assert!((bb.lower - 100.0 * 0.999).abs() < 1e-10);
        assert!(bb.upper >= bb.middle && bb.middle >= bb.lower);
        // Width 0.2 exceeds the 0.0001 threshold, so the position is computed.
        assert!(!bb.position.is_fallback());
        assert!((bb.position.value() - 0.5).abs() < 1e-10);
    }

    #[test]
    fn bollinger_zero_variance_small_price_falls_back() {
        // Width = 0.002 * middle; with middle 1/32 that is 6.25e-5 <= threshold.
        let closes = vec![0.03125; 15];
        let bb = calculate_bollinger(&closes, &IndicatorParams::default());
        assert!(bb.upper > bb.lower);
        assert!(bb.upper - bb.lower <= 0.0001);
        assert_eq!(bb.position, Reading::Fallback(0.5));
    }

    #[test]
    fn bollinger_zero_middle_falls_back() {
        let closes = vec![0.0; 10];
        let bb = calculate_bollinger(&closes, &IndicatorParams::default());
        assert_eq!(bb.upper, 0.0);
        assert_eq!(bb.lower, 0.0);
        assert_eq!(bb.position, Reading::Fallback(0.5));
    }

    #[test]
    fn bollinger_position_is_not_clamped() {
        // A lone spike in a short window sits above the upper band.
        let closes = vec![10.0, 10.5, 9.5, 10.0, 10.2, 9.8, 10.1, 9.9, 20.0];
        let bb = calculate_bollinger(&closes, &IndicatorParams::default());
        assert!(bb.position.value() > 1.0, "got {}", bb.position);

        let params = IndicatorParams {
            bb_period: 5,
            bb_std_dev: 0.5,
            ..IndicatorParams::default()
        };
        let drop = vec![10.0, 10.1, 9.9, 10.0, 10.1, 5.0];
        let bb = calculate_bollinger(&drop, &params);
        assert!(bb.position.value() < 0.0, "close below lower band, got {}", bb.position);
    }

    #[test]
    fn bollinger_period_shrinks() {
        let closes = vec![1.0, 2.0, 3.0];
        let bb = calculate_bollinger(&closes, &IndicatorParams::default());
        assert!((bb.middle - 2.0).abs() < 1e-10);
        let sd = (2.0_f64 / 3.0).sqrt();
        assert!((bb.upper - (2.0 + 2.0 * sd)).abs() < 1e-10);
    }
}
