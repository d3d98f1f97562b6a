// =============================================================================
// Moving Average Convergence / Divergence (MACD)
// =============================================================================
//
//   line      = EMA(close, fast) - EMA(close, slow)
//   history_k = EMA(close[..k], fast) - EMA(close[..k], slow)   for k in slow..=n
//   signal    = EMA(history, signal_period)
//   histogram = line - signal
//
// The history is defined by recomputing both EMAs over every prefix.  It is
// produced here from `ema_prefix_series`, which yields the same values
// bit-for-bit in linear time.
// =============================================================================

use serde::{Deserialize, Serialize};

use super::moving_average::{calculate_ema, ema_prefix_series};
use crate::types::Reading;

/// MACD line, signal line and histogram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdResult {
    pub line: f64,
    /// `Fallback(0.0)` when there are fewer closes than the slow period.
    pub signal: Reading,
    pub histogram: f64,
}

/// Historical MACD line, one value per prefix length from `slow` to
/// `closes.len()` inclusive.
///
/// Returns `[0.0]` when fewer than `slow` closes are available.
pub fn macd_history(closes: &[f64], fast: usize, slow: usize) -> Vec<f64> {
    if slow == 0 || closes.len() < slow {
        return vec![0.0];
    }

    let fast_series = ema_prefix_series(closes, fast);
    let slow_series = ema_prefix_series(closes, slow);

    fast_series[slow - 1..]
        .iter()
        .zip(&slow_series[slow - 1..])
        .map(|(f, s)| f - s)
        .collect()
}

/// Compute the MACD triple.
///
/// `line` is the difference of the two caller-supplied EMA values (the
/// snapshot's fast/slow EMAs); `fast`/`slow` drive the history used for the
/// signal line.
pub fn calculate_macd(
    closes: &[f64],
    ema_fast: f64,
    ema_slow: f64,
    fast: usize,
    slow: usize,
    signal_period: usize,
) -> MacdResult {
    let line = ema_fast - ema_slow;

    let signal = if slow == 0 || closes.len() < slow {
        Reading::Fallback(0.0)
    } else {
        let history = macd_history(closes, fast, slow);
        Reading::Computed(calculate_ema(&history, signal_period))
    };

    MacdResult {
        line,
        signal,
        histogram: line - signal.value(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn wave(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 50.0 + (i as f64 * 0.21).sin() * 3.0 + (i as f64 * 0.05).cos())
            .collect()
    }

    /// Reference definition: recompute both EMAs from scratch per prefix.
    fn naive_history(closes: &[f64], fast: usize, slow: usize) -> Vec<f64> {
        (slow..=closes.len())
            .map(|end| calculate_ema(&closes[..end], fast) - calculate_ema(&closes[..end], slow))
            .collect()
    }

    #[test]
    fn history_insufficient_data_is_placeholder() {
        assert_eq!(macd_history(&[1.0, 2.0, 3.0], 12, 26), vec![0.0]);
    }

    #[test]
    fn history_length_counts_prefixes() {
        let closes = wave(40);
        assert_eq!(macd_history(&closes, 12, 26).len(), 40 - 26 + 1);
    }

    #[test]
    fn history_matches_prefix_recompute_bit_for_bit() {
        let closes = wave(150);
        for (fast, slow) in [(12, 26), (5, 35), (3, 3)] {
            let fast_path = macd_history(&closes, fast, slow);
            let reference = naive_history(&closes, fast, slow);
            assert_eq!(fast_path.len(), reference.len());
            for (a, b) in fast_path.iter().zip(&reference) {
                assert_eq!(a.to_bits(), b.to_bits());
            }
        }
    }

    #[test]
    fn history_with_fast_slower_than_slow_matches_reference() {
        // Fast period above slow forces the bootstrap path inside the prefixes.
        let closes = wave(60);
        let fast_path = macd_history(&closes, 30, 20);
        let reference = naive_history(&closes, 30, 20);
        for (a, b) in fast_path.iter().zip(&reference) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn macd_short_history_signal_is_fallback() {
        let closes = vec![10.0, 11.0, 12.0];
        let fast = calculate_ema(&closes, 12);
        let slow = calculate_ema(&closes, 26);
        let macd = calculate_macd(&closes, fast, slow, 12, 26, 9);
        assert_eq!(macd.signal, Reading::Fallback(0.0));
        // Both EMAs bootstrap to the same SMA.
        assert!(macd.line.abs() < 1e-10);
        assert!(macd.histogram.abs() < 1e-10);
    }

    #[test]
    fn macd_flat_series_is_zero() {
        let closes = vec![100.0; 60];
        let macd = calculate_macd(
            &closes,
            calculate_ema(&closes, 12),
            calculate_ema(&closes, 26),
            12,
            26,
            9,
        );
        assert!(!macd.signal.is_fallback());
        assert!(macd.line.abs() < 1e-10);
        assert!(macd.signal.value().abs() < 1e-10);
    }

    #[test]
    fn macd_rising_series_is_positive() {
        let closes: Vec<f64> = (1..=100).map(|x| x as f64).collect();
        let macd = calculate_macd(
            &closes,
            calculate_ema(&closes, 12),
            calculate_ema(&closes, 26),
            12,
            26,
            9,
        );
        assert!(macd.line > 0.0);
        assert!(macd.signal.value() > 0.0);
        assert!((macd.histogram - (macd.line - macd.signal.value())).abs() < 1e-12);
    }

    #[test]
    fn macd_signal_equals_ema_of_reference_history() {
        let closes = wave(80);
        let macd = calculate_macd(
            &closes,
            calculate_ema(&closes, 12),
            calculate_ema(&closes, 26),
            12,
            26,
            9,
        );
        let expected = calculate_ema(&naive_history(&closes, 12, 26), 9);
        assert_eq!(macd.signal, Reading::Computed(expected));
        // Last history element is the line itself.
        let history = macd_history(&closes, 12, 26);
        assert_eq!(history.last().copied().map(f64::to_bits), Some(macd.line.to_bits()));
    }
}
