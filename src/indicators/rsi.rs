// =============================================================================
// Relative Strength Index (RSI) — Wilder's Smoothing
// =============================================================================
//
// Step 1 — Compute price changes (deltas) from consecutive closes.
// Step 2 — Seed average gain / average loss with the plain mean of the first
//          `period` gains / losses.
// Step 3 — Apply Wilder's smoothing for every later delta:
//            avg_gain = (prev_avg_gain * (period - 1) + current_gain) / period
//            avg_loss = (prev_avg_loss * (period - 1) + current_loss) / period
// Step 4 — RS  = avg_gain / avg_loss
//          RSI = max - max / (1 + RS)
//
// `max` and the neutral value come from the parameter set (100 and 50 by
// default).  A zero average loss never divides: it maps to `max` when there
// were gains and to the neutral value when the series was flat.
// =============================================================================

use crate::types::Reading;

/// Latest RSI of `closes`.
///
/// # Edge cases
/// - `period == 0` or fewer than `period + 1` closes => `Fallback(neutral)`
/// - average loss zero, average gain positive => `Computed(max)`
/// - average loss and gain both zero (flat) => `Fallback(neutral)`
pub fn calculate_rsi(closes: &[f64], period: usize, neutral: f64, max: f64) -> Reading {
    if period == 0 || closes.len() <= period {
        return Reading::Fallback(neutral);
    }

    // --- Compute price deltas ------------------------------------------------
    let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();

    // --- Seed averages with the mean of the first `period` deltas ------------
    let (sum_gain, sum_loss) = deltas[..period]
        .iter()
        .fold((0.0_f64, 0.0_f64), |(g, l), &d| {
            if d > 0.0 {
                (g + d, l)
            } else {
                (g, l - d)
            }
        });

    let period_f = period as f64;
    let mut avg_gain = sum_gain / period_f;
    let mut avg_loss = sum_loss / period_f;

    // --- Wilder's smoothing for subsequent values ----------------------------
    for &delta in &deltas[period..] {
        let gain = if delta > 0.0 { delta } else { 0.0 };
        let loss = if delta > 0.0 { 0.0 } else { -delta };

        avg_gain = (avg_gain * (period_f - 1.0) + gain) / period_f;
        avg_loss = (avg_loss * (period_f - 1.0) + loss) / period_f;
    }

    rsi_from_averages(avg_gain, avg_loss, neutral, max)
}

// =============================================================================
// Internal helpers
// =============================================================================

fn rsi_from_averages(avg_gain: f64, avg_loss: f64, neutral: f64, max: f64) -> Reading {
    if avg_loss == 0.0 {
        if avg_gain > 0.0 {
            return Reading::Computed(max);
        }
        return Reading::Fallback(neutral);
    }

    let rs = avg_gain / avg_loss;
    Reading::Computed(max - max / (1.0 + rs))
}
