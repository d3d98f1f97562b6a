// =============================================================================
// Moving Averages — SMA and EMA with short-history fallbacks
// =============================================================================
//
// SMA: arithmetic mean of the most recent `min(period, len)` values.  When the
//      history is shorter than the period the window silently shrinks.
//
// EMA: multiplier = 2 / (period + 1)
//      EMA_t      = value_t * multiplier + EMA_{t-1} * (1 - multiplier)
//
//      The first `period` values are compressed into a single SMA seed before
//      the recurrence starts.  With fewer than `period` values the EMA
//      degrades to the SMA of everything available.
// =============================================================================

/// Simple moving average of the last `period` entries of `values`.
///
/// Returns `0.0` for an empty slice or a zero period.
pub fn calculate_sma(values: &[f64], period: usize) -> f64 {
    let period = period.min(values.len());
    if period == 0 {
        return 0.0;
    }

    let window = &values[values.len() - period..];
    window.iter().sum::<f64>() / period as f64
}

/// Latest exponential moving average of `values`.
///
/// # Edge cases
/// - empty input or `period == 0` => `0.0`
/// - `values.len() < period` => SMA over all values (bootstrap only)
pub fn calculate_ema(values: &[f64], period: usize) -> f64 {
    if values.is_empty() || period == 0 {
        return 0.0;
    }
    if values.len() < period {
        return calculate_sma(values, values.len());
    }

    let multiplier = 2.0 / (period + 1) as f64;
    let mut ema = calculate_sma(&values[..period], period);
    for &value in &values[period..] {
        ema = value * multiplier + ema * (1.0 - multiplier);
    }
    ema
}

/// EMA of every prefix of `values`.
///
/// Element `k` is bit-identical to `calculate_ema(&values[..=k], period)`.
/// Prefixes shorter than the period take the bootstrap path; from the seed
/// onward each element continues the recurrence of the previous one, which
/// performs the same floating-point operations in the same order as a
/// from-scratch recompute.
pub fn ema_prefix_series(values: &[f64], period: usize) -> Vec<f64> {
    if period == 0 {
        return vec![0.0; values.len()];
    }

    let mut result = Vec::with_capacity(values.len());
    let bootstrap = period.min(values.len());
    for end in 1..=bootstrap {
        result.push(calculate_ema(&values[..end], period));
    }

    if values.len() > period {
        let multiplier = 2.0 / (period + 1) as f64;
        let mut ema = result[period - 1];
        for &value in &values[period..] {
            ema = value * multiplier + ema * (1.0 - multiplier);
            result.push(ema);
        }
    }

    result
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn ascending(n: usize) -> Vec<f64> {
        (1..=n).map(|i| i as f64).collect()
    }

    // ---- calculate_sma ---------------------------------------------------

    #[test]
    fn sma_empty_input() {
        assert_eq!(calculate_sma(&[], 5), 0.0);
    }

    #[test]
    fn sma_period_zero() {
        assert_eq!(calculate_sma(&[1.0, 2.0], 0), 0.0);
    }

    #[test]
    fn sma_uses_last_period_values() {
        let values = ascending(10);
        // mean of 8, 9, 10
        assert!((calculate_sma(&values, 3) - 9.0).abs() < 1e-10);
    }

    #[test]
    fn sma_period_shrinks_to_available_history() {
        // [10, 20, 30] with period 5 => mean of all three.
        assert!((calculate_sma(&[10.0, 20.0, 30.0], 5) - 20.0).abs() < 1e-10);
    }

    // ---- calculate_ema ---------------------------------------------------

    #[test]
    fn ema_empty_input() {
        assert_eq!(calculate_ema(&[], 5), 0.0);
    }

    #[test]
    fn ema_short_history_equals_sma() {
        let values = vec![3.0, 5.0, 10.0];
        assert_eq!(calculate_ema(&values, 12), calculate_sma(&values, values.len()));
    }

    #[test]
    fn ema_period_equals_length_is_seed() {
        let ema = calculate_ema(&[2.0, 4.0, 6.0], 3);
        assert!((ema - 4.0).abs() < 1e-10);
    }

    #[test]
    fn ema_known_values() {
        // SMA of first 5 = 3.0, multiplier = 1/3.
        let values = ascending(10);
        let mult = 2.0 / 6.0;
        let mut expected = 3.0;
        for &v in &values[5..] {
            expected = v * mult + expected * (1.0 - mult);
        }
        assert!((calculate_ema(&values, 5) - expected).abs() < 1e-10);
    }

    #[test]
    fn ema_flat_series_is_flat() {
        let values = vec![42.0; 40];
        assert!((calculate_ema(&values, 12) - 42.0).abs() < 1e-10);
    }

    // ---- ema_prefix_series -----------------------------------------------

    #[test]
    fn prefix_series_matches_recompute_bit_for_bit() {
        let values: Vec<f64> = (0..120)
            .map(|i| 100.0 + (i as f64 * 0.37).sin() * 5.0 + i as f64 * 0.013)
            .collect();
        for period in [1, 3, 9, 12, 26] {
            let series = ema_prefix_series(&values, period);
            assert_eq!(series.len(), values.len());
            for (k, &got) in series.iter().enumerate() {
                let expected = calculate_ema(&values[..=k], period);
                assert_eq!(got.to_bits(), expected.to_bits(), "period {period}, prefix {k}");
            }
        }
    }

    #[test]
    fn prefix_series_shorter_than_period() {
        let values = vec![1.0, 2.0, 3.0];
        let series = ema_prefix_series(&values, 10);
        assert_eq!(series, vec![1.0, 1.5, 2.0]);
    }

    #[test]
    fn prefix_series_empty_input() {
        assert!(ema_prefix_series(&[], 9).is_empty());
    }
}
