// =============================================================================
// Technical Snapshot — one full pass of every indicator stage
// =============================================================================
//
// Extraction runs once; every stage then reads the extracted series and the
// parameter set independently.  The snapshot is pure composition: a fresh
// value per call, no caching and no state carried between calls.

use serde::{Deserialize, Serialize};

use crate::indicators::levels::static_levels;
use crate::indicators::{
    calculate_bollinger, calculate_ema, calculate_macd, calculate_rsi, calculate_sma,
    calculate_volume, BollingerResult, MacdResult, VolumeResult,
};
use crate::params::IndicatorParams;
use crate::series::PriceSeries;
use crate::types::{Bar, Reading};

/// Every indicator value derived from one bar window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalSnapshot {
    pub sma_short: f64,
    pub sma_medium: f64,
    pub sma_long: f64,
    pub ema_fast: f64,
    pub ema_slow: f64,
    pub macd: MacdResult,
    pub rsi: Reading,
    pub bollinger: BollingerResult,
    pub volume: VolumeResult,
    pub resistance: f64,
    pub support: f64,
}

/// Compute a snapshot for `bars` under `params`.
///
/// Returns `None` for an empty bar sequence.
pub fn compute_snapshot(bars: &[Bar], params: &IndicatorParams) -> Option<TechnicalSnapshot> {
    let series = PriceSeries::from_bars(bars);
    compute_from_series(&series, params)
}

/// Same as [`compute_snapshot`] over already-extracted series.
pub fn compute_from_series(series: &PriceSeries, params: &IndicatorParams) -> Option<TechnicalSnapshot> {
    let price = series.last_close()?;
    let closes = &series.closes;

    let ema_fast = calculate_ema(closes, params.ema_fast_period);
    let ema_slow = calculate_ema(closes, params.ema_slow_period);

    let macd = calculate_macd(
        closes,
        ema_fast,
        ema_slow,
        params.macd_fast_period,
        params.macd_slow_period,
        params.macd_signal_period,
    );

    let (resistance, support) =
        static_levels(&series.highs, &series.lows, params.levels_lookback, price);

    Some(TechnicalSnapshot {
        sma_short: calculate_sma(closes, params.sma_short_period),
        sma_medium: calculate_sma(closes, params.sma_medium_period),
        sma_long: calculate_sma(closes, params.sma_long_period),
        ema_fast,
        ema_slow,
        macd,
        rsi: calculate_rsi(
            closes,
            params.rsi_period,
            params.rsi_neutral_value,
            params.rsi_max_value,
        ),
        bollinger: calculate_bollinger(closes, params),
        volume: calculate_volume(
            &series.volumes,
            params.volume_ma_period,
            params.default_volume_ratio,
        ),
        resistance,
        support,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::test_support::{bars, bars_from_closes};

    fn noisy_closes(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 100.0 + (i as f64 * 0.3).sin() * 4.0 + i as f64 * 0.1)
            .collect()
    }

    #[test]
    fn empty_bars_yield_no_snapshot() {
        assert!(compute_snapshot(&[], &IndicatorParams::default()).is_none());
    }

    #[test]
    fn single_bar_snapshot_uses_fallbacks() {
        let input = bars(&[(12.0, 8.0, 10.0, 0.0)]);
        let snap = compute_snapshot(&input, &IndicatorParams::default()).unwrap();
        assert_eq!(snap.sma_short, 10.0);
        assert_eq!(snap.sma_long, 10.0);
        assert_eq!(snap.ema_fast, 10.0);
        assert_eq!(snap.rsi, Reading::Fallback(50.0));
        assert_eq!(snap.macd.signal, Reading::Fallback(0.0));
        assert_eq!(snap.volume.ratio, Reading::Fallback(1.0));
        assert_eq!(snap.resistance, 12.0);
        assert_eq!(snap.support, 8.0);
        // Single close: zero variance, adjusted bands around 10.
        assert!((snap.bollinger.upper - 10.01).abs() < 1e-10);
        assert!((snap.bollinger.lower - 9.99).abs() < 1e-10);
    }

    #[test]
    fn full_window_snapshot_is_consistent() {
        let input = bars_from_closes(&noisy_closes(120));
        let params = IndicatorParams::default();
        let snap = compute_snapshot(&input, &params).unwrap();

        let closes: Vec<f64> = input.iter().map(|b| b.close).collect();
        assert_eq!(snap.sma_medium, calculate_sma(&closes, 20));
        assert_eq!(snap.macd.line, snap.ema_fast - snap.ema_slow);
        assert_eq!(snap.macd.histogram, snap.macd.line - snap.macd.signal.value());
        assert!(!snap.rsi.is_fallback());
        assert!((0.0..=100.0).contains(&snap.rsi.value()));
        assert!(snap.bollinger.upper >= snap.bollinger.middle);
        assert!(snap.bollinger.middle >= snap.bollinger.lower);
        assert!(snap.resistance >= snap.support);
        assert_eq!(snap.volume.ratio, Reading::Computed(1.0));
    }

    #[test]
    fn snapshot_is_deterministic() {
        let input = bars_from_closes(&noisy_closes(80));
        let params = IndicatorParams::aggressive();
        let a = compute_snapshot(&input, &params).unwrap();
        let b = compute_snapshot(&input, &params).unwrap();
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
        assert_eq!(a.macd.signal.value().to_bits(), b.macd.signal.value().to_bits());
    }

    #[test]
    fn presets_produce_different_snapshots() {
        let input = bars_from_closes(&noisy_closes(150));
        let default = compute_snapshot(&input, &IndicatorParams::default()).unwrap();
        let conservative = compute_snapshot(&input, &IndicatorParams::conservative()).unwrap();
        assert_ne!(default.sma_long, conservative.sma_long);
        assert_eq!(default.ema_fast, conservative.ema_fast);
    }

    #[test]
    fn zero_volume_series_uses_default_ratio() {
        let rows: Vec<_> = (0..30).map(|i| (11.0 + i as f64, 9.0, 10.0, 0.0)).collect();
        let snap = compute_snapshot(&bars(&rows), &IndicatorParams::default()).unwrap();
        assert_eq!(snap.volume.ma, 0.0);
        assert_eq!(snap.volume.ratio, Reading::Fallback(1.0));
    }
}
