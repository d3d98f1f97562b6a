// =============================================================================
// Series Extraction
// =============================================================================
//
// Projects a bar sequence into four parallel numeric series.  Order and
// length are preserved; "recent" always means "highest index".

use crate::types::Bar;

/// Close, high, low and volume series extracted from the same bars.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    pub closes: Vec<f64>,
    pub highs: Vec<f64>,
    pub lows: Vec<f64>,
    pub volumes: Vec<f64>,
}

impl PriceSeries {
    pub fn from_bars(bars: &[Bar]) -> Self {
        let mut series = Self {
            closes: Vec::with_capacity(bars.len()),
            highs: Vec::with_capacity(bars.len()),
            lows: Vec::with_capacity(bars.len()),
            volumes: Vec::with_capacity(bars.len()),
        };
        for bar in bars {
            series.closes.push(bar.close);
            series.highs.push(bar.high);
            series.lows.push(bar.low);
            series.volumes.push(bar.volume);
        }
        series
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    /// Most recent close, if any.
    pub fn last_close(&self) -> Option<f64> {
        self.closes.last().copied()
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::bars;
    use super::*;

    #[test]
    fn extraction_preserves_order_and_length() {
        let input = bars(&[(11.0, 9.0, 10.0, 100.0), (12.0, 10.0, 11.0, 200.0), (13.0, 8.0, 9.0, 0.0)]);
        let series = PriceSeries::from_bars(&input);
        assert_eq!(series.len(), 3);
        assert_eq!(series.closes, vec![10.0, 11.0, 9.0]);
        assert_eq!(series.highs, vec![11.0, 12.0, 13.0]);
        assert_eq!(series.lows, vec![9.0, 10.0, 8.0]);
        assert_eq!(series.volumes, vec![100.0, 200.0, 0.0]);
        assert_eq!(series.last_close(), Some(9.0));
    }

    #[test]
    fn extraction_of_empty_input() {
        let series = PriceSeries::from_bars(&[]);
        assert!(series.is_empty());
        assert_eq!(series.last_close(), None);
    }
}
