pub use super::value_objects::{OHLCV, Price, Timestamp, Volume};
use serde::{Deserialize, Serialize};

/// Domain entity - one OHLCV observation for a fixed time bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Kline {
    pub timestamp: Timestamp,
    pub ohlcv: OHLCV,
}

impl Kline {
    pub fn new(timestamp: Timestamp, ohlcv: OHLCV) -> Self {
        Self { timestamp, ohlcv }
    }

    pub fn is_bullish(&self) -> bool {
        self.ohlcv.close >= self.ohlcv.open
    }

    pub fn is_bearish(&self) -> bool {
        self.ohlcv.close < self.ohlcv.open
    }

    pub fn body_size(&self) -> Price {
        Price::from((self.ohlcv.close.value() - self.ohlcv.open.value()).abs())
    }
}

/// Domain entity - ordered kline collection
///
/// Timestamps are strictly increasing and unique; gaps are neither assumed
/// nor filled. Construction sorts and deduplicates (last write wins) so the
/// invariant holds regardless of what the caller handed over.
#[derive(Debug, Clone, Default)]
pub struct KlineSeries {
    klines: Vec<Kline>,
}

impl KlineSeries {
    pub fn new() -> Self {
        Self { klines: Vec::new() }
    }

    pub fn from_klines(mut klines: Vec<Kline>) -> Self {
        klines.sort_by_key(|k| k.timestamp.value());
        klines.dedup_by(|next, prev| {
            if next.timestamp == prev.timestamp {
                *prev = next.clone();
                true
            } else {
                false
            }
        });
        Self { klines }
    }

    pub fn as_slice(&self) -> &[Kline] {
        &self.klines
    }

    pub fn count(&self) -> usize {
        self.klines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.klines.is_empty()
    }

    pub fn latest(&self) -> Option<&Kline> {
        self.klines.last()
    }

    /// Last closing price
    pub fn latest_price(&self) -> Option<Price> {
        self.klines.last().map(|kline| kline.ohlcv.close)
    }

    /// Price range over all klines (low..high)
    pub fn price_range(&self) -> Option<(Price, Price)> {
        if self.klines.is_empty() {
            return None;
        }

        let mut min_price = self.klines[0].ohlcv.low;
        let mut max_price = self.klines[0].ohlcv.high;

        for kline in &self.klines {
            if kline.ohlcv.low.value() < min_price.value() {
                min_price = kline.ohlcv.low;
            }
            if kline.ohlcv.high.value() > max_price.value() {
                max_price = kline.ohlcv.high;
            }
        }

        Some((min_price, max_price))
    }

    /// Largest bucket volume, the volume pane scales against it
    pub fn max_volume(&self) -> Option<Volume> {
        self.klines
            .iter()
            .map(|k| k.ohlcv.volume)
            .max_by(|a, b| a.value().partial_cmp(&b.value()).unwrap_or(std::cmp::Ordering::Equal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kline(ts: u64, close: f64) -> Kline {
        Kline::new(
            Timestamp::from_secs(ts),
            OHLCV::new(
                Price::from(close),
                Price::from(close + 0.01),
                Price::from(close - 0.01),
                Price::from(close),
                Volume::from(10.0),
            ),
        )
    }

    #[test]
    fn from_klines_sorts_and_dedups_last_wins() {
        let series = KlineSeries::from_klines(vec![kline(120, 0.5), kline(60, 0.4), kline(120, 0.6)]);

        assert_eq!(series.count(), 2);
        assert_eq!(series.as_slice()[0].timestamp.value(), 60);
        assert_eq!(series.as_slice()[1].timestamp.value(), 120);
        assert_eq!(series.as_slice()[1].ohlcv.close.value(), 0.6);
    }

    #[test]
    fn price_range_spans_lows_and_highs() {
        let series = KlineSeries::from_klines(vec![kline(60, 0.4), kline(120, 0.7)]);
        let (min, max) = series.price_range().unwrap();
        assert!((min.value() - 0.39).abs() < 1e-9);
        assert!((max.value() - 0.71).abs() < 1e-9);
    }

    #[test]
    fn empty_series_has_no_ranges() {
        let series = KlineSeries::new();
        assert!(series.price_range().is_none());
        assert!(series.max_volume().is_none());
        assert!(series.latest_price().is_none());
    }
}
