use crate::domain::market_data::{Kline, MaSeries, MaVisibility, Timestamp};
use std::collections::HashMap;

/// Live readout shown in the stats row while the crosshair is over a bar
///
/// `change_percent` is `None` when `open` is zero: the stat is surfaced as
/// unavailable instead of propagating NaN into the UI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoveredReadout {
    pub timestamp: Timestamp,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub change: f64,
    pub change_percent: Option<f64>,
}

impl HoveredReadout {
    pub fn from_kline(kline: &Kline) -> Self {
        let open = kline.ohlcv.open.value();
        let close = kline.ohlcv.close.value();
        let change = close - open;
        let change_percent = if open == 0.0 { None } else { Some(change / open * 100.0) };

        Self {
            timestamp: kline.timestamp,
            open,
            high: kline.ohlcv.high.value(),
            low: kline.ohlcv.low.value(),
            close,
            volume: kline.ohlcv.volume.value(),
            change,
            change_percent,
        }
    }
}

/// Dynamic marker for one visible moving-average overlay at the hovered time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaMarker {
    pub period: usize,
    pub value: f64,
}

/// Maps a hovered timestamp to the underlying kline and to each active
/// moving-average value.
///
/// The `time -> index` table is built once per data change; lookups are
/// exact matches only, a timestamp between buckets yields no readout
/// rather than a nearest-match guess.
#[derive(Debug, Clone, Default)]
pub struct CrosshairResolver {
    by_time: HashMap<u64, usize>,
}

impl CrosshairResolver {
    pub fn new(klines: &[Kline]) -> Self {
        let by_time =
            klines.iter().enumerate().map(|(i, k)| (k.timestamp.value(), i)).collect();
        Self { by_time }
    }

    pub fn index_of(&self, timestamp: Timestamp) -> Option<usize> {
        self.by_time.get(&timestamp.value()).copied()
    }

    /// Resolve a pointer-move event. `None` time means pointer-leave and
    /// clears the readout.
    pub fn resolve(&self, klines: &[Kline], timestamp: Option<Timestamp>) -> Option<HoveredReadout> {
        let index = self.index_of(timestamp?)?;
        klines.get(index).map(HoveredReadout::from_kline)
    }

    /// Markers for every visible overlay that has a value at the hovered
    /// time; overlays without one stay hidden.
    pub fn ma_markers(
        &self,
        series: &[MaSeries],
        visibility: &MaVisibility,
        timestamp: Timestamp,
    ) -> Vec<MaMarker> {
        series
            .iter()
            .filter(|s| visibility.is_visible(s.period))
            .filter_map(|s| s.value_at(timestamp).map(|value| MaMarker { period: s.period, value }))
            .collect()
    }
}
