use super::{Kline, Timestamp};
use std::collections::{HashMap, HashSet};

/// Which kline field a moving average is computed over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaSource {
    Close,
    Volume,
}

impl MaSource {
    fn accessor(&self, kline: &Kline) -> f64 {
        match self {
            MaSource::Close => kline.ohlcv.close.value(),
            MaSource::Volume => kline.ohlcv.volume.value(),
        }
    }
}

/// One point of a computed moving average
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaPoint {
    pub timestamp: Timestamp,
    pub value: f64,
}

/// A fully computed simple moving average series
///
/// Points only exist once the trailing window is full, so a series over
/// `n` klines has `n - period + 1` points (or none when `n < period`).
/// The `time -> value` table backs the O(1) crosshair readout.
#[derive(Debug, Clone)]
pub struct MaSeries {
    pub period: usize,
    pub source: MaSource,
    pub points: Vec<MaPoint>,
    by_time: HashMap<u64, f64>,
}

impl MaSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Exact-timestamp lookup, `None` when the window was not yet full there
    pub fn value_at(&self, timestamp: Timestamp) -> Option<f64> {
        self.by_time.get(&timestamp.value()).copied()
    }
}

/// Running-sum SMA: O(n) per period regardless of the window size
pub fn compute_sma(klines: &[Kline], period: usize, source: MaSource) -> MaSeries {
    let mut points = Vec::new();
    let mut by_time = HashMap::new();

    if period > 0 && klines.len() >= period {
        points.reserve(klines.len() - period + 1);
        let mut sum = 0.0;

        for (i, kline) in klines.iter().enumerate() {
            sum += source.accessor(kline);
            if i >= period {
                sum -= source.accessor(&klines[i - period]);
            }
            if i + 1 >= period {
                let value = sum / period as f64;
                points.push(MaPoint { timestamp: kline.timestamp, value });
                by_time.insert(kline.timestamp.value(), value);
            }
        }
    }

    MaSeries { period, source, points, by_time }
}

/// Moving-average periods and their default visibility
#[derive(Debug, Clone)]
pub struct MaConfig {
    /// Close-price overlays on the price pane
    pub price_periods: Vec<usize>,
    /// Volume overlays on the volume pane
    pub volume_periods: Vec<usize>,
    /// Periods whose overlay is on by default (the shortest ones)
    pub default_visible: Vec<usize>,
}

impl Default for MaConfig {
    fn default() -> Self {
        Self {
            price_periods: vec![5, 10, 20, 30],
            volume_periods: vec![5, 10],
            default_visible: vec![5, 10],
        }
    }
}

/// Per-period overlay visibility, toggled from the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaVisibility {
    visible: HashSet<usize>,
}

impl MaVisibility {
    pub fn from_config(config: &MaConfig) -> Self {
        Self { visible: config.default_visible.iter().copied().collect() }
    }

    pub fn is_visible(&self, period: usize) -> bool {
        self.visible.contains(&period)
    }

    pub fn toggle(&mut self, period: usize) {
        if !self.visible.remove(&period) {
            self.visible.insert(period);
        }
    }
}

/// Engine producing every configured SMA series from one kline pass
///
/// Series with fewer klines than their period are omitted entirely, the
/// renderer never sees degenerate points.
#[derive(Debug, Clone, Default)]
pub struct MovingAverageEngine {
    price_series: Vec<MaSeries>,
    volume_series: Vec<MaSeries>,
}

impl MovingAverageEngine {
    pub fn compute(klines: &[Kline], config: &MaConfig) -> Self {
        let build = |periods: &[usize], source: MaSource| {
            periods
                .iter()
                .map(|&period| compute_sma(klines, period, source))
                .filter(|series| !series.is_empty())
                .collect()
        };

        Self {
            price_series: build(&config.price_periods, MaSource::Close),
            volume_series: build(&config.volume_periods, MaSource::Volume),
        }
    }

    pub fn price_series(&self) -> &[MaSeries] {
        &self.price_series
    }

    pub fn volume_series(&self) -> &[MaSeries] {
        &self.volume_series
    }
}
