use market_chart_wasm::domain::chart::{CrosshairResolver, HoveredReadout};
use market_chart_wasm::domain::market_data::{
    Kline, MaConfig, MaVisibility, MovingAverageEngine, OHLCV, Price, Timestamp, Volume,
};

fn kline(ts: u64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Kline {
    Kline::new(
        Timestamp::from_secs(ts),
        OHLCV::new(
            Price::from(open),
            Price::from(high),
            Price::from(low),
            Price::from(close),
            Volume::from(volume),
        ),
    )
}

fn sample_klines() -> Vec<Kline> {
    vec![
        kline(60, 0.50, 0.55, 0.48, 0.52, 120.0),
        kline(120, 0.52, 0.58, 0.51, 0.56, 340.0),
        kline(180, 0.56, 0.57, 0.44, 0.45, 900.0),
    ]
}

#[test]
fn exact_timestamp_returns_the_sample_unmodified() {
    let klines = sample_klines();
    let resolver = CrosshairResolver::new(&klines);

    let readout = resolver.resolve(&klines, Some(Timestamp::from_secs(120))).unwrap();
    assert_eq!(readout.open, 0.52);
    assert_eq!(readout.high, 0.58);
    assert_eq!(readout.low, 0.51);
    assert_eq!(readout.close, 0.56);
    assert_eq!(readout.volume, 340.0);
    assert!((readout.change - 0.04).abs() < 1e-12);
}

#[test]
fn absent_timestamp_gives_no_readout_not_a_nearest_match() {
    let klines = sample_klines();
    let resolver = CrosshairResolver::new(&klines);

    // 119 sits between buckets; guessing the neighbor would be wrong
    assert!(resolver.resolve(&klines, Some(Timestamp::from_secs(119))).is_none());
    assert!(resolver.resolve(&klines, Some(Timestamp::from_secs(0))).is_none());
}

#[test]
fn pointer_leave_clears_the_readout() {
    let klines = sample_klines();
    let resolver = CrosshairResolver::new(&klines);

    assert!(resolver.resolve(&klines, None).is_none());
}

#[test]
fn zero_open_marks_percent_change_unavailable() {
    let zero_open = kline(60, 0.0, 0.1, 0.0, 0.1, 5.0);
    let readout = HoveredReadout::from_kline(&zero_open);

    assert_eq!(readout.change, 0.1);
    assert_eq!(readout.change_percent, None);

    // The formatted stat must never show NaN
    let formatted = market_chart_wasm::format_utils::format_percent(readout.change_percent);
    assert!(!formatted.contains("NaN"));
}

#[test]
fn percent_change_is_computed_for_nonzero_open() {
    let readout = HoveredReadout::from_kline(&kline(60, 0.5, 0.6, 0.4, 0.6, 5.0));
    let pct = readout.change_percent.unwrap();
    assert!((pct - 20.0).abs() < 1e-9);
}

#[test]
fn ma_markers_follow_visibility_and_window_fill() {
    let klines: Vec<Kline> =
        (0..12).map(|i| kline((i + 1) * 60, 0.5, 0.6, 0.4, 0.5 + i as f64 * 0.01, 10.0)).collect();
    let engine = MovingAverageEngine::compute(&klines, &MaConfig::default());
    let resolver = CrosshairResolver::new(&klines);
    let mut visibility = MaVisibility::from_config(&MaConfig::default());

    // At the last kline both MA5 and MA10 have values
    let markers = resolver.ma_markers(engine.price_series(), &visibility, klines[11].timestamp);
    let periods: Vec<usize> = markers.iter().map(|m| m.period).collect();
    assert_eq!(periods, vec![5, 10]);

    // Early in the series only MA5's window is full
    let markers = resolver.ma_markers(engine.price_series(), &visibility, klines[6].timestamp);
    let periods: Vec<usize> = markers.iter().map(|m| m.period).collect();
    assert_eq!(periods, vec![5]);

    // Hiding a period hides its marker
    visibility.toggle(5);
    let markers = resolver.ma_markers(engine.price_series(), &visibility, klines[11].timestamp);
    let periods: Vec<usize> = markers.iter().map(|m| m.period).collect();
    assert_eq!(periods, vec![10]);
}
