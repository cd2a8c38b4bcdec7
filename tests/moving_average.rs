use market_chart_wasm::domain::market_data::{
    Kline, MaConfig, MaSource, MaVisibility, MovingAverageEngine, OHLCV, Price, Timestamp, Volume,
    compute_sma,
};
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

fn kline(ts: u64, close: f64, volume: f64) -> Kline {
    Kline::new(
        Timestamp::from_secs(ts),
        OHLCV::new(
            Price::from(close),
            Price::from(close),
            Price::from(close),
            Price::from(close),
            Volume::from(volume),
        ),
    )
}

#[test]
fn short_input_yields_empty_series() {
    let klines: Vec<Kline> = (0..3).map(|i| kline(i * 60, 1.0, 1.0)).collect();

    assert!(compute_sma(&klines, 5, MaSource::Close).is_empty());
    assert!(compute_sma(&klines, 4, MaSource::Volume).is_empty());
}

#[test]
fn full_window_emits_exactly_n_minus_p_plus_1_points() {
    let klines: Vec<Kline> = (0..20).map(|i| kline(i * 60, i as f64, 1.0)).collect();

    for period in [1, 2, 5, 19, 20] {
        let series = compute_sma(&klines, period, MaSource::Close);
        assert_eq!(
            series.len(),
            20 - period + 1,
            "period {} over 20 klines must emit n - p + 1 points",
            period
        );
    }
}

#[test]
fn two_period_average_matches_hand_computation() {
    let klines = vec![kline(1, 10.0, 1.0), kline(2, 20.0, 1.0), kline(3, 30.0, 1.0)];
    let series = compute_sma(&klines, 2, MaSource::Close);

    assert_eq!(series.len(), 2);
    assert_eq!(series.points[0].timestamp.value(), 2);
    assert_eq!(series.points[0].value, 15.0);
    assert_eq!(series.points[1].timestamp.value(), 3);
    assert_eq!(series.points[1].value, 25.0);
}

#[test]
fn lookup_table_mirrors_the_points() {
    let klines: Vec<Kline> = (0..10).map(|i| kline(i * 60, (i * i) as f64, 1.0)).collect();
    let series = compute_sma(&klines, 3, MaSource::Close);

    for point in &series.points {
        assert_eq!(series.value_at(point.timestamp), Some(point.value));
    }
    // Before the window is full there is no value
    assert_eq!(series.value_at(Timestamp::from_secs(0)), None);
    assert_eq!(series.value_at(Timestamp::from_secs(60)), None);
    // Unknown timestamps miss entirely
    assert_eq!(series.value_at(Timestamp::from_secs(61)), None);
}

#[test]
fn volume_source_averages_volumes() {
    let klines = vec![kline(1, 0.5, 100.0), kline(2, 0.6, 200.0), kline(3, 0.4, 600.0)];
    let series = compute_sma(&klines, 2, MaSource::Volume);

    assert_eq!(series.points[0].value, 150.0);
    assert_eq!(series.points[1].value, 400.0);
}

#[quickcheck]
fn running_sum_equals_naive_windowed_mean(values: Vec<f64>, period: u8) -> TestResult {
    let period = (period as usize % 8) + 1;
    if values.iter().any(|v| !v.is_finite()) {
        return TestResult::discard();
    }

    let klines: Vec<Kline> = values
        .iter()
        .enumerate()
        .map(|(i, &v)| kline(i as u64 * 60, v % 1e6, 1.0))
        .collect();
    let series = compute_sma(&klines, period, MaSource::Close);

    if klines.len() < period {
        return TestResult::from_bool(series.is_empty());
    }

    for (i, point) in series.points.iter().enumerate() {
        let window = &klines[i..i + period];
        let naive: f64 =
            window.iter().map(|k| k.ohlcv.close.value()).sum::<f64>() / period as f64;
        if (point.value - naive).abs() > 1e-6 * naive.abs().max(1.0) {
            return TestResult::failed();
        }
    }
    TestResult::passed()
}

#[test]
fn engine_omits_series_with_insufficient_data() {
    let klines: Vec<Kline> = (0..12).map(|i| kline(i * 60, 0.5, 10.0)).collect();
    let engine = MovingAverageEngine::compute(&klines, &MaConfig::default());

    // 5 and 10 fit into 12 klines, 20 and 30 do not
    let periods: Vec<usize> = engine.price_series().iter().map(|s| s.period).collect();
    assert_eq!(periods, vec![5, 10]);
}

#[test]
fn shortest_periods_are_visible_by_default() {
    let config = MaConfig::default();
    let mut visibility = MaVisibility::from_config(&config);

    assert!(visibility.is_visible(5));
    assert!(visibility.is_visible(10));
    assert!(!visibility.is_visible(20));
    assert!(!visibility.is_visible(30));

    visibility.toggle(20);
    assert!(visibility.is_visible(20));
    visibility.toggle(5);
    assert!(!visibility.is_visible(5));
}
