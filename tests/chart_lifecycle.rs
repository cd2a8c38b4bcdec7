use market_chart_wasm::domain::chart::{
    ChartConfig, ChartController, ChartInputs, ChartPhase,
};
use market_chart_wasm::domain::market_data::{
    Kline, MaConfig, MaVisibility, OHLCV, Price, Timestamp, Volume,
};

fn kline(ts: u64, close: f64) -> Kline {
    Kline::new(
        Timestamp::from_secs(ts),
        OHLCV::new(
            Price::from(close),
            Price::from(close + 0.02),
            Price::from(close - 0.02),
            Price::from(close),
            Volume::from(50.0),
        ),
    )
}

fn inputs(count: usize, width: f64) -> ChartInputs {
    ChartInputs {
        klines: (0..count).map(|i| kline((i as u64 + 1) * 900, 0.5 + i as f64 * 0.001)).collect(),
        reference_price: Some(0.52),
        visibility: MaVisibility::from_config(&MaConfig::default()),
        width,
        height: 425.0,
        pixel_ratio: 1.0,
    }
}

fn controller() -> ChartController {
    ChartController::new(ChartConfig::default(), MaConfig::default())
}

#[test]
fn empty_data_never_reaches_the_built_phase() {
    let mut controller = controller();
    controller.rebuild(inputs(0, 800.0));

    assert_eq!(controller.phase(), ChartPhase::Uninitialized);
    assert_eq!(controller.build_count(), 0);
    assert_eq!(controller.dispose_count(), 0);
}

#[test]
fn teardown_count_equals_build_count_after_rebuilds() {
    let mut controller = controller();

    controller.rebuild(inputs(50, 800.0));
    controller.rebuild(inputs(80, 800.0));
    controller.rebuild(inputs(10, 640.0));
    assert_eq!(controller.phase(), ChartPhase::Built);
    assert_eq!(controller.build_count(), 3);
    assert_eq!(controller.dispose_count(), 2);

    // Unmount
    controller.dispose();
    assert_eq!(controller.phase(), ChartPhase::Destroyed);
    assert_eq!(controller.build_count(), 3);
    assert_eq!(controller.dispose_count(), 3);

    // Dispose is idempotent between builds
    controller.dispose();
    assert_eq!(controller.dispose_count(), 3);
}

#[test]
fn rebuild_with_empty_data_tears_the_old_graph_down() {
    let mut controller = controller();
    controller.rebuild(inputs(50, 800.0));
    assert_eq!(controller.phase(), ChartPhase::Built);

    controller.rebuild(inputs(0, 800.0));
    assert_eq!(controller.phase(), ChartPhase::Destroyed);
    assert_eq!(controller.build_count(), 1);
    assert_eq!(controller.dispose_count(), 1);
    assert!(controller.latest_readout().is_none());
}

#[test]
fn resize_recomputes_spacing_deterministically() {
    let mut controller = controller();
    controller.rebuild(inputs(100, 800.0));
    let original = controller.bar_spacing();

    controller.handle_resize(400.0);
    let narrow = controller.bar_spacing();
    assert!(narrow < original);

    // Returning to the original width restores the original spacing,
    // independent of the spacing state in between
    controller.handle_resize(800.0);
    assert_eq!(controller.bar_spacing(), original);
}

#[test]
fn hover_resolves_and_clears() {
    let mut controller = controller();
    let data = inputs(30, 800.0);
    let third_ts = data.klines[2].timestamp;
    controller.rebuild(data);

    let readout = controller.set_hovered_time(Some(third_ts)).unwrap();
    assert_eq!(readout.timestamp, third_ts);

    // A timestamp between buckets yields nothing
    assert!(controller.set_hovered_time(Some(Timestamp::from_secs(901))).is_none());
    // Pointer leave clears
    assert!(controller.set_hovered_time(None).is_none());
}

#[test]
fn stats_fall_back_to_the_latest_kline() {
    let mut controller = controller();
    controller.rebuild(inputs(30, 800.0));

    let latest = controller.latest_readout().unwrap();
    assert_eq!(latest.timestamp.value(), 30 * 900);
}

#[test]
fn pointer_x_maps_onto_bucket_timestamps() {
    let mut controller = controller();
    controller.rebuild(inputs(40, 800.0));
    let spacing = controller.bar_spacing();

    for i in [0usize, 1, 17, 39] {
        let x = i as f64 * spacing + spacing / 2.0;
        let ts = controller.timestamp_at_x(x).unwrap();
        assert_eq!(ts.value(), (i as u64 + 1) * 900, "bar {} at x {:.1}", i, x);
    }

    // Beyond the last bar there is nothing to hover
    assert!(controller.timestamp_at_x(40.0 * spacing + 1.0).is_none());
    assert!(controller.timestamp_at_x(-5.0).is_none());
}

#[test]
fn overflowing_series_shows_the_most_recent_window() {
    let mut controller = controller();
    controller.rebuild(inputs(1000, 300.0));

    // Spacing bottoms out at its minimum, so only the tail fits
    let plot_width = controller.layout().plot_width;
    let spacing = controller.bar_spacing();
    let fit = (plot_width / spacing).floor() as usize;
    assert!(fit < 1000);
    assert_eq!(controller.first_visible(), 1000 - fit);

    // Pointer X now maps into the tail window
    let ts = controller.timestamp_at_x(spacing / 2.0).unwrap();
    assert_eq!(ts.value(), (controller.first_visible() as u64 + 1) * 900);

    // A wide chart shows everything again
    controller.handle_resize(30_000.0);
    assert_eq!(controller.first_visible(), 0);
}

#[test]
fn disposed_controller_ignores_interaction() {
    let mut controller = controller();
    let data = inputs(30, 800.0);
    let ts = data.klines[0].timestamp;
    controller.rebuild(data);
    controller.dispose();

    assert!(controller.set_hovered_time(Some(ts)).is_none());
    assert!(controller.timestamp_at_x(10.0).is_none());
    controller.handle_resize(500.0); // must not panic or rebuild
    assert_eq!(controller.phase(), ChartPhase::Destroyed);
}
