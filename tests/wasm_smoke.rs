#![cfg(target_arch = "wasm32")]

use market_chart_wasm::domain::chart::{ChartConfig, ChartController, ChartInputs, ChartPhase};
use market_chart_wasm::domain::market_data::{
    Kline, MaConfig, MaVisibility, OHLCV, Price, Timestamp, Volume,
};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn kline(ts: u64, close: f64) -> Kline {
    Kline::new(
        Timestamp::from_secs(ts),
        OHLCV::new(
            Price::from(close),
            Price::from(close + 0.01),
            Price::from(close - 0.01),
            Price::from(close),
            Volume::from(25.0),
        ),
    )
}

#[wasm_bindgen_test]
fn headless_build_and_teardown_in_browser_runtime() {
    let mut controller = ChartController::new(ChartConfig::default(), MaConfig::default());
    controller.rebuild(ChartInputs {
        klines: (1..=60).map(|i| kline(i * 60, 0.5)).collect(),
        reference_price: Some(0.5),
        visibility: MaVisibility::from_config(&MaConfig::default()),
        width: 800.0,
        height: 425.0,
        pixel_ratio: 2.0,
    });

    assert_eq!(controller.phase(), ChartPhase::Built);
    controller.dispose();
    assert_eq!(controller.phase(), ChartPhase::Destroyed);
    assert_eq!(controller.build_count(), controller.dispose_count());
}
