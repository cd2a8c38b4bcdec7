//! WASM API bridging JavaScript collaborators to the chart.
//!
//! Collaborators push already-shaped kline arrays and a scalar reference
//! price; the chart pushes back interval-selection events. Nothing here
//! fetches data.

use leptos::SignalSet;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;

use crate::domain::logging::{LogComponent, get_logger};
use crate::domain::market_data::{Kline, OHLCV, Price, TimeInterval, Timestamp, Volume};
use crate::global_state::{chart_height, chart_klines, is_loading, reference_price};

/// Wire shape of one kline row, as served by the markets API
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct KlineDto {
    pub timestamp: u64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl From<KlineDto> for Kline {
    fn from(dto: KlineDto) -> Self {
        Kline::new(
            Timestamp::from_secs(dto.timestamp),
            OHLCV::new(
                Price::from(dto.open),
                Price::from(dto.high),
                Price::from(dto.low),
                Price::from(dto.close),
                Volume::from(dto.volume),
            ),
        )
    }
}

thread_local! {
    static INTERVAL_CALLBACK: RefCell<Option<js_sys::Function>> = const { RefCell::new(None) };
}

/// Mount the chart UI into the document body
#[wasm_bindgen]
pub fn mount_chart() {
    leptos::mount_to_body(crate::app::App);
    get_logger().info(LogComponent::Presentation("WasmApi"), "🚀 Chart mounted");
}

/// Replace the kline array. Triggers a full dispose-and-rebuild cycle.
#[wasm_bindgen]
pub fn set_klines(json: &str) -> Result<(), JsValue> {
    let rows: Vec<KlineDto> = serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid kline payload: {}", e)))?;

    let count = rows.len();
    let klines: Vec<Kline> = rows.into_iter().map(Kline::from).collect();
    chart_klines().set(klines);

    get_logger().info(
        LogComponent::Presentation("WasmApi"),
        &format!("📊 Received {} klines", count),
    );
    Ok(())
}

/// Update the volume-weighted reference price; `undefined` clears it
#[wasm_bindgen]
pub fn set_reference_price(price: Option<f64>) {
    reference_price().set(price.filter(|p| p.is_finite()));
}

#[wasm_bindgen]
pub fn set_loading(loading: bool) {
    is_loading().set(loading);
}

#[wasm_bindgen]
pub fn set_chart_height(height: f64) {
    if height > 0.0 {
        chart_height().set(height);
    }
}

/// Register the collaborator callback for interval-selection events
#[wasm_bindgen]
pub fn on_interval_change(callback: js_sys::Function) {
    INTERVAL_CALLBACK.with(|cell| {
        *cell.borrow_mut() = Some(callback);
    });
}

pub(crate) fn notify_interval_change(interval: TimeInterval) {
    get_logger().info(
        LogComponent::Presentation("WasmApi"),
        &format!("⏱️ Interval selected: {}", interval),
    );
    INTERVAL_CALLBACK.with(|cell| {
        if let Some(callback) = cell.borrow().as_ref() {
            let _ = callback.call1(&JsValue::NULL, &JsValue::from_str(interval.as_ref()));
        }
    });
}
