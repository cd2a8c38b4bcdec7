use crate::domain::chart::HoveredReadout;
use crate::domain::market_data::{Kline, MaConfig, MaVisibility, TimeInterval};
use leptos::*;
use once_cell::sync::OnceCell;

pub struct Globals {
    /// Caller-supplied ordered klines; the chart never mutates them
    pub klines: RwSignal<Vec<Kline>>,
    /// Volume-weighted reference price, when the collaborator has one
    pub reference_price: RwSignal<Option<f64>>,
    pub is_loading: RwSignal<bool>,
    pub chart_height: RwSignal<f64>,
    pub hovered_readout: RwSignal<Option<HoveredReadout>>,
    pub ma_visibility: RwSignal<MaVisibility>,
    pub current_interval: RwSignal<TimeInterval>,
}

static GLOBALS: OnceCell<Globals> = OnceCell::new();

pub fn globals() -> &'static Globals {
    GLOBALS.get_or_init(|| Globals {
        klines: create_rw_signal(Vec::new()),
        reference_price: create_rw_signal(None),
        is_loading: create_rw_signal(false),
        chart_height: create_rw_signal(425.0),
        hovered_readout: create_rw_signal(None),
        ma_visibility: create_rw_signal(MaVisibility::from_config(&MaConfig::default())),
        current_interval: create_rw_signal(TimeInterval::FifteenMinutes),
    })
}

crate::global_signals! {
    pub chart_klines => klines: Vec<Kline>,
    pub reference_price => reference_price: Option<f64>,
    pub is_loading => is_loading: bool,
    pub chart_height => chart_height: f64,
    pub hovered_readout => hovered_readout: Option<HoveredReadout>,
    pub ma_visibility => ma_visibility: MaVisibility,
    pub current_interval => current_interval: TimeInterval,
}
