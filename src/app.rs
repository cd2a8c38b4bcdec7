use leptos::html::Canvas;
use leptos::*;
use std::cell::RefCell;
use std::rc::Rc;
use strum::IntoEnumIterator;

use crate::domain::chart::{
    ChartConfig, ChartController, ChartInputs, set_chart_controller, with_chart_controller,
};
use crate::domain::logging::{LogComponent, get_logger};
use crate::domain::market_data::{MaConfig, TimeInterval};
use crate::format_utils::{format_percent, format_price, format_signed_price, format_usd};
use crate::global_state::{
    chart_height, chart_klines, current_interval, hovered_readout, is_loading, ma_visibility,
    reference_price,
};
use crate::infrastructure::rendering::CanvasPainter;
use crate::time_utils::format_time_label;

pub const CHART_CANVAS_ID: &str = "market-chart-canvas";

/// CSS width of the chart container, `None` before mount
pub fn chart_container_width() -> Option<f64> {
    let document = web_sys::window()?.document()?;
    let canvas = document.get_element_by_id(CHART_CANVAS_ID)?;
    let width = canvas.client_width() as f64;
    (width > 0.0).then_some(width)
}

fn device_pixel_ratio() -> f64 {
    web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0)
}

fn ensure_controller() {
    if with_chart_controller(|_| ()).is_some() {
        return;
    }
    let mut controller = ChartController::new(ChartConfig::default(), MaConfig::default());
    controller.attach_painter(Box::new(CanvasPainter::new(CHART_CANVAS_ID)));
    set_chart_controller(Rc::new(RefCell::new(controller)));

    get_logger().info(LogComponent::Presentation("App"), "📈 Chart controller mounted");
}

/// 🦀 Market sentiment kline chart
#[component]
pub fn App() -> impl IntoView {
    view! {
        <style>
            {r#"
            .market-chart {
                font-family: 'SF Pro Display', -apple-system, BlinkMacSystemFont, sans-serif;
                background: #131722;
                color: #d1d4dc;
                border-radius: 10px;
                padding: 12px;
            }

            .stats-row {
                display: flex;
                flex-wrap: wrap;
                gap: 14px;
                font-size: 12px;
                font-family: 'Courier New', monospace;
                padding: 4px 2px 10px 2px;
            }

            .stats-row .label {
                color: #787b86;
                margin-right: 4px;
            }

            .stats-row .up { color: #26a69a; }
            .stats-row .down { color: #ef5350; }

            .chart-wrapper {
                position: relative;
            }

            .chart-wrapper canvas {
                width: 100%;
                display: block;
                cursor: crosshair;
            }

            .chart-placeholder {
                position: absolute;
                inset: 0;
                display: flex;
                align-items: center;
                justify-content: center;
                background: #131722;
                color: #787b86;
                font-size: 13px;
            }

            .chart-controls {
                display: flex;
                justify-content: space-between;
                padding-top: 8px;
            }

            .toggle-row button {
                background: transparent;
                color: #787b86;
                border: 1px solid #2a2e39;
                border-radius: 4px;
                padding: 3px 8px;
                margin-right: 4px;
                font-size: 11px;
                cursor: pointer;
            }

            .toggle-row button.active {
                color: #d1d4dc;
                border-color: #5c9df2;
            }
            "#}
        </style>
        <div class="market-chart">
            <StatsRow />
            <ChartContainer />
            <div class="chart-controls">
                <MaToggleRow />
                <IntervalRow />
            </div>
        </div>
    }
}

/// 🎨 Canvas host; rebuilds the chart graph whenever an input changes
#[component]
fn ChartContainer() -> impl IntoView {
    let canvas_ref = create_node_ref::<Canvas>();

    // Full rebuild on every relevant input change: klines, reference price,
    // display height or overlay visibility. Dispose runs strictly first.
    create_effect(move |_| {
        let klines = chart_klines().get();
        let reference = reference_price().get();
        let height = chart_height().get();
        let visibility = ma_visibility().get();

        if canvas_ref.get().is_none() {
            return;
        }
        ensure_controller();

        with_chart_controller(|controller| {
            controller.rebuild(ChartInputs {
                klines,
                reference_price: reference,
                visibility,
                width: chart_container_width().unwrap_or(800.0),
                height,
                pixel_ratio: device_pixel_ratio(),
            });
        });

        // Reset the readout to the freshest kline after a rebuild.
        hovered_readout().set(None);
    });

    // Unmount guarantees full teardown of the chart graph.
    on_cleanup(move || {
        with_chart_controller(|controller| controller.dispose());
    });

    let handle_mouse_move = move |event: web_sys::MouseEvent| {
        let x = event.offset_x() as f64;
        let y = event.offset_y() as f64;

        let readout = with_chart_controller(|controller| {
            let layout = controller.layout();
            if layout.interactive_pane_at(y).is_none() || x > layout.plot_width {
                controller.set_hovered_time(None)
            } else {
                let timestamp = controller.timestamp_at_x(x);
                controller.set_hovered_time(timestamp)
            }
        })
        .flatten();

        hovered_readout().set(readout);
    };

    let handle_mouse_leave = move |_event: web_sys::MouseEvent| {
        with_chart_controller(|controller| {
            controller.set_hovered_time(None);
        });
        hovered_readout().set(None);
    };

    let show_placeholder = move || is_loading().get() || chart_klines().with(|k| k.is_empty());
    let placeholder_text =
        move || if is_loading().get() { "Loading klines..." } else { "No kline data for this market yet" };

    view! {
        <div class="chart-wrapper">
            <canvas
                id=CHART_CANVAS_ID
                node_ref=canvas_ref
                style=move || format!("height: {}px;", chart_height().get())
                on:mousemove=handle_mouse_move
                on:mouseleave=handle_mouse_leave
            />
            <Show when=show_placeholder fallback=|| ()>
                <div class="chart-placeholder">{placeholder_text}</div>
            </Show>
        </div>
    }
}

/// 📊 Live OHLCV readout; hovered bar wins, latest kline is the fallback
#[component]
fn StatsRow() -> impl IntoView {
    let readout = move || {
        // Touch the kline signal so the fallback refreshes with new data.
        chart_klines().with(|_| ());
        hovered_readout()
            .get()
            .or_else(|| with_chart_controller(|c| c.latest_readout()).flatten())
    };

    let change_class = move || {
        readout().map(|r| if r.change >= 0.0 { "up" } else { "down" }).unwrap_or("up")
    };

    view! {
        <div class="stats-row">
            <span>
                <span class="label">"Time"</span>
                {move || {
                    readout()
                        .map(|r| format_time_label(r.timestamp.value(), current_interval().get()))
                        .unwrap_or_else(|| "--".to_string())
                }}
            </span>
            <span>
                <span class="label">"O"</span>
                {move || readout().map(|r| format_price(r.open)).unwrap_or_else(|| "--".into())}
            </span>
            <span>
                <span class="label">"H"</span>
                {move || readout().map(|r| format_price(r.high)).unwrap_or_else(|| "--".into())}
            </span>
            <span>
                <span class="label">"L"</span>
                {move || readout().map(|r| format_price(r.low)).unwrap_or_else(|| "--".into())}
            </span>
            <span>
                <span class="label">"C"</span>
                {move || readout().map(|r| format_price(r.close)).unwrap_or_else(|| "--".into())}
            </span>
            <span>
                <span class="label">"Vol"</span>
                {move || readout().map(|r| format_usd(r.volume)).unwrap_or_else(|| "--".into())}
            </span>
            <span>
                <span class="label">"VWAP"</span>
                {move || {
                    reference_price().get().map(format_price).unwrap_or_else(|| "--".into())
                }}
            </span>
            <span class=change_class>
                <span class="label">"Chg"</span>
                {move || {
                    readout()
                        .map(|r| {
                            format!(
                                "{} ({})",
                                format_signed_price(r.change),
                                format_percent(r.change_percent)
                            )
                        })
                        .unwrap_or_else(|| "--".into())
                }}
            </span>
        </div>
    }
}

/// 📐 Moving-average period toggles; each flips one overlay independently
#[component]
fn MaToggleRow() -> impl IntoView {
    let periods = MaConfig::default().price_periods;

    view! {
        <div class="toggle-row">
            <For
                each=move || periods.clone()
                key=|period| *period
                children=move |period| {
                    let is_active = move || ma_visibility().with(|v| v.is_visible(period));
                    view! {
                        <button
                            class:active=is_active
                            on:click=move |_| {
                                ma_visibility().update(|v| v.toggle(period));
                            }
                        >
                            {format!("MA{}", period)}
                        </button>
                    }
                }
            />
        </div>
    }
}

/// ⏱️ Interval buttons; selection is an outbound event, collaborators
/// refetch and push a new kline array
#[component]
fn IntervalRow() -> impl IntoView {
    view! {
        <div class="toggle-row">
            <For
                each=move || Vec::from_iter(TimeInterval::iter())
                key=|interval| *interval
                children=move |interval| {
                    let is_active = move || current_interval().get() == interval;
                    view! {
                        <button
                            class:active=is_active
                            on:click=move |_| {
                                current_interval().set(interval);
                                crate::presentation::wasm_api::notify_interval_change(interval);
                            }
                        >
                            {interval.to_string()}
                        </button>
                    }
                }
            />
        </div>
    }
}
