//! Full paint pass over the composed panes, driven by the chart lifecycle.

use super::candle_renderer::CandleRenderer;
use super::line_renderer::OverlayLineRenderer;
use super::surface::BitmapSurface;
use super::volume_renderer::{VolumePaneRenderer, VolumeRenderOptions};
use crate::domain::chart::lifecycle::{ChartPainter, PaintReport, RenderFrame};
use crate::domain::chart::{PaneKind, VolumeBar};
use crate::domain::errors::RenderingResult;
use crate::domain::logging::{LogComponent, get_logger};
use crate::format_utils::{format_price, format_usd};

pub struct CanvasPainter {
    canvas_id: String,
    surface: Option<BitmapSurface>,
    candles: CandleRenderer,
    volume: VolumePaneRenderer,
    lines: OverlayLineRenderer,
}

impl CanvasPainter {
    pub fn new(canvas_id: &str) -> Self {
        Self {
            canvas_id: canvas_id.to_string(),
            surface: None,
            candles: CandleRenderer::new(),
            volume: VolumePaneRenderer::new(),
            lines: OverlayLineRenderer::new(),
        }
    }

    /// Histogram bars derived from the klines; the per-bar color is chosen
    /// by the close-versus-open direction of the same-time kline.
    fn derive_volume_bars(frame: &RenderFrame<'_>) -> Vec<VolumeBar> {
        frame
            .klines
            .iter()
            .map(|kline| VolumeBar {
                timestamp: kline.timestamp,
                value: kline.ohlcv.volume.value(),
                color: Some(if kline.is_bullish() {
                    frame.palette.volume_up
                } else {
                    frame.palette.volume_down
                }),
            })
            .collect()
    }
}

impl ChartPainter for CanvasPainter {
    fn paint(&mut self, frame: &RenderFrame<'_>) -> RenderingResult<PaintReport> {
        if self.surface.is_none() {
            self.surface = Some(BitmapSurface::acquire(&self.canvas_id)?);
            get_logger().debug(
                LogComponent::Infrastructure("CanvasPainter"),
                &format!("🎨 Acquired surface '{}'", self.canvas_id),
            );
        }

        // Update the volume renderer before borrowing the surface.
        self.volume.update(
            Self::derive_volume_bars(frame),
            VolumeRenderOptions {
                visible: 0..frame.klines.len(),
                bar_width_px: frame.bar_width_px,
                series_color: None,
                default_color: frame.palette.volume_default,
            },
        );

        let surface = self.surface.as_mut().expect("surface acquired above");
        surface.ensure_size(frame.layout.width, frame.layout.height, frame.pixel_ratio);
        let surface = &*surface;

        surface.clear(frame.palette.background);
        surface.set_font(11.0);

        let dpr = frame.pixel_ratio;
        let price_pane = *frame.layout.pane(PaneKind::Price);
        let volume_pane = *frame.layout.pane(PaneKind::Volume);

        let x_of = |index: usize| (frame.x_of(index) * dpr).round();
        // Overlay series are indexed over the full kline array; map their
        // absolute indexes into the visible window or drop them.
        let x_of_abs = |abs: usize| {
            abs.checked_sub(frame.first_visible).filter(|w| *w < frame.klines.len()).map(x_of)
        };
        let price_to_pixel = |value: f64| {
            frame
                .price_scale
                .value_to_y(value, price_pane.height)
                .map(|y| ((price_pane.top + y) * dpr).round())
        };
        let volume_to_pixel = |value: f64| {
            frame
                .volume_scale
                .value_to_y(value, volume_pane.height)
                .map(|y| ((volume_pane.top + y) * dpr).round())
        };

        let plot_right = frame.layout.plot_width * dpr;
        let label_x = plot_right + surface.to_device(4.0);

        // --- price pane -------------------------------------------------
        self.candles.draw(
            surface,
            frame.klines,
            &x_of,
            &price_to_pixel,
            frame.bar_width_px,
            frame.palette.bullish,
            frame.palette.bearish,
            frame.palette.wick,
        );

        for (color_index, series) in frame.ma.price_series().iter().enumerate() {
            if !frame.visibility.is_visible(series.period) {
                continue;
            }
            self.lines.draw_ma(
                surface,
                series,
                &x_of_abs,
                &price_to_pixel,
                frame.palette.ma_color(color_index),
            );
        }

        let mut price_labels =
            vec![format_price(frame.price_scale.max), format_price(frame.price_scale.min)];

        surface.fill_text(
            &price_labels[0],
            frame.palette.axis_text,
            label_x,
            (price_pane.top * dpr) + surface.to_device(12.0),
        );
        surface.fill_text(
            &price_labels[1],
            frame.palette.axis_text,
            label_x,
            (price_pane.bottom() * dpr) - surface.to_device(4.0),
        );

        if let Some(reference) = frame.reference_price {
            if let Some(y) = price_to_pixel(reference) {
                self.lines.draw_reference_line(surface, y, plot_right, frame.palette.reference_line);
                let label = format_price(reference);
                surface.fill_text(&label, frame.palette.reference_line, label_x, y + surface.to_device(4.0));
                price_labels.push(label);
            }
        }

        // --- volume pane ------------------------------------------------
        self.volume.draw(surface, &x_of, &volume_to_pixel, frame.hovered);

        for (color_index, series) in frame.ma.volume_series().iter().enumerate() {
            self.lines.draw_ma(
                surface,
                series,
                &x_of_abs,
                &volume_to_pixel,
                frame.palette.ma_color(color_index),
            );
        }

        let volume_labels = vec![format_usd(frame.volume_scale.max)];
        surface.fill_text(
            &volume_labels[0],
            frame.palette.axis_text,
            label_x,
            (volume_pane.top * dpr) + surface.to_device(12.0),
        );

        // --- crosshair --------------------------------------------------
        if let Some(hovered) = frame.hovered {
            let x = x_of(hovered);
            self.lines.draw_crosshair_column(
                surface,
                x,
                price_pane.top * dpr,
                price_pane.bottom() * dpr,
                frame.palette.crosshair,
            );
            self.lines.draw_crosshair_column(
                surface,
                x,
                volume_pane.top * dpr,
                volume_pane.bottom() * dpr,
                frame.palette.crosshair,
            );

            for marker in frame.ma_markers {
                let Some(y) = price_to_pixel(marker.value) else {
                    continue;
                };
                // Marker color matches the overlay line of the same period.
                let color_index = frame
                    .ma
                    .price_series()
                    .iter()
                    .position(|s| s.period == marker.period)
                    .unwrap_or(0);
                let color = frame.palette.ma_color(color_index);
                self.lines.draw_marker_line(surface, y, plot_right, color);
                let label = format_price(marker.value);
                surface.fill_text(&label, color, label_x, y + surface.to_device(4.0));
                price_labels.push(label);
            }
        }

        // Measured label widths feed the deferred axis-width sync.
        let pane_width = |labels: &[String]| {
            labels.iter().map(|l| surface.measure_text_css(l)).fold(0.0_f64, f64::max)
                + 8.0 // label padding on both sides of the axis gutter
        };

        Ok(PaintReport {
            axis_widths: vec![pane_width(&price_labels), pane_width(&volume_labels)],
        })
    }

    fn release(&mut self) {
        self.volume.clear();
        self.surface = None;
    }
}
