//! Overlay lines: moving averages, the reference-price line and crosshair
//! markers.

use super::surface::BitmapSurface;
use crate::domain::chart::Color;
use crate::domain::market_data::MaSeries;

#[derive(Debug, Default)]
pub struct OverlayLineRenderer;

impl OverlayLineRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Polyline for one moving average.
    ///
    /// Point `i` of a period-`p` series belongs to the kline at absolute
    /// index `i + p - 1`; `x_of_abs` yields `None` outside the visible
    /// window. Off-window and off-scale points break the line rather than
    /// being clamped.
    pub fn draw_ma(
        &self,
        surface: &BitmapSurface,
        series: &MaSeries,
        x_of_abs: &dyn Fn(usize) -> Option<f64>,
        value_to_pixel: &dyn Fn(f64) -> Option<f64>,
        color: Color,
    ) {
        let line_width = surface.to_device(1.5);
        let mut run: Vec<(f64, f64)> = Vec::with_capacity(series.len());

        for (i, point) in series.points.iter().enumerate() {
            match (x_of_abs(i + series.period - 1), value_to_pixel(point.value)) {
                (Some(x), Some(y)) => run.push((x, y)),
                _ => {
                    surface.stroke_polyline(color, &run, line_width);
                    run.clear();
                }
            }
        }
        surface.stroke_polyline(color, &run, line_width);
    }

    /// Dashed horizontal reference line across the plot area
    pub fn draw_reference_line(
        &self,
        surface: &BitmapSurface,
        y: f64,
        x_end: f64,
        color: Color,
    ) {
        let dash = [surface.to_device(4.0), surface.to_device(3.0)];
        surface.stroke_line(color, (0.0, y), (x_end, y), surface.to_device(1.0), Some(&dash));
    }

    /// Thin horizontal marker line for a hovered moving-average value
    pub fn draw_marker_line(
        &self,
        surface: &BitmapSurface,
        y: f64,
        x_end: f64,
        color: Color,
    ) {
        let dash = [surface.to_device(2.0), surface.to_device(2.0)];
        surface.stroke_line(color, (0.0, y), (x_end, y), surface.to_device(1.0), Some(&dash));
    }

    /// Vertical crosshair line through one pane
    pub fn draw_crosshair_column(
        &self,
        surface: &BitmapSurface,
        x: f64,
        y_top: f64,
        y_bottom: f64,
        color: Color,
    ) {
        let dash = [surface.to_device(3.0), surface.to_device(3.0)];
        surface.stroke_line(color, (x, y_top), (x, y_bottom), surface.to_device(1.0), Some(&dash));
    }
}
