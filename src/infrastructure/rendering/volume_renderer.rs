//! Custom histogram renderer for the volume pane.
//!
//! The renderer is a pluggable drawing unit: `update` stores the latest
//! visible-range window and render options, `draw` performs the paint pass
//! against a bitmap surface. All geometry is in device pixels.

use super::surface::BitmapSurface;
use crate::domain::chart::{Color, VolumeBar};
use std::ops::Range;

/// Options captured at `update` time
#[derive(Debug, Clone)]
pub struct VolumeRenderOptions {
    /// Index window into the stored bars
    pub visible: Range<usize>,
    /// Bar width in device pixels
    pub bar_width_px: u32,
    /// Series-level default color, second link of the fallback chain
    pub series_color: Option<Color>,
    /// Global default, the chain's last resort
    pub default_color: Color,
}

/// One laid-out histogram rectangle in device pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolumeBarRect {
    /// Index of the source bar, kept so hover highlighting survives skips
    pub index: usize,
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
    pub color: Color,
}

#[derive(Debug, Default)]
pub struct VolumePaneRenderer {
    bars: Option<Vec<VolumeBar>>,
    options: Option<VolumeRenderOptions>,
}

impl VolumePaneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the data window and options for the next paint pass
    pub fn update(&mut self, bars: Vec<VolumeBar>, options: VolumeRenderOptions) {
        self.bars = Some(bars);
        self.options = Some(options);
    }

    /// Drop stored data on teardown
    pub fn clear(&mut self) {
        self.bars = None;
        self.options = None;
    }

    /// Explicit three-level resolution: per-bar -> series default -> global
    pub fn resolve_color(&self, bar: &VolumeBar) -> Color {
        let options = self.options.as_ref();
        bar.color
            .or_else(|| options.and_then(|o| o.series_color))
            .unwrap_or_else(|| options.map(|o| o.default_color).unwrap_or(Color::rgb(0.5, 0.5, 0.5)))
    }

    /// Auto-scale contribution of the stored window: `{0, max value}` so
    /// the value axis always anchors at the baseline.
    pub fn price_range_contribution(&self) -> Option<(f64, f64)> {
        let bars = self.bars.as_ref()?;
        let options = self.options.as_ref()?;
        let window = bars.get(options.visible.clone())?;
        if window.is_empty() {
            return None;
        }
        let max = window.iter().map(|b| b.value).fold(0.0_f64, f64::max);
        Some((0.0, max))
    }

    /// Pure geometry pass over the visible range.
    ///
    /// `x_of` maps a bar index to its device-pixel center; `value_to_pixel`
    /// maps a value to its device-pixel row and returns `None` for values
    /// outside the pane's scale, in which case the bar is skipped rather
    /// than drawn as a degenerate rectangle.
    pub fn layout_bars(
        &self,
        x_of: &dyn Fn(usize) -> f64,
        value_to_pixel: &dyn Fn(f64) -> Option<f64>,
    ) -> Vec<VolumeBarRect> {
        let (Some(bars), Some(options)) = (self.bars.as_ref(), self.options.as_ref()) else {
            return Vec::new();
        };
        let Some(baseline) = value_to_pixel(0.0) else {
            return Vec::new();
        };

        let width = options.bar_width_px as f64;
        let mut rects = Vec::new();

        for index in options.visible.clone() {
            let Some(bar) = bars.get(index) else {
                break;
            };
            let Some(value_row) = value_to_pixel(bar.value) else {
                continue;
            };

            let center = x_of(index);
            let left = center - width / 2.0;
            let right = left + width - 1.0;

            rects.push(VolumeBarRect {
                index,
                left,
                right,
                top: value_row.min(baseline),
                bottom: value_row.max(baseline),
                color: self.resolve_color(bar),
            });
        }

        rects
    }

    /// Paint pass. Invoked with no stored data or an empty visible range
    /// this is a no-op, not an error.
    pub fn draw(
        &self,
        surface: &BitmapSurface,
        x_of: &dyn Fn(usize) -> f64,
        value_to_pixel: &dyn Fn(f64) -> Option<f64>,
        hovered: Option<usize>,
    ) {
        for rect in self.layout_bars(x_of, value_to_pixel) {
            let color = if hovered == Some(rect.index) {
                rect.color.with_alpha((rect.color.a + 0.35).min(1.0))
            } else {
                rect.color
            };
            surface.fill_rect(
                color,
                rect.left,
                rect.top,
                rect.right - rect.left + 1.0,
                (rect.bottom - rect.top).max(1.0),
            );
        }
    }
}
