//! Candlestick rendering for the price pane.

use super::surface::BitmapSurface;
use crate::domain::chart::Color;
use crate::domain::market_data::Kline;

/// Precomputed device-pixel data for one candle
#[derive(Debug, Clone, Copy)]
struct CandleRenderData {
    x: f64,
    high_y: f64,
    low_y: f64,
    open_y: f64,
    close_y: f64,
    color: Color,
    body_width: f64,
}

#[derive(Debug, Default)]
pub struct CandleRenderer;

impl CandleRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Draw the visible candles.
    ///
    /// `value_to_pixel` yields `None` for off-scale prices; such candles
    /// are skipped instead of being drawn at a clamped coordinate.
    #[allow(clippy::too_many_arguments)]
    pub fn draw(
        &self,
        surface: &BitmapSurface,
        klines: &[Kline],
        x_of: &dyn Fn(usize) -> f64,
        value_to_pixel: &dyn Fn(f64) -> Option<f64>,
        body_width_px: u32,
        bullish: Color,
        bearish: Color,
        wick: Color,
    ) {
        let wick_width = surface.pixel_ratio().round().max(1.0);

        for (i, kline) in klines.iter().enumerate() {
            let Some(data) = self.layout_candle(
                kline,
                x_of(i),
                value_to_pixel,
                body_width_px,
                bullish,
                bearish,
            ) else {
                continue;
            };

            // Wick spans the full high-low range behind the body
            surface.fill_rect(
                wick,
                data.x - wick_width / 2.0,
                data.high_y,
                wick_width,
                (data.low_y - data.high_y).max(1.0),
            );

            let body_top = data.open_y.min(data.close_y);
            let body_height = (data.open_y - data.close_y).abs();
            let left = data.x - data.body_width / 2.0;

            if body_height < 1.0 {
                // Doji: open and close land on the same row
                surface.fill_rect(data.color, left, body_top, data.body_width, 1.0);
            } else {
                surface.fill_rect(data.color, left, body_top, data.body_width, body_height);
            }
        }
    }

    fn layout_candle(
        &self,
        kline: &Kline,
        x: f64,
        value_to_pixel: &dyn Fn(f64) -> Option<f64>,
        body_width_px: u32,
        bullish: Color,
        bearish: Color,
    ) -> Option<CandleRenderData> {
        let open_y = value_to_pixel(kline.ohlcv.open.value())?;
        let high_y = value_to_pixel(kline.ohlcv.high.value())?;
        let low_y = value_to_pixel(kline.ohlcv.low.value())?;
        let close_y = value_to_pixel(kline.ohlcv.close.value())?;

        Some(CandleRenderData {
            x,
            high_y,
            low_y,
            open_y,
            close_y,
            color: if kline.is_bullish() { bullish } else { bearish },
            body_width: body_width_px as f64,
        })
    }
}
