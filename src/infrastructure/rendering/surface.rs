use crate::domain::chart::Color;
use crate::domain::errors::ChartError;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Device-pixel-ratio-aware canvas wrapper.
///
/// All drawing coordinates are bitmap (device-pixel) coordinates, distinct
/// from CSS pixels: the backing store is `css_size * pixel_ratio` and the
/// context is deliberately left unscaled so renderers control rounding.
pub struct BitmapSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    css_width: f64,
    css_height: f64,
    pixel_ratio: f64,
}

impl BitmapSurface {
    /// Get canvas element and 2D context by element id
    pub fn acquire(canvas_id: &str) -> Result<Self, ChartError> {
        let window = web_sys::window()
            .ok_or_else(|| ChartError::SurfaceError("Window not available".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| ChartError::SurfaceError("Document not available".to_string()))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| {
                ChartError::SurfaceError(format!("Canvas element '{}' not found", canvas_id))
            })?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| ChartError::SurfaceError("Element is not a canvas".to_string()))?;

        let context = canvas
            .get_context("2d")
            .map_err(|_| ChartError::SurfaceError("Failed to get 2D context".to_string()))?
            .ok_or_else(|| ChartError::SurfaceError("2D context unavailable".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| ChartError::SurfaceError("Failed to cast to 2D context".to_string()))?;

        Ok(Self { canvas, context, css_width: 0.0, css_height: 0.0, pixel_ratio: 1.0 })
    }

    /// Resize the backing store to `css * pixel_ratio` device pixels
    pub fn ensure_size(&mut self, css_width: f64, css_height: f64, pixel_ratio: f64) {
        let pixel_ratio = if pixel_ratio > 0.0 { pixel_ratio } else { 1.0 };
        if self.css_width == css_width
            && self.css_height == css_height
            && self.pixel_ratio == pixel_ratio
        {
            return;
        }
        self.css_width = css_width;
        self.css_height = css_height;
        self.pixel_ratio = pixel_ratio;
        self.canvas.set_width((css_width * pixel_ratio).round() as u32);
        self.canvas.set_height((css_height * pixel_ratio).round() as u32);
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    /// Convert a CSS-pixel length to device pixels
    pub fn to_device(&self, css: f64) -> f64 {
        css * self.pixel_ratio
    }

    pub fn clear(&self, background: Color) {
        let width = self.canvas.width() as f64;
        let height = self.canvas.height() as f64;
        self.context.clear_rect(0.0, 0.0, width, height);
        self.context.set_fill_style(&JsValue::from(background.to_css()));
        self.context.fill_rect(0.0, 0.0, width, height);
    }

    /// Filled rectangle in device pixels
    pub fn fill_rect(&self, color: Color, x: f64, y: f64, width: f64, height: f64) {
        self.context.set_fill_style(&JsValue::from(color.to_css()));
        self.context.fill_rect(x, y, width, height);
    }

    /// Stroked segment in device pixels; `dash` is a device-pixel pattern
    pub fn stroke_line(
        &self,
        color: Color,
        (x1, y1): (f64, f64),
        (x2, y2): (f64, f64),
        line_width: f64,
        dash: Option<&[f64]>,
    ) {
        self.context.set_stroke_style(&JsValue::from(color.to_css()));
        self.context.set_line_width(line_width);
        let pattern = js_sys::Array::new();
        if let Some(dash) = dash {
            for segment in dash {
                pattern.push(&JsValue::from_f64(*segment));
            }
        }
        let _ = self.context.set_line_dash(&pattern);
        self.context.begin_path();
        self.context.move_to(x1, y1);
        self.context.line_to(x2, y2);
        self.context.stroke();
    }

    /// Polyline through device-pixel points
    pub fn stroke_polyline(&self, color: Color, points: &[(f64, f64)], line_width: f64) {
        if points.len() < 2 {
            return;
        }
        self.context.set_stroke_style(&JsValue::from(color.to_css()));
        self.context.set_line_width(line_width);
        let _ = self.context.set_line_dash(&js_sys::Array::new());
        self.context.begin_path();
        self.context.move_to(points[0].0, points[0].1);
        for &(x, y) in &points[1..] {
            self.context.line_to(x, y);
        }
        self.context.stroke();
    }

    pub fn set_font(&self, css_size: f64) {
        let device_size = (css_size * self.pixel_ratio).round();
        self.context.set_font(&format!("{}px sans-serif", device_size));
    }

    pub fn fill_text(&self, text: &str, color: Color, x: f64, y: f64) {
        self.context.set_fill_style(&JsValue::from(color.to_css()));
        let _ = self.context.fill_text(text, x, y);
    }

    /// Measured label width in CSS pixels (the composer works in CSS space)
    pub fn measure_text_css(&self, text: &str) -> f64 {
        self.context
            .measure_text(text)
            .map(|metrics| metrics.width() / self.pixel_ratio)
            .unwrap_or(0.0)
    }
}
