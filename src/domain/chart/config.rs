use super::value_objects::Color;

/// Bar-width estimator tuning, injected instead of module-level constants
/// so the estimator stays unit-testable with arbitrary configurations.
#[derive(Debug, Clone, PartialEq)]
pub struct BarWidthConfig {
    /// Narrow transition zone where the width is pinned to a constant
    /// multiple of the pixel ratio
    pub special_band: (f64, f64),
    /// Width multiple applied inside the special band
    pub special_coeff: f64,
    /// Strength of the arctangent taper outside the band
    pub reducing_factor: f64,
    /// Clamp range for bar spacing derived from container width
    pub min_spacing: f64,
    pub max_spacing: f64,
}

impl Default for BarWidthConfig {
    fn default() -> Self {
        Self {
            special_band: (2.5, 4.0),
            special_coeff: 3.0,
            reducing_factor: 0.2,
            min_spacing: 2.0,
            max_spacing: 26.0,
        }
    }
}

/// Relative pane heights: price, spacer, volume
#[derive(Debug, Clone, PartialEq)]
pub struct PaneStretch {
    pub price: f64,
    pub spacer: f64,
    pub volume: f64,
}

impl Default for PaneStretch {
    fn default() -> Self {
        Self { price: 3.0, spacer: 0.25, volume: 1.0 }
    }
}

/// Value-axis layout tuning shared by all panes
#[derive(Debug, Clone, PartialEq)]
pub struct AxisConfig {
    /// Added on top of the widest observed axis so labels never touch the edge
    pub width_floor: f64,
    /// Average glyph width used to estimate a label before it is measured
    pub glyph_width: f64,
    pub label_padding: f64,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self { width_floor: 8.0, glyph_width: 7.0, label_padding: 8.0 }
    }
}

/// Chart palette, dashboard colors for prediction-market candles
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub bullish: Color,
    pub bearish: Color,
    pub wick: Color,
    pub volume_up: Color,
    pub volume_down: Color,
    /// Global fallback when neither a bar nor the series carries a color
    pub volume_default: Color,
    pub reference_line: Color,
    pub crosshair: Color,
    pub axis_text: Color,
    /// Overlay line colors cycled by period order
    pub ma_lines: Vec<Color>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::from_hex(0x131722),
            bullish: Color::from_hex(0x26A69A),
            bearish: Color::from_hex(0xEF5350),
            wick: Color::rgb(0.6, 0.6, 0.6),
            volume_up: Color::from_hex(0x26A69A).with_alpha(0.55),
            volume_down: Color::from_hex(0xEF5350).with_alpha(0.55),
            volume_default: Color::rgb(0.5, 0.5, 0.5).with_alpha(0.55),
            reference_line: Color::from_hex(0xF39C12),
            crosshair: Color::rgb(0.75, 0.75, 0.78).with_alpha(0.9),
            axis_text: Color::rgb(0.66, 0.68, 0.72),
            ma_lines: vec![
                Color::from_hex(0xF2C55C),
                Color::from_hex(0x5C9DF2),
                Color::from_hex(0xC95CF2),
                Color::from_hex(0x5CF2B8),
            ],
        }
    }
}

impl Palette {
    pub fn ma_color(&self, index: usize) -> Color {
        self.ma_lines[index % self.ma_lines.len()]
    }
}

/// Everything the chart object graph is built from
#[derive(Debug, Clone, Default)]
pub struct ChartConfig {
    pub bar_width: BarWidthConfig,
    pub stretch: PaneStretch,
    pub axis: AxisConfig,
    pub palette: Palette,
}
