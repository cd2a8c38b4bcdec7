//! Vertical pane arrangement and value-axis width synchronization.

use super::config::{AxisConfig, PaneStretch};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneKind {
    Price,
    /// Thin non-interactive gap between the price and volume sections
    Spacer,
    Volume,
}

/// One pane's vertical slot inside the chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaneRect {
    pub kind: PaneKind,
    pub top: f64,
    pub height: f64,
}

impl PaneRect {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn contains_y(&self, y: f64) -> bool {
        y >= self.top && y < self.bottom()
    }
}

/// Computed chart layout for one `(width, height)` pass
#[derive(Debug, Clone, PartialEq)]
pub struct PaneLayout {
    pub width: f64,
    pub height: f64,
    /// Synchronized value-axis width on the right edge
    pub axis_width: f64,
    /// Width left for bars once the axis is carved off
    pub plot_width: f64,
    pub panes: [PaneRect; 3],
}

impl PaneLayout {
    pub fn pane(&self, kind: PaneKind) -> &PaneRect {
        self.panes.iter().find(|p| p.kind == kind).expect("pane kinds are fixed")
    }

    /// Interactive pane under a pointer Y, the spacer swallows nothing
    pub fn interactive_pane_at(&self, y: f64) -> Option<&PaneRect> {
        self.panes.iter().find(|p| p.kind != PaneKind::Spacer && p.contains_y(y))
    }
}

/// Arranges the price pane, spacer and volume pane with relative stretch
/// factors and keeps their value axes width-synchronized.
///
/// Each pane's axis width is driven by its own labels; after a layout pass
/// the composer adopts the maximum observed width plus a floor so candle
/// columns line up vertically with their volume bars.
#[derive(Debug, Clone)]
pub struct PaneComposer {
    stretch: PaneStretch,
    axis: AxisConfig,
    effective_axis_width: f64,
}

impl PaneComposer {
    pub fn new(stretch: PaneStretch, axis: AxisConfig) -> Self {
        let effective_axis_width = axis.width_floor;
        Self { stretch, axis, effective_axis_width }
    }

    /// Glyph-count estimate for a label that has not been measured yet
    pub fn estimate_label_width(&self, label: &str) -> f64 {
        label.chars().count() as f64 * self.axis.glyph_width + self.axis.label_padding * 2.0
    }

    /// Pre-measurement seed so the first paint is already close
    pub fn seed_axis_width<'a>(&mut self, labels: impl Iterator<Item = &'a str>) {
        let widest =
            labels.map(|l| self.estimate_label_width(l)).fold(0.0_f64, f64::max);
        self.effective_axis_width = widest + self.axis.width_floor;
    }

    /// Adopt measured per-pane widths after a layout pass. Returns whether
    /// the effective width moved enough to warrant a repaint.
    pub fn sync_axis_width(&mut self, observed: &[f64]) -> bool {
        let widest = observed.iter().copied().fold(0.0_f64, f64::max);
        let synced = widest + self.axis.width_floor;
        let changed = (synced - self.effective_axis_width).abs() > 0.5;
        if changed {
            self.effective_axis_width = synced;
        }
        changed
    }

    pub fn axis_width(&self) -> f64 {
        self.effective_axis_width
    }

    pub fn layout(&self, width: f64, height: f64) -> PaneLayout {
        let total = self.stretch.price + self.stretch.spacer + self.stretch.volume;
        let price_height = height * self.stretch.price / total;
        let spacer_height = height * self.stretch.spacer / total;
        let volume_height = height - price_height - spacer_height;

        let axis_width = self.effective_axis_width.min(width * 0.5);
        let panes = [
            PaneRect { kind: PaneKind::Price, top: 0.0, height: price_height },
            PaneRect { kind: PaneKind::Spacer, top: price_height, height: spacer_height },
            PaneRect {
                kind: PaneKind::Volume,
                top: price_height + spacer_height,
                height: volume_height,
            },
        ];

        PaneLayout { width, height, axis_width, plot_width: (width - axis_width).max(0.0), panes }
    }
}
