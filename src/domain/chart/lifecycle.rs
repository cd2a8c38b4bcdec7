//! Chart object-graph lifecycle: `Uninitialized -> Built -> Destroyed`.
//!
//! There is no partial-update state. Any relevant input change runs the
//! full dispose-then-build sequence, which keeps the otherwise stateful
//! incremental-update problem out of the codebase entirely.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::render::AnimationFrame;

use crate::domain::chart::bar_width::{bar_spacing, optimal_bar_width};
use crate::domain::chart::config::ChartConfig;
use crate::domain::chart::crosshair::{CrosshairResolver, HoveredReadout, MaMarker};
use crate::domain::chart::panes::{PaneComposer, PaneLayout};
use crate::domain::chart::value_objects::PriceScale;
use crate::domain::errors::RenderingResult;
use crate::domain::logging::{LogComponent, get_logger};
use crate::domain::market_data::{
    Kline, KlineSeries, MaConfig, MaVisibility, MovingAverageEngine, Timestamp,
};
use crate::event_utils::WindowEventListenerHandle;

/// Everything a build is parameterized by; changing any field means a
/// dispose-then-build cycle, never an in-place patch.
#[derive(Debug, Clone)]
pub struct ChartInputs {
    pub klines: Vec<Kline>,
    /// Volume-weighted reference price drawn across the price pane
    pub reference_price: Option<f64>,
    pub visibility: MaVisibility,
    pub width: f64,
    pub height: f64,
    pub pixel_ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartPhase {
    Uninitialized,
    Built,
    Destroyed,
}

/// Measured results of a paint pass, fed back into axis synchronization
#[derive(Debug, Clone, Default)]
pub struct PaintReport {
    /// Value-axis label width each pane actually needed
    pub axis_widths: Vec<f64>,
}

/// One fully computed frame handed to the painter
pub struct RenderFrame<'a> {
    pub layout: &'a PaneLayout,
    /// Visible window of the series, most recent klines first to fit
    pub klines: &'a [Kline],
    /// Absolute index of `klines[0]` in the full series; overlay series
    /// are indexed absolutely and need the offset to line up
    pub first_visible: usize,
    pub bar_spacing: f64,
    pub bar_width_px: u32,
    pub pixel_ratio: f64,
    pub price_scale: PriceScale,
    pub volume_scale: PriceScale,
    pub ma: &'a MovingAverageEngine,
    pub visibility: &'a MaVisibility,
    pub reference_price: Option<f64>,
    pub hovered: Option<usize>,
    pub ma_markers: &'a [MaMarker],
    pub palette: &'a crate::domain::chart::config::Palette,
}

impl RenderFrame<'_> {
    /// Bar center X in CSS pixels within the plot area
    pub fn x_of(&self, index: usize) -> f64 {
        index as f64 * self.bar_spacing + self.bar_spacing / 2.0
    }

    /// Inverse of `x_of`, exact bucket only
    pub fn index_at_x(&self, x: f64) -> Option<usize> {
        if x < 0.0 || self.bar_spacing <= 0.0 {
            return None;
        }
        let index = (x / self.bar_spacing).floor() as usize;
        (index < self.klines.len()).then_some(index)
    }
}

/// Seam between the domain lifecycle and the canvas-backed infrastructure
pub trait ChartPainter {
    fn paint(&mut self, frame: &RenderFrame<'_>) -> RenderingResult<PaintReport>;
    /// Release the underlying drawing surface
    fn release(&mut self);
}

/// Owns the chart object graph for exactly one mount instance.
pub struct ChartController {
    config: ChartConfig,
    ma_config: MaConfig,
    phase: ChartPhase,
    composer: PaneComposer,
    series: KlineSeries,
    engine: MovingAverageEngine,
    resolver: CrosshairResolver,
    visibility: MaVisibility,
    reference_price: Option<f64>,
    width: f64,
    height: f64,
    pixel_ratio: f64,
    spacing: f64,
    /// Absolute index of the first kline that fits on screen
    first_visible: usize,
    /// Absolute index of the hovered kline
    hovered: Option<usize>,
    painter: Option<Box<dyn ChartPainter>>,
    resize_listener: Option<WindowEventListenerHandle>,
    /// Cancels the deferred axis-sync pass when dropped on dispose
    pending_axis_sync: Option<AnimationFrame>,
    /// Per-build liveness token; stale deferred callbacks check it and bail
    alive: Rc<Cell<bool>>,
    observed_axis_widths: Vec<f64>,
    build_count: u32,
    dispose_count: u32,
}

impl ChartController {
    pub fn new(config: ChartConfig, ma_config: MaConfig) -> Self {
        let composer = PaneComposer::new(config.stretch.clone(), config.axis.clone());
        let visibility = MaVisibility::from_config(&ma_config);
        Self {
            config,
            ma_config,
            phase: ChartPhase::Uninitialized,
            composer,
            series: KlineSeries::new(),
            engine: MovingAverageEngine::default(),
            resolver: CrosshairResolver::default(),
            visibility,
            reference_price: None,
            width: 0.0,
            height: 0.0,
            pixel_ratio: 1.0,
            spacing: 0.0,
            first_visible: 0,
            hovered: None,
            painter: None,
            resize_listener: None,
            pending_axis_sync: None,
            alive: Rc::new(Cell::new(false)),
            observed_axis_widths: Vec::new(),
            build_count: 0,
            dispose_count: 0,
        }
    }

    pub fn phase(&self) -> ChartPhase {
        self.phase
    }

    pub fn build_count(&self) -> u32 {
        self.build_count
    }

    pub fn dispose_count(&self) -> u32 {
        self.dispose_count
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn ma_config(&self) -> &MaConfig {
        &self.ma_config
    }

    pub fn attach_painter(&mut self, painter: Box<dyn ChartPainter>) {
        self.painter = Some(painter);
    }

    /// Dispose the previous graph, then build the next one. Strictly two
    /// phases so pointer/resize subscriptions never overlap across builds.
    pub fn rebuild(&mut self, inputs: ChartInputs) {
        self.dispose();

        if inputs.klines.is_empty() {
            get_logger().info(
                LogComponent::Domain("Lifecycle"),
                "⏳ No klines yet, staying torn down until data arrives",
            );
            return;
        }

        self.series = KlineSeries::from_klines(inputs.klines);
        self.engine = MovingAverageEngine::compute(self.series.as_slice(), &self.ma_config);
        self.resolver = CrosshairResolver::new(self.series.as_slice());
        self.visibility = inputs.visibility;
        self.reference_price = inputs.reference_price;
        self.width = inputs.width;
        self.height = inputs.height;
        self.pixel_ratio = if inputs.pixel_ratio > 0.0 { inputs.pixel_ratio } else { 1.0 };
        self.hovered = None;
        self.alive = Rc::new(Cell::new(true));

        self.seed_axis_width();
        self.update_spacing_and_window();

        if self.painter.is_some() {
            self.resize_listener = Some(crate::event_utils::listen_to_window_resize());
        }

        self.build_count += 1;
        self.phase = ChartPhase::Built;

        get_logger().info(
            LogComponent::Domain("Lifecycle"),
            &format!(
                "📊 Chart graph built: {} klines, spacing {:.2}px (build #{})",
                self.series.count(),
                self.spacing,
                self.build_count
            ),
        );

        self.paint();
        self.schedule_axis_sync();
    }

    /// Full teardown. Idempotent; a second call before the next build is a
    /// no-op and does not bump the dispose counter.
    pub fn dispose(&mut self) {
        if self.phase != ChartPhase::Built {
            return;
        }

        self.alive.set(false);
        if let Some(listener) = self.resize_listener.take() {
            listener.remove();
        }
        // Dropping the handle cancels the scheduled animation-frame pass.
        self.pending_axis_sync = None;
        if let Some(painter) = self.painter.as_mut() {
            painter.release();
        }

        self.series = KlineSeries::new();
        self.engine = MovingAverageEngine::default();
        self.resolver = CrosshairResolver::default();
        self.hovered = None;
        self.first_visible = 0;
        self.observed_axis_widths.clear();

        self.dispose_count += 1;
        self.phase = ChartPhase::Destroyed;

        get_logger().info(
            LogComponent::Domain("Lifecycle"),
            &format!("🧹 Chart graph disposed (dispose #{})", self.dispose_count),
        );
    }

    /// Resize tick: recompute spacing from `(width, sample_count)` and
    /// re-apply layout. Cheap enough to run un-debounced.
    pub fn handle_resize(&mut self, width: f64) {
        if self.phase != ChartPhase::Built {
            return;
        }
        self.width = width;
        self.update_spacing_and_window();
        self.paint();
    }

    pub fn bar_spacing(&self) -> f64 {
        self.spacing
    }

    /// Absolute index of the first on-screen kline
    pub fn first_visible(&self) -> usize {
        self.first_visible
    }

    /// Spacing from `(plot_width, count)`, and the most-recent window of
    /// klines that fits once spacing bottoms out at its minimum.
    fn update_spacing_and_window(&mut self) {
        let plot_width = self.composer.layout(self.width, self.height).plot_width;
        self.spacing = bar_spacing(plot_width, self.series.count(), &self.config.bar_width);

        // Epsilon guards the unclamped case where plot / (plot / count)
        // lands a hair under count.
        let fit = if self.spacing > 0.0 {
            (((plot_width / self.spacing) + 1e-6).floor() as usize).max(1)
        } else {
            1
        };
        let visible = self.series.count().min(fit);
        self.first_visible = self.series.count() - visible;
    }

    /// Map a pointer X (CSS px, plot-area relative) to the bucket timestamp
    pub fn timestamp_at_x(&self, x: f64) -> Option<Timestamp> {
        if self.phase != ChartPhase::Built || self.spacing <= 0.0 || x < 0.0 {
            return None;
        }
        let index = self.first_visible + (x / self.spacing).floor() as usize;
        self.series.as_slice().get(index).map(|k| k.timestamp)
    }

    /// Crosshair move. `None` clears the hover; the readout for the UI is
    /// returned, already guarded against a zero open.
    pub fn set_hovered_time(&mut self, timestamp: Option<Timestamp>) -> Option<HoveredReadout> {
        if self.phase != ChartPhase::Built {
            return None;
        }

        let readout = self.resolver.resolve(self.series.as_slice(), timestamp);
        self.hovered = timestamp.and_then(|t| self.resolver.index_of(t));
        self.paint();
        readout
    }

    /// Stats-row fallback when nothing is hovered
    pub fn latest_readout(&self) -> Option<HoveredReadout> {
        self.series.latest().map(HoveredReadout::from_kline)
    }

    fn seed_axis_width(&mut self) {
        let labels: Vec<String> = self
            .price_scale_labels()
            .into_iter()
            .chain(self.volume_scale_labels())
            .collect();
        self.composer.seed_axis_width(labels.iter().map(String::as_str));
    }

    fn price_scale(&self) -> PriceScale {
        let (min, max) = self
            .series
            .price_range()
            .map(|(lo, hi)| (lo.value(), hi.value()))
            .unwrap_or((0.0, 1.0));
        let (min, max) = match self.reference_price {
            Some(reference) => (min.min(reference), max.max(reference)),
            None => (min, max),
        };
        PriceScale::padded(min, max, 0.05)
    }

    fn volume_scale(&self) -> PriceScale {
        // Anchored at the zero baseline, the histogram's auto-scale
        // contribution is always {0, value}.
        let max = self.series.max_volume().map(|v| v.value()).unwrap_or(1.0);
        PriceScale::new(0.0, if max > 0.0 { max * 1.05 } else { 1.0 })
    }

    fn price_scale_labels(&self) -> Vec<String> {
        let scale = self.price_scale();
        vec![
            crate::format_utils::format_price(scale.min),
            crate::format_utils::format_price(scale.max),
        ]
    }

    fn volume_scale_labels(&self) -> Vec<String> {
        let scale = self.volume_scale();
        vec![crate::format_utils::format_usd(scale.max)]
    }

    /// Synchronous paint pass over the current graph
    pub fn paint(&mut self) {
        if self.phase != ChartPhase::Built {
            return;
        }
        let Some(mut painter) = self.painter.take() else {
            return;
        };

        let layout = self.composer.layout(self.width, self.height);
        let ma_markers: Vec<MaMarker> = self
            .hovered
            .and_then(|i| self.series.as_slice().get(i))
            .map(|k| {
                self.resolver.ma_markers(
                    self.engine.price_series(),
                    &self.visibility,
                    k.timestamp,
                )
            })
            .unwrap_or_default();

        let visible_klines = &self.series.as_slice()[self.first_visible..];
        let hovered_in_window = self
            .hovered
            .and_then(|abs| abs.checked_sub(self.first_visible))
            .filter(|i| *i < visible_klines.len());

        let frame = RenderFrame {
            layout: &layout,
            klines: visible_klines,
            first_visible: self.first_visible,
            bar_spacing: self.spacing,
            bar_width_px: optimal_bar_width(self.spacing, self.pixel_ratio, &self.config.bar_width),
            pixel_ratio: self.pixel_ratio,
            price_scale: self.price_scale(),
            volume_scale: self.volume_scale(),
            ma: &self.engine,
            visibility: &self.visibility,
            reference_price: self.reference_price,
            hovered: hovered_in_window,
            ma_markers: &ma_markers,
            palette: &self.config.palette,
        };

        match painter.paint(&frame) {
            Ok(report) => self.observed_axis_widths = report.axis_widths,
            Err(e) => {
                get_logger()
                    .error(LogComponent::Domain("Lifecycle"), &format!("❌ Paint failed: {}", e));
            }
        }

        self.painter = Some(painter);
    }

    /// Accurate axis widths are only known after the first layout, so the
    /// width synchronization repaint is deferred to the next paint frame.
    fn schedule_axis_sync(&mut self) {
        if self.painter.is_none() {
            // Headless builds (tests) synchronize immediately.
            self.apply_axis_sync();
            return;
        }

        let alive = Rc::clone(&self.alive);
        self.pending_axis_sync = Some(gloo::render::request_animation_frame(move |_| {
            if !alive.get() {
                return;
            }
            with_chart_controller(|controller| controller.apply_axis_sync());
        }));
    }

    /// Adopt the measured widths; repaint only if the shared width moved
    pub fn apply_axis_sync(&mut self) {
        if self.phase != ChartPhase::Built {
            return;
        }
        let observed = std::mem::take(&mut self.observed_axis_widths);
        if observed.is_empty() {
            return;
        }
        if self.composer.sync_axis_width(&observed) {
            self.update_spacing_and_window();
            self.paint();
        }
    }

    /// Layout snapshot for hit-testing in the presentation layer
    pub fn layout(&self) -> PaneLayout {
        self.composer.layout(self.width, self.height)
    }
}

impl Drop for ChartController {
    fn drop(&mut self) {
        self.dispose();
    }
}

// The chart graph is exclusively owned by one mount instance; the global
// handle mirrors how the renderer is exposed to the UI layer.
thread_local! {
    static GLOBAL_CONTROLLER: RefCell<Option<Rc<RefCell<ChartController>>>> =
        const { RefCell::new(None) };
}

/// Store the mount instance's controller
pub fn set_chart_controller(controller: Rc<RefCell<ChartController>>) {
    GLOBAL_CONTROLLER.with(|cell| {
        *cell.borrow_mut() = Some(controller);
    });
}

/// Obtain a mutable reference to the mounted controller
pub fn with_chart_controller<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut ChartController) -> R,
{
    GLOBAL_CONTROLLER.with(|cell| {
        let opt = cell.borrow_mut();
        opt.as_ref().map(|rc| f(&mut rc.borrow_mut()))
    })
}
