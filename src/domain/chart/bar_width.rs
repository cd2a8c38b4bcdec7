//! Bar-width estimation in device pixels.
//!
//! Bars grow sub-linearly with spacing: dense charts stay legible and
//! sparse charts avoid oversized blocks. A narrow "special" spacing band
//! is pinned to a constant width because the taper produces visually
//! inconsistent widths in that transition zone.

use super::config::BarWidthConfig;

/// Screen pixels between consecutive bar centers.
///
/// Deterministic in `(plot_width, sample_count)`: the resize listener calls
/// this on every tick and must not depend on prior spacing state.
pub fn bar_spacing(plot_width: f64, sample_count: usize, config: &BarWidthConfig) -> f64 {
    if sample_count <= 1 || plot_width <= 0.0 {
        return config.max_spacing;
    }
    (plot_width / sample_count as f64).clamp(config.min_spacing, config.max_spacing)
}

/// Optimal bar width in device pixels for the given spacing.
pub fn optimal_bar_width(bar_spacing: f64, pixel_ratio: f64, config: &BarWidthConfig) -> u32 {
    let (band_from, band_to) = config.special_band;
    if bar_spacing >= band_from && bar_spacing <= band_to {
        return (config.special_coeff * pixel_ratio).floor() as u32;
    }

    let coeff = 1.0
        - config.reducing_factor * (bar_spacing.max(band_to) - band_to).atan()
            / (std::f64::consts::PI * 0.5);
    let tapered = (bar_spacing * coeff * pixel_ratio).floor();
    let scaled_spacing = (bar_spacing * pixel_ratio).floor();

    // Never wider than the spacing itself, never below one device pixel.
    tapered.min(scaled_spacing).max(pixel_ratio.round()) as u32
}
