use market_chart_wasm::domain::chart::bar_width::{bar_spacing, optimal_bar_width};
use market_chart_wasm::domain::chart::config::BarWidthConfig;
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

#[test]
fn special_band_width_is_constant() {
    let config = BarWidthConfig::default();

    // Inside the 2.5..4.0 band the exact spacing must not matter
    for i in 0..=150 {
        let spacing = 2.5 + i as f64 * 0.01;
        assert_eq!(
            optimal_bar_width(spacing, 1.0, &config),
            3,
            "spacing {:.2} should pin the width to floor(3 * ratio)",
            spacing
        );
        assert_eq!(optimal_bar_width(spacing, 2.0, &config), 6);
        assert_eq!(optimal_bar_width(spacing, 1.5, &config), 4);
    }
}

#[quickcheck]
fn width_is_monotonic_outside_the_band(a: f64, b: f64) -> TestResult {
    if !a.is_finite() || !b.is_finite() {
        return TestResult::discard();
    }
    let config = BarWidthConfig::default();

    // Map both inputs above the band where the taper applies
    let s1 = 4.0 + (a.abs() % 60.0);
    let s2 = 4.0 + (b.abs() % 60.0);
    let (lo, hi) = if s1 <= s2 { (s1, s2) } else { (s2, s1) };

    let w_lo = optimal_bar_width(lo, 2.0, &config);
    let w_hi = optimal_bar_width(hi, 2.0, &config);
    TestResult::from_bool(w_lo <= w_hi)
}

#[quickcheck]
fn width_stays_within_device_pixel_bounds(spacing: f64, ratio: f64) -> TestResult {
    if !spacing.is_finite() || !ratio.is_finite() {
        return TestResult::discard();
    }
    let config = BarWidthConfig::default();

    // Spacing below the configured minimum never reaches the estimator
    let spacing = 2.0 + (spacing.abs() % 58.0);
    let ratio = 1.0 + (ratio.abs() % 3.0);
    let (band_from, band_to) = config.special_band;
    if spacing >= band_from && spacing <= band_to {
        return TestResult::discard();
    }

    let width = optimal_bar_width(spacing, ratio, &config) as f64;
    TestResult::from_bool(width >= ratio.round() && width <= (spacing * ratio).floor())
}

#[test]
fn spacing_is_deterministic_in_width_and_count() {
    let config = BarWidthConfig::default();

    // No prior spacing state: the same pair always yields the same result
    let first = bar_spacing(731.0, 97, &config);
    bar_spacing(120.0, 5000, &config);
    bar_spacing(2000.0, 3, &config);
    let second = bar_spacing(731.0, 97, &config);

    assert_eq!(first, second);
}

#[test]
fn spacing_clamps_and_defaults() {
    let config = BarWidthConfig::default();

    assert_eq!(bar_spacing(800.0, 0, &config), config.max_spacing);
    assert_eq!(bar_spacing(800.0, 1, &config), config.max_spacing);
    assert_eq!(bar_spacing(100.0, 1000, &config), config.min_spacing);
    assert_eq!(bar_spacing(10_000.0, 10, &config), config.max_spacing);
}

#[test]
fn custom_configuration_moves_the_band() {
    let config = BarWidthConfig {
        special_band: (5.0, 6.0),
        special_coeff: 2.0,
        ..BarWidthConfig::default()
    };

    assert_eq!(optimal_bar_width(5.5, 1.0, &config), 2);
    // The default band no longer exists
    assert_eq!(optimal_bar_width(3.0, 1.0, &config), 3);
}
