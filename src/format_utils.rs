//! Display formatting for the stats row and the value axes.

/// USD amount with K/M suffixes, the way volumes are shown
pub fn format_usd(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1_000_000.0 {
        format!("${:.2}M", value / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("${:.2}K", value / 1_000.0)
    } else {
        format!("${:.2}", value)
    }
}

/// Outcome share price, four decimals
pub fn format_price(value: f64) -> String {
    format!("{:.4}", value)
}

/// Signed percent; `None` (undefined change on a zero open) renders as
/// a placeholder instead of NaN
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(pct) => format!("{:+.2}%", pct),
        None => "--".to_string(),
    }
}

pub fn format_signed_price(value: f64) -> String {
    format!("{:+.4}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usd_suffixes() {
        assert_eq!(format_usd(12.5), "$12.50");
        assert_eq!(format_usd(1_250.0), "$1.25K");
        assert_eq!(format_usd(2_500_000.0), "$2.50M");
    }

    #[test]
    fn percent_placeholder_for_undefined() {
        assert_eq!(format_percent(None), "--");
        assert_eq!(format_percent(Some(3.456)), "+3.46%");
        assert_eq!(format_percent(Some(-1.2)), "-1.20%");
    }

    #[test]
    fn price_is_four_decimals() {
        assert_eq!(format_price(0.51234), "0.5123");
    }
}
