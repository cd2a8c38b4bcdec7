use crate::domain::market_data::TimeInterval;
use chrono::DateTime;

/// Format a bucket timestamp for the stats row according to the interval.
///
/// - intraday intervals -> `DD.MM HH:MM`
/// - daily -> `DD.MM.YYYY`
pub fn format_time_label(timestamp_secs: u64, interval: TimeInterval) -> String {
    let Some(date) = DateTime::from_timestamp(timestamp_secs as i64, 0) else {
        return timestamp_secs.to_string();
    };
    if interval.is_intraday() {
        date.format("%d.%m %H:%M").to_string()
    } else {
        date.format("%d.%m.%Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intraday_labels_carry_time_of_day() {
        // 2024-12-27T21:30:00Z
        assert_eq!(format_time_label(1_735_335_000, TimeInterval::FifteenMinutes), "27.12 21:30");
    }

    #[test]
    fn daily_labels_are_dates() {
        assert_eq!(format_time_label(1_735_335_000, TimeInterval::OneDay), "27.12.2024");
    }
}
