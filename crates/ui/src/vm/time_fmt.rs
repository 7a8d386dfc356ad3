use chrono::NaiveDate;
use planner_core::model::TimeOfDay;

/// `Mar 14, 2024`
#[must_use]
pub fn format_date(value: NaiveDate) -> String {
    value.format("%b %-d, %Y").to_string()
}

#[must_use]
pub fn format_time_range(start: TimeOfDay, end: TimeOfDay) -> String {
    format!("{start} - {end}")
}

#[must_use]
pub fn format_hours(hours: u32) -> String {
    format!("{hours}h")
}

/// One decimal place, e.g. `4.1h`.
#[must_use]
pub fn format_average_hours(hours: f64) -> String {
    format!("{hours:.1}h")
}

/// `1 day left`, `12 days left`; past exams read `Exam passed`.
#[must_use]
pub fn format_days_left(days: i64) -> String {
    match days {
        d if d < 0 => "Exam passed".to_string(),
        1 => "1 day left".to_string(),
        d => format!("{d} days left"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_dates_and_ranges() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        assert_eq!(format_date(date), "Mar 4, 2024");

        let start = TimeOfDay::new(17, 0).unwrap();
        let end = TimeOfDay::new(19, 30).unwrap();
        assert_eq!(format_time_range(start, end), "17:00 - 19:30");
    }

    #[test]
    fn formats_hours() {
        assert_eq!(format_hours(5), "5h");
        assert_eq!(format_average_hours(29.0 / 7.0), "4.1h");
        assert_eq!(format_average_hours(0.0), "0.0h");
    }

    #[test]
    fn days_left_labels() {
        assert_eq!(format_days_left(0), "0 days left");
        assert_eq!(format_days_left(1), "1 day left");
        assert_eq!(format_days_left(12), "12 days left");
        assert_eq!(format_days_left(-2), "Exam passed");
    }
}
