use chrono::{Duration, Local, NaiveDate};

/// Display format used for `dateApplied`, e.g. "Aug 30, 2026".
const DATE_FORMAT: &str = "%b %-d, %Y";
const PARSE_FORMAT: &str = "%b %d, %Y";

/// Format "now" the way the tracker displays applied dates.
pub fn today_display() -> String {
    Local::now().format(DATE_FORMAT).to_string()
}

/// Parse a stored `dateApplied` string back into a date.
/// Returns None for strings written by hand or corrupted in storage.
pub fn parse_display(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), PARSE_FORMAT).ok()
}

/// True when the date falls within the last 7 days, inclusive.
pub fn is_within_week(date: NaiveDate) -> bool {
    date >= Local::now().date_naive() - Duration::days(7)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_padded_and_unpadded_days() {
        assert_eq!(
            parse_display("Aug 5, 2026"),
            NaiveDate::from_ymd_opt(2026, 8, 5)
        );
        assert_eq!(
            parse_display("Aug 05, 2026"),
            NaiveDate::from_ymd_opt(2026, 8, 5)
        );
        assert_eq!(parse_display("not a date"), None);
    }

    #[test]
    fn today_round_trips_through_parse() {
        let today = today_display();
        assert_eq!(parse_display(&today), Some(Local::now().date_naive()));
    }

    #[test]
    fn week_window_is_inclusive() {
        let today = Local::now().date_naive();
        assert!(is_within_week(today));
        assert!(is_within_week(today - Duration::days(7)));
        assert!(!is_within_week(today - Duration::days(8)));
    }
}
