use chrono::{DateTime, NaiveDate, NaiveDateTime};

const INPUT_FORMAT: &str = "%Y-%m-%d";

/// Parse a stored or user-entered date into a calendar day.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and offset-less
/// `YYYY-MM-DDTHH:MM:SS[.fff]`. Timestamps keep the calendar day as written
/// in their own offset; they are never shifted through UTC.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, INPUT_FORMAT) {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

/// Normalize a stored date to the `YYYY-MM-DD` form date inputs expect.
///
/// Unparseable input falls back to everything before the first `T`.
pub fn to_input_date(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }
    match parse_calendar_date(raw) {
        Some(date) => date.format(INPUT_FORMAT).to_string(),
        None => raw.split('T').next().unwrap_or_default().to_string(),
    }
}

/// Long-form display date, e.g. `May 15, 1990`.
pub fn format_display_date(raw: &str) -> String {
    if raw.trim().is_empty() {
        return "N/A".to_string();
    }
    match parse_calendar_date(raw) {
        Some(date) => date.format("%B %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_keeps_written_day() {
        let d = parse_calendar_date("1990-05-15T23:30:00-05:00").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(1990, 5, 15).unwrap());
    }

    #[test]
    fn offsetless_timestamp() {
        let d = parse_calendar_date("2001-01-02T03:04:05.678").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2001, 1, 2).unwrap());
    }

    #[test]
    fn input_fallback_splits_on_t() {
        assert_eq!(to_input_date("garbageT12:00"), "garbage");
    }
}
