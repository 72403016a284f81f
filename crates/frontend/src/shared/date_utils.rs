/// Date and time formatting shared by the list and detail views.
use chrono::NaiveDateTime;

/// Format a backend datetime for display: `05/11/2024 09:30`.
pub fn format_datetime(dt: &NaiveDateTime) -> String {
    dt.format("%d/%m/%Y %H:%M").to_string()
}

/// Format an ISO datetime string for display, tolerant of fractional
/// seconds and zone suffixes. Unparsable input is shown as-is.
pub fn format_datetime_str(raw: &str) -> String {
    let trimmed = raw.split('.').next().unwrap_or(raw).trim_end_matches('Z');
    match NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        Ok(dt) => format_datetime(&dt),
        Err(_) => raw.to_string(),
    }
}

/// Value for an `<input type="datetime-local">` element.
pub fn datetime_local_value(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M").to_string()
}

/// Parse what a `datetime-local` input produces (minutes, or with seconds).
pub fn parse_datetime_local(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_backend_datetimes() {
        assert_eq!(
            format_datetime_str("2024-11-05T09:30:00"),
            "05/11/2024 09:30"
        );
        assert_eq!(
            format_datetime_str("2024-11-05T09:30:00.123Z"),
            "05/11/2024 09:30"
        );
        assert_eq!(format_datetime_str("invalid"), "invalid");
    }

    #[test]
    fn datetime_local_round_trip() {
        let dt = parse_datetime_local("2024-11-05T09:30").unwrap();
        assert_eq!(datetime_local_value(&dt), "2024-11-05T09:30");
        assert!(parse_datetime_local("2024-11-05T09:30:15").is_some());
        assert!(parse_datetime_local("05/11/2024").is_none());
    }
}
