//! Per-field coercion rules.
//!
//! Every coercion here is infallible from the caller's point of view: the `try_*` variants
//! report whether the raw value was usable, and the field mappers apply the documented default
//! when they were not. A bad cell never rejects its row.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

use crate::types::LeadStatus;

/// Status candidates, checked in order; the first whose keyword set hits wins.
///
/// Order matters for real-world inputs like "Closed - Won" which should never fall through to
/// the default.
const STATUS_RULES: &[(&[&str], LeadStatus)] = &[
    (&["hot"], LeadStatus::Hot),
    (&["warm"], LeadStatus::Warm),
    (&["cold"], LeadStatus::Cold),
    (&["closed", "won"], LeadStatus::Closed),
    (&["lost"], LeadStatus::Lost),
];

/// Normalize a raw status cell by keyword containment, or `None` when nothing matches.
pub fn try_normalize_status(raw: &str) -> Option<LeadStatus> {
    let lowered = raw.to_lowercase();
    STATUS_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(_, status)| *status)
}

/// Normalize a raw status cell; inputs outside the known set collapse to [`LeadStatus::Warm`].
pub fn normalize_status(raw: &str) -> LeadStatus {
    try_normalize_status(raw).unwrap_or_default()
}

/// Parse a currency/number cell, tolerating symbols and thousands separators
/// ("₹45,000.50" => 45000.5). `None` when no digits survive. Never negative: sign characters
/// are stripped along with everything else non-numeric.
pub fn try_parse_currency(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned.parse::<f64>().ok()
}

/// Parse a currency/number cell, defaulting to 0 on failure.
pub fn parse_currency(raw: &str) -> f64 {
    try_parse_currency(raw).unwrap_or(0.0)
}

/// Parse a non-negative integer cell ("25 leads" => 25). `None` when no digits survive.
pub fn try_parse_count(raw: &str) -> Option<u32> {
    let cleaned: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    cleaned.parse::<u32>().ok()
}

/// Parse a non-negative integer cell, defaulting to 0 on failure.
pub fn parse_count(raw: &str) -> u32 {
    try_parse_count(raw).unwrap_or(0)
}

/// Yes/no cell: case-insensitive "yes" is `true`, anything else (including empty) is `false`.
pub fn parse_yes_no(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("yes")
}

/// Date formats accepted for cells without an explicit offset, tried in order.
const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"];
const NAIVE_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d-%b-%Y"];

/// Generic date parsing: RFC 3339 first, then the common spreadsheet formats.
///
/// Bare dates and offset-less date-times are interpreted as UTC, matching the ISO-8601
/// normalization applied at parse time ("2024-01-01" => 2024-01-01T00:00:00Z).
pub fn try_parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(naive.and_utc());
        }
    }
    for fmt in NAIVE_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }
    None
}

/// The calendar date a cell names, as written (no timezone shifting).
///
/// Used by overdue detection, which compares calendar dates with time of day stripped.
pub fn try_parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(naive.date());
        }
    }
    for fmt in NAIVE_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date);
        }
    }
    None
}

/// Canonical ISO-8601 rendering with millisecond precision and a `Z` suffix.
pub fn to_iso(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn status_keyword_containment() {
        assert_eq!(normalize_status("HOT!!"), LeadStatus::Hot);
        assert_eq!(normalize_status("warm-ish"), LeadStatus::Warm);
        assert_eq!(normalize_status("Cold"), LeadStatus::Cold);
        assert_eq!(normalize_status("Closed - Won"), LeadStatus::Closed);
        assert_eq!(normalize_status("WON"), LeadStatus::Closed);
        assert_eq!(normalize_status("Lost to competitor"), LeadStatus::Lost);
    }

    #[test]
    fn garbage_status_collapses_to_warm() {
        assert_eq!(normalize_status("???"), LeadStatus::Warm);
        assert_eq!(normalize_status(""), LeadStatus::Warm);
        assert_eq!(try_normalize_status("pending"), None);
    }

    #[test]
    fn currency_strips_symbols_and_separators() {
        assert_eq!(parse_currency("₹45,000.50"), 45000.5);
        assert_eq!(parse_currency("$12,000"), 12000.0);
        assert_eq!(parse_currency("1200"), 1200.0);
    }

    #[test]
    fn currency_defaults_to_zero_and_never_goes_negative() {
        assert_eq!(parse_currency("n/a"), 0.0);
        assert_eq!(parse_currency(""), 0.0);
        // The minus sign is stripped with the other symbols.
        assert_eq!(parse_currency("-500"), 500.0);
        assert_eq!(try_parse_currency("TBD"), None);
    }

    #[test]
    fn count_parsing() {
        assert_eq!(parse_count("25"), 25);
        assert_eq!(parse_count("25 leads"), 25);
        assert_eq!(parse_count("none"), 0);
    }

    #[test]
    fn yes_no_is_strict_on_yes_only() {
        assert!(parse_yes_no("yes"));
        assert!(parse_yes_no("YES"));
        assert!(parse_yes_no(" Yes "));
        assert!(!parse_yes_no("no"));
        assert!(!parse_yes_no("true"));
        assert!(!parse_yes_no("y"));
        assert!(!parse_yes_no(""));
    }

    #[test]
    fn bare_date_normalizes_to_utc_midnight() {
        let dt = try_parse_date("2024-01-01").unwrap();
        assert_eq!(to_iso(dt), "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn rfc3339_is_preserved_through_normalization() {
        let dt = try_parse_date("2024-03-05T10:30:00+05:30").unwrap();
        assert_eq!(to_iso(dt), "2024-03-05T05:00:00.000Z");
    }

    #[test]
    fn slash_dates_parse_month_first() {
        let dt = try_parse_date("03/04/2024").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap());
    }

    #[test]
    fn unparsable_dates_are_none() {
        assert_eq!(try_parse_date("soon"), None);
        assert_eq!(try_parse_date(""), None);
        assert_eq!(try_parse_calendar_date("next week"), None);
    }

    #[test]
    fn calendar_date_is_taken_as_written() {
        // The offset does not shift the named calendar day.
        let date = try_parse_calendar_date("2024-01-01T23:00:00-08:00").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(
            try_parse_calendar_date("2024-06-15"),
            NaiveDate::from_ymd_opt(2024, 6, 15)
        );
    }
}
