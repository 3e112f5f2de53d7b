//! String encodings for dates and flags.
//!
//! Dates are stored as ISO `YYYY-MM-DD` and flags as `true`/`false`.
//! Parsing is lenient: anything unrecognised reads as absent.

use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Formats a marker date.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses a marker date, returning `None` for malformed values.
#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Formats a marker flag.
#[must_use]
pub const fn format_flag(flag: bool) -> &'static str {
    if flag { "true" } else { "false" }
}

/// Parses a marker flag, returning `None` for malformed values.
#[must_use]
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn date_round_trips_through_storage_format() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 9).expect("valid date");
        assert_eq!(format_date(date), "2026-03-09");
        assert_eq!(parse_date("2026-03-09"), Some(date));
    }

    #[rstest]
    #[case("")]
    #[case("09/03/2026")]
    #[case("2026-02-30")]
    fn malformed_dates_read_as_absent(#[case] raw: &str) {
        assert_eq!(parse_date(raw), None);
    }

    #[rstest]
    #[case("true", Some(true))]
    #[case(" 1 ", Some(true))]
    #[case("false", Some(false))]
    #[case("yes", None)]
    fn parses_flags(#[case] raw: &str, #[case] expected: Option<bool>) {
        assert_eq!(parse_flag(raw), expected);
    }
}
