//! Strict `YYYY-MM-DD` date parsing.

use chrono::NaiveDate;

/// Parses a calendar date written exactly as `YYYY-MM-DD`.
///
/// Rejects other widths, signs, and dates that do not exist (e.g. `2019-02-29`).
#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !digits_ok {
        return None;
    }

    let year = value[0..4].parse().ok()?;
    let month = value[5..7].parse().ok()?;
    let day = value[8..10].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Returns true if the value is a valid `YYYY-MM-DD` date.
#[must_use]
pub fn is_valid_date(value: &str) -> bool {
    parse_date(value).is_some()
}
