//! EmulationStation date codec.
//!
//! Gamelists encode instants as fixed-width `YYYYMMDDTHHMMSS` strings in UTC.

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};

/// Minimum length of an encoded date.
pub const ES_DATE_LEN: usize = 15;

/// Parse a `YYYYMMDDTHHMMSS` string as a UTC instant.
///
/// Returns `None` for strings shorter than 15 characters, non-numeric
/// components, or impossible calendar dates. Characters past position 15
/// are ignored.
///
/// ```
/// use gamelist_core::es_date::parse_es_date;
///
/// let dt = parse_es_date("19910623T000000").unwrap();
/// assert_eq!(dt.to_rfc3339(), "1991-06-23T00:00:00+00:00");
/// assert!(parse_es_date("19910623").is_none());
/// ```
pub fn parse_es_date(s: &str) -> Option<DateTime<Utc>> {
    if s.len() < ES_DATE_LEN {
        return None;
    }

    let year: i32 = digits(s, 0, 4)?;
    let month: u32 = digits(s, 4, 6)?;
    let day: u32 = digits(s, 6, 8)?;
    let hour: u32 = digits(s, 9, 11)?;
    let minute: u32 = digits(s, 11, 13)?;
    let second: u32 = digits(s, 13, 15)?;

    let naive = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)?;
    Some(naive.and_utc())
}

/// Encode an instant as `YYYYMMDDTHHMMSS` in UTC.
pub fn format_es_date(dt: &DateTime<Utc>) -> String {
    format!(
        "{:04}{:02}{:02}T{:02}{:02}{:02}",
        dt.year(),
        dt.month(),
        dt.day(),
        dt.hour(),
        dt.minute(),
        dt.second()
    )
}

fn digits<T: std::str::FromStr>(s: &str, start: usize, end: usize) -> Option<T> {
    let part = s.get(start..end)?;
    if !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

#[cfg(test)]
#[path = "tests/es_date_tests.rs"]
mod tests;
