//! ISO-8601 text forms for calendar dates and naive timestamps.
//!
//! Parsing is strict: chrono alone accepts unpadded fields such as
//! `2023-1-5`, so every parsed value is checked against its own
//! canonical rendering.

use crate::error::{CoreError, CoreResult};
use chrono::{NaiveDate, NaiveDateTime, Timelike};

/// Calendar date format (`YYYY-MM-DD`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Timestamp format up to whole seconds.
const TIMESTAMP_SECONDS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Length of `YYYY-MM-DDTHH:MM:SS`.
const TIMESTAMP_SECONDS_LEN: usize = 19;

/// chrono stores a leap second as a nanosecond value of at least this.
const NANOS_PER_SECOND: u32 = 1_000_000_000;

#[inline]
pub fn render_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Render a timestamp as `YYYY-MM-DDTHH:MM:SS[.ffffff]`.
///
/// The fraction is omitted when zero, printed with 6 digits when the value
/// has microsecond resolution, and with 9 digits otherwise. A leap second
/// renders as `:60` followed by its fraction within that second.
pub fn render_timestamp(ts: &NaiveDateTime) -> String {
    let base = ts.format(TIMESTAMP_SECONDS_FORMAT);
    match ts.nanosecond() % NANOS_PER_SECOND {
        0 => base.to_string(),
        n if n % 1_000 == 0 => format!("{base}.{:06}", n / 1_000),
        n => format!("{base}.{n:09}"),
    }
}

/// Parse a strict `YYYY-MM-DD` date.
pub fn parse_date(text: &str) -> CoreResult<NaiveDate> {
    let date = NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|_| CoreError::InvalidDate(text.to_string()))?;

    if render_date(&date) != text {
        return Err(CoreError::InvalidDate(text.to_string()));
    }

    Ok(date)
}

/// Parse a strict `YYYY-MM-DDTHH:MM:SS[.f]` timestamp (1-9 fraction digits, no offset).
pub fn parse_timestamp(text: &str) -> CoreResult<NaiveDateTime> {
    let invalid = || CoreError::InvalidTimestamp(text.to_string());

    let (head, fraction) = match text.split_once('.') {
        Some((head, fraction)) => (head, Some(fraction)),
        None => (text, None),
    };

    if head.len() != TIMESTAMP_SECONDS_LEN {
        return Err(invalid());
    }

    let ts = NaiveDateTime::parse_from_str(head, TIMESTAMP_SECONDS_FORMAT).map_err(|_| invalid())?;
    if ts.format(TIMESTAMP_SECONDS_FORMAT).to_string() != head {
        return Err(invalid());
    }

    let Some(fraction) = fraction else {
        return Ok(ts);
    };

    if fraction.is_empty() || fraction.len() > 9 || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }

    // Right-pad to nanoseconds: ".5" is 500ms.
    let nanos: u32 = format!("{fraction:0<9}").parse().map_err(|_| invalid())?;
    // A `:60` head already carries the leap offset; keep it.
    let leap = ts.nanosecond() - ts.nanosecond() % NANOS_PER_SECOND;
    ts.with_nanosecond(leap + nanos).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32, micro: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_micro_opt(h, mi, s, micro)
            .unwrap()
    }

    #[test]
    fn test_date_render_and_parse() {
        let date = NaiveDate::from_ymd_opt(2023, 1, 5).unwrap();
        assert_eq!(render_date(&date), "2023-01-05");
        assert_eq!(parse_date("2023-01-05").unwrap(), date);
    }

    #[test]
    fn test_date_parse_is_strict() {
        assert!(parse_date("2023-1-5").is_err());
        assert!(parse_date("2023-02-30").is_err());
        assert!(parse_date("05/01/2023").is_err());
        assert!(parse_date("2023-01-05T00:00:00").is_err());
    }

    #[test]
    fn test_timestamp_render() {
        assert_eq!(
            render_timestamp(&ts(2023, 1, 5, 14, 30, 0, 0)),
            "2023-01-05T14:30:00"
        );
        assert_eq!(
            render_timestamp(&ts(2023, 1, 5, 14, 30, 0, 123_456)),
            "2023-01-05T14:30:00.123456"
        );
        assert_eq!(
            render_timestamp(&ts(2023, 1, 5, 14, 30, 0, 500_000)),
            "2023-01-05T14:30:00.500000"
        );
    }

    #[test]
    fn test_timestamp_nanosecond_render() {
        let value = NaiveDate::from_ymd_opt(2023, 1, 5)
            .unwrap()
            .and_hms_nano_opt(9, 0, 0, 1)
            .unwrap();
        let text = render_timestamp(&value);
        assert_eq!(text, "2023-01-05T09:00:00.000000001");
        assert_eq!(parse_timestamp(&text).unwrap(), value);
    }

    #[test]
    fn test_leap_second_round_trip() {
        let date = NaiveDate::from_ymd_opt(2016, 12, 31).unwrap();

        let whole = date.and_hms_milli_opt(23, 59, 59, 1_000).unwrap();
        let text = render_timestamp(&whole);
        assert_eq!(text, "2016-12-31T23:59:60");
        assert_eq!(parse_timestamp(&text).unwrap(), whole);

        let fractional = date.and_hms_milli_opt(23, 59, 59, 1_100).unwrap();
        let text = render_timestamp(&fractional);
        assert_eq!(text, "2016-12-31T23:59:60.100000");
        assert_eq!(parse_timestamp(&text).unwrap(), fractional);

        let nanos = date.and_hms_nano_opt(23, 59, 59, 1_000_000_007).unwrap();
        let text = render_timestamp(&nanos);
        assert_eq!(text, "2016-12-31T23:59:60.000000007");
        assert_eq!(parse_timestamp(&text).unwrap(), nanos);
    }

    #[test]
    fn test_timestamp_parse() {
        assert_eq!(
            parse_timestamp("2023-01-05T14:30:00").unwrap(),
            ts(2023, 1, 5, 14, 30, 0, 0)
        );
        assert_eq!(
            parse_timestamp("2023-01-05T14:30:00.5").unwrap(),
            ts(2023, 1, 5, 14, 30, 0, 500_000)
        );
        assert_eq!(
            parse_timestamp("2023-01-05T14:30:00.123456").unwrap(),
            ts(2023, 1, 5, 14, 30, 0, 123_456)
        );
    }

    #[test]
    fn test_timestamp_parse_is_strict() {
        assert!(parse_timestamp("2023-01-05 14:30:00").is_err());
        assert!(parse_timestamp("2023-01-05T14:30").is_err());
        assert!(parse_timestamp("2023-01-05T14:30:00.").is_err());
        assert!(parse_timestamp("2023-01-05T14:30:00.1234567890").is_err());
        assert!(parse_timestamp("2023-01-05T14:30:00+00:00").is_err());
        assert!(parse_timestamp("2023-01-05T25:00:00").is_err());
        assert!(parse_timestamp("not a timestamp").is_err());
    }
}
