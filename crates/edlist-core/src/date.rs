//! Calendar dates as the form and the cards see them.
//!
//! A [`RecordDate`] stores a full instant but only its calendar date is ever
//! read. Parsing is lenient in the way a browser date constructor is:
//!
//! - `YYYY-MM-DD` (strict ISO date-only) is midnight UTC.
//! - RFC 3339 with an explicit offset is that exact instant.
//! - ISO date-time without an offset is wall-clock time in the local zone.
//! - Loose date shapes (`2022-6-1`, `2022/06/01`, `06/01/2022`) are local
//!   midnight.
//!
//! Anything else yields the invalid date, which formats as [`INVALID_DATE`]
//! instead of failing.

use std::fmt;

use chrono::{
    DateTime, Datelike, FixedOffset, Local, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc,
};

/// Rendering of a date that could not be parsed.
pub const INVALID_DATE: &str = "NaN-NaN-NaN";

const LOOSE_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const LOCAL_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// A stored date: an instant, or the invalid date.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordDate(Option<DateTime<Utc>>);

impl RecordDate {
    /// The invalid date.
    pub const INVALID: Self = Self(None);

    /// Parse `input` leniently. Zone-less inputs other than ISO date-only
    /// strings are interpreted in `zone`.
    pub fn parse(input: &str, zone: &FixedOffset) -> Self {
        let input = input.trim();

        if is_iso_date_only(input) {
            return Self(
                NaiveDate::parse_from_str(input, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
                    .map(|dt| dt.and_utc()),
            );
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
            return Self(Some(dt.with_timezone(&Utc)));
        }

        let wall_clock = LOCAL_DATETIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
            .or_else(|| {
                LOOSE_DATE_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            });

        Self(wall_clock.and_then(|naive| in_zone(&naive, zone)))
    }

    pub const fn instant(&self) -> Option<DateTime<Utc>> {
        self.0
    }

    pub const fn is_valid(&self) -> bool {
        self.0.is_some()
    }

    /// Calendar date of the instant in UTC, as `YYYY-MM-DD`.
    pub fn utc_date_string(&self) -> String {
        self.0
            .map_or_else(|| INVALID_DATE.to_owned(), |dt| calendar_string(&dt))
    }

    /// Calendar date of the instant as seen from `zone`, as `YYYY-MM-DD`.
    pub fn zoned_date_string(&self, zone: &FixedOffset) -> String {
        self.0.map_or_else(
            || INVALID_DATE.to_owned(),
            |dt| calendar_string(&dt.with_timezone(zone)),
        )
    }
}

impl fmt::Display for RecordDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.utc_date_string())
    }
}

/// Offset of the host's local zone right now.
pub fn host_offset() -> FixedOffset {
    Local::now().offset().fix()
}

fn calendar_string<D: Datelike>(date: &D) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

fn in_zone(naive: &NaiveDateTime, zone: &FixedOffset) -> Option<DateTime<Utc>> {
    zone.from_local_datetime(naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

fn is_iso_date_only(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn offset_hours(h: i32) -> FixedOffset {
        FixedOffset::east_opt(h * 3600).unwrap()
    }

    #[test]
    fn iso_date_only_is_utc_midnight() {
        let d = RecordDate::parse("2022-06-01", &offset_hours(9));
        let instant = d.instant().unwrap();
        assert_eq!(instant.to_rfc3339(), "2022-06-01T00:00:00+00:00");
        assert_eq!(d.utc_date_string(), "2022-06-01");
    }

    #[test]
    fn rfc3339_keeps_its_offset() {
        let d = RecordDate::parse("2022-06-01T23:30:00-02:00", &utc());
        assert_eq!(d.utc_date_string(), "2022-06-02");
    }

    #[test]
    fn zoneless_datetime_uses_local_zone() {
        let d = RecordDate::parse("2022-06-01T05:00", &offset_hours(9));
        // 05:00 at +09:00 is 20:00 the previous day in UTC.
        assert_eq!(d.utc_date_string(), "2022-05-31");
        assert_eq!(d.zoned_date_string(&offset_hours(9)), "2022-06-01");
    }

    #[test]
    fn loose_shapes_are_local_midnight() {
        let zone = offset_hours(-5);
        for input in ["2022-6-1", "2022/06/01", "06/01/2022", "  2022-06-01  "] {
            let d = RecordDate::parse(input, &zone);
            assert!(d.is_valid(), "{input} should parse");
            assert_eq!(d.zoned_date_string(&zone), "2022-06-01", "{input}");
        }
    }

    #[test]
    fn garbage_is_invalid_and_renders_nan() {
        for input in ["", "tomorrow", "2022-13-01", "2022-02-30", "NaN-NaN-NaN"] {
            let d = RecordDate::parse(input, &utc());
            assert!(!d.is_valid(), "{input} should be invalid");
            assert_eq!(d.utc_date_string(), INVALID_DATE);
            assert_eq!(d.zoned_date_string(&utc()), INVALID_DATE);
        }
    }

    #[test]
    fn negative_zone_reads_utc_midnight_as_previous_day() {
        let d = RecordDate::parse("2022-01-01", &offset_hours(-5));
        assert_eq!(d.zoned_date_string(&offset_hours(-5)), "2021-12-31");
        assert_eq!(d.utc_date_string(), "2022-01-01");
    }

    #[test]
    fn years_are_zero_padded() {
        let d = RecordDate::parse("0099-03-04", &utc());
        assert_eq!(d.to_string(), "0099-03-04");
    }
}
