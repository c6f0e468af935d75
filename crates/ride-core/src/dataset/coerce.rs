//! Per-cell coercions.
//!
//! Every function here is total: a malformed cell maps to `None` or to the
//! documented default, never to an error.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

const MAX_AGE: f64 = 120.0;

/// Layout that successfully parsed the time-of-day column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeFormat {
    /// `HH:MM:SS`
    Seconds,
    /// `HH:MM`
    Minutes,
}

impl TimeFormat {
    pub fn pattern(self) -> &'static str {
        match self {
            TimeFormat::Seconds => "%H:%M:%S",
            TimeFormat::Minutes => "%H:%M",
        }
    }

    pub fn parse(self, cell: &str) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(cell.trim(), self.pattern()).ok()
    }
}

pub fn parse_date(cell: &str) -> Option<NaiveDate> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(cell, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(cell, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Parse a whole time-of-day column.
///
/// The strict `HH:MM:SS` layout is tried first across every cell. Only when
/// it parses nothing at all is the column retried as `HH:MM`. The layout is
/// chosen per column, not per cell, so a strict column with a few `HH:MM`
/// stragglers leaves those stragglers null.
pub fn parse_time_column(cells: &[&str]) -> (Vec<Option<NaiveTime>>, Option<TimeFormat>) {
    for format in [TimeFormat::Seconds, TimeFormat::Minutes] {
        let parsed: Vec<Option<NaiveTime>> = cells.iter().map(|c| format.parse(c)).collect();
        if parsed.iter().any(Option::is_some) {
            return (parsed, Some(format));
        }
    }

    (vec![None; cells.len()], None)
}

pub fn hour_of(time: Option<NaiveTime>) -> Option<u8> {
    time.map(|t| t.hour() as u8)
}

/// Finite floating point value, or `None`.
pub fn parse_number(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Latitude/longitude. No bounds check is applied.
pub fn parse_coordinate(cell: &str) -> Option<f64> {
    parse_number(cell)
}

/// Severity counter. Missing, non-numeric and negative cells count as 0;
/// fractional values are truncated.
pub fn parse_count(cell: &str) -> u32 {
    let cell = cell.trim();
    if let Ok(n) = cell.parse::<u32>() {
        return n;
    }

    match parse_number(cell) {
        Some(v) if v >= 0.0 && v <= f64::from(u32::MAX) => v.trunc() as u32,
        _ => 0,
    }
}

pub fn parse_age(cell: &str) -> Option<u32> {
    parse_number(cell)
        .filter(|v| (0.0..=MAX_AGE).contains(v))
        .map(|v| v.trunc() as u32)
}

pub fn parse_year(cell: &str) -> Option<i32> {
    parse_number(cell)
        .filter(|v| v.fract() == 0.0 && *v >= f64::from(i32::MIN) && *v <= f64::from(i32::MAX))
        .map(|v| v as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_and_brazilian_dates() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 9);

        assert_eq!(parse_date("2024-03-09"), expected);
        assert_eq!(parse_date("09/03/2024"), expected);
        assert_eq!(parse_date("2024/03/09"), expected);
        assert_eq!(parse_date(" 2024-03-09 10:15:00 "), expected);
    }

    #[test]
    fn malformed_dates_are_none() {
        assert_eq!(parse_date("not-a-date"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("2024-02-30"), None);
    }

    #[test]
    fn strict_time_column_yields_hours() {
        let cells = ["00:10:00", "13:45:30", "23:59:59"];
        let (times, format) = parse_time_column(&cells);

        assert_eq!(format, Some(TimeFormat::Seconds));
        let hours: Vec<Option<u8>> = times.into_iter().map(hour_of).collect();
        assert_eq!(hours, vec![Some(0), Some(13), Some(23)]);
    }

    #[test]
    fn minute_column_falls_back_for_every_row() {
        let cells = ["07:30", "18:05", "bad"];
        let (times, format) = parse_time_column(&cells);

        assert_eq!(format, Some(TimeFormat::Minutes));
        let hours: Vec<Option<u8>> = times.into_iter().map(hour_of).collect();
        assert_eq!(hours, vec![Some(7), Some(18), None]);
    }

    #[test]
    fn mixed_column_keeps_strict_layout() {
        let cells = ["07:30:00", "18:05"];
        let (times, format) = parse_time_column(&cells);

        assert_eq!(format, Some(TimeFormat::Seconds));
        assert_eq!(hour_of(times[0]), Some(7));
        assert_eq!(hour_of(times[1]), None);
    }

    #[test]
    fn unparseable_time_column_has_no_format() {
        let (times, format) = parse_time_column(&["noon", ""]);

        assert_eq!(format, None);
        assert!(times.iter().all(Option::is_none));
    }

    #[test]
    fn coordinates_coerce_to_none_when_not_numeric() {
        assert_eq!(parse_coordinate("-15.7801"), Some(-15.7801));
        assert_eq!(parse_coordinate("N/A"), None);
        assert_eq!(parse_coordinate("NaN"), None);
        assert_eq!(parse_coordinate(""), None);
        // No bounds validation.
        assert_eq!(parse_coordinate("999.5"), Some(999.5));
    }

    #[test]
    fn counts_default_to_zero() {
        assert_eq!(parse_count("3"), 3);
        assert_eq!(parse_count(" 2 "), 2);
        assert_eq!(parse_count("2.0"), 2);
        assert_eq!(parse_count("1.9"), 1);
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("abc"), 0);
        assert_eq!(parse_count("-4"), 0);
        assert_eq!(parse_count("inf"), 0);
    }

    #[test]
    fn ages_outside_range_are_none() {
        assert_eq!(parse_age("34"), Some(34));
        assert_eq!(parse_age("34.0"), Some(34));
        assert_eq!(parse_age("-1"), None);
        assert_eq!(parse_age("999"), None);
        assert_eq!(parse_age("NA"), None);
    }

    #[test]
    fn years_must_be_whole_numbers() {
        assert_eq!(parse_year("2015"), Some(2015));
        assert_eq!(parse_year("2015.0"), Some(2015));
        assert_eq!(parse_year("2015.5"), None);
        assert_eq!(parse_year("(null)"), None);
    }
}
