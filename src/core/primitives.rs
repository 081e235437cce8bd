use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ChartError, ChartResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}

/// Converts epoch seconds back to a UTC timestamp, `None` when out of range.
#[must_use]
pub fn unix_seconds_to_datetime(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1e9).round().clamp(0.0, 999_999_999.0) as u32;
    DateTime::from_timestamp(whole as i64, nanos)
}

/// Parses the ISO forms accepted at ingestion into UTC epoch seconds.
///
/// Accepted: RFC 3339 (`2024-07-19T09:30:00Z`), a naive date-time
/// (`2024-07-19T09:30:00`, read as UTC) and a calendar day (`2024-07-19`,
/// midnight UTC).
pub fn parse_iso_date(input: &str) -> ChartResult<f64> {
    let trimmed = input.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(datetime_to_unix_seconds(parsed.with_timezone(&Utc)));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Ok(datetime_to_unix_seconds(Utc.from_utc_datetime(&naive)));
    }
    if let Ok(day) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(midnight) = day.and_hms_opt(0, 0, 0) {
            return Ok(datetime_to_unix_seconds(Utc.from_utc_datetime(&midnight)));
        }
    }
    Err(ChartError::InvalidData(format!(
        "unrecognized date string `{trimmed}`"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calendar_day_parses_to_midnight_utc() {
        let seconds = parse_iso_date("1970-01-02").expect("valid day");
        assert_eq!(seconds, 86_400.0);
    }

    #[test]
    fn rfc3339_offset_is_normalized_to_utc() {
        let seconds = parse_iso_date("1970-01-01T02:00:00+02:00").expect("valid rfc3339");
        assert_eq!(seconds, 0.0);
    }

    #[test]
    fn naive_datetime_is_read_as_utc() {
        let seconds = parse_iso_date("1970-01-01T00:01:00").expect("valid naive");
        assert_eq!(seconds, 60.0);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse_iso_date("19 July").is_err());
    }

    #[test]
    fn epoch_round_trips_through_datetime() {
        let time = unix_seconds_to_datetime(1_721_347_200.0).expect("in range");
        assert_eq!(datetime_to_unix_seconds(time), 1_721_347_200.0);
        assert!(unix_seconds_to_datetime(f64::NAN).is_none());
    }
}
