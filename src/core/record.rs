use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::primitives::{datetime_to_unix_seconds, decimal_to_f64, parse_iso_date};
use crate::error::{ChartError, ChartResult};

/// Date as supplied by the host: ISO string or epoch seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordDate {
    EpochSeconds(f64),
    Iso(String),
}

impl RecordDate {
    /// Normalizes to UTC epoch seconds, the single internal representation.
    pub fn to_unix_seconds(&self) -> ChartResult<f64> {
        match self {
            Self::EpochSeconds(seconds) if seconds.is_finite() => Ok(*seconds),
            Self::EpochSeconds(_) => Err(ChartError::InvalidData(
                "epoch date must be finite".to_owned(),
            )),
            Self::Iso(text) => parse_iso_date(text),
        }
    }
}

impl From<f64> for RecordDate {
    fn from(value: f64) -> Self {
        Self::EpochSeconds(value)
    }
}

impl From<i64> for RecordDate {
    fn from(value: i64) -> Self {
        Self::EpochSeconds(value as f64)
    }
}

impl From<&str> for RecordDate {
    fn from(value: &str) -> Self {
        Self::Iso(value.to_owned())
    }
}

impl From<String> for RecordDate {
    fn from(value: String) -> Self {
        Self::Iso(value)
    }
}

/// Unvalidated input row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawOhlcRecord {
    pub date: RecordDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl RawOhlcRecord {
    #[must_use]
    pub fn new(date: impl Into<RecordDate>, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            date: date.into(),
            open,
            high,
            low,
            close,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandleDirection {
    Bullish,
    Bearish,
}

/// Validated OHLC record. `index` is the position in the accepted series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OhlcRecord {
    pub index: usize,
    pub date: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl OhlcRecord {
    /// Builds a validated record.
    ///
    /// Invariants:
    /// - date and prices are finite
    /// - `low <= high`
    /// - `open` and `close` are within `[low, high]`
    pub fn new(
        index: usize,
        date: f64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
    ) -> ChartResult<Self> {
        let invalid = |reason: &str| ChartError::InvalidRecord {
            index,
            reason: reason.to_owned(),
        };

        if !date.is_finite() {
            return Err(invalid("date must be finite"));
        }
        if !open.is_finite() || !high.is_finite() || !low.is_finite() || !close.is_finite() {
            return Err(invalid("prices must be finite"));
        }
        if low > high {
            return Err(invalid("low must be <= high"));
        }
        if open < low || open > high || close < low || close > high {
            return Err(invalid("open/close must be within low/high range"));
        }

        Ok(Self {
            index,
            date,
            open,
            high,
            low,
            close,
        })
    }

    /// Converts strongly-typed temporal/decimal input into a validated record.
    pub fn from_decimal_time(
        index: usize,
        time: DateTime<Utc>,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
    ) -> ChartResult<Self> {
        Self::new(
            index,
            datetime_to_unix_seconds(time),
            decimal_to_f64(open, "open")?,
            decimal_to_f64(high, "high")?,
            decimal_to_f64(low, "low")?,
            decimal_to_f64(close, "close")?,
        )
    }

    /// `open > close` is the only bearish test; equal prices count as bullish.
    #[must_use]
    pub fn direction(self) -> CandleDirection {
        if self.open > self.close {
            CandleDirection::Bearish
        } else {
            CandleDirection::Bullish
        }
    }

    #[must_use]
    pub fn body_top_price(self) -> f64 {
        self.open.max(self.close)
    }

    #[must_use]
    pub fn body_bottom_price(self) -> f64 {
        self.open.min(self.close)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroppedRecord {
    /// Position of the row in the raw input.
    pub source_index: usize,
    pub reason: String,
}

/// Summary handed back to the caller after a dataset replacement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngestReport {
    pub accepted: usize,
    pub dropped: Vec<DroppedRecord>,
    /// Annotations discarded because their record index no longer exists.
    pub discarded_annotations: usize,
}

impl IngestReport {
    #[must_use]
    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }
}

/// Validates raw rows into a contiguous record series.
///
/// Bad rows are skipped and listed in the report; the series as a whole is
/// never rejected.
#[must_use]
pub fn ingest_records(raw: &[RawOhlcRecord]) -> (Vec<OhlcRecord>, IngestReport) {
    let mut records = Vec::with_capacity(raw.len());
    let mut report = IngestReport::default();

    for (source_index, row) in raw.iter().enumerate() {
        let candidate = row.date.to_unix_seconds().and_then(|date| {
            OhlcRecord::new(records.len(), date, row.open, row.high, row.low, row.close)
        });
        match candidate {
            Ok(record) => records.push(record),
            Err(err) => {
                let reason = match err {
                    ChartError::InvalidRecord { reason, .. } => reason,
                    other => other.to_string(),
                };
                warn!(source_index, %reason, "dropping invalid ohlc record");
                report.dropped.push(DroppedRecord {
                    source_index,
                    reason,
                });
            }
        }
    }

    report.accepted = records.len();
    debug!(
        input = raw.len(),
        accepted = report.accepted,
        dropped = report.dropped_count(),
        "ingested ohlc records"
    );
    (records, report)
}
