use serde::{Deserialize, Serialize};

use crate::core::primitives::unix_seconds_to_datetime;
use crate::core::{EffectiveScales, OhlcRecord, candle_width};
use crate::error::{ChartError, ChartResult};

/// Hover payload for one record, anchored at its candle body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipContent {
    pub record_index: usize,
    pub date: f64,
    pub date_label: String,
    pub open: f64,
    pub close: f64,
    pub high: f64,
    pub low: f64,
    /// Candle body left edge.
    pub anchor_x: f64,
    /// Candle body top.
    pub anchor_y: f64,
    pub body_height: f64,
}

/// Derives tooltip content for `record_index` under the current scales.
pub fn tooltip_for(
    records: &[OhlcRecord],
    scales: &EffectiveScales,
    record_index: usize,
    min_candle_width: f64,
) -> ChartResult<TooltipContent> {
    let record = records
        .get(record_index)
        .ok_or(ChartError::OutOfRangeIndex {
            index: record_index,
            len: records.len(),
        })?;

    let width = candle_width(scales, min_candle_width);
    let body_top = scales.y.apply(record.body_top_price());
    let body_bottom = scales.y.apply(record.body_bottom_price());

    Ok(TooltipContent {
        record_index,
        date: record.date,
        date_label: unix_seconds_to_datetime(record.date)
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        open: record.open,
        close: record.close,
        high: record.high,
        low: record.low,
        anchor_x: scales.record_x(record) - width / 2.0,
        anchor_y: body_top,
        body_height: body_bottom - body_top,
    })
}
