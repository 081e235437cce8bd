use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::{CandleDirection, EffectiveScales, OhlcRecord};

/// Share of the inter-candle pitch used by the body.
pub const CANDLE_BODY_RATIO: f64 = 0.8;

/// Projected candle geometry in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandleGeometry {
    pub index: usize,
    /// Body left edge.
    pub x: f64,
    pub width: f64,
    pub wick_x: f64,
    pub body_top: f64,
    pub body_bottom: f64,
    pub wick_top: f64,
    pub wick_bottom: f64,
    pub direction: CandleDirection,
}

impl CandleGeometry {
    #[must_use]
    pub fn body_height(&self) -> f64 {
        self.body_bottom - self.body_top
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

/// 80% of the pixel pitch, floored at `min_candle_width`.
#[must_use]
pub fn candle_width(scales: &EffectiveScales, min_candle_width: f64) -> f64 {
    (scales.pitch_px() * CANDLE_BODY_RATIO).max(min_candle_width)
}

/// Projects records into render geometry.
///
/// Pure and side-effect free; an empty slice yields an empty list.
#[must_use]
pub fn generate_candles(
    records: &[OhlcRecord],
    scales: &EffectiveScales,
    min_candle_width: f64,
) -> Vec<CandleGeometry> {
    if records.is_empty() {
        return Vec::new();
    }
    let width = candle_width(scales, min_candle_width);

    #[cfg(feature = "parallel-projection")]
    {
        records
            .par_iter()
            .map(|record| project_single_candle(record, scales, width))
            .collect()
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        records
            .iter()
            .map(|record| project_single_candle(record, scales, width))
            .collect()
    }
}

pub(crate) fn project_single_candle(
    record: &OhlcRecord,
    scales: &EffectiveScales,
    width: f64,
) -> CandleGeometry {
    let wick_x = scales.record_x(record);
    CandleGeometry {
        index: record.index,
        x: wick_x - width / 2.0,
        width,
        wick_x,
        body_top: scales.y.apply(record.body_top_price()),
        body_bottom: scales.y.apply(record.body_bottom_price()),
        wick_top: scales.y.apply(record.high),
        wick_bottom: scales.y.apply(record.low),
        direction: record.direction(),
    }
}
