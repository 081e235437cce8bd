use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::primitives::unix_seconds_to_datetime;
use crate::core::scale::tick_step;
use crate::core::{EffectiveScales, OhlcRecord, PlotRect, XDomainMode};

pub const AXIS_TIME_TARGET_SPACING_PX: f64 = 72.0;
pub const AXIS_PRICE_TARGET_SPACING_PX: f64 = 40.0;
const AXIS_MIN_TICKS: usize = 2;
const AXIS_MAX_TICKS: usize = 12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub value: f64,
    pub pixel: f64,
    /// Empty when the tick does not map back onto a record.
    pub label: String,
}

#[must_use]
pub fn axis_tick_target_count(
    axis_span_px: f64,
    target_spacing_px: f64,
    min_ticks: usize,
    max_ticks: usize,
) -> usize {
    if !axis_span_px.is_finite() || axis_span_px <= 0.0 {
        return min_ticks;
    }
    if !target_spacing_px.is_finite() || target_spacing_px <= 0.0 {
        return min_ticks;
    }

    let raw = (axis_span_px / target_spacing_px).floor() as usize + 1;
    raw.clamp(min_ticks, max_ticks)
}

/// Round ticks across the visible x domain.
///
/// Labels are re-derived from the record nearest each tick. In index mode only
/// whole indices are kept, so a zoomed-in axis never shows fractional
/// positions.
#[must_use]
pub fn x_axis_ticks(records: &[OhlcRecord], scales: &EffectiveScales, plot: PlotRect) -> Vec<AxisTick> {
    let count = axis_tick_target_count(
        plot.width(),
        AXIS_TIME_TARGET_SPACING_PX,
        AXIS_MIN_TICKS,
        AXIS_MAX_TICKS,
    );
    scales
        .x
        .ticks(plot.left, plot.right, count)
        .into_iter()
        .filter(|value| {
            scales.x_domain_mode == XDomainMode::Date || (value - value.round()).abs() < 1e-9
        })
        .map(|value| AxisTick {
            value,
            pixel: scales.x.apply(value),
            label: x_tick_label(records, scales, value),
        })
        .collect()
}

fn x_tick_label(records: &[OhlcRecord], scales: &EffectiveScales, value: f64) -> String {
    match scales.x_domain_mode {
        XDomainMode::Index => {
            let rounded = value.round();
            if rounded < 0.0 || rounded >= records.len() as f64 {
                return String::new();
            }
            records
                .get(rounded as usize)
                .and_then(|record| unix_seconds_to_datetime(record.date))
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        }
        XDomainMode::Date => {
            let (Some(first), Some(last)) = (records.first(), records.last()) else {
                return String::new();
            };
            let slack = scales.unit_step / 2.0;
            if value < first.date - slack || value > last.date + slack {
                return String::new();
            }
            records
                .iter()
                .min_by_key(|record| OrderedFloat((record.date - value).abs()))
                .and_then(|record| unix_seconds_to_datetime(record.date))
                .map(|date| date.format("%-d %B").to_string())
                .unwrap_or_default()
        }
    }
}

/// Nice price ticks inside the plot, labelled with step-derived precision.
#[must_use]
pub fn y_axis_ticks(scales: &EffectiveScales, plot: PlotRect) -> Vec<AxisTick> {
    let count = axis_tick_target_count(
        plot.height(),
        AXIS_PRICE_TARGET_SPACING_PX,
        AXIS_MIN_TICKS,
        AXIS_MAX_TICKS,
    );
    let (low, high) = scales.y.visible_domain(plot.bottom, plot.top);
    let precision = tick_step(low, high, count)
        .map(precision_for_step)
        .unwrap_or(2);

    scales
        .y
        .ticks(plot.bottom, plot.top, count)
        .into_iter()
        .map(|value| AxisTick {
            value,
            pixel: scales.y.apply(value),
            label: format!("{value:.precision$}"),
        })
        .collect()
}

fn precision_for_step(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 || step >= 1.0 {
        return 0;
    }
    (-step.log10().floor()).max(0.0) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_count_is_clamped() {
        assert_eq!(axis_tick_target_count(0.0, 72.0, 2, 12), 2);
        assert_eq!(axis_tick_target_count(720.0, 72.0, 2, 12), 11);
        assert_eq!(axis_tick_target_count(10_000.0, 72.0, 2, 12), 12);
    }

    #[test]
    fn precision_follows_step_magnitude() {
        assert_eq!(precision_for_step(5.0), 0);
        assert_eq!(precision_for_step(0.5), 1);
        assert_eq!(precision_for_step(0.02), 2);
    }
}
