use serde::{Deserialize, Serialize};

use crate::core::{
    AxisTick, CandleGeometry, PlotRect, Transform, Viewport, generate_candles, x_axis_ticks,
    y_axis_ticks,
};
use crate::extensions::{PlacedMarker, TrendLineGeometry, TrendPreview};
use crate::interaction::TooltipContent;
use crate::render::Renderer;

use super::ChartEngine;

/// Pixel-space snapshot of everything the chart draws.
///
/// Re-derived from data space and the live transform on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartGeometry {
    pub viewport: Viewport,
    pub plot: PlotRect,
    pub transform: Transform,
    pub candles: Vec<CandleGeometry>,
    pub x_ticks: Vec<AxisTick>,
    pub y_ticks: Vec<AxisTick>,
    pub markers: Vec<PlacedMarker>,
    pub trend_lines: Vec<TrendLineGeometry>,
    pub trend_preview: Option<TrendPreview>,
    pub tooltip: Option<TooltipContent>,
}

impl ChartGeometry {
    #[must_use]
    pub fn empty(viewport: Viewport, transform: Transform) -> Self {
        Self {
            viewport,
            plot: viewport.plot_rect(),
            transform,
            candles: Vec::new(),
            x_ticks: Vec::new(),
            y_ticks: Vec::new(),
            markers: Vec::new(),
            trend_lines: Vec::new(),
            trend_preview: None,
            tooltip: None,
        }
    }
}

impl<R: Renderer> ChartEngine<R> {
    /// Projects the dataset and annotations through the current transform.
    #[must_use]
    pub fn geometry(&self) -> ChartGeometry {
        let viewport = self.core.config.viewport;
        let transform = self.core.interaction.transform();
        let Some(scales) = self.effective_scales() else {
            return ChartGeometry::empty(viewport, transform);
        };

        let records = &self.core.records;
        let plot = viewport.plot_rect();
        let annotations = &self.core.annotations;

        ChartGeometry {
            viewport,
            plot,
            transform,
            candles: generate_candles(records, &scales, self.core.config.min_candle_width),
            x_ticks: x_axis_ticks(records, &scales, plot),
            y_ticks: y_axis_ticks(&scales, plot),
            markers: annotations.project_markers(records, &scales),
            trend_lines: annotations.project_trend_lines(records, &scales),
            trend_preview: annotations.trend_preview(records, &scales),
            tooltip: self.tooltip(),
        }
    }
}
