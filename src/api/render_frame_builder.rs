use crate::core::{AxisTick, CandleDirection, CandleGeometry, PlotRect};
use crate::error::ChartResult;
use crate::extensions::{PlacedMarker, TrendLineGeometry, TrendPreview};
use crate::interaction::TooltipContent;
use crate::render::{
    CirclePrimitive, LinePrimitive, LineStrokeStyle, RectPrimitive, RenderFrame, Renderer,
    TextHAlign, TextPrimitive,
};

use super::{ChartEngine, ChartGeometry, RenderStyle};

const TOOLTIP_LINE_HEIGHT_RATIO: f64 = 1.4;
const TOOLTIP_GAP_PX: f64 = 8.0;
const AXIS_LABEL_GAP_PX: f64 = 2.0;

impl<R: Renderer> ChartEngine<R> {
    /// Builds the backend-agnostic frame for the current state.
    pub fn build_render_frame(&self) -> ChartResult<RenderFrame> {
        let geometry = self.geometry();
        let frame = frame_from_geometry(&geometry, self.core.style);
        frame.validate()?;
        Ok(frame)
    }
}

fn frame_from_geometry(geometry: &ChartGeometry, style: RenderStyle) -> RenderFrame {
    let mut frame = RenderFrame::new(geometry.viewport);
    let plot = geometry.plot;

    push_axes(&mut frame, plot, &geometry.x_ticks, &geometry.y_ticks, style);
    for candle in geometry
        .candles
        .iter()
        .filter(|candle| plot.overlaps_x(candle.x, candle.right()))
    {
        push_candle(&mut frame, candle, style);
    }
    for line in &geometry.trend_lines {
        push_trend_line(&mut frame, plot, line, style);
    }
    if let Some(preview) = geometry.trend_preview {
        push_trend_preview(&mut frame, preview, style);
    }
    for marker in geometry
        .markers
        .iter()
        .filter(|marker| plot.contains(marker.x, marker.y))
    {
        push_marker(&mut frame, marker, style);
    }
    if let Some(tooltip) = &geometry.tooltip {
        push_tooltip(&mut frame, plot, tooltip, style);
    }
    frame
}

fn push_axes(
    frame: &mut RenderFrame,
    plot: PlotRect,
    x_ticks: &[AxisTick],
    y_ticks: &[AxisTick],
    style: RenderStyle,
) {
    frame.lines.push(LinePrimitive::new(
        plot.left,
        plot.bottom,
        plot.right,
        plot.bottom,
        1.0,
        style.axis_line_color,
    ));
    frame.lines.push(LinePrimitive::new(
        plot.left,
        plot.top,
        plot.left,
        plot.bottom,
        1.0,
        style.axis_line_color,
    ));

    for tick in x_ticks
        .iter()
        .filter(|tick| tick.pixel >= plot.left && tick.pixel <= plot.right)
    {
        if style.show_grid {
            frame.lines.push(LinePrimitive::new(
                tick.pixel,
                plot.top,
                tick.pixel,
                plot.bottom,
                1.0,
                style.grid_line_color,
            ));
        }
        frame.lines.push(LinePrimitive::new(
            tick.pixel,
            plot.bottom,
            tick.pixel,
            plot.bottom + style.axis_tick_length_px,
            1.0,
            style.axis_line_color,
        ));
        if !tick.label.is_empty() {
            frame.texts.push(TextPrimitive::new(
                tick.label.clone(),
                tick.pixel,
                plot.bottom + style.axis_tick_length_px + style.axis_label_font_size_px,
                style.axis_label_font_size_px,
                style.axis_label_color,
                TextHAlign::Center,
            ));
        }
    }

    for tick in y_ticks
        .iter()
        .filter(|tick| tick.pixel >= plot.top && tick.pixel <= plot.bottom)
    {
        if style.show_grid {
            frame.lines.push(LinePrimitive::new(
                plot.left,
                tick.pixel,
                plot.right,
                tick.pixel,
                1.0,
                style.grid_line_color,
            ));
        }
        frame.lines.push(LinePrimitive::new(
            plot.left - style.axis_tick_length_px,
            tick.pixel,
            plot.left,
            tick.pixel,
            1.0,
            style.axis_line_color,
        ));
        if !tick.label.is_empty() {
            frame.texts.push(TextPrimitive::new(
                tick.label.clone(),
                plot.left - style.axis_tick_length_px - AXIS_LABEL_GAP_PX,
                tick.pixel,
                style.axis_label_font_size_px,
                style.axis_label_color,
                TextHAlign::Right,
            ));
        }
    }
}

fn push_candle(frame: &mut RenderFrame, candle: &CandleGeometry, style: RenderStyle) {
    frame.lines.push(LinePrimitive::new(
        candle.wick_x,
        candle.wick_top,
        candle.wick_x,
        candle.wick_bottom,
        style.wick_width_px,
        style.wick_color,
    ));
    let fill = match candle.direction {
        CandleDirection::Bullish => style.bullish_color,
        CandleDirection::Bearish => style.bearish_color,
    };
    frame.rects.push(RectPrimitive::new(
        candle.x,
        candle.body_top,
        candle.width,
        candle.body_height().max(0.0),
        fill,
    )
    .with_border(style.wick_color));
}

fn push_trend_line(
    frame: &mut RenderFrame,
    plot: PlotRect,
    line: &TrendLineGeometry,
    style: RenderStyle,
) {
    if !plot.overlaps_x(line.x1.min(line.x2), line.x1.max(line.x2)) {
        return;
    }
    frame.lines.push(LinePrimitive::new(
        line.x1,
        line.y1,
        line.x2,
        line.y2,
        style.trend_line_width_px,
        style.trend_line_color,
    ));
    for (cx, cy) in [(line.x1, line.y1), (line.x2, line.y2)] {
        frame.circles.push(CirclePrimitive::new(
            cx,
            cy,
            style.trend_endpoint_radius_px,
            style.trend_line_color,
        ));
    }
}

fn push_trend_preview(frame: &mut RenderFrame, preview: TrendPreview, style: RenderStyle) {
    let (x1, y1) = preview.start;
    frame.circles.push(CirclePrimitive::new(
        x1,
        y1,
        style.trend_endpoint_radius_px,
        style.trend_line_color,
    ));
    if let Some((x2, y2)) = preview.end {
        frame.lines.push(
            LinePrimitive::new(
                x1,
                y1,
                x2,
                y2,
                style.trend_line_width_px,
                style.trend_line_color,
            )
            .with_stroke_style(LineStrokeStyle::Dashed),
        );
        frame.circles.push(CirclePrimitive::new(
            x2,
            y2,
            style.trend_endpoint_radius_px,
            style.trend_line_color,
        ));
    }
}

fn push_marker(frame: &mut RenderFrame, marker: &PlacedMarker, style: RenderStyle) {
    frame.circles.push(CirclePrimitive::new(
        marker.x,
        marker.y,
        style.marker_radius_px,
        style.marker_color,
    ));
    if !marker.text.is_empty() {
        frame.texts.push(TextPrimitive::new(
            marker.text.clone(),
            marker.x,
            marker.y - style.marker_label_offset_px,
            style.marker_font_size_px,
            style.marker_text_color,
            TextHAlign::Center,
        ));
    }
}

/// Box to the right of the candle, flipped left when it would leave the plot.
fn push_tooltip(
    frame: &mut RenderFrame,
    plot: PlotRect,
    tooltip: &TooltipContent,
    style: RenderStyle,
) {
    let lines = [
        tooltip.date_label.clone(),
        format!("Open: {:.2}", tooltip.open),
        format!("High: {:.2}", tooltip.high),
        format!("Low: {:.2}", tooltip.low),
        format!("Close: {:.2}", tooltip.close),
    ];
    let line_height = style.tooltip_font_size_px * TOOLTIP_LINE_HEIGHT_RATIO;
    let height = style.tooltip_padding_px * 2.0 + line_height * lines.len() as f64;
    let width = style.tooltip_width_px;

    let mut left = tooltip.anchor_x + TOOLTIP_GAP_PX;
    if left + width > plot.right {
        left = tooltip.anchor_x - TOOLTIP_GAP_PX - width;
    }
    let top = tooltip.anchor_y.clamp(plot.top, (plot.bottom - height).max(plot.top));

    frame.rects.push(RectPrimitive::new(
        left,
        top,
        width,
        height,
        style.tooltip_background_color,
    ));
    for (row, text) in lines.into_iter().enumerate() {
        if text.is_empty() {
            continue;
        }
        frame.texts.push(TextPrimitive::new(
            text,
            left + style.tooltip_padding_px,
            top + style.tooltip_padding_px + line_height * (row as f64 + 1.0),
            style.tooltip_font_size_px,
            style.tooltip_text_color,
            TextHAlign::Left,
        ));
    }
}
