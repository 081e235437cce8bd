use crate::error::{ChartError, ChartResult};
use crate::render::Color;

use super::{ChartEngineConfig, RenderStyle};

pub(super) fn validate_engine_config(config: ChartEngineConfig) -> ChartResult<ChartEngineConfig> {
    config.viewport.validate()?;
    config.zoom_extent.validate()?;

    for (name, value) in [
        ("min_candle_width", config.min_candle_width),
        ("min_candle_spacing", config.min_candle_spacing),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ChartError::InvalidData(format!(
                "config `{name}` must be finite and >= 0"
            )));
        }
    }
    if !(config.min_candle_width + config.min_candle_spacing).is_finite() {
        return Err(ChartError::InvalidData(
            "config candle pitch `min_candle_width + min_candle_spacing` must be finite".to_owned(),
        ));
    }
    if !config.zoom_button_factor.is_finite() || config.zoom_button_factor <= 1.0 {
        return Err(ChartError::InvalidData(
            "config `zoom_button_factor` must be finite and > 1".to_owned(),
        ));
    }

    Ok(config)
}

pub(super) fn validate_render_style(style: RenderStyle) -> ChartResult<RenderStyle> {
    for (name, color) in [
        ("bullish_color", style.bullish_color),
        ("bearish_color", style.bearish_color),
        ("wick_color", style.wick_color),
        ("axis_line_color", style.axis_line_color),
        ("axis_label_color", style.axis_label_color),
        ("grid_line_color", style.grid_line_color),
        ("marker_color", style.marker_color),
        ("marker_text_color", style.marker_text_color),
        ("trend_line_color", style.trend_line_color),
        ("tooltip_background_color", style.tooltip_background_color),
        ("tooltip_text_color", style.tooltip_text_color),
    ] {
        validate_color(name, color)?;
    }

    for (name, value) in [
        ("wick_width_px", style.wick_width_px),
        ("axis_tick_length_px", style.axis_tick_length_px),
        ("axis_label_font_size_px", style.axis_label_font_size_px),
        ("marker_radius_px", style.marker_radius_px),
        ("marker_font_size_px", style.marker_font_size_px),
        ("trend_line_width_px", style.trend_line_width_px),
        ("trend_endpoint_radius_px", style.trend_endpoint_radius_px),
        ("tooltip_font_size_px", style.tooltip_font_size_px),
        ("tooltip_width_px", style.tooltip_width_px),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(ChartError::InvalidData(format!(
                "render style `{name}` must be finite and > 0"
            )));
        }
    }
    for (name, value) in [
        ("marker_label_offset_px", style.marker_label_offset_px),
        ("tooltip_padding_px", style.tooltip_padding_px),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ChartError::InvalidData(format!(
                "render style `{name}` must be finite and >= 0"
            )));
        }
    }

    Ok(style)
}

fn validate_color(name: &str, color: Color) -> ChartResult<()> {
    color
        .validate()
        .map_err(|err| ChartError::InvalidData(format!("render style `{name}`: {err}")))
}
