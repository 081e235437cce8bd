use crate::render::Color;

/// Colors and sizes used when materializing a [`crate::render::RenderFrame`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    pub bullish_color: Color,
    pub bearish_color: Color,
    pub wick_color: Color,
    pub wick_width_px: f64,
    pub axis_line_color: Color,
    pub axis_label_color: Color,
    pub axis_tick_length_px: f64,
    pub axis_label_font_size_px: f64,
    pub grid_line_color: Color,
    pub show_grid: bool,
    pub marker_color: Color,
    pub marker_radius_px: f64,
    pub marker_text_color: Color,
    pub marker_font_size_px: f64,
    /// Vertical distance between a marker's anchor and its label baseline.
    pub marker_label_offset_px: f64,
    pub trend_line_color: Color,
    pub trend_line_width_px: f64,
    pub trend_endpoint_radius_px: f64,
    pub tooltip_background_color: Color,
    pub tooltip_text_color: Color,
    pub tooltip_font_size_px: f64,
    pub tooltip_padding_px: f64,
    pub tooltip_width_px: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            bullish_color: Color::from_rgb8(0x00, 0x80, 0x00),
            bearish_color: Color::from_rgb8(0xFF, 0x00, 0x00),
            wick_color: Color::rgb(0.0, 0.0, 0.0),
            wick_width_px: 1.0,
            axis_line_color: Color::rgb(0.0, 0.0, 0.0),
            axis_label_color: Color::rgb(0.10, 0.12, 0.16),
            axis_tick_length_px: 6.0,
            axis_label_font_size_px: 10.0,
            grid_line_color: Color::rgb(0.89, 0.92, 0.95),
            show_grid: false,
            marker_color: Color::from_rgb8(0xFF, 0xD7, 0x00),
            marker_radius_px: 5.0,
            marker_text_color: Color::rgb(0.0, 0.0, 0.0),
            marker_font_size_px: 12.0,
            marker_label_offset_px: 10.0,
            trend_line_color: Color::from_rgb8(0x77, 0x5D, 0xD0),
            trend_line_width_px: 2.0,
            trend_endpoint_radius_px: 3.0,
            tooltip_background_color: Color::rgba(0.0, 0.0, 0.0, 0.85),
            tooltip_text_color: Color::rgb(1.0, 1.0, 1.0),
            tooltip_font_size_px: 11.0,
            tooltip_padding_px: 6.0,
            tooltip_width_px: 140.0,
        }
    }
}
