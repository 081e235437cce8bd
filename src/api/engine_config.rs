use serde::{Deserialize, Serialize};

use crate::core::{ScaleBuilderConfig, Viewport, XDomainMode, ZoomExtent};
use crate::error::{ChartError, ChartResult};
use crate::extensions::TrendLineBehavior;

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load chart setup
/// without inventing their own ad-hoc format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartEngineConfig {
    pub viewport: Viewport,
    #[serde(default = "default_min_candle_width")]
    pub min_candle_width: f64,
    #[serde(default = "default_min_candle_spacing")]
    pub min_candle_spacing: f64,
    #[serde(default)]
    pub zoom_extent: ZoomExtent,
    #[serde(default)]
    pub x_domain_mode: XDomainMode,
    #[serde(default = "default_vertical_zoom")]
    pub vertical_zoom: bool,
    #[serde(default)]
    pub trend_line_behavior: TrendLineBehavior,
    /// Scale step used by `zoom_in` / `zoom_out`.
    #[serde(default = "default_zoom_button_factor")]
    pub zoom_button_factor: f64,
}

impl ChartEngineConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            min_candle_width: default_min_candle_width(),
            min_candle_spacing: default_min_candle_spacing(),
            zoom_extent: ZoomExtent::default(),
            x_domain_mode: XDomainMode::default(),
            vertical_zoom: default_vertical_zoom(),
            trend_line_behavior: TrendLineBehavior::default(),
            zoom_button_factor: default_zoom_button_factor(),
        }
    }

    #[must_use]
    pub fn with_min_candle_width(mut self, width: f64) -> Self {
        self.min_candle_width = width;
        self
    }

    #[must_use]
    pub fn with_min_candle_spacing(mut self, spacing: f64) -> Self {
        self.min_candle_spacing = spacing;
        self
    }

    #[must_use]
    pub fn with_zoom_extent(mut self, extent: ZoomExtent) -> Self {
        self.zoom_extent = extent;
        self
    }

    #[must_use]
    pub fn with_x_domain_mode(mut self, mode: XDomainMode) -> Self {
        self.x_domain_mode = mode;
        self
    }

    #[must_use]
    pub fn with_vertical_zoom(mut self, enabled: bool) -> Self {
        self.vertical_zoom = enabled;
        self
    }

    #[must_use]
    pub fn with_trend_line_behavior(mut self, behavior: TrendLineBehavior) -> Self {
        self.trend_line_behavior = behavior;
        self
    }

    #[must_use]
    pub fn with_zoom_button_factor(mut self, factor: f64) -> Self {
        self.zoom_button_factor = factor;
        self
    }

    #[must_use]
    pub fn scale_builder_config(self) -> ScaleBuilderConfig {
        ScaleBuilderConfig {
            min_candle_width: self.min_candle_width,
            min_candle_spacing: self.min_candle_spacing,
            x_domain_mode: self.x_domain_mode,
        }
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))
    }
}

impl Default for ChartEngineConfig {
    fn default() -> Self {
        Self::new(Viewport::new(800, 400))
    }
}

fn default_min_candle_width() -> f64 {
    5.0
}

fn default_min_candle_spacing() -> f64 {
    20.0
}

fn default_vertical_zoom() -> bool {
    true
}

fn default_zoom_button_factor() -> f64 {
    1.2
}
