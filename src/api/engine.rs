use tracing::debug;

use crate::error::ChartResult;
use crate::extensions::ChartEvent;
use crate::render::Renderer;

use super::data_controller::base_scales_for;
use super::validation::{validate_engine_config, validate_render_style};
use super::{ChartEngineConfig, RenderStyle, engine_core::EngineCore};

/// Main orchestration facade consumed by host applications.
///
/// `ChartEngine` owns the dataset, base scales, transform, annotations and
/// renderer. Every geometry query re-projects through the current transform.
#[derive(Debug)]
pub struct ChartEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) core: EngineCore,
}

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn config(&self) -> ChartEngineConfig {
        self.core.config
    }

    /// Applies a new configuration.
    ///
    /// Base scales are rebuilt; the transform is kept and re-clamped into the
    /// new zoom extent. A config the current series cannot be scaled under is
    /// rejected and the engine keeps its previous state.
    pub fn set_config(&mut self, config: ChartEngineConfig) -> ChartResult<()> {
        let config = validate_engine_config(config)?;
        let base_scales = base_scales_for(&self.core.records, config)?;

        let transform = self.core.interaction.transform_state_mut();
        transform.set_extent(config.zoom_extent)?;
        transform.set_vertical(config.vertical_zoom);
        self.core
            .annotations
            .set_behavior(config.trend_line_behavior);

        let viewport_changed = config.viewport != self.core.config.viewport;
        self.core.config = config;
        self.core.base_scales = base_scales;
        debug!(?config, "chart config updated");

        if viewport_changed {
            self.emit_event(ChartEvent::ViewportChanged(config.viewport));
        }
        let transform = self.core.interaction.transform();
        self.emit_event(ChartEvent::TransformChanged(transform));
        Ok(())
    }

    #[must_use]
    pub fn render_style(&self) -> RenderStyle {
        self.core.style
    }

    pub fn set_render_style(&mut self, style: RenderStyle) -> ChartResult<()> {
        self.core.style = validate_render_style(style)?;
        Ok(())
    }

    /// Materializes the current frame and hands it to the renderer.
    ///
    /// An empty dataset renders the axes frame only.
    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame()?;
        self.renderer.render(&frame)?;
        self.emit_event(ChartEvent::Rendered);
        Ok(())
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
