use indexmap::IndexMap;
use tracing::debug;

use crate::core::TransformState;
use crate::error::ChartResult;
use crate::extensions::AnnotationStore;
use crate::interaction::InteractionController;
use crate::render::Renderer;

use super::validation::validate_engine_config;
use super::{ChartEngine, ChartEngineConfig, RenderStyle, engine_core::EngineCore};

impl<R: Renderer> ChartEngine<R> {
    /// Creates an engine with no data; axes render as an empty frame until
    /// [`ChartEngine::set_data`] is called.
    pub fn new(renderer: R, config: ChartEngineConfig) -> ChartResult<Self> {
        let config = validate_engine_config(config)?;
        let transform = TransformState::new(config.zoom_extent, config.vertical_zoom);

        debug!(
            width = config.viewport.width,
            height = config.viewport.height,
            mode = ?config.x_domain_mode,
            "chart engine created"
        );

        Ok(Self {
            renderer,
            core: EngineCore {
                config,
                style: RenderStyle::default(),
                records: Vec::new(),
                base_scales: None,
                interaction: InteractionController::new(transform),
                annotations: AnnotationStore::new(config.trend_line_behavior),
                plugins: IndexMap::new(),
            },
        })
    }
}
