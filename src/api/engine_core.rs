use indexmap::IndexMap;

use crate::core::{BaseScales, OhlcRecord};
use crate::extensions::{AnnotationStore, ChartPlugin};
use crate::interaction::InteractionController;

use super::{ChartEngineConfig, RenderStyle};

/// Internal engine state used by the public facade (`ChartEngine`).
pub(super) struct EngineCore {
    pub(super) config: ChartEngineConfig,
    pub(super) style: RenderStyle,
    pub(super) records: Vec<OhlcRecord>,
    /// `None` while the dataset is empty.
    pub(super) base_scales: Option<BaseScales>,
    pub(super) interaction: InteractionController,
    pub(super) annotations: AnnotationStore,
    pub(super) plugins: IndexMap<String, Box<dyn ChartPlugin>>,
}

impl std::fmt::Debug for EngineCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineCore")
            .field("config", &self.config)
            .field("style", &self.style)
            .field("records", &self.records)
            .field("base_scales", &self.base_scales)
            .field("interaction", &self.interaction)
            .field("annotations", &self.annotations)
            .field("plugins", &self.plugins.keys().collect::<Vec<_>>())
            .finish()
    }
}
