use tracing::trace;

use crate::extensions::{ChartEvent, PluginContext};
use crate::render::Renderer;

use super::ChartEngine;

impl<R: Renderer> ChartEngine<R> {
    pub(super) fn plugin_context(&self) -> PluginContext {
        PluginContext {
            viewport: self.core.config.viewport,
            transform: self.core.interaction.transform(),
            record_count: self.core.records.len(),
            marker_count: self.core.annotations.markers().len(),
            trend_line_count: self.core.annotations.trend_lines().len(),
            annotation_mode: self.core.interaction.annotation_mode(),
        }
    }

    /// Delivers `event` to every plugin in registration order.
    pub(super) fn emit_event(&mut self, event: ChartEvent) {
        if self.core.plugins.is_empty() {
            return;
        }
        let context = self.plugin_context();
        trace!(?event, plugins = self.core.plugins.len(), "dispatching chart event");
        for plugin in self.core.plugins.values_mut() {
            plugin.on_event(&event, context);
        }
    }
}
