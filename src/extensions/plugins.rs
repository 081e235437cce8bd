use serde::{Deserialize, Serialize};

use crate::core::{Transform, Viewport};
use crate::extensions::{Marker, TrendLine};
use crate::interaction::AnnotationMode;

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PluginContext {
    pub viewport: Viewport,
    pub transform: Transform,
    pub record_count: usize,
    pub marker_count: usize,
    pub trend_line_count: usize,
    pub annotation_mode: AnnotationMode,
}

/// Event stream exposed to plugins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChartEvent {
    MarkerCommitted(Marker),
    MarkerTextEdited(Marker),
    TrendLineCommitted(TrendLine),
    TransformChanged(Transform),
    DataReplaced { record_count: usize, dropped: usize },
    ViewportChanged(Viewport),
    Rendered,
}

/// Extension hook interface.
///
/// Plugins observe events and read engine context without mutating core
/// internals directly.
pub trait ChartPlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &ChartEvent, context: PluginContext);
}
