//! Annotation overlays and host-facing event hooks.

pub mod annotations;
pub mod plugins;

pub use annotations::{
    AnnotationId, AnnotationState, AnnotationStore, Marker, MarkerCommit, PlacedMarker,
    TrendClick, TrendLine, TrendLineBehavior, TrendLineGeometry, TrendPreview,
};
pub use plugins::{ChartEvent, ChartPlugin, PluginContext};
