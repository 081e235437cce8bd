mod annotation_controller;
mod chart_geometry;
mod data_controller;
mod engine;
mod engine_config;
mod engine_core;
mod engine_init;
mod interaction_controller;
mod plugin_dispatch;
mod plugin_registry;
mod render_frame_builder;
mod render_style;
mod scale_access;
mod validation;

pub use chart_geometry::ChartGeometry;
pub use engine::ChartEngine;
pub use engine_config::ChartEngineConfig;
pub use render_style::RenderStyle;
