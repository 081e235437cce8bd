//! ohlc-chart: interactive OHLC candlestick engine.
//!
//! The crate maps records between data space and pixel space under continuous
//! zoom/pan, and derives candles, axes, annotations and tooltips from that
//! mapping on every frame. Drawing is delegated to a [`render::Renderer`].

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartEngineConfig, ChartGeometry, RenderStyle};
pub use error::{ChartError, ChartResult};
