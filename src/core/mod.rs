pub mod axis;
pub mod candlestick;
pub mod primitives;
pub mod projection;
pub mod record;
pub mod scale;
pub mod scale_builder;
pub mod transform;
pub mod types;

pub use axis::{AxisTick, x_axis_ticks, y_axis_ticks};
pub use candlestick::{CandleGeometry, candle_width, generate_candles};
pub use projection::{EffectiveScale, EffectiveScales, project};
pub use record::{
    CandleDirection, DroppedRecord, IngestReport, OhlcRecord, RawOhlcRecord, RecordDate,
    ingest_records,
};
pub use scale::LinearScale;
pub use scale_builder::{BaseScales, ScaleBuilderConfig, XDomainMode, build_base_scales};
pub use transform::{Transform, TransformState, ZoomEvent, ZoomExtent};
pub use types::{Margins, PlotRect, Viewport};
