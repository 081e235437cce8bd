use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{LinearScale, OhlcRecord, Viewport};
use crate::error::{ChartError, ChartResult};

const SECONDS_PER_DAY: f64 = 86_400.0;
const NICE_TICK_COUNT: usize = 10;

/// What the x axis is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum XDomainMode {
    /// Record position `0..n-1`.
    #[default]
    Index,
    /// Record date in epoch seconds.
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleBuilderConfig {
    pub min_candle_width: f64,
    pub min_candle_spacing: f64,
    pub x_domain_mode: XDomainMode,
}

impl Default for ScaleBuilderConfig {
    fn default() -> Self {
        Self {
            min_candle_width: 5.0,
            min_candle_spacing: 20.0,
            x_domain_mode: XDomainMode::Index,
        }
    }
}

impl ScaleBuilderConfig {
    fn validate(self) -> ChartResult<Self> {
        for (value, name) in [
            (self.min_candle_width, "min_candle_width"),
            (self.min_candle_spacing, "min_candle_spacing"),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "scale builder `{name}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }
}

/// Untransformed x/y mappings for one (dataset, viewport) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseScales {
    pub x: LinearScale,
    pub y: LinearScale,
    pub x_domain_mode: XDomainMode,
    /// Data-space distance between neighbouring records on the x axis.
    pub unit_step: f64,
}

impl BaseScales {
    /// Data-space x coordinate of a record under the active domain mode.
    #[must_use]
    pub fn x_value(&self, record: &OhlcRecord) -> f64 {
        match self.x_domain_mode {
            XDomainMode::Index => record.index as f64,
            XDomainMode::Date => record.date,
        }
    }
}

/// Builds base scales from the dataset and viewport.
///
/// The x range grows past the plot width when needed so that every candle
/// gets at least `min_candle_width + min_candle_spacing` pixels.
pub fn build_base_scales(
    records: &[OhlcRecord],
    viewport: Viewport,
    config: ScaleBuilderConfig,
) -> ChartResult<BaseScales> {
    let config = config.validate()?;
    let viewport = viewport.validate()?;
    if records.is_empty() {
        return Err(ChartError::EmptyDataset);
    }

    let count = records.len();
    let (x_start, x_end, unit_step) = match config.x_domain_mode {
        XDomainMode::Index => {
            let last = (count - 1) as f64;
            if count == 1 {
                (-0.5, 0.5, 1.0)
            } else {
                (0.0, last, 1.0)
            }
        }
        XDomainMode::Date => {
            let (min_date, max_date) = records.iter().fold(
                (f64::INFINITY, f64::NEG_INFINITY),
                |(min, max), record| (min.min(record.date), max.max(record.date)),
            );
            let span = max_date - min_date;
            if span > 0.0 {
                (min_date, max_date, span / (count - 1) as f64)
            } else {
                let half = SECONDS_PER_DAY / 2.0;
                (min_date - half, max_date + half, SECONDS_PER_DAY)
            }
        }
    };

    let plot = viewport.plot_rect();
    let required_width = (config.min_candle_width + config.min_candle_spacing) * count as f64;
    let x_width = plot.width().max(required_width);
    let x = LinearScale::new((x_start, x_end), (plot.left, plot.left + x_width))?;

    let (mut low, mut high) = records.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY),
        |(low, high), record| (low.min(record.low), high.max(record.high)),
    );
    if low == high {
        low -= 1.0;
        high += 1.0;
    }
    let y = LinearScale::new((low, high), (plot.bottom, plot.top))?.nice(NICE_TICK_COUNT);

    debug!(
        records = count,
        mode = ?config.x_domain_mode,
        x_domain = ?x.domain(),
        x_range = ?x.range(),
        y_domain = ?y.domain(),
        "built base scales"
    );

    Ok(BaseScales {
        x,
        y,
        x_domain_mode: config.x_domain_mode,
        unit_step,
    })
}
