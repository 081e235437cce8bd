use crate::core::EffectiveScales;
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::ChartEngine;

impl<R: Renderer> ChartEngine<R> {
    /// Maps an x data value (index or epoch seconds) to a pixel.
    pub fn map_x_to_pixel(&self, x: f64) -> ChartResult<f64> {
        Ok(self.require_scales()?.x.apply(x))
    }

    pub fn map_pixel_to_x(&self, pixel: f64) -> ChartResult<f64> {
        Ok(self.require_scales()?.x.invert(pixel))
    }

    pub fn map_price_to_pixel(&self, price: f64) -> ChartResult<f64> {
        Ok(self.require_scales()?.y.apply(price))
    }

    pub fn map_pixel_to_price(&self, pixel: f64) -> ChartResult<f64> {
        Ok(self.require_scales()?.y.invert(pixel))
    }

    /// Pixel x of a record's centre line.
    pub fn map_index_to_pixel(&self, index: usize) -> ChartResult<f64> {
        let scales = self.require_scales()?;
        let record = self
            .core
            .records
            .get(index)
            .ok_or(ChartError::OutOfRangeIndex {
                index,
                len: self.core.records.len(),
            })?;
        Ok(scales.record_x(record))
    }

    /// Record nearest to a pixel x, `None` without data.
    #[must_use]
    pub fn nearest_record_index(&self, pixel: f64) -> Option<usize> {
        self.effective_scales()?
            .nearest_record(&self.core.records, pixel)
    }

    fn require_scales(&self) -> ChartResult<EffectiveScales> {
        self.effective_scales().ok_or(ChartError::EmptyDataset)
    }
}
