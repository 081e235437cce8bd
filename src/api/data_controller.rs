use tracing::debug;

use crate::core::{
    BaseScales, EffectiveScales, IngestReport, OhlcRecord, PlotRect, RawOhlcRecord, Viewport,
    build_base_scales, ingest_records, project,
};
use crate::error::{ChartError, ChartResult};
use crate::extensions::ChartEvent;
use crate::render::Renderer;

use super::{ChartEngine, ChartEngineConfig};

impl<R: Renderer> ChartEngine<R> {
    /// Replaces the whole series with validated rows from `raw`.
    ///
    /// Invalid rows are dropped and listed in the report. Annotations that
    /// point past the new series are discarded, in-flight annotation work and
    /// hover are cleared, and the transform is kept.
    pub fn set_data(&mut self, raw: &[RawOhlcRecord]) -> ChartResult<IngestReport> {
        let (records, report) = ingest_records(raw);
        self.replace_records(records, report)
    }

    /// Replaces the series with already-validated records, re-indexed by
    /// position.
    pub fn set_records(&mut self, records: Vec<OhlcRecord>) -> ChartResult<IngestReport> {
        let records: Vec<OhlcRecord> = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| OhlcRecord { index, ..record })
            .collect();
        let report = IngestReport {
            accepted: records.len(),
            ..IngestReport::default()
        };
        self.replace_records(records, report)
    }

    fn replace_records(
        &mut self,
        records: Vec<OhlcRecord>,
        mut report: IngestReport,
    ) -> ChartResult<IngestReport> {
        let base_scales = base_scales_for(&records, self.core.config)?;
        let record_count = records.len();

        self.core.records = records;
        self.core.base_scales = base_scales;
        self.core.annotations.reset();
        report.discarded_annotations = self.core.annotations.retain_valid(record_count);
        self.core.interaction.set_hovered(None);

        debug!(
            record_count,
            dropped = report.dropped_count(),
            discarded_annotations = report.discarded_annotations,
            "dataset replaced"
        );
        self.emit_event(ChartEvent::DataReplaced {
            record_count,
            dropped: report.dropped_count(),
        });
        Ok(report)
    }

    #[must_use]
    pub fn records(&self) -> &[OhlcRecord] {
        &self.core.records
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.core.config.viewport
    }

    #[must_use]
    pub fn plot_rect(&self) -> PlotRect {
        self.core.config.viewport.plot_rect()
    }

    /// Applies a new viewport and rebuilds the base scales.
    pub fn resize(&mut self, viewport: Viewport) -> ChartResult<()> {
        let viewport = viewport.validate()?;
        if viewport == self.core.config.viewport {
            return Ok(());
        }
        let config = ChartEngineConfig {
            viewport,
            ..self.core.config
        };
        self.core.base_scales = base_scales_for(&self.core.records, config)?;
        self.core.config = config;
        debug!(
            width = viewport.width,
            height = viewport.height,
            "viewport resized"
        );
        self.emit_event(ChartEvent::ViewportChanged(viewport));
        Ok(())
    }

    #[must_use]
    pub fn base_scales(&self) -> Option<BaseScales> {
        self.core.base_scales
    }

    /// Base scales composed with the live transform; `None` without data.
    #[must_use]
    pub fn effective_scales(&self) -> Option<EffectiveScales> {
        self.core
            .base_scales
            .map(|base| project(&base, self.core.interaction.transform()))
    }
}

/// Builds base scales for a prospective engine state without touching it.
///
/// `Ok(None)` means there is nothing to scale; any other failure leaves the
/// caller free to keep its current state.
pub(super) fn base_scales_for(
    records: &[OhlcRecord],
    config: ChartEngineConfig,
) -> ChartResult<Option<BaseScales>> {
    match build_base_scales(records, config.viewport, config.scale_builder_config()) {
        Ok(scales) => Ok(Some(scales)),
        Err(ChartError::EmptyDataset) => {
            debug!("no records, base scales cleared");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}
