pub mod tooltip;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{
    EffectiveScales, OhlcRecord, PlotRect, Transform, TransformState, ZoomEvent, candle_width,
};
use crate::extensions::{AnnotationStore, TrendClick, TrendLineBehavior};

pub use tooltip::{TooltipContent, tooltip_for};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    Idle,
    Panning,
}

/// What a click inside the plot does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AnnotationMode {
    /// Clicks only pan/zoom.
    #[default]
    Navigate,
    Marker,
    TrendLine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOutcome {
    Ignored,
    MarkerStarted { record_index: usize },
    Trend(TrendClick),
}

/// Routes pointer and zoom input to the transform and annotation store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionController {
    transform: TransformState,
    mode: InteractionMode,
    annotation_mode: AnnotationMode,
    hovered: Option<usize>,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(TransformState::default())
    }
}

impl InteractionController {
    #[must_use]
    pub fn new(transform: TransformState) -> Self {
        Self {
            transform,
            mode: InteractionMode::Idle,
            annotation_mode: AnnotationMode::Navigate,
            hovered: None,
        }
    }

    #[must_use]
    pub fn transform(&self) -> Transform {
        self.transform.transform()
    }

    #[must_use]
    pub fn transform_state(&self) -> &TransformState {
        &self.transform
    }

    pub fn transform_state_mut(&mut self) -> &mut TransformState {
        &mut self.transform
    }

    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn annotation_mode(&self) -> AnnotationMode {
        self.annotation_mode
    }

    pub fn set_annotation_mode(&mut self, mode: AnnotationMode) {
        self.annotation_mode = mode;
    }

    #[must_use]
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn set_hovered(&mut self, index: Option<usize>) {
        self.hovered = index;
    }

    pub fn zoom(&mut self, event: ZoomEvent) -> Transform {
        self.transform.apply_zoom(event)
    }

    pub fn pan_start(&mut self) {
        self.mode = InteractionMode::Panning;
    }

    pub fn pan_end(&mut self) {
        self.mode = InteractionMode::Idle;
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) -> Transform {
        self.transform.apply_pan(dx, dy)
    }

    pub fn reset_transform(&mut self) -> Transform {
        self.transform.reset();
        self.transform.transform()
    }

    /// Resolves a click to a record and feeds it to the annotation store.
    ///
    /// A single-shot trend line disarms trend mode once committed.
    pub fn on_click(
        &mut self,
        x: f64,
        y: f64,
        records: &[OhlcRecord],
        scales: &EffectiveScales,
        plot: PlotRect,
        store: &mut AnnotationStore,
    ) -> PointerOutcome {
        if records.is_empty() || !plot.contains(x, y) {
            return PointerOutcome::Ignored;
        }
        let Some(record_index) = scales.nearest_record(records, x) else {
            return PointerOutcome::Ignored;
        };

        let outcome = match self.annotation_mode {
            AnnotationMode::Navigate => PointerOutcome::Ignored,
            AnnotationMode::Marker => {
                if store.begin_marker(record_index) {
                    PointerOutcome::MarkerStarted { record_index }
                } else {
                    PointerOutcome::Ignored
                }
            }
            AnnotationMode::TrendLine => match store.trend_click(record_index) {
                TrendClick::Ignored => PointerOutcome::Ignored,
                click => {
                    if matches!(click, TrendClick::Committed(_))
                        && store.behavior() == TrendLineBehavior::SingleShot
                    {
                        self.annotation_mode = AnnotationMode::Navigate;
                    }
                    PointerOutcome::Trend(click)
                }
            },
        };
        trace!(x, y, record_index, ?outcome, "pointer click");
        outcome
    }

    /// Index of the candle column under the pointer, if any.
    #[must_use]
    pub fn hit_test(
        &self,
        x: f64,
        y: f64,
        records: &[OhlcRecord],
        scales: &EffectiveScales,
        plot: PlotRect,
        min_candle_width: f64,
    ) -> Option<usize> {
        if !plot.contains(x, y) {
            return None;
        }
        let index = scales.nearest_record(records, x)?;
        let record = records.get(index)?;
        let half_width = candle_width(scales, min_candle_width) / 2.0;
        ((x - scales.record_x(record)).abs() <= half_width).then_some(index)
    }
}
