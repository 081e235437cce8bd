use tracing::trace;

use crate::core::{Transform, ZoomEvent};
use crate::error::{ChartError, ChartResult};
use crate::extensions::{ChartEvent, TrendClick};
use crate::interaction::{
    AnnotationMode, InteractionMode, PointerOutcome, TooltipContent, tooltip_for,
};
use crate::render::Renderer;

use super::ChartEngine;

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn transform(&self) -> Transform {
        self.core.interaction.transform()
    }

    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.core.interaction.mode()
    }

    /// Zooms about the event's focal pixel.
    pub fn zoom(&mut self, event: ZoomEvent) -> Transform {
        let before = self.core.interaction.transform();
        let after = self.core.interaction.zoom(event);
        self.notify_transform(before, after);
        after
    }

    /// Zooms in one step about the plot centre.
    pub fn zoom_in(&mut self) -> Transform {
        self.zoom_about_center(self.core.config.zoom_button_factor)
    }

    pub fn zoom_out(&mut self) -> Transform {
        self.zoom_about_center(1.0 / self.core.config.zoom_button_factor)
    }

    fn zoom_about_center(&mut self, delta_scale: f64) -> Transform {
        let (focal_x, focal_y) = self.plot_rect().center();
        self.zoom(ZoomEvent::new(delta_scale, focal_x, focal_y))
    }

    pub fn reset_zoom(&mut self) -> Transform {
        let before = self.core.interaction.transform();
        let after = self.core.interaction.reset_transform();
        self.notify_transform(before, after);
        after
    }

    pub fn pan_start(&mut self) {
        self.core.interaction.pan_start();
    }

    pub fn pan_end(&mut self) {
        self.core.interaction.pan_end();
    }

    /// Translates the view by a pixel delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) -> Transform {
        let before = self.core.interaction.transform();
        let after = self.core.interaction.pan_by(dx, dy);
        self.notify_transform(before, after);
        after
    }

    fn notify_transform(&mut self, before: Transform, after: Transform) {
        if before != after {
            trace!(k = after.k, x = after.x, y = after.y, "transform changed");
            self.emit_event(ChartEvent::TransformChanged(after));
        }
    }

    /// Index of the candle column under the pointer; updates hover.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<usize> {
        let hovered = self.effective_scales().and_then(|scales| {
            self.core.interaction.hit_test(
                x,
                y,
                &self.core.records,
                &scales,
                self.plot_rect(),
                self.core.config.min_candle_width,
            )
        });
        self.core.interaction.set_hovered(hovered);
        hovered
    }

    /// Hovers a record directly, bypassing hit-testing.
    pub fn hover_record(&mut self, index: usize) -> ChartResult<()> {
        let len = self.core.records.len();
        if index >= len {
            return Err(ChartError::OutOfRangeIndex { index, len });
        }
        self.core.interaction.set_hovered(Some(index));
        Ok(())
    }

    pub fn hover_end(&mut self) {
        self.core.interaction.set_hovered(None);
    }

    #[must_use]
    pub fn hovered_index(&self) -> Option<usize> {
        self.core.interaction.hovered()
    }

    /// Tooltip for the hovered record, positioned under the current transform.
    #[must_use]
    pub fn tooltip(&self) -> Option<TooltipContent> {
        let index = self.core.interaction.hovered()?;
        let scales = self.effective_scales()?;
        tooltip_for(
            &self.core.records,
            &scales,
            index,
            self.core.config.min_candle_width,
        )
        .ok()
    }

    #[must_use]
    pub fn annotation_mode(&self) -> AnnotationMode {
        self.core.interaction.annotation_mode()
    }

    /// Switches what clicks do. Changing mode cancels in-flight annotation
    /// work.
    pub fn set_annotation_mode(&mut self, mode: AnnotationMode) {
        if mode != self.core.interaction.annotation_mode() {
            self.core.annotations.reset();
        }
        self.core.interaction.set_annotation_mode(mode);
    }

    /// Routes a click to the annotation store under the active mode.
    pub fn pointer_click(&mut self, x: f64, y: f64) -> PointerOutcome {
        let Some(scales) = self.effective_scales() else {
            return PointerOutcome::Ignored;
        };
        let plot = self.plot_rect();
        let core = &mut self.core;
        let outcome = core.interaction.on_click(
            x,
            y,
            &core.records,
            &scales,
            plot,
            &mut core.annotations,
        );
        if let PointerOutcome::Trend(TrendClick::Committed(line)) = outcome {
            self.emit_event(ChartEvent::TrendLineCommitted(line));
        }
        outcome
    }
}
