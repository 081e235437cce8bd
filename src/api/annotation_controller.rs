use crate::extensions::{
    AnnotationId, AnnotationState, ChartEvent, Marker, MarkerCommit, TrendLine,
};
use crate::render::Renderer;

use super::ChartEngine;

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        self.core.annotations.markers()
    }

    #[must_use]
    pub fn trend_lines(&self) -> &[TrendLine] {
        self.core.annotations.trend_lines()
    }

    #[must_use]
    pub fn annotation_state(&self) -> &AnnotationState {
        self.core.annotations.state()
    }

    /// Live-edits the text of the marker being placed or edited.
    pub fn set_marker_draft(&mut self, text: impl Into<String>) -> bool {
        self.core.annotations.set_draft_text(text)
    }

    /// Commits the active marker slot with its draft text.
    pub fn commit_marker(&mut self) -> Option<Marker> {
        let commit = self.core.annotations.commit_marker()?;
        let event = match &commit {
            MarkerCommit::Created(marker) => ChartEvent::MarkerCommitted(marker.clone()),
            MarkerCommit::Edited(marker) => ChartEvent::MarkerTextEdited(marker.clone()),
        };
        self.emit_event(event);
        Some(commit.marker().clone())
    }

    /// Sets the draft to `text` and commits it.
    pub fn commit_marker_text(&mut self, text: impl Into<String>) -> Option<Marker> {
        if !self.core.annotations.set_draft_text(text) {
            return None;
        }
        self.commit_marker()
    }

    /// Reopens a committed marker's text; rejected while other work is active.
    pub fn edit_marker(&mut self, id: AnnotationId) -> bool {
        self.core.annotations.begin_edit_marker(id)
    }

    /// Commits a continuous-mode trend line that has both endpoints set.
    pub fn commit_trend_line(&mut self) -> Option<TrendLine> {
        let line = self.core.annotations.commit_trend_line()?;
        self.emit_event(ChartEvent::TrendLineCommitted(line));
        Some(line)
    }

    /// Drops in-flight annotation work without committing.
    pub fn cancel_annotation(&mut self) {
        self.core.annotations.reset();
    }

    pub fn remove_marker(&mut self, id: AnnotationId) -> bool {
        self.core.annotations.remove_marker(id)
    }

    pub fn remove_trend_line(&mut self, id: AnnotationId) -> bool {
        self.core.annotations.remove_trend_line(id)
    }

    pub fn clear_annotations(&mut self) {
        self.core.annotations.clear();
    }
}
