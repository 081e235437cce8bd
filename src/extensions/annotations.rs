use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{EffectiveScales, OhlcRecord};

pub type AnnotationId = u64;

/// Text marker pinned to one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    pub id: AnnotationId,
    pub record_index: usize,
    pub text: String,
}

/// Segment between the close prices of two records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendLine {
    pub id: AnnotationId,
    pub start_index: usize,
    pub end_index: usize,
}

/// What the second trend-line click does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TrendLineBehavior {
    /// Commit immediately and go back to idle.
    #[default]
    SingleShot,
    /// Keep moving the end point until [`AnnotationStore::commit_trend_line`].
    Continuous,
}

/// In-flight annotation work. At most one slot is ever active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AnnotationState {
    #[default]
    Idle,
    PlacingMarkerText {
        record_index: usize,
        draft: String,
    },
    EditingMarkerText {
        marker_id: AnnotationId,
        draft: String,
    },
    TrendStartSet {
        start_index: usize,
    },
    TrendEndSet {
        start_index: usize,
        end_index: usize,
    },
}

impl AnnotationState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Result of committing the active marker slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerCommit {
    Created(Marker),
    Edited(Marker),
}

impl MarkerCommit {
    #[must_use]
    pub fn marker(&self) -> &Marker {
        match self {
            Self::Created(marker) | Self::Edited(marker) => marker,
        }
    }
}

/// Result of a trend-line click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendClick {
    /// Another annotation was in progress.
    Ignored,
    StartSet { start_index: usize },
    EndSet { start_index: usize, end_index: usize },
    Committed(TrendLine),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedMarker {
    /// `None` for a marker that is still being placed.
    pub id: Option<AnnotationId>,
    pub record_index: usize,
    pub text: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendLineGeometry {
    pub id: AnnotationId,
    pub start_index: usize,
    pub end_index: usize,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Uncommitted trend line: the start point and, once clicked, the end point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPreview {
    pub start: (f64, f64),
    pub end: Option<(f64, f64)>,
}

/// Data-space annotation storage plus the placement state machine.
///
/// Only record indices and text are stored; pixel positions are derived on
/// every projection call.
#[derive(Debug, Clone, Default)]
pub struct AnnotationStore {
    markers: Vec<Marker>,
    trend_lines: Vec<TrendLine>,
    state: AnnotationState,
    behavior: TrendLineBehavior,
    next_id: AnnotationId,
}

impl AnnotationStore {
    #[must_use]
    pub fn new(behavior: TrendLineBehavior) -> Self {
        Self {
            behavior,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    #[must_use]
    pub fn trend_lines(&self) -> &[TrendLine] {
        &self.trend_lines
    }

    #[must_use]
    pub fn marker(&self, id: AnnotationId) -> Option<&Marker> {
        self.markers.iter().find(|marker| marker.id == id)
    }

    #[must_use]
    pub fn state(&self) -> &AnnotationState {
        &self.state
    }

    #[must_use]
    pub fn behavior(&self) -> TrendLineBehavior {
        self.behavior
    }

    pub fn set_behavior(&mut self, behavior: TrendLineBehavior) {
        self.behavior = behavior;
    }

    /// Opens a marker slot on `record_index`; rejected unless idle.
    pub fn begin_marker(&mut self, record_index: usize) -> bool {
        if !self.state.is_idle() {
            trace!(record_index, "marker placement rejected, store busy");
            return false;
        }
        self.state = AnnotationState::PlacingMarkerText {
            record_index,
            draft: String::new(),
        };
        true
    }

    /// Opens an existing marker's text for editing; rejected unless idle.
    pub fn begin_edit_marker(&mut self, marker_id: AnnotationId) -> bool {
        if !self.state.is_idle() {
            return false;
        }
        let Some(marker) = self.marker(marker_id) else {
            return false;
        };
        self.state = AnnotationState::EditingMarkerText {
            marker_id,
            draft: marker.text.clone(),
        };
        true
    }

    /// Replaces the draft text of the active marker slot.
    pub fn set_draft_text(&mut self, text: impl Into<String>) -> bool {
        match &mut self.state {
            AnnotationState::PlacingMarkerText { draft, .. }
            | AnnotationState::EditingMarkerText { draft, .. } => {
                *draft = text.into();
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn draft_text(&self) -> Option<&str> {
        match &self.state {
            AnnotationState::PlacingMarkerText { draft, .. }
            | AnnotationState::EditingMarkerText { draft, .. } => Some(draft),
            _ => None,
        }
    }

    /// Commits the active marker slot with its draft text (empty allowed).
    pub fn commit_marker(&mut self) -> Option<MarkerCommit> {
        match std::mem::take(&mut self.state) {
            AnnotationState::PlacingMarkerText {
                record_index,
                draft,
            } => {
                let marker = Marker {
                    id: self.allocate_id(),
                    record_index,
                    text: draft,
                };
                self.markers.push(marker.clone());
                debug!(id = marker.id, record_index, "marker committed");
                Some(MarkerCommit::Created(marker))
            }
            AnnotationState::EditingMarkerText { marker_id, draft } => {
                let marker = self
                    .markers
                    .iter_mut()
                    .find(|marker| marker.id == marker_id)?;
                marker.text = draft;
                debug!(id = marker_id, "marker text edited");
                Some(MarkerCommit::Edited(marker.clone()))
            }
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Advances the trend-line state machine with a click on `record_index`.
    pub fn trend_click(&mut self, record_index: usize) -> TrendClick {
        match self.state {
            AnnotationState::Idle => {
                self.state = AnnotationState::TrendStartSet {
                    start_index: record_index,
                };
                TrendClick::StartSet {
                    start_index: record_index,
                }
            }
            AnnotationState::TrendStartSet { start_index } => match self.behavior {
                TrendLineBehavior::SingleShot => {
                    self.state = AnnotationState::Idle;
                    TrendClick::Committed(self.push_trend_line(start_index, record_index))
                }
                TrendLineBehavior::Continuous => {
                    self.state = AnnotationState::TrendEndSet {
                        start_index,
                        end_index: record_index,
                    };
                    TrendClick::EndSet {
                        start_index,
                        end_index: record_index,
                    }
                }
            },
            AnnotationState::TrendEndSet { start_index, .. } => {
                self.state = AnnotationState::TrendEndSet {
                    start_index,
                    end_index: record_index,
                };
                TrendClick::EndSet {
                    start_index,
                    end_index: record_index,
                }
            }
            AnnotationState::PlacingMarkerText { .. }
            | AnnotationState::EditingMarkerText { .. } => TrendClick::Ignored,
        }
    }

    /// Commits a pending `TrendEndSet` line.
    pub fn commit_trend_line(&mut self) -> Option<TrendLine> {
        let AnnotationState::TrendEndSet {
            start_index,
            end_index,
        } = self.state
        else {
            return None;
        };
        self.state = AnnotationState::Idle;
        Some(self.push_trend_line(start_index, end_index))
    }

    /// Drops in-flight work without committing anything.
    pub fn reset(&mut self) {
        self.state = AnnotationState::Idle;
    }

    pub fn remove_marker(&mut self, id: AnnotationId) -> bool {
        let before = self.markers.len();
        self.markers.retain(|marker| marker.id != id);
        if matches!(self.state, AnnotationState::EditingMarkerText { marker_id, .. } if marker_id == id)
        {
            self.state = AnnotationState::Idle;
        }
        self.markers.len() != before
    }

    pub fn remove_trend_line(&mut self, id: AnnotationId) -> bool {
        let before = self.trend_lines.len();
        self.trend_lines.retain(|line| line.id != id);
        self.trend_lines.len() != before
    }

    pub fn clear(&mut self) {
        self.markers.clear();
        self.trend_lines.clear();
        self.state = AnnotationState::Idle;
    }

    /// Discards annotations that reference indices `>= record_count`.
    ///
    /// Returns how many committed annotations were dropped.
    pub fn retain_valid(&mut self, record_count: usize) -> usize {
        let before = self.markers.len() + self.trend_lines.len();
        self.markers
            .retain(|marker| marker.record_index < record_count);
        self.trend_lines
            .retain(|line| line.start_index < record_count && line.end_index < record_count);

        let state_valid = match &self.state {
            AnnotationState::Idle => true,
            AnnotationState::PlacingMarkerText { record_index, .. } => *record_index < record_count,
            AnnotationState::EditingMarkerText { marker_id, .. } => {
                self.markers.iter().any(|marker| marker.id == *marker_id)
            }
            AnnotationState::TrendStartSet { start_index } => *start_index < record_count,
            AnnotationState::TrendEndSet {
                start_index,
                end_index,
            } => *start_index < record_count && *end_index < record_count,
        };
        if !state_valid {
            self.state = AnnotationState::Idle;
        }

        let discarded = before - (self.markers.len() + self.trend_lines.len());
        if discarded > 0 {
            debug!(discarded, record_count, "discarded out-of-range annotations");
        }
        discarded
    }

    /// Committed markers in pixel space, plus the draft marker while placing.
    ///
    /// Anchored at the body top of the record. A marker being edited shows
    /// its draft text.
    #[must_use]
    pub fn project_markers(
        &self,
        records: &[OhlcRecord],
        scales: &EffectiveScales,
    ) -> Vec<PlacedMarker> {
        let editing = match &self.state {
            AnnotationState::EditingMarkerText { marker_id, draft } => Some((*marker_id, draft)),
            _ => None,
        };

        let mut placed: Vec<PlacedMarker> = self
            .markers
            .iter()
            .filter_map(|marker| {
                let text = match editing {
                    Some((id, draft)) if id == marker.id => draft.clone(),
                    _ => marker.text.clone(),
                };
                place_marker(records, scales, Some(marker.id), marker.record_index, text)
            })
            .collect();

        if let AnnotationState::PlacingMarkerText {
            record_index,
            draft,
        } = &self.state
        {
            placed.extend(place_marker(
                records,
                scales,
                None,
                *record_index,
                draft.clone(),
            ));
        }
        placed
    }

    #[must_use]
    pub fn project_trend_lines(
        &self,
        records: &[OhlcRecord],
        scales: &EffectiveScales,
    ) -> Vec<TrendLineGeometry> {
        self.trend_lines
            .iter()
            .filter_map(|line| {
                let (x1, y1) = close_anchor(records, scales, line.start_index)?;
                let (x2, y2) = close_anchor(records, scales, line.end_index)?;
                Some(TrendLineGeometry {
                    id: line.id,
                    start_index: line.start_index,
                    end_index: line.end_index,
                    x1,
                    y1,
                    x2,
                    y2,
                })
            })
            .collect()
    }

    #[must_use]
    pub fn trend_preview(
        &self,
        records: &[OhlcRecord],
        scales: &EffectiveScales,
    ) -> Option<TrendPreview> {
        match self.state {
            AnnotationState::TrendStartSet { start_index } => Some(TrendPreview {
                start: close_anchor(records, scales, start_index)?,
                end: None,
            }),
            AnnotationState::TrendEndSet {
                start_index,
                end_index,
            } => Some(TrendPreview {
                start: close_anchor(records, scales, start_index)?,
                end: close_anchor(records, scales, end_index),
            }),
            _ => None,
        }
    }

    fn push_trend_line(&mut self, start_index: usize, end_index: usize) -> TrendLine {
        let line = TrendLine {
            id: self.allocate_id(),
            start_index,
            end_index,
        };
        self.trend_lines.push(line);
        debug!(id = line.id, start_index, end_index, "trend line committed");
        line
    }

    fn allocate_id(&mut self) -> AnnotationId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

fn place_marker(
    records: &[OhlcRecord],
    scales: &EffectiveScales,
    id: Option<AnnotationId>,
    record_index: usize,
    text: String,
) -> Option<PlacedMarker> {
    let record = records.get(record_index)?;
    Some(PlacedMarker {
        id,
        record_index,
        text,
        x: scales.record_x(record),
        y: scales.y.apply(record.body_top_price()),
    })
}

fn close_anchor(records: &[OhlcRecord], scales: &EffectiveScales, index: usize) -> Option<(f64, f64)> {
    let record = records.get(index)?;
    Some((scales.record_x(record), scales.y.apply(record.close)))
}
