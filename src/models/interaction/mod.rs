// Interaction models
// State carried by a drag or resize session

use chrono::{DateTime, Local, NaiveDate};
use egui::{Pos2, Rect};
use serde::Serialize;

use crate::models::event::CalendarEvent;

/// Which edge of an event a resize moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ResizeEdge {
    /// Adjusts the start date
    Start,
    /// Adjusts the end date
    End,
}

/// Side of the grid that pages backwards or forwards when held.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum NavigationEdge {
    Leading,
    Trailing,
}

/// A grid cell currently covered by a proposed drop or resize.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HighlightCellInfo {
    pub date: NaiveDate,
    /// Column within the week row, 0..=6
    pub cell_index: usize,
    pub week_row_index: usize,
    pub bounds: Rect,
    pub is_first: bool,
    pub is_last: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DragState {
    pub event: CalendarEvent,
    pub source_date: NaiveDate,
    pub target_date: NaiveDate,
    pub is_valid_target: bool,
    pub position: Option<Pos2>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResizeState {
    pub event: CalendarEvent,
    pub edge: ResizeEdge,
    pub original_start: DateTime<Local>,
    pub original_end: DateTime<Local>,
}

/// Lifecycle of the single interaction session.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum DragSessionState {
    #[default]
    Idle,
    Dragging(DragState),
    Resizing(ResizeState),
}

impl DragSessionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, DragSessionState::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragSessionState::Dragging(_))
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self, DragSessionState::Resizing(_))
    }

    pub fn event(&self) -> Option<&CalendarEvent> {
        match self {
            DragSessionState::Idle => None,
            DragSessionState::Dragging(drag) => Some(&drag.event),
            DragSessionState::Resizing(resize) => Some(&resize.event),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProposedRange {
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
}

/// Proposal shared by drag and resize.
///
/// Only one of the two modes is ever active, so a single copy is written by
/// whichever owns the session and cleared on every return to idle.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Proposal {
    pub range: Option<ProposedRange>,
    pub is_valid: bool,
    pub highlighted_cells: Vec<HighlightCellInfo>,
}

impl Proposal {
    pub fn is_empty(&self) -> bool {
        self.range.is_none() && self.highlighted_cells.is_empty() && !self.is_valid
    }
}
