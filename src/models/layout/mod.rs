// Layout models
// Output of the month layout pass: per-week segments and their row assignments

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::event::CalendarEvent;

/// Number of day columns in a week row.
pub const DAYS_PER_WEEK: usize = 7;

/// Ordering class used by the row packer. Lower classes are packed first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum SegmentKind {
    AllDayMultiDay,
    TimedMultiDay,
    AllDaySingleDay,
    TimedSingleDay,
}

impl SegmentKind {
    pub fn of(event: &CalendarEvent) -> Self {
        match (event.all_day, event.is_multi_day()) {
            (true, true) => SegmentKind::AllDayMultiDay,
            (false, true) => SegmentKind::TimedMultiDay,
            (true, false) => SegmentKind::AllDaySingleDay,
            (false, false) => SegmentKind::TimedSingleDay,
        }
    }
}

/// The part of an event visible in one week row of the grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventSegment<'a> {
    pub event: &'a CalendarEvent,
    pub week_row_index: usize,
    /// Column of the first covered day, 0..=6
    pub start_day_in_week: usize,
    /// Column of the last covered day, 0..=6
    pub end_day_in_week: usize,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// True only when this segment holds the event's real first day.
    pub is_first_segment: bool,
    /// True only when this segment holds the event's real last day.
    pub is_last_segment: bool,
}

impl EventSegment<'_> {
    pub fn span(&self) -> usize {
        self.end_day_in_week - self.start_day_in_week + 1
    }

    pub fn kind(&self) -> SegmentKind {
        SegmentKind::of(self.event)
    }

    pub fn columns(&self) -> std::ops::RangeInclusive<usize> {
        self.start_day_in_week..=self.end_day_in_week
    }
}

/// A segment placed on a row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutAssignment<'a> {
    pub segment: EventSegment<'a>,
    pub row: usize,
    pub start_column: usize,
    pub end_column: usize,
}

impl<'a> LayoutAssignment<'a> {
    pub fn event(&self) -> &'a CalendarEvent {
        self.segment.event
    }

    pub fn overlaps(&self, other: &LayoutAssignment<'_>) -> bool {
        self.row == other.row
            && self.start_column <= other.end_column
            && other.start_column <= self.end_column
    }
}

/// Packed result for one week row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekLayoutFrame<'a> {
    pub week_row_index: usize,
    /// Sorted by (row, start_column)
    pub assignments: Vec<LayoutAssignment<'a>>,
    pub total_rows: usize,
    /// Highest row used in each column, `None` for an empty column.
    pub column_max_row: [Option<usize>; DAYS_PER_WEEK],
}

impl<'a> WeekLayoutFrame<'a> {
    pub fn empty(week_row_index: usize) -> Self {
        Self {
            week_row_index,
            assignments: Vec::new(),
            total_rows: 0,
            column_max_row: [None; DAYS_PER_WEEK],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn max_row_for_column(&self, column: usize) -> Option<usize> {
        self.column_max_row.get(column).copied().flatten()
    }

    /// Rows occupied in `column`, i.e. how far content below must be pushed down.
    pub fn rows_in_column(&self, column: usize) -> usize {
        self.max_row_for_column(column).map_or(0, |row| row + 1)
    }

    pub fn assignments_for(&self, event: &CalendarEvent) -> impl Iterator<Item = &LayoutAssignment<'a>> {
        let id = event.id;
        self.assignments.iter().filter(move |a| a.event().id == id)
    }
}
