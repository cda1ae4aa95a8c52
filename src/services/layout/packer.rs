//! Greedy first-fit row packing for the segments of one week row.
//!
//! Rows are chosen per week, so a multi-week event can land on different rows
//! in different weeks.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::models::event::EventId;
use crate::models::layout::{EventSegment, LayoutAssignment, WeekLayoutFrame, DAYS_PER_WEEK};

/// Packing order: kind, then earlier start, then longer duration, then id.
pub fn compare_segments(a: &EventSegment<'_>, b: &EventSegment<'_>) -> Ordering {
    a.kind()
        .cmp(&b.kind())
        .then_with(|| a.event.start.cmp(&b.event.start))
        .then_with(|| b.event.duration().cmp(&a.event.duration()))
        .then_with(|| a.event.id.cmp(&b.event.id))
}

/// Rows already taken in each day column.
#[derive(Debug, Clone, Default)]
pub struct OccupancyMap {
    columns: [HashSet<usize>; DAYS_PER_WEEK],
}

impl OccupancyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_free(&self, row: usize, start_column: usize, end_column: usize) -> bool {
        (start_column..=end_column).all(|column| !self.columns[column].contains(&row))
    }

    pub fn mark(&mut self, row: usize, start_column: usize, end_column: usize) {
        for column in start_column..=end_column {
            self.columns[column].insert(row);
        }
    }

    /// Lowest row free at every column in the span.
    pub fn first_free_row(&self, start_column: usize, end_column: usize) -> usize {
        // The span blocks at most this many distinct rows, so a free one exists in 0..=limit.
        let limit: usize = self.columns[start_column..=end_column]
            .iter()
            .map(HashSet::len)
            .sum();
        (0..=limit)
            .find(|&row| self.is_free(row, start_column, end_column))
            .unwrap_or(limit)
    }
}

#[derive(Debug, Default)]
pub struct RowPacker {
    occupancy: OccupancyMap,
    column_max_row: [Option<usize>; DAYS_PER_WEEK],
}

impl RowPacker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Packer pre-seeded with every assignment of `frame` except those
    /// belonging to `exclude` (the event being dragged or resized).
    pub fn seeded_from(frame: &WeekLayoutFrame<'_>, exclude: Option<EventId>) -> Self {
        let mut packer = Self::new();
        for assignment in &frame.assignments {
            if Some(assignment.event().id) == exclude {
                continue;
            }
            packer.occupy(assignment.row, assignment.start_column, assignment.end_column);
        }
        packer
    }

    fn occupy(&mut self, row: usize, start_column: usize, end_column: usize) {
        self.occupancy.mark(row, start_column, end_column);
        for max in &mut self.column_max_row[start_column..=end_column] {
            *max = Some(max.map_or(row, |current| current.max(row)));
        }
    }

    /// Place one segment on the lowest free row.
    ///
    /// Returns `None` for a segment whose columns fall outside the week.
    pub fn place<'a>(&mut self, segment: EventSegment<'a>) -> Option<LayoutAssignment<'a>> {
        let (start_column, end_column) = (segment.start_day_in_week, segment.end_day_in_week);
        if start_column > end_column || end_column >= DAYS_PER_WEEK {
            log::warn!(
                "skipping segment of event {:?} with columns {}..={}",
                segment.event.id,
                start_column,
                end_column
            );
            return None;
        }

        let row = self.occupancy.first_free_row(start_column, end_column);
        self.occupy(row, start_column, end_column);
        Some(LayoutAssignment {
            segment,
            row,
            start_column,
            end_column,
        })
    }

    /// Pack all segments of one week row.
    pub fn pack_week<'a>(week_row_index: usize, mut segments: Vec<EventSegment<'a>>) -> WeekLayoutFrame<'a> {
        segments.sort_by(compare_segments);

        let mut packer = Self::new();
        let mut assignments: Vec<LayoutAssignment<'a>> = segments
            .into_iter()
            .filter_map(|segment| packer.place(segment))
            .collect();
        assignments.sort_by_key(|a| (a.row, a.start_column));

        let total_rows = assignments.iter().map(|a| a.row + 1).max().unwrap_or(0);
        log::trace!(
            "week {} packed {} segments into {} rows",
            week_row_index,
            assignments.len(),
            total_rows
        );

        WeekLayoutFrame {
            week_row_index,
            assignments,
            total_rows,
            column_max_row: packer.column_max_row,
        }
    }

    /// Row a dragged or resized segment would take inside an existing week,
    /// ignoring the event's own current placement.
    pub fn pack_single<'a>(frame: &WeekLayoutFrame<'_>, segment: EventSegment<'a>) -> Option<LayoutAssignment<'a>> {
        let mut packer = Self::seeded_from(frame, Some(segment.event.id));
        packer.place(segment)
    }
}
