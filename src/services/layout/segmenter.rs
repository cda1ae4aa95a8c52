//! Splits events into one segment per week row they touch.

use crate::models::event::CalendarEvent;
use crate::models::layout::{EventSegment, DAYS_PER_WEEK};
use crate::utils::date::{add_days, days_between};

use super::grid::MonthGrid;

/// Segments of a single event, ordered by week row.
///
/// Returns an empty list when the event does not intersect the grid.
pub fn segment_event<'a>(event: &'a CalendarEvent, grid: &MonthGrid) -> Vec<EventSegment<'a>> {
    let Some(grid_end) = grid.end() else {
        return Vec::new();
    };
    let grid_start = grid.start();
    let first_day = event.first_day();
    let last_day = event.last_day();

    if last_day < grid_start || first_day > grid_end {
        return Vec::new();
    }

    let clipped_start = first_day.max(grid_start);
    let clipped_end = last_day.min(grid_end);
    let starts_on_grid = clipped_start == first_day;
    let ends_on_grid = clipped_end == last_day;

    let start_offset = days_between(grid_start, clipped_start) as usize;
    let end_offset = days_between(grid_start, clipped_end) as usize;

    let mut segments = Vec::with_capacity(end_offset / DAYS_PER_WEEK - start_offset / DAYS_PER_WEEK + 1);
    let mut offset = start_offset;
    while offset <= end_offset {
        let week_row_index = offset / DAYS_PER_WEEK;
        let row_last_offset = week_row_index * DAYS_PER_WEEK + DAYS_PER_WEEK - 1;
        let segment_end = end_offset.min(row_last_offset);

        segments.push(EventSegment {
            event,
            week_row_index,
            start_day_in_week: offset % DAYS_PER_WEEK,
            end_day_in_week: segment_end % DAYS_PER_WEEK,
            start_date: add_days(grid_start, offset as i64),
            end_date: add_days(grid_start, segment_end as i64),
            is_first_segment: starts_on_grid && offset == start_offset,
            is_last_segment: ends_on_grid && segment_end == end_offset,
        });

        offset = segment_end + 1;
    }

    segments
}

/// Segment every event, dropping those entirely off the grid.
pub fn segment_events<'a>(events: &'a [CalendarEvent], grid: &MonthGrid) -> Vec<Vec<EventSegment<'a>>> {
    let segmented: Vec<Vec<EventSegment<'a>>> = events
        .iter()
        .map(|event| segment_event(event, grid))
        .filter(|segments| !segments.is_empty())
        .collect();
    log::trace!(
        "segmented {} of {} events onto a {}-week grid",
        segmented.len(),
        events.len(),
        grid.week_count()
    );
    segmented
}
