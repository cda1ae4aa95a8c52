//! Turning a finished drag or resize into an updated event.

use chrono::NaiveDate;

use crate::models::event::CalendarEvent;
use crate::models::interaction::{ProposedRange, ResizeEdge};

/// Move `event` by whole calendar days, keeping its wall-clock times.
pub fn apply_drop(event: &CalendarEvent, day_delta: i64) -> CalendarEvent {
    log::debug!("moving event {:?} by {} day(s)", event.id, day_delta);
    event.moved_by_days(day_delta)
}

/// Resize `event` so it covers `start_day..=end_day`.
///
/// Only the dragged edge changes; the other keeps its original instant. Times
/// of day are preserved. Returns `None` unless the result ends after it
/// starts.
pub fn apply_resize(
    event: &CalendarEvent,
    edge: ResizeEdge,
    start_day: NaiveDate,
    end_day: NaiveDate,
) -> Option<CalendarEvent> {
    let resized = match edge {
        ResizeEdge::Start => event.with_start_day(start_day),
        ResizeEdge::End => event.with_end_day(end_day),
    };
    if resized.end <= resized.start {
        log::warn!(
            "resize of event {:?} to {}..{} would invert its range",
            event.id,
            start_day,
            end_day
        );
        return None;
    }
    Some(resized)
}

/// Apply a range returned by `DragSession::complete_resize`.
pub fn apply_range(event: &CalendarEvent, range: ProposedRange) -> Option<CalendarEvent> {
    (range.end > range.start).then(|| event.with_range(range.start, range.end))
}
