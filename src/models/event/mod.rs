// Event module
// Calendar event model consumed by the layout engine and interaction session

use chrono::{DateTime, Local, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::date::{days_between, shift_days, with_date};

/// Stable identity of an event, also the final tie-breaker when ordering layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EventId(pub i64);

/// Link from a single occurrence back to the series it was expanded from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceLink {
    pub series_id: EventId,
    pub occurrence_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    #[error("Event title cannot be empty")]
    EmptyTitle,
    #[error("Event end time must be after start time")]
    EndBeforeStart,
    #[error("Color must be in hex format (#RRGGBB or #RGB)")]
    InvalidColor,
    #[error("Event {0} is required")]
    MissingField(&'static str),
}

/// Calendar event as handed over by the host.
///
/// Values are never mutated by this crate; moves and resizes produce a new event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: EventId,
    pub title: String,
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    pub all_day: bool,
    pub color: Option<String>,
    pub recurrence: Option<RecurrenceLink>,
}

impl CalendarEvent {
    /// Create a new event with required fields
    ///
    /// # Examples
    /// ```
    /// use month_grid_core::models::event::{CalendarEvent, EventId};
    /// use chrono::Local;
    ///
    /// let start = Local::now();
    /// let end = start + chrono::Duration::hours(1);
    /// let event = CalendarEvent::new(EventId(1), "Team Meeting", start, end).unwrap();
    /// assert!(event.span_days() >= 1);
    /// ```
    pub fn new(
        id: EventId,
        title: impl Into<String>,
        start: DateTime<Local>,
        end: DateTime<Local>,
    ) -> Result<Self, EventError> {
        let event = Self {
            id,
            title: title.into(),
            start,
            end,
            all_day: false,
            color: None,
            recurrence: None,
        };
        event.validate()?;
        Ok(event)
    }

    pub fn builder() -> CalendarEventBuilder {
        CalendarEventBuilder::new()
    }

    pub fn validate(&self) -> Result<(), EventError> {
        if self.title.trim().is_empty() {
            return Err(EventError::EmptyTitle);
        }

        if self.end <= self.start {
            return Err(EventError::EndBeforeStart);
        }

        if let Some(ref color) = self.color {
            if !color.starts_with('#') || (color.len() != 7 && color.len() != 4) {
                return Err(EventError::InvalidColor);
            }
        }

        Ok(())
    }

    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_some()
    }

    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }

    /// Local calendar day the event starts on.
    pub fn first_day(&self) -> NaiveDate {
        self.start.date_naive()
    }

    /// Local calendar day the event ends on.
    ///
    /// An end exactly at midnight is exclusive, so an event running
    /// `Jun 7 00:00 .. Jun 8 00:00` occupies Jun 7 only.
    pub fn last_day(&self) -> NaiveDate {
        let end_day = self.end.date_naive();
        let last = if self.end > self.start && self.end.time() == NaiveTime::MIN {
            end_day.pred_opt().unwrap_or(end_day)
        } else {
            end_day
        };
        last.max(self.first_day())
    }

    /// Number of calendar days the event touches (at least 1).
    pub fn span_days(&self) -> i64 {
        days_between(self.first_day(), self.last_day()) + 1
    }

    pub fn is_multi_day(&self) -> bool {
        self.span_days() > 1
    }

    /// Copy of this event with a new time range.
    pub fn with_range(&self, start: DateTime<Local>, end: DateTime<Local>) -> Self {
        Self {
            start,
            end,
            ..self.clone()
        }
    }

    /// Copy of this event moved by whole calendar days, keeping wall-clock times.
    pub fn moved_by_days(&self, days: i64) -> Self {
        if days == 0 {
            return self.clone();
        }
        self.with_range(shift_days(&self.start, days), shift_days(&self.end, days))
    }

    /// Copy with the start moved to `date`, keeping the start time of day.
    pub fn with_start_day(&self, date: NaiveDate) -> Self {
        self.with_range(with_date(&self.start, date), self.end)
    }

    /// Copy whose last day becomes `date`, keeping the end time of day.
    pub fn with_end_day(&self, date: NaiveDate) -> Self {
        let delta = days_between(self.last_day(), date);
        self.with_range(self.start, shift_days(&self.end, delta))
    }
}

/// Builder for creating events with optional fields
pub struct CalendarEventBuilder {
    id: Option<EventId>,
    title: Option<String>,
    start: Option<DateTime<Local>>,
    end: Option<DateTime<Local>>,
    all_day: bool,
    color: Option<String>,
    recurrence: Option<RecurrenceLink>,
}

impl CalendarEventBuilder {
    pub fn new() -> Self {
        Self {
            id: None,
            title: None,
            start: None,
            end: None,
            all_day: false,
            color: None,
            recurrence: None,
        }
    }

    pub fn id(mut self, id: i64) -> Self {
        self.id = Some(EventId(id));
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn start(mut self, start: DateTime<Local>) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: DateTime<Local>) -> Self {
        self.end = Some(end);
        self
    }

    pub fn all_day(mut self, all_day: bool) -> Self {
        self.all_day = all_day;
        self
    }

    /// Set the event color (hex format)
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn recurrence(mut self, series_id: i64, occurrence_date: NaiveDate) -> Self {
        self.recurrence = Some(RecurrenceLink {
            series_id: EventId(series_id),
            occurrence_date,
        });
        self
    }

    pub fn build(self) -> Result<CalendarEvent, EventError> {
        let event = CalendarEvent {
            id: self.id.ok_or(EventError::MissingField("id"))?,
            title: self.title.ok_or(EventError::MissingField("title"))?,
            start: self.start.ok_or(EventError::MissingField("start time"))?,
            end: self.end.ok_or(EventError::MissingField("end time"))?,
            all_day: self.all_day,
            color: self.color,
            recurrence: self.recurrence,
        };

        event.validate()?;
        Ok(event)
    }
}

impl Default for CalendarEventBuilder {
    fn default() -> Self {
        Self::new()
    }
}
