//! Grid geometry supplied by the host.

use chrono::NaiveDate;
use egui::{Pos2, Rect, Vec2};

use crate::models::layout::DAYS_PER_WEEK;
use crate::services::layout::MonthGrid;

/// Read-only view of the rendered grid that the interaction session needs.
pub trait GridGeometry {
    /// Screen rectangle of a week row, `None` past the last row.
    fn week_row_bounds(&self, week_row_index: usize) -> Option<Rect>;

    /// The seven dates shown in a week row.
    fn week_dates(&self, week_row_index: usize) -> Option<[NaiveDate; DAYS_PER_WEEK]>;

    fn day_width(&self) -> f32;

    /// Offset from the dragged tile's leading edge to the pointer, captured at
    /// drag start (including any fixed margin).
    fn grab_offset(&self) -> Vec2;

    fn row_count(&self) -> usize;

    fn cell_bounds(&self, week_row_index: usize, column: usize) -> Option<Rect> {
        let row = self.week_row_bounds(week_row_index)?;
        let left = row.left() + self.day_width() * column as f32;
        Some(Rect::from_min_max(
            Pos2::new(left, row.top()),
            Pos2::new(left + self.day_width(), row.bottom()),
        ))
    }

    /// Week row whose vertical band contains `pos`.
    fn row_at(&self, pos: Pos2) -> Option<usize> {
        (0..self.row_count()).find(|&row| {
            self.week_row_bounds(row)
                .is_some_and(|bounds| pos.y >= bounds.top() && pos.y < bounds.bottom())
        })
    }

    /// Grid index of `date` relative to the first visible date (may be negative
    /// or past the end).
    fn linear_index_of(&self, date: NaiveDate) -> Option<i64> {
        let first = self.week_dates(0)?[0];
        Some(crate::utils::date::days_between(first, date))
    }
}

/// Evenly spaced grid: every row has the same height and every day the same width.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformGridGeometry {
    pub grid: MonthGrid,
    pub origin: Pos2,
    pub day_width: f32,
    pub row_height: f32,
    pub grab_offset: Vec2,
}

impl UniformGridGeometry {
    pub fn new(grid: MonthGrid, origin: Pos2, day_width: f32, row_height: f32) -> Self {
        Self {
            grid,
            origin,
            day_width,
            row_height,
            grab_offset: Vec2::ZERO,
        }
    }

    pub fn with_grab_offset(mut self, grab_offset: Vec2) -> Self {
        self.grab_offset = grab_offset;
        self
    }
}

impl GridGeometry for UniformGridGeometry {
    fn week_row_bounds(&self, week_row_index: usize) -> Option<Rect> {
        if week_row_index >= self.grid.week_count() {
            return None;
        }
        let top = self.origin.y + self.row_height * week_row_index as f32;
        Some(Rect::from_min_size(
            Pos2::new(self.origin.x, top),
            Vec2::new(self.day_width * DAYS_PER_WEEK as f32, self.row_height),
        ))
    }

    fn week_dates(&self, week_row_index: usize) -> Option<[NaiveDate; DAYS_PER_WEEK]> {
        self.grid.week_dates(week_row_index)
    }

    fn day_width(&self) -> f32 {
        self.day_width
    }

    fn grab_offset(&self) -> Vec2 {
        self.grab_offset
    }

    fn row_count(&self) -> usize {
        self.grid.week_count()
    }
}
