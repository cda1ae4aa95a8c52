//! Week-aligned month grid.
//!
//! Rows are whole weeks starting on the configured first day of the week, so a
//! month grid usually shows a few trailing days of the previous month and a few
//! leading days of the next one.

use chrono::{Datelike, NaiveDate};

use crate::models::layout::DAYS_PER_WEEK;
use crate::utils::date::{add_days, days_between, days_in_month, week_start};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthGrid {
    start: NaiveDate,
    weeks: usize,
}

impl MonthGrid {
    /// Grid of `weeks` rows beginning on `start`.
    pub fn new(start: NaiveDate, weeks: usize) -> Self {
        Self { start, weeks }
    }

    /// Grid covering every day of the given month.
    ///
    /// # Arguments
    /// * `first_day_of_week` - 0 = Sunday, 1 = Monday, etc.
    pub fn for_month(year: i32, month: u32, first_day_of_week: u8) -> Option<Self> {
        let first_of_month = NaiveDate::from_ymd_opt(year, month, 1)?;
        let start = week_start(first_of_month, first_day_of_week);
        let leading = days_between(start, first_of_month) as usize;
        let total_cells = leading + days_in_month(year, month) as usize;
        let weeks = total_cells.div_ceil(DAYS_PER_WEEK);
        Some(Self::new(start, weeks))
    }

    /// Grid for the month containing `date`.
    pub fn containing(date: NaiveDate, first_day_of_week: u8) -> Option<Self> {
        Self::for_month(date.year(), date.month(), first_day_of_week)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last visible date, `None` when the grid has no rows.
    pub fn end(&self) -> Option<NaiveDate> {
        if self.weeks == 0 {
            return None;
        }
        Some(add_days(self.start, (self.weeks * DAYS_PER_WEEK) as i64 - 1))
    }

    pub fn week_count(&self) -> usize {
        self.weeks
    }

    pub fn is_empty(&self) -> bool {
        self.weeks == 0
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.end().is_some_and(|end| date >= self.start && date <= end)
    }

    /// Zero-based offset of `date` from the first visible date.
    pub fn grid_index(&self, date: NaiveDate) -> Option<i64> {
        self.contains(date).then(|| days_between(self.start, date))
    }

    /// (week row, column) holding `date`.
    pub fn cell_of(&self, date: NaiveDate) -> Option<(usize, usize)> {
        let index = self.grid_index(date)? as usize;
        Some((index / DAYS_PER_WEEK, index % DAYS_PER_WEEK))
    }

    pub fn week_dates(&self, week_row_index: usize) -> Option<[NaiveDate; DAYS_PER_WEEK]> {
        if week_row_index >= self.weeks {
            return None;
        }
        let row_start = add_days(self.start, (week_row_index * DAYS_PER_WEEK) as i64);
        Some(std::array::from_fn(|column| add_days(row_start, column as i64)))
    }

    /// Grid shifted by whole pages (the previous or next month).
    pub fn shifted_months(&self, months: i32, first_day_of_week: u8) -> Option<Self> {
        // Row 2 never holds days from a neighbouring month.
        let anchor = add_days(self.start, 14);
        let total = anchor.year() * 12 + anchor.month0() as i32 + months;
        Self::for_month(total.div_euclid(12), total.rem_euclid(12) as u32 + 1, first_day_of_week)
    }
}
