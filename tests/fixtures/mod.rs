// Test fixtures - reusable test data
// Provides consistent grids, events and geometry across all test files
#![allow(dead_code)]

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use month_grid_core::models::event::{CalendarEvent, EventId};

/// Sample dates for testing
pub mod dates {
    use super::*;

    pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    /// Sunday Jun 2, 2024: the first full week of June
    pub fn jun_2_2024() -> NaiveDate {
        ymd(2024, 6, 2)
    }

    /// Local wall-clock instant; panics if the time does not exist locally
    pub fn local(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(year, month, day, hour, minute, 0)
            .earliest()
            .unwrap()
    }
}

/// Sample events for testing
pub mod events {
    use super::*;

    /// All-day event covering `first..=last` (end exclusive at midnight)
    pub fn all_day(id: i64, first: NaiveDate, last: NaiveDate) -> CalendarEvent {
        let start = Local
            .from_local_datetime(&first.and_hms_opt(0, 0, 0).unwrap())
            .earliest()
            .unwrap();
        let end = Local
            .from_local_datetime(&last.succ_opt().unwrap().and_hms_opt(0, 0, 0).unwrap())
            .earliest()
            .unwrap();
        CalendarEvent::builder()
            .id(id)
            .title(format!("All day {id}"))
            .start(start)
            .end(end)
            .all_day(true)
            .build()
            .unwrap()
    }

    /// Timed event from 09:00 on `first` to 17:00 on `last`
    pub fn timed(id: i64, first: NaiveDate, last: NaiveDate) -> CalendarEvent {
        let start = Local
            .from_local_datetime(&first.and_hms_opt(9, 0, 0).unwrap())
            .earliest()
            .unwrap();
        let end = Local
            .from_local_datetime(&last.and_hms_opt(17, 0, 0).unwrap())
            .earliest()
            .unwrap();
        CalendarEvent::new(EventId(id), format!("Timed {id}"), start, end).unwrap()
    }
}

/// Sample geometry for testing
pub mod geometry {
    use month_grid_core::services::interaction::UniformGridGeometry;
    use month_grid_core::services::layout::MonthGrid;
    use egui::Pos2;
    use std::rc::Rc;

    pub const DAY_WIDTH: f32 = 100.0;
    pub const ROW_HEIGHT: f32 = 80.0;

    /// June 2024, Sunday start (May 26 .. Jul 6, six rows), drawn at the origin
    pub fn june_2024() -> Rc<UniformGridGeometry> {
        let grid = MonthGrid::for_month(2024, 6, 0).unwrap();
        Rc::new(UniformGridGeometry::new(grid, Pos2::ZERO, DAY_WIDTH, ROW_HEIGHT))
    }

    /// Pointer in the middle of `(row, column)` with no grab offset
    pub fn cell_center(row: usize, column: usize) -> Pos2 {
        Pos2::new(
            DAY_WIDTH * column as f32 + DAY_WIDTH / 2.0 - 1.0,
            ROW_HEIGHT * row as f32 + ROW_HEIGHT / 2.0,
        )
    }
}
