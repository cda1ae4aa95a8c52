// Property-based tests for segmentation, packing and calendar-day arithmetic
// Checks the layout invariants against random grids and events

#[path = "../fixtures/mod.rs"]
mod fixtures;

use chrono::{NaiveDate, TimeZone};
use chrono_tz::America::New_York;
use chrono_tz::Europe::London;
use fixtures::events::all_day;
use month_grid_core::services::layout::{segment_event, MonthGrid, MonthLayout};
use month_grid_core::utils::date::{add_days, calendar_days_between, days_between, shift_days};
use proptest::prelude::*;

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 7).unwrap()
}

proptest! {
    /// Property: segments tile the clipped event range without gaps or overlaps
    #[test]
    fn prop_segments_cover_clipped_range(
        grid_offset in 0i64..60,
        weeks in 0usize..7,
        event_offset in -20i64..80,
        span in 1i64..30,
    ) {
        let grid = MonthGrid::new(add_days(base(), grid_offset), weeks);
        let first = add_days(base(), event_offset);
        let last = add_days(first, span - 1);
        let event = all_day(1, first, last);
        let segments = segment_event(&event, &grid);

        match grid.end() {
            Some(grid_end) if first <= grid_end && last >= grid.start() => {
                let clipped_start = first.max(grid.start());
                let clipped_end = last.min(grid_end);
                prop_assert_eq!(segments.first().unwrap().start_date, clipped_start);
                prop_assert_eq!(segments.last().unwrap().end_date, clipped_end);
                for pair in segments.windows(2) {
                    prop_assert_eq!(add_days(pair[0].end_date, 1), pair[1].start_date);
                    prop_assert_eq!(pair[0].week_row_index + 1, pair[1].week_row_index);
                }
                for segment in &segments {
                    prop_assert!(segment.start_day_in_week <= segment.end_day_in_week);
                    prop_assert!(segment.end_day_in_week <= 6);
                    prop_assert_eq!(
                        days_between(segment.start_date, segment.end_date) as usize + 1,
                        segment.span()
                    );
                }
            }
            _ => prop_assert!(segments.is_empty()),
        }
    }

    /// Property: exactly one first (last) segment when the true start (end) is visible
    #[test]
    fn prop_first_and_last_are_unique(
        event_offset in -20i64..60,
        span in 1i64..30,
    ) {
        let grid = MonthGrid::new(base(), 5);
        let first = add_days(base(), event_offset);
        let last = add_days(first, span - 1);
        let event = all_day(1, first, last);
        let segments = segment_event(&event, &grid);

        let firsts = segments.iter().filter(|s| s.is_first_segment).count();
        let lasts = segments.iter().filter(|s| s.is_last_segment).count();
        prop_assert_eq!(firsts, usize::from(grid.contains(first)));
        prop_assert_eq!(lasts, usize::from(grid.contains(last)));
    }

    /// Property: no two assignments in a week share a row and overlap in columns
    #[test]
    fn prop_packing_never_overlaps(
        ranges in prop::collection::vec((0i64..35, 1i64..10), 0..25),
    ) {
        let grid = MonthGrid::new(base(), 5);
        let events: Vec<_> = ranges
            .iter()
            .enumerate()
            .map(|(id, &(offset, span))| {
                let first = add_days(base(), offset);
                all_day(id as i64, first, add_days(first, span - 1))
            })
            .collect();
        let layout = MonthLayout::compute(&events, grid);

        for week in &layout.weeks {
            for (i, a) in week.assignments.iter().enumerate() {
                prop_assert!(a.row < week.total_rows);
                for b in &week.assignments[i + 1..] {
                    prop_assert!(!a.overlaps(b), "{:?} overlaps {:?}", a.event().id, b.event().id);
                }
                for column in a.start_column..=a.end_column {
                    prop_assert!(week.max_row_for_column(column).unwrap() >= a.row);
                }
            }
        }
    }

    /// Property: day deltas across DST transitions equal the plain calendar-day count
    /// (`DragSession` measures a start-edge resize with the same helper)
    #[test]
    fn prop_day_delta_is_calendar_based(
        from_offset in 0i64..366,
        delta in -60i64..60,
        hour in 0u32..24,
    ) {
        let from_date = add_days(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), from_offset);
        for tz in [New_York, London] {
            let from = tz
                .from_local_datetime(&from_date.and_hms_opt(hour, 30, 0).unwrap())
                .earliest();
            let Some(from) = from else { continue };
            let to = shift_days(&from, delta);
            prop_assert_eq!(to.date_naive(), add_days(from_date, delta));
            prop_assert_eq!(calendar_days_between(&from, &to), delta);
        }
    }
}

#[test]
fn test_spring_forward_week_delta() {
    // Mar 10, 2024 is 23 hours long in New York.
    let before = New_York.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap();
    let after = shift_days(&before, 2);
    assert_eq!(after.date_naive(), NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
    assert_eq!((after.clone() - before.clone()).num_hours(), 47);
    assert_eq!(calendar_days_between(&before, &after), 2);
}
