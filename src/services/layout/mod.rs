//! Month layout engine.
//! Segments events per week row and packs each week's segments into rows.

use crate::models::event::CalendarEvent;
use crate::models::layout::{LayoutAssignment, WeekLayoutFrame};

pub mod grid;
pub mod packer;
pub mod segmenter;

pub use grid::MonthGrid;
pub use packer::{compare_segments, OccupancyMap, RowPacker};
pub use segmenter::{segment_event, segment_events};

/// Static layout of a whole month grid, one frame per week row.
#[derive(Debug, Clone)]
pub struct MonthLayout<'a> {
    pub grid: MonthGrid,
    pub weeks: Vec<WeekLayoutFrame<'a>>,
}

impl<'a> MonthLayout<'a> {
    pub fn compute(events: &'a [CalendarEvent], grid: MonthGrid) -> Self {
        let mut per_week: Vec<Vec<_>> = vec![Vec::new(); grid.week_count()];
        for segment in segment_events(events, &grid).into_iter().flatten() {
            if let Some(bucket) = per_week.get_mut(segment.week_row_index) {
                bucket.push(segment);
            }
        }

        let weeks: Vec<WeekLayoutFrame<'a>> = per_week
            .into_iter()
            .enumerate()
            .map(|(week_row_index, segments)| RowPacker::pack_week(week_row_index, segments))
            .collect();

        log::debug!(
            "laid out {} events over {} weeks starting {}",
            events.len(),
            weeks.len(),
            grid.start()
        );

        Self { grid, weeks }
    }

    pub fn week(&self, week_row_index: usize) -> Option<&WeekLayoutFrame<'a>> {
        self.weeks.get(week_row_index)
    }

    /// Tallest week, in rows.
    pub fn max_rows(&self) -> usize {
        self.weeks.iter().map(|w| w.total_rows).max().unwrap_or(0)
    }

    /// Where `event` would sit if placed now, packed against everything else
    /// on the grid. Used to preview a drag or resize live.
    pub fn place_live<'e>(&self, event: &'e CalendarEvent) -> Vec<LayoutAssignment<'e>> {
        segment_event(event, &self.grid)
            .into_iter()
            .filter_map(|segment| {
                let frame = self.week(segment.week_row_index)?;
                RowPacker::pack_single(frame, segment)
            })
            .collect()
    }
}
