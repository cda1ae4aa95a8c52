//! Pointer-to-cell mapping and highlighted cell construction.

use crate::models::interaction::HighlightCellInfo;
use crate::models::layout::DAYS_PER_WEEK;

use super::geometry::GridGeometry;

/// Column under the centre of the dragged tile's leading day.
///
/// `floor((local_x - grab_offset_x + day_width / 2) / day_width)`: the drop
/// target only changes once the tile crosses the middle of a cell. May be
/// negative or past column 6 when the tile hangs off the row, but `None` once
/// it leaves the `i32` range.
pub fn drop_start_cell_index(local_x: f32, grab_offset_x: f32, day_width: f32) -> Option<i64> {
    if !(day_width.is_finite() && day_width > 0.0) {
        return None;
    }
    let index = ((local_x - grab_offset_x + day_width / 2.0) / day_width).floor();
    let in_range = index.is_finite() && index.abs() <= i32::MAX as f32;
    in_range.then_some(index as i64)
}

/// Column directly under `local_x`, clamped to the row.
pub fn column_at(local_x: f32, day_width: f32) -> Option<usize> {
    if !(day_width.is_finite() && day_width > 0.0) {
        return None;
    }
    let column = (local_x / day_width).floor();
    if !column.is_finite() {
        return None;
    }
    Some(column.clamp(0.0, (DAYS_PER_WEEK - 1) as f32) as usize)
}

/// Cells covered by `duration_days` days starting at `start_cell_index` in
/// `week_row_index`.
///
/// The start index may be negative (wrapping into earlier rows) or past column
/// 6 (wrapping into later rows). Days before the first row or after the last
/// row produce no cell, and so does a start too far away to address. A new
/// vector is returned on every call.
pub fn build_highlight_cells(
    geometry: &dyn GridGeometry,
    week_row_index: usize,
    start_cell_index: i64,
    duration_days: i64,
) -> Vec<HighlightCellInfo> {
    let week = DAYS_PER_WEEK as i64;
    let row_count = geometry.row_count() as i64;
    if duration_days <= 0 || row_count == 0 {
        return Vec::new();
    }

    let Some(first_linear) = (week_row_index as i64)
        .checked_mul(week)
        .and_then(|row_offset| row_offset.checked_add(start_cell_index))
    else {
        return Vec::new();
    };
    let visible_end = row_count.saturating_mul(week);
    if first_linear >= visible_end {
        return Vec::new();
    }
    let first_visible_day = first_linear.checked_neg().map_or(duration_days, |days| days.max(0));

    let mut cells = Vec::new();
    for day in first_visible_day..duration_days {
        let linear = first_linear + day;
        if linear >= visible_end {
            break;
        }
        let row = (linear / week) as usize;
        let column = (linear % week) as usize;
        let (Some(dates), Some(bounds)) = (geometry.week_dates(row), geometry.cell_bounds(row, column)) else {
            break;
        };
        cells.push(HighlightCellInfo {
            date: dates[column],
            cell_index: column,
            week_row_index: row,
            bounds,
            is_first: day == 0,
            is_last: day == duration_days - 1,
        });
    }
    cells
}
