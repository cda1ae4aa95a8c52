// Unit tests for DragSession lifecycle contracts
// Covers notification counts, idempotent completion and edge-timer staleness

#[path = "../fixtures/mod.rs"]
mod fixtures;

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use egui::Pos2;
use fixtures::dates::{local, ymd};
use fixtures::events::{all_day, timed};
use fixtures::geometry::{cell_center, june_2024};
use month_grid_core::models::interaction::{NavigationEdge, ResizeEdge};
use month_grid_core::models::settings::InteractionSettings;
use month_grid_core::services::interaction::{NavigationCallbacks, PageNavigator, UniformGridGeometry};
use month_grid_core::{DragSession, MonthGrid};
use test_case::test_case;

fn counter(session: &mut DragSession) -> Rc<Cell<u32>> {
    let hits = Rc::new(Cell::new(0));
    let inner = Rc::clone(&hits);
    session.subscribe(move || inner.set(inner.get() + 1));
    hits
}

fn navigator() -> (impl PageNavigator, Rc<Cell<u32>>, Rc<Cell<u32>>) {
    let previous = Rc::new(Cell::new(0));
    let next = Rc::new(Cell::new(0));
    let (p, n) = (Rc::clone(&previous), Rc::clone(&next));
    let callbacks = NavigationCallbacks {
        previous: move || p.set(p.get() + 1),
        next: move || n.set(n.get() + 1),
    };
    (callbacks, previous, next)
}

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

#[test]
fn test_unchanged_update_drag_notifies_once() {
    let mut session = DragSession::default();
    session.start_drag(timed(1, ymd(2024, 6, 10), ymd(2024, 6, 10)), ymd(2024, 6, 10));
    let hits = counter(&mut session);

    let position = Some(Pos2::new(120.0, 40.0));
    let changed: Vec<bool> = (0..5)
        .map(|_| session.update_drag(ymd(2024, 6, 10), true, position))
        .collect();

    assert_eq!(changed, vec![true, false, false, false, false]);
    assert_eq!(hits.get(), 1);
}

#[test]
fn test_update_drag_when_idle_is_noop() {
    let mut session = DragSession::default();
    let hits = counter(&mut session);
    assert!(!session.update_drag(ymd(2024, 6, 10), true, None));
    assert_eq!(hits.get(), 0);
    assert!(session.state().is_idle());
}

#[test]
fn test_start_resize_is_silent_until_first_update() {
    let mut session = DragSession::default();
    let hits = counter(&mut session);
    let event = timed(2, ymd(2024, 6, 10), ymd(2024, 6, 12));

    assert!(session.start_resize(event.clone(), ResizeEdge::End));
    assert_eq!(hits.get(), 0);
    assert_eq!(session.original_bounds(), Some((event.start, event.end)));

    session.update_resize(event.start, local(2024, 6, 14, 17, 0), true, Vec::new());
    assert_eq!(hits.get(), 1);
    assert_eq!(session.calculate_day_delta(), 2);
}

#[test]
fn test_update_resize_outside_resize_is_ignored() {
    let mut session = DragSession::default();
    let hits = counter(&mut session);
    session.update_resize(local(2024, 6, 1, 9, 0), local(2024, 6, 2, 9, 0), true, Vec::new());
    assert_eq!(hits.get(), 0);
    assert!(session.proposed_start().is_none());
}

#[test]
fn test_completion_without_session_is_idempotent() {
    let mut session = DragSession::default();
    let hits = counter(&mut session);

    assert_eq!(session.complete_drag(), None);
    assert_eq!(session.complete_resize(), None);
    session.cancel_drag();
    session.cancel_resize();

    assert!(session.state().is_idle());
    assert_eq!(hits.get(), 0);
}

#[test]
fn test_complete_twice_notifies_once() {
    let mut session = DragSession::default();
    session.start_drag(all_day(3, ymd(2024, 6, 3), ymd(2024, 6, 3)), ymd(2024, 6, 3));
    session.update_drag(ymd(2024, 6, 5), true, None);
    let hits = counter(&mut session);

    assert_eq!(session.complete_drag(), Some(ymd(2024, 6, 5)));
    assert_eq!(session.complete_drag(), None);
    assert_eq!(hits.get(), 1);
}

#[test]
fn test_invalid_resize_completes_to_nothing() {
    let mut session = DragSession::default();
    let event = timed(4, ymd(2024, 6, 10), ymd(2024, 6, 11));
    session.start_resize(event.clone(), ResizeEdge::Start);
    session.update_resize(event.start, event.end, false, Vec::new());

    assert_eq!(session.complete_resize(), None);
    assert!(session.state().is_idle());
    assert!(!session.is_proposed_drop_valid());
}

#[test]
fn test_cancel_drag_before_edge_timer_fires() {
    let (nav, previous, next) = navigator();
    let mut session = DragSession::default().with_navigator(nav);
    session.start_drag(all_day(5, ymd(2024, 6, 3), ymd(2024, 6, 4)), ymd(2024, 6, 3));

    let t0 = Instant::now();
    session.handle_edge_proximity_at(true, NavigationEdge::Trailing, t0);
    assert!(session.next_deadline().is_some());
    session.cancel_drag();

    session.tick_at(t0 + Duration::from_secs(5));
    assert_eq!((previous.get(), next.get()), (0, 0));
    assert!(session.next_deadline().is_none());
}

#[test]
fn test_edge_navigation_fires_once_then_waits_for_report() {
    let (nav, _, next) = navigator();
    let mut session = DragSession::new(InteractionSettings::simple()).with_navigator(nav);
    session.start_drag(all_day(6, ymd(2024, 6, 3), ymd(2024, 6, 4)), ymd(2024, 6, 3));

    let t0 = Instant::now();
    session.handle_edge_proximity_at(true, NavigationEdge::Trailing, t0);
    session.tick_at(t0 + ms(499));
    assert_eq!(next.get(), 0);
    session.tick_at(t0 + ms(500));
    assert_eq!(next.get(), 1);
    assert!(!session.is_near_edge());

    session.tick_at(t0 + ms(2000));
    assert_eq!(next.get(), 1);

    // The host measures again on the new page.
    session.handle_edge_proximity_at(true, NavigationEdge::Trailing, t0 + ms(2000));
    session.tick_at(t0 + ms(2500));
    assert_eq!(next.get(), 2);
}

#[test]
fn test_proximity_without_session_is_ignored() {
    let (nav, previous, _) = navigator();
    let mut session = DragSession::default().with_navigator(nav);
    let t0 = Instant::now();
    session.handle_edge_proximity_at(true, NavigationEdge::Leading, t0);
    assert!(session.next_deadline().is_none());
    session.tick_at(t0 + ms(5000));
    assert_eq!(previous.get(), 0);
}

#[test]
fn test_probe_before_drag_start_is_kept() {
    let mut session = DragSession::default();
    let hits = counter(&mut session);
    let start = local(2024, 6, 12, 14, 30);
    let end = local(2024, 6, 13, 10, 0);

    assert!(session.update_proposed_drop_range(start, end, true, false));
    assert!(!session.update_proposed_drop_range(start, end, true, false));
    assert_eq!(hits.get(), 1);
    assert_eq!(session.proposed_start(), Some(local(2024, 6, 12, 0, 0)));
    assert_eq!(session.proposed_end(), Some(local(2024, 6, 13, 0, 0)));

    session.start_drag(all_day(8, ymd(2024, 6, 12), ymd(2024, 6, 13)), ymd(2024, 6, 12));
    assert!(session.proposed_start().is_some());

    session.update_proposed_drop_range(start, end, true, true);
    assert_eq!(session.proposed_start(), Some(start));
}

#[test]
fn test_drag_during_resize_cancels_resize() {
    let mut session = DragSession::default();
    let event = timed(9, ymd(2024, 6, 10), ymd(2024, 6, 11));
    session.start_resize(event.clone(), ResizeEdge::End);
    session.update_resize(event.start, event.end, true, Vec::new());
    let hits = counter(&mut session);

    session.start_drag(event, ymd(2024, 6, 10));
    assert!(session.is_dragging());
    assert!(!session.is_resizing());
    assert!(session.proposed_start().is_none());
    // Clearing the resize and entering the drag is one change.
    assert_eq!(hits.get(), 1);
}

#[test]
fn test_resize_rejected_during_drag() {
    let mut session = DragSession::default();
    let event = timed(10, ymd(2024, 6, 10), ymd(2024, 6, 11));
    session.start_drag(event.clone(), ymd(2024, 6, 10));
    let hits = counter(&mut session);

    assert!(!session.start_resize(event, ResizeEdge::Start));
    assert!(session.is_dragging());
    assert_eq!(hits.get(), 0);
}

#[test_case(cell_center(1, 3), Some(ymd(2024, 6, 5)) ; "same week")]
#[test_case(cell_center(3, 0), Some(ymd(2024, 6, 16)) ; "two weeks later")]
#[test_case(cell_center(0, 0), Some(ymd(2024, 5, 26)) ; "into the previous month")]
#[test_case(Pos2::new(150.0, -20.0), Some(ymd(2024, 6, 3)) ; "above the grid keeps source")]
fn test_pointer_drop_targets(pointer: Pos2, expected: Option<NaiveDate>) {
    let mut session = DragSession::default();
    session.start_drag(all_day(12, ymd(2024, 6, 3), ymd(2024, 6, 3)), ymd(2024, 6, 3));
    session.handle_drag_move_at(pointer, june_2024(), Instant::now());
    assert_eq!(session.complete_drag(), expected);
}

#[test]
fn test_zero_width_geometry_is_harmless() {
    let grid = MonthGrid::for_month(2024, 6, 0).unwrap();
    let geometry = Rc::new(UniformGridGeometry::new(grid, Pos2::ZERO, 0.0, 80.0));
    let mut session = DragSession::default();
    session.start_drag(all_day(13, ymd(2024, 6, 3), ymd(2024, 6, 4)), ymd(2024, 6, 3));
    session.handle_drag_move_at(Pos2::new(10.0, 10.0), geometry, Instant::now());
    session.flush_pending_move();

    assert!(session.highlighted_cells().is_empty());
    assert_eq!(session.target_date(), Some(ymd(2024, 6, 3)));
}
