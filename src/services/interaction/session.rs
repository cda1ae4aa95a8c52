//! Drag and resize interaction session.
//!
//! One session exists per grid. It is either idle, dragging one event, or
//! resizing one event; the two modes never overlap. Every committed change is
//! followed by a single change notification.
//!
//! Pointer moves during a drag are coalesced: [`DragSession::handle_drag_move_at`]
//! only stores the latest sample, and the drop proposal is recomputed when the
//! debounce window elapses in [`DragSession::tick_at`], and then only if the
//! (cell, week row) pair under the dragged tile changed.

use std::fmt;
use std::rc::Rc;
use std::time::Instant;

use chrono::{DateTime, Local, NaiveDate, NaiveTime};
use egui::Pos2;

use crate::models::event::CalendarEvent;
use crate::models::interaction::{
    DragSessionState, DragState, HighlightCellInfo, NavigationEdge, Proposal, ProposedRange,
    ResizeEdge, ResizeState,
};
use crate::models::settings::InteractionSettings;
use crate::utils::date::{
    add_days, calendar_days_between, days_between, resolve_local, shift_days, start_of_day, with_date,
};

use super::edge::{EdgeNavigator, PageNavigator};
use super::geometry::GridGeometry;
use super::highlight::{build_highlight_cells, column_at, drop_start_cell_index};
use super::notifier::{ChangeNotifier, ListenerId};
use super::timer::DelayedTask;

/// Decides whether a drop onto `(proposed_start, proposed_end)` is allowed.
pub type DropValidator = Box<dyn Fn(NaiveDate, NaiveDate) -> bool>;
/// Decides whether a resize to `(proposed_start, proposed_end)` on `edge` is allowed.
pub type ResizeValidator = Box<dyn Fn(NaiveDate, NaiveDate, ResizeEdge) -> bool>;

struct PendingMove {
    pointer: Pos2,
    geometry: Rc<dyn GridGeometry>,
}

pub struct DragSession {
    state: DragSessionState,
    proposal: Proposal,
    settings: InteractionSettings,
    notifier: ChangeNotifier,
    drop_validator: Option<DropValidator>,
    resize_validator: Option<ResizeValidator>,
    navigator: Option<Box<dyn PageNavigator>>,
    edge: EdgeNavigator,
    debounce: DelayedTask,
    pending_move: Option<PendingMove>,
    geometry: Option<Rc<dyn GridGeometry>>,
    last_drop_cell: Option<(i64, usize)>,
    last_resize_date: Option<NaiveDate>,
}

impl DragSession {
    pub fn new(settings: InteractionSettings) -> Self {
        Self {
            state: DragSessionState::Idle,
            proposal: Proposal::default(),
            edge: EdgeNavigator::from_settings(&settings),
            settings,
            notifier: ChangeNotifier::new(),
            drop_validator: None,
            resize_validator: None,
            navigator: None,
            debounce: DelayedTask::new(),
            pending_move: None,
            geometry: None,
            last_drop_cell: None,
            last_resize_date: None,
        }
    }

    pub fn with_drop_validator(mut self, validator: impl Fn(NaiveDate, NaiveDate) -> bool + 'static) -> Self {
        self.drop_validator = Some(Box::new(validator));
        self
    }

    pub fn with_resize_validator(
        mut self,
        validator: impl Fn(NaiveDate, NaiveDate, ResizeEdge) -> bool + 'static,
    ) -> Self {
        self.resize_validator = Some(Box::new(validator));
        self
    }

    pub fn with_navigator(mut self, navigator: impl PageNavigator + 'static) -> Self {
        self.navigator = Some(Box::new(navigator));
        self
    }

    /// Geometry used by keyboard nudges. Pointer moves bring their own.
    pub fn set_geometry(&mut self, geometry: Rc<dyn GridGeometry>) {
        self.geometry = Some(geometry);
    }

    pub fn settings(&self) -> &InteractionSettings {
        &self.settings
    }

    // Change notification

    pub fn subscribe(&mut self, listener: impl FnMut() + 'static) -> ListenerId {
        self.notifier.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.notifier.unsubscribe(id)
    }

    // Read-only state

    pub fn state(&self) -> &DragSessionState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    pub fn is_resizing(&self) -> bool {
        self.state.is_resizing()
    }

    pub fn is_active(&self) -> bool {
        !self.state.is_idle()
    }

    pub fn dragged_event(&self) -> Option<&CalendarEvent> {
        self.drag().map(|drag| &drag.event)
    }

    pub fn resizing_event(&self) -> Option<&CalendarEvent> {
        self.resize().map(|resize| &resize.event)
    }

    pub fn source_date(&self) -> Option<NaiveDate> {
        self.drag().map(|drag| drag.source_date)
    }

    pub fn target_date(&self) -> Option<NaiveDate> {
        self.drag().map(|drag| drag.target_date)
    }

    pub fn is_valid_target(&self) -> bool {
        self.drag().is_some_and(|drag| drag.is_valid_target)
    }

    pub fn drag_position(&self) -> Option<Pos2> {
        self.drag().and_then(|drag| drag.position)
    }

    pub fn proposal(&self) -> &Proposal {
        &self.proposal
    }

    pub fn proposed_start(&self) -> Option<DateTime<Local>> {
        self.proposal.range.map(|range| range.start)
    }

    pub fn proposed_end(&self) -> Option<DateTime<Local>> {
        self.proposal.range.map(|range| range.end)
    }

    pub fn is_proposed_drop_valid(&self) -> bool {
        self.proposal.is_valid
    }

    pub fn highlighted_cells(&self) -> &[HighlightCellInfo] {
        &self.proposal.highlighted_cells
    }

    pub fn resize_edge(&self) -> Option<ResizeEdge> {
        self.resize().map(|resize| resize.edge)
    }

    /// Start and end of the resized event as they were when the resize began.
    pub fn original_bounds(&self) -> Option<(DateTime<Local>, DateTime<Local>)> {
        self.resize()
            .map(|resize| (resize.original_start, resize.original_end))
    }

    pub fn is_near_edge(&self) -> bool {
        self.edge.is_near_edge()
    }

    /// Earliest moment [`DragSession::tick_at`] has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.debounce.deadline(), self.edge.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Signed days between where the session started and where it would land.
    ///
    /// For a drag this is `target_date - source_date`; for a resize it is the
    /// movement of the active edge. Zero when idle.
    pub fn calculate_day_delta(&self) -> i64 {
        match &self.state {
            DragSessionState::Idle => 0,
            DragSessionState::Dragging(drag) => days_between(drag.source_date, drag.target_date),
            DragSessionState::Resizing(resize) => {
                let Some(range) = self.proposal.range else {
                    return 0;
                };
                match resize.edge {
                    ResizeEdge::Start => calendar_days_between(&resize.original_start, &range.start),
                    ResizeEdge::End => days_between(
                        resize.event.last_day(),
                        resize.event.with_range(range.start, range.end).last_day(),
                    ),
                }
            }
        }
    }

    // Drag lifecycle

    pub fn start_drag(&mut self, event: CalendarEvent, source_date: NaiveDate) {
        if self.state.is_resizing() {
            log::debug!("drag started during a resize; cancelling the resize");
            self.reset_to_idle();
        }
        self.edge.cancel();
        self.debounce.cancel();
        self.pending_move = None;
        self.last_drop_cell = None;

        log::debug!("drag started for event {:?} from {}", event.id, source_date);
        self.state = DragSessionState::Dragging(DragState {
            event,
            source_date,
            target_date: source_date,
            is_valid_target: true,
            position: None,
        });
        self.notifier.notify();
    }

    /// Returns true if anything changed (and a notification was sent).
    pub fn update_drag(&mut self, target_date: NaiveDate, is_valid: bool, position: Option<Pos2>) -> bool {
        let changed = self.apply_drag_update(target_date, is_valid, position);
        if changed {
            self.notifier.notify();
        }
        changed
    }

    /// Record a proposed drop range.
    ///
    /// With `preserve_time` false both ends are truncated to the start of their
    /// day. Accepted before [`DragSession::start_drag`] because a drop-target
    /// probe can arrive ahead of the drag start.
    pub fn update_proposed_drop_range(
        &mut self,
        start: DateTime<Local>,
        end: DateTime<Local>,
        is_valid: bool,
        preserve_time: bool,
    ) -> bool {
        let range = if preserve_time {
            ProposedRange { start, end }
        } else {
            ProposedRange {
                start: start_of_day(&start),
                end: start_of_day(&end),
            }
        };
        if self.proposal.range == Some(range) && self.proposal.is_valid == is_valid {
            return false;
        }
        self.proposal.range = Some(range);
        self.proposal.is_valid = is_valid;
        self.notifier.notify();
        true
    }

    /// Finish the drag, returning the target date if the drop is valid.
    pub fn complete_drag(&mut self) -> Option<NaiveDate> {
        if self.state.is_dragging() && self.pending_move.is_some() {
            self.flush_pending_move();
        }

        let target = match &self.state {
            DragSessionState::Dragging(drag) if drag.is_valid_target => Some(drag.target_date),
            _ => None,
        };
        if self.reset_to_idle() {
            self.notifier.notify();
        }
        log::debug!("drag completed with target {:?}", target);
        target
    }

    pub fn cancel_drag(&mut self) {
        if self.reset_to_idle() {
            log::debug!("drag cancelled");
            self.notifier.notify();
        }
    }

    /// Store the latest pointer sample; the proposal is recomputed once the
    /// debounce window elapses.
    pub fn handle_drag_move_at(&mut self, pointer: Pos2, geometry: Rc<dyn GridGeometry>, now: Instant) {
        if !self.state.is_dragging() {
            return;
        }
        self.pending_move = Some(PendingMove { pointer, geometry });
        self.debounce.schedule_if_idle(now, self.settings.debounce_window());
    }

    pub fn handle_drag_move(&mut self, pointer: Pos2, geometry: Rc<dyn GridGeometry>) {
        self.handle_drag_move_at(pointer, geometry, Instant::now());
    }

    /// Process a stored pointer sample right away.
    pub fn flush_pending_move(&mut self) {
        self.debounce.cancel();
        if let Some(pending) = self.pending_move.take() {
            self.process_drag_move(pending);
        }
    }

    /// Move the drop proposal by whole days (keyboard pathway).
    pub fn nudge_drag(&mut self, day_delta: i64) {
        let Some(drag) = self.drag() else {
            return;
        };
        let current_start = add_days(
            drag.event.first_day(),
            days_between(drag.source_date, drag.target_date),
        );
        let proposed_start = add_days(current_start, day_delta);
        let geometry = self.geometry.clone();
        let placement = geometry
            .as_deref()
            .and_then(|g| Some((g, 0, g.linear_index_of(proposed_start)?)));

        self.last_drop_cell = None;
        self.propose_drop(proposed_start, placement, None);
    }

    // Resize lifecycle

    /// Begin resizing `event` from `edge`.
    ///
    /// Rejected (returns false) while a drag is active. Sends no notification:
    /// the first visual feedback comes from the first [`DragSession::update_resize`].
    pub fn start_resize(&mut self, event: CalendarEvent, edge: ResizeEdge) -> bool {
        if self.state.is_dragging() {
            log::warn!(
                "start_resize for event {:?} ignored: a drag is in progress",
                event.id
            );
            return false;
        }
        self.edge.cancel();
        self.debounce.cancel();
        self.pending_move = None;
        self.last_drop_cell = None;
        self.last_resize_date = None;
        self.proposal = Proposal::default();

        log::debug!("resize started for event {:?} on {:?} edge", event.id, edge);
        self.state = DragSessionState::Resizing(ResizeState {
            original_start: event.start,
            original_end: event.end,
            event,
            edge,
        });
        true
    }

    pub fn update_resize(
        &mut self,
        proposed_start: DateTime<Local>,
        proposed_end: DateTime<Local>,
        is_valid: bool,
        cells: Vec<HighlightCellInfo>,
    ) {
        if !self.state.is_resizing() {
            log::trace!("update_resize ignored: no resize in progress");
            return;
        }
        self.proposal = Proposal {
            range: Some(ProposedRange {
                start: proposed_start,
                end: proposed_end,
            }),
            is_valid,
            highlighted_cells: cells,
        };
        self.notifier.notify();
    }

    /// Finish the resize, returning the new (start, end) if valid.
    pub fn complete_resize(&mut self) -> Option<(DateTime<Local>, DateTime<Local>)> {
        let result = match (&self.state, self.proposal.range) {
            (DragSessionState::Resizing(_), Some(range)) if self.proposal.is_valid => {
                Some((range.start, range.end))
            }
            _ => None,
        };
        if self.reset_to_idle() {
            self.notifier.notify();
        }
        log::debug!("resize completed with {:?}", result);
        result
    }

    pub fn cancel_resize(&mut self) {
        if self.reset_to_idle() {
            log::debug!("resize cancelled");
            self.notifier.notify();
        }
    }

    /// Map a pointer to the hovered day and propose a resize to it.
    pub fn handle_resize_move(&mut self, pointer: Pos2, geometry: Rc<dyn GridGeometry>) {
        if !self.state.is_resizing() {
            return;
        }
        self.geometry = Some(Rc::clone(&geometry));

        let Some(row) = geometry.row_at(pointer) else {
            return;
        };
        let Some(bounds) = geometry.week_row_bounds(row) else {
            return;
        };
        let Some(column) = column_at(pointer.x - bounds.left(), geometry.day_width()) else {
            return;
        };
        let Some(hovered) = geometry.week_dates(row).map(|dates| dates[column]) else {
            return;
        };
        if self.last_resize_date == Some(hovered) {
            return;
        }
        self.last_resize_date = Some(hovered);
        self.propose_resize(hovered);
    }

    /// Move the active resize edge by whole days (keyboard pathway).
    pub fn nudge_resize(&mut self, day_delta: i64) {
        let Some(resize) = self.resize() else {
            return;
        };
        let current = match (resize.edge, self.proposal.range) {
            (ResizeEdge::Start, Some(range)) => range.start.date_naive(),
            (ResizeEdge::Start, None) => resize.event.first_day(),
            (ResizeEdge::End, Some(range)) => resize.event.with_range(range.start, range.end).last_day(),
            (ResizeEdge::End, None) => resize.event.last_day(),
        };
        self.last_resize_date = None;
        self.propose_resize(add_days(current, day_delta));
    }

    // Edge navigation and the frame pump

    pub fn handle_edge_proximity_at(&mut self, near_edge: bool, edge: NavigationEdge, now: Instant) {
        if near_edge && !self.is_active() {
            return;
        }
        self.edge.handle_proximity_at(near_edge, edge, now);
    }

    pub fn handle_edge_proximity(&mut self, near_edge: bool, edge: NavigationEdge) {
        self.handle_edge_proximity_at(near_edge, edge, Instant::now());
    }

    /// Run whatever scheduled work is due: the debounced move and edge paging.
    pub fn tick_at(&mut self, now: Instant) {
        if self.debounce.take_due(now).is_some() {
            if let Some(pending) = self.pending_move.take() {
                self.process_drag_move(pending);
            }
        }

        let active = self.is_active();
        if self
            .edge
            .poll_at(now, active, self.navigator.as_deref_mut())
            .is_some()
        {
            // The page changed under the pointer; the next sample must recompute.
            self.last_drop_cell = None;
            self.last_resize_date = None;
        }
    }

    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    // Internals

    fn drag(&self) -> Option<&DragState> {
        match &self.state {
            DragSessionState::Dragging(drag) => Some(drag),
            _ => None,
        }
    }

    fn resize(&self) -> Option<&ResizeState> {
        match &self.state {
            DragSessionState::Resizing(resize) => Some(resize),
            _ => None,
        }
    }

    fn apply_drag_update(&mut self, target_date: NaiveDate, is_valid: bool, position: Option<Pos2>) -> bool {
        let DragSessionState::Dragging(drag) = &mut self.state else {
            return false;
        };
        if drag.target_date == target_date && drag.is_valid_target == is_valid && drag.position == position {
            return false;
        }
        drag.target_date = target_date;
        drag.is_valid_target = is_valid;
        drag.position = position;
        true
    }

    /// Clear everything back to idle. Returns true if anything was active.
    fn reset_to_idle(&mut self) -> bool {
        // Scheduled work goes first so nothing can fire against cleared state.
        self.debounce.cancel();
        self.edge.cancel();
        self.pending_move = None;

        let was_active = !self.state.is_idle() || !self.proposal.is_empty();
        self.state = DragSessionState::Idle;
        self.proposal = Proposal::default();
        self.last_drop_cell = None;
        self.last_resize_date = None;
        was_active
    }

    fn process_drag_move(&mut self, pending: PendingMove) {
        let PendingMove { pointer, geometry } = pending;
        self.geometry = Some(Rc::clone(&geometry));

        let Some(row) = geometry.row_at(pointer) else {
            log::trace!("pointer {:?} is outside every week row", pointer);
            return;
        };
        let Some(bounds) = geometry.week_row_bounds(row) else {
            return;
        };
        let local_x = pointer.x - bounds.left();
        let Some(cell) = drop_start_cell_index(local_x, geometry.grab_offset().x, geometry.day_width()) else {
            return;
        };
        if self.last_drop_cell == Some((cell, row)) {
            return;
        }
        self.last_drop_cell = Some((cell, row));

        let Some(row_start) = geometry.week_dates(row).map(|dates| dates[0]) else {
            return;
        };
        let proposed_start = add_days(row_start, cell);
        self.propose_drop(proposed_start, Some((geometry.as_ref(), row, cell)), Some(pointer));
    }

    fn propose_drop(
        &mut self,
        proposed_start: NaiveDate,
        placement: Option<(&dyn GridGeometry, usize, i64)>,
        position: Option<Pos2>,
    ) {
        let Some(drag) = self.drag() else {
            return;
        };
        let duration_days = drag.event.span_days();
        let proposed_end = add_days(proposed_start, duration_days - 1);
        let target_date = add_days(
            drag.source_date,
            days_between(drag.event.first_day(), proposed_start),
        );
        let position = position.or(drag.position);

        let cells = placement
            .map(|(geometry, row, cell)| build_highlight_cells(geometry, row, cell, duration_days))
            .unwrap_or_default();
        let is_valid = self
            .drop_validator
            .as_ref()
            .map_or(true, |validate| validate(proposed_start, proposed_end));

        log::trace!(
            "drop proposal {}..{} valid={} cells={}",
            proposed_start,
            proposed_end,
            is_valid,
            cells.len()
        );

        let range = day_range(proposed_start, proposed_end);
        let mut changed = self.apply_drag_update(target_date, is_valid, position);
        changed |= self.proposal.range != range
            || self.proposal.is_valid != is_valid
            || self.proposal.highlighted_cells != cells;
        self.proposal = Proposal {
            range,
            is_valid,
            highlighted_cells: cells,
        };
        if changed {
            self.notifier.notify();
        }
    }

    fn propose_resize(&mut self, hovered: NaiveDate) {
        let Some(resize) = self.resize() else {
            return;
        };
        let edge = resize.edge;
        let first_day = resize.event.first_day();
        let last_day = resize.event.last_day();
        let (start_day, end_day) = match edge {
            ResizeEdge::Start => (hovered.min(last_day), last_day),
            ResizeEdge::End => (first_day, hovered.max(first_day)),
        };
        let start = with_date(&resize.original_start, start_day);
        let end = shift_days(&resize.original_end, days_between(last_day, end_day));

        let geometry = self.geometry.clone();
        let cells = geometry
            .as_deref()
            .and_then(|g| {
                let linear = g.linear_index_of(start_day)?;
                Some(build_highlight_cells(g, 0, linear, days_between(start_day, end_day) + 1))
            })
            .unwrap_or_default();
        let is_valid = end > start
            && self
                .resize_validator
                .as_ref()
                .map_or(true, |validate| validate(start_day, end_day, edge));

        log::trace!("resize proposal {}..{} valid={}", start_day, end_day, is_valid);
        self.update_resize(start, end, is_valid, cells);
    }
}

impl Default for DragSession {
    fn default() -> Self {
        Self::new(InteractionSettings::default())
    }
}

impl fmt::Debug for DragSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DragSession")
            .field("state", &self.state)
            .field("proposal", &self.proposal)
            .field("edge", &self.edge)
            .field("debounce", &self.debounce)
            .field("notifier", &self.notifier)
            .finish_non_exhaustive()
    }
}

fn local_midnight(date: NaiveDate) -> Option<DateTime<Local>> {
    resolve_local(&Local, date.and_time(NaiveTime::MIN))
}

fn day_range(start: NaiveDate, end: NaiveDate) -> Option<ProposedRange> {
    Some(ProposedRange {
        start: local_midnight(start)?,
        end: local_midnight(end)?,
    })
}
