//! Edge-of-grid page navigation while a drag or resize is held near an edge.

use std::time::{Duration, Instant};

use crate::models::interaction::NavigationEdge;
use crate::models::settings::{EdgeNavigationMode, InteractionSettings};

use super::timer::DelayedTask;

/// Host callbacks that page the grid.
pub trait PageNavigator {
    fn navigate_previous(&mut self);
    fn navigate_next(&mut self);

    fn navigate(&mut self, edge: NavigationEdge) {
        match edge {
            NavigationEdge::Leading => self.navigate_previous(),
            NavigationEdge::Trailing => self.navigate_next(),
        }
    }
}

/// Pair of closures implementing [`PageNavigator`].
pub struct NavigationCallbacks<P, N>
where
    P: FnMut(),
    N: FnMut(),
{
    pub previous: P,
    pub next: N,
}

impl<P: FnMut(), N: FnMut()> PageNavigator for NavigationCallbacks<P, N> {
    fn navigate_previous(&mut self) {
        (self.previous)()
    }

    fn navigate_next(&mut self) {
        (self.next)()
    }
}

#[derive(Debug)]
pub struct EdgeNavigator {
    mode: EdgeNavigationMode,
    delay: Duration,
    timer: DelayedTask,
    near_edge: bool,
    edge: Option<NavigationEdge>,
}

impl EdgeNavigator {
    pub fn new(mode: EdgeNavigationMode, delay: Duration) -> Self {
        Self {
            mode,
            delay,
            timer: DelayedTask::new(),
            near_edge: false,
            edge: None,
        }
    }

    pub fn from_settings(settings: &InteractionSettings) -> Self {
        Self::new(settings.edge_mode, settings.edge_delay())
    }

    pub fn mode(&self) -> EdgeNavigationMode {
        self.mode
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_near_edge(&self) -> bool {
        self.near_edge
    }

    pub fn is_pending(&self) -> bool {
        self.timer.is_pending()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// Record a proximity report from the host.
    ///
    /// Leaving the zone always cancels. Inside the zone a timer is armed only
    /// when none is pending; moving to the other edge restarts it.
    pub fn handle_proximity_at(&mut self, near_edge: bool, edge: NavigationEdge, now: Instant) {
        if !near_edge {
            self.timer.cancel();
            self.near_edge = false;
            self.edge = None;
            return;
        }

        if self.edge != Some(edge) && self.timer.cancel() {
            log::trace!("edge changed to {:?}, restarting navigation timer", edge);
        }
        self.near_edge = true;
        self.edge = Some(edge);

        if self.timer.schedule_if_idle(now, self.delay) {
            log::trace!("edge navigation armed for {:?} in {:?}", edge, self.delay);
        }
    }

    /// Fire the timer if due.
    ///
    /// The pending timer is cleared before anything else. When the session
    /// ended while the timer was in flight nothing happens. Otherwise the
    /// navigator is invoked and the proximity flag is reset, so the next
    /// proximity report re-arms from scratch against the new page.
    pub fn poll_at<N: PageNavigator + ?Sized>(
        &mut self,
        now: Instant,
        session_active: bool,
        navigator: Option<&mut N>,
    ) -> Option<NavigationEdge> {
        self.timer.take_due(now)?;

        if !session_active {
            log::debug!("edge navigation timer fired after the session ended; ignoring");
            return None;
        }

        let edge = self.edge;
        if let (Some(edge), Some(navigator)) = (edge, navigator) {
            log::info!("edge navigation towards {:?} ({:?} mode)", edge, self.mode);
            navigator.navigate(edge);
        }
        self.near_edge = false;
        edge
    }

    /// Drop any pending navigation and forget the proximity state.
    pub fn cancel(&mut self) {
        self.timer.cancel();
        self.near_edge = false;
        self.edge = None;
    }
}

impl Default for EdgeNavigator {
    fn default() -> Self {
        Self::from_settings(&InteractionSettings::default())
    }
}
