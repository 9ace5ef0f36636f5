use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use crate::domain::entities::query::QueryState;
use crate::usecase::ports::api::ApiError;

/// Identifies one fetch cycle of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Generation counter shared by every fetch of one view. Only the newest
/// ticket may write to view state, and none may once the view is gone.
#[derive(Debug, Clone)]
pub struct FetchTracker {
    generation: Rc<Cell<u64>>,
    active: Rc<Cell<bool>>,
}

impl Default for FetchTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchTracker {
    pub fn new() -> Self {
        Self {
            generation: Rc::new(Cell::new(0)),
            active: Rc::new(Cell::new(true)),
        }
    }

    pub fn begin(&self) -> FetchTicket {
        let next = self.generation.get() + 1;
        self.generation.set(next);
        FetchTicket(next)
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.active.get() && self.generation.get() == ticket.0
    }

    /// View deactivated: every outstanding ticket becomes stale.
    pub fn cancel(&self) {
        self.active.set(false);
        self.generation.set(self.generation.get() + 1);
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Issues a ticket and marks `state` as loading. Stale data stays visible.
    pub fn start<T>(&self, state: &mut QueryState<T>) -> FetchTicket {
        let ticket = self.begin();
        state.begin();
        ticket
    }

    /// Awaits `future` and hands back its result only if `ticket` is still
    /// current once it resolves.
    pub async fn settle<T, F>(&self, ticket: FetchTicket, future: F) -> Option<Result<T, ApiError>>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        let result = future.await;
        if !self.is_current(ticket) {
            tracing::debug!(
                generation = ticket.generation(),
                active = self.is_active(),
                "view moved on, dropping response"
            );
            return None;
        }
        Some(result)
    }

    /// Writes `result` into `state` if `ticket` is still current. Returns
    /// whether it was applied.
    pub fn apply<T>(
        &self,
        ticket: FetchTicket,
        state: &mut QueryState<T>,
        result: Result<T, ApiError>,
    ) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(generation = ticket.generation(), "discarding stale response");
            return false;
        }
        if let Err(err) = &result {
            tracing::error!(generation = ticket.generation(), error = %err, "fetch failed");
        }
        state.resolve(result);
        true
    }
}
