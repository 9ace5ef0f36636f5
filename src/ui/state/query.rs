use std::future::Future;

use dioxus::prelude::*;

use crate::domain::entities::query::QueryState;
use crate::usecase::ports::api::ApiError;
use crate::usecase::services::fetch::FetchTracker;

/// A page-owned fetch slot: latest request wins, unmounting discards all.
pub struct QueryHandle<T: 'static> {
    pub state: Signal<QueryState<T>>,
    tracker: CopyValue<FetchTracker>,
}

impl<T: 'static> Clone for QueryHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for QueryHandle<T> {}

impl<T: 'static> QueryHandle<T> {
    pub fn run<F>(&self, future: F)
    where
        F: Future<Output = Result<T, ApiError>> + 'static,
    {
        let tracker = self.tracker.peek().clone();
        let mut state = self.state;
        let ticket = tracker.start(&mut *state.write());
        spawn(async move {
            if let Some(result) = tracker.settle(ticket, future).await {
                tracker.apply(ticket, &mut *state.write(), result);
            }
        });
    }

    /// Settles the state with an error that never reached the network.
    pub fn reject(&self, err: ApiError) {
        let tracker = self.tracker.peek().clone();
        let ticket = tracker.begin();
        let mut state = self.state;
        tracker.apply(ticket, &mut *state.write(), Err(err));
    }

    pub fn dismiss_error(&self) {
        let mut state = self.state;
        state.write().dismiss_error();
    }
}

impl<T: Clone + 'static> QueryHandle<T> {
    pub fn snapshot(&self) -> QueryState<T> {
        self.state.read().clone()
    }

    pub fn data(&self) -> Option<T> {
        self.state.read().data.clone()
    }
}

pub fn use_query<T: 'static>() -> QueryHandle<T> {
    let state = use_signal(QueryState::<T>::default);
    let shared = use_hook(FetchTracker::new);
    use_drop({
        let shared = shared.clone();
        move || shared.cancel()
    });
    let tracker = use_hook(|| CopyValue::new(shared));
    QueryHandle { state, tracker }
}
