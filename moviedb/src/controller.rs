//! Headless view-state controller
//!
//! Owns the store, the movie source and the fetch tasks. Dispatching an
//! action runs the reducer and turns every declared effect into a spawned
//! fetch; finished fetches come back as completion actions that the owner
//! applies with [`ViewController::apply_next`]. The terminal runtime drives
//! the same controller from its event loop; tests drive it directly.

use std::sync::Arc;

use moviedb_api::MovieSource;
use tokio::sync::mpsc;
use tui_dispatch::{Middleware, TaskKey, TaskManager};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{Category, RequestToken, ViewState};
use crate::store::{view_store, NoopMiddleware, ViewStore};

pub struct ViewController<S, M: Middleware<Action> = NoopMiddleware> {
    store: ViewStore<M>,
    source: Arc<S>,
    tasks: TaskManager<Action>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    in_flight: usize,
}

impl<S> ViewController<S, NoopMiddleware>
where
    S: MovieSource + Send + Sync + 'static,
{
    pub fn new(state: ViewState, source: S) -> Self {
        Self::with_store(view_store(state, NoopMiddleware), source)
    }
}

impl<S, M> ViewController<S, M>
where
    S: MovieSource + Send + Sync + 'static,
    M: Middleware<Action>,
{
    pub fn with_store(store: ViewStore<M>, source: S) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            store,
            source: Arc::new(source),
            tasks: TaskManager::new(action_tx.clone()),
            action_tx,
            action_rx,
            in_flight: 0,
        }
    }

    pub fn state(&self) -> &ViewState {
        self.store.state()
    }

    pub fn store(&self) -> &ViewStore<M> {
        &self.store
    }

    /// Number of fetches issued whose completion has not been applied yet
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Launch the popular, top rated and upcoming fetches. Call once.
    pub fn initialize(&mut self) -> bool {
        self.dispatch(Action::Init)
    }

    pub fn set_search_query(&mut self, text: impl Into<String>) -> bool {
        self.dispatch(Action::SearchQueryChange(text.into()))
    }

    pub fn submit_search(&mut self) -> bool {
        self.dispatch(Action::SearchSubmit)
    }

    pub fn set_active_category(&mut self, category: Category) -> bool {
        self.dispatch(Action::CategorySelect(category))
    }

    /// Run an action through the store and start any fetches it declares.
    ///
    /// Returns whether the state changed.
    pub fn dispatch(&mut self, action: Action) -> bool {
        if action.is_async_result() {
            self.in_flight = self.in_flight.saturating_sub(1);
        }
        let result = self.store.dispatch(action);
        for effect in result.effects {
            self.handle_effect(effect);
        }
        result.changed
    }

    /// Wait for the next queued action (usually a fetch completion).
    ///
    /// Never resolves to `None` while the controller is alive, since it
    /// holds a sender itself; check [`in_flight`](Self::in_flight) before
    /// awaiting when nothing may be pending.
    pub async fn next_completion(&mut self) -> Option<Action> {
        self.action_rx.recv().await
    }

    /// Receive one queued action and dispatch it. Returns whether the state
    /// changed.
    pub async fn apply_next(&mut self) -> bool {
        match self.next_completion().await {
            Some(action) => self.dispatch(action),
            None => false,
        }
    }

    /// Apply completions until no fetch is outstanding.
    ///
    /// Terminates even if a fetch panics: its task still reports a
    /// `ListDidError` on the way out.
    pub async fn settle(&mut self) {
        while self.in_flight > 0 {
            self.apply_next().await;
        }
    }

    /// Abort every outstanding fetch.
    pub fn shutdown(&mut self) {
        self.tasks.cancel_all();
        self.in_flight = 0;
    }

    fn handle_effect(&mut self, effect: Effect) {
        match effect {
            Effect::FetchList {
                category,
                request,
                endpoint,
            } => {
                let source = Arc::clone(&self.source);
                let guard = CompletionGuard::new(self.action_tx.clone(), category, request);
                self.in_flight += 1;
                self.tasks
                    .spawn(task_key(category, request), async move {
                        let action = match source.fetch_list(&endpoint).await {
                            Ok(movies) => Action::ListDidLoad {
                                category,
                                request,
                                movies,
                            },
                            Err(e) => {
                                tracing::warn!(
                                    category = category.label(),
                                    request = request.0,
                                    kind = e.kind(),
                                    error = %e,
                                    "fetch failed"
                                );
                                Action::ListDidError {
                                    category,
                                    request,
                                    error: e.to_string(),
                                }
                            }
                        };
                        guard.disarm();
                        action
                    });
            }
        }
    }
}

/// One key per request, so a newer fetch never cancels an older one.
fn task_key(category: Category, request: RequestToken) -> TaskKey {
    TaskKey::new(format!("{}#{}", category.label(), request.0))
}

/// Sends a `ListDidError` if a fetch task is dropped before producing its
/// completion (the fetch panicked or the task was aborted).
struct CompletionGuard {
    tx: mpsc::UnboundedSender<Action>,
    category: Category,
    request: RequestToken,
    armed: bool,
}

impl CompletionGuard {
    fn new(tx: mpsc::UnboundedSender<Action>, category: Category, request: RequestToken) -> Self {
        Self {
            tx,
            category,
            request,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        tracing::warn!(
            category = self.category.label(),
            request = self.request.0,
            "fetch ended without a result"
        );
        let _ = self.tx.send(Action::ListDidError {
            category: self.category,
            request: self.request,
            error: "fetch ended without a result".into(),
        });
    }
}
