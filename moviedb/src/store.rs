//! The view store and its middleware
//!
//! The store itself is `tui_dispatch::EffectStoreWithMiddleware` driving
//! [`reducer`]. Middleware sees each action before and after the reducer
//! runs, but not the effects it declared.

use tui_dispatch::{Action as _, EffectStoreWithMiddleware, Middleware};

use crate::action::Action;
use crate::effect::Effect;
use crate::reducer::reducer;
use crate::state::ViewState;

pub use tui_dispatch::NoopMiddleware;

/// Holds the `ViewState` and routes every action through the reducer
pub type ViewStore<M = NoopMiddleware> = EffectStoreWithMiddleware<ViewState, Action, Effect, M>;

/// Build a store around `state` with the given middleware.
pub fn view_store<M: Middleware<Action>>(state: ViewState, middleware: M) -> ViewStore<M> {
    EffectStoreWithMiddleware::new(state, reducer, middleware)
}

/// Logs every action through `tracing`
#[derive(Debug, Clone, Default)]
pub struct TracingMiddleware {
    /// Also log ticks (noisy)
    pub include_ticks: bool,
}

impl Middleware<Action> for TracingMiddleware {
    fn before(&mut self, action: &Action) {
        if matches!(action, Action::Tick) && !self.include_ticks {
            return;
        }
        tracing::debug!(action = %action.summary(), "Dispatching action");
    }

    fn after(&mut self, action: &Action, state_changed: bool) {
        if matches!(action, Action::Tick) && !self.include_ticks {
            return;
        }
        tracing::debug!(
            action = %action.name(),
            state_changed = state_changed,
            "Action processed"
        );
    }
}

/// Records action names; used by tests to observe dispatch order
#[derive(Debug, Clone, Default)]
pub struct RecordingMiddleware {
    pub seen: Vec<(&'static str, bool)>,
}

impl Middleware<Action> for RecordingMiddleware {
    fn before(&mut self, _action: &Action) {}

    fn after(&mut self, action: &Action, state_changed: bool) {
        self.seen.push((action.name(), state_changed));
    }
}
