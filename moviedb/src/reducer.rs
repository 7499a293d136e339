//! Reducer - pure function: (state, action) -> (changed, effects)
//!
//! - All state mutations happen here
//! - Async work is only declared, as `Effect`s, never performed

use moviedb_api::Endpoint;
use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{Category, RequestStatus, ViewState};

/// The reducer handles all state transitions
pub fn reducer(state: &mut ViewState, action: Action) -> DispatchResult<Effect> {
    match action {
        Action::Init => {
            let effects = Category::PRELOADED
                .into_iter()
                .filter_map(|category| {
                    let endpoint = category.listing_endpoint()?;
                    Some(start_fetch(state, category, endpoint))
                })
                .collect();
            DispatchResult::changed_with_many(effects)
        }

        // ===== Search actions =====
        Action::SearchQueryChange(query) => {
            if state.search_query == query {
                return DispatchResult::unchanged();
            }
            state.search_query = query;
            DispatchResult::changed()
        }

        Action::SearchSubmit => {
            if state.search_query.trim().is_empty() {
                return DispatchResult::unchanged();
            }
            // sent as typed; only blank input is rejected
            let endpoint = Endpoint::search(state.search_query.clone());
            let effect = start_fetch(state, Category::SearchResults, endpoint);
            DispatchResult::changed().with(effect)
        }

        Action::SearchFocus => {
            if state.search_mode {
                return DispatchResult::unchanged();
            }
            state.search_mode = true;
            DispatchResult::changed()
        }

        Action::SearchBlur => {
            if !state.search_mode {
                return DispatchResult::unchanged();
            }
            state.search_mode = false;
            DispatchResult::changed()
        }

        // ===== Category actions =====
        Action::CategorySelect(category) => {
            if state.active_category == category {
                return DispatchResult::unchanged();
            }
            state.active_category = category;
            state.selected = 0;
            DispatchResult::changed()
        }

        // ===== Fetch results =====
        Action::ListDidLoad {
            category,
            request,
            movies,
        } => {
            if !state.accepts(category, request) {
                tracing::debug!(?category, request = request.0, "dropping stale list");
                return DispatchResult::unchanged();
            }
            *state.list_mut(category) = movies;
            if category == state.active_category {
                state.selected = 0;
            }
            finish_fetch(state, category, RequestStatus::Success);
            DispatchResult::changed()
        }

        Action::ListDidError {
            category, request, ..
        } => {
            if !state.accepts(category, request) {
                tracing::debug!(?category, request = request.0, "dropping stale failure");
                return DispatchResult::unchanged();
            }
            finish_fetch(state, category, RequestStatus::Failure);
            DispatchResult::changed()
        }

        // ===== UI actions =====
        Action::UiSelect(index) => {
            let len = state.active_list().len();
            if len == 0 {
                return DispatchResult::unchanged();
            }
            let index = index.min(len - 1);
            if state.selected == index {
                return DispatchResult::unchanged();
            }
            state.selected = index;
            DispatchResult::changed()
        }

        // ===== Global actions =====
        Action::Tick => {
            state.tick_count = state.tick_count.wrapping_add(1);
            DispatchResult {
                // only re-render while loading (for spinner animation)
                changed: state.status == RequestStatus::InProgress,
                effects: vec![],
            }
        }

        Action::Quit => {
            // Quit is handled in the runtime loop, not here
            DispatchResult::unchanged()
        }
    }
}

fn start_fetch(state: &mut ViewState, category: Category, endpoint: Endpoint) -> Effect {
    let request = state.issue_request(category);
    state.status = RequestStatus::InProgress;
    state.category_status[category] = RequestStatus::InProgress;
    Effect::FetchList {
        category,
        request,
        endpoint,
    }
}

fn finish_fetch(state: &mut ViewState, category: Category, status: RequestStatus) {
    state.status = status;
    state.category_status[category] = status;
}
