//! What the content area shows for a given state

use moviedb_api::MovieSummary;

use crate::state::{RequestStatus, ViewState};

pub const ERROR_MESSAGE: &str = "Error occurred. Please try again.";
pub const EMPTY_MESSAGE: &str = "No movies found";
pub const LOADING_MESSAGE: &str = "Loading movies...";

/// Content area mode.
///
/// The shared status is advisory: a non-empty active list is always shown,
/// even while another fetch is loading or after an unrelated fetch failed.
/// Only an empty list falls back to the status.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContentView<'a> {
    Movies(&'a [MovieSummary]),
    Loading,
    Error,
    Empty,
    Idle,
}

impl<'a> ContentView<'a> {
    pub fn of(state: &'a ViewState) -> Self {
        let list = state.active_list();
        if !list.is_empty() {
            return ContentView::Movies(list);
        }
        match state.status {
            RequestStatus::InProgress => ContentView::Loading,
            RequestStatus::Failure => ContentView::Error,
            RequestStatus::Success => ContentView::Empty,
            RequestStatus::Initial => ContentView::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Category;

    fn movie(id: u64) -> MovieSummary {
        MovieSummary {
            id,
            title: format!("Movie {id}"),
            poster_path: None,
            vote_average: 6.0,
        }
    }

    #[test]
    fn test_non_empty_list_wins_over_failure() {
        let state = ViewState {
            popular: vec![movie(1)],
            status: RequestStatus::Failure,
            ..Default::default()
        };

        assert_eq!(ContentView::of(&state), ContentView::Movies(&state.popular));
    }

    #[test]
    fn test_empty_list_follows_status() {
        let mut state = ViewState::default();
        assert_eq!(ContentView::of(&state), ContentView::Idle);

        state.status = RequestStatus::InProgress;
        assert_eq!(ContentView::of(&state), ContentView::Loading);

        state.status = RequestStatus::Failure;
        assert_eq!(ContentView::of(&state), ContentView::Error);

        state.status = RequestStatus::Success;
        assert_eq!(ContentView::of(&state), ContentView::Empty);
    }

    #[test]
    fn test_uses_active_category() {
        let state = ViewState {
            popular: vec![movie(1)],
            search_results: vec![movie(2), movie(3)],
            active_category: Category::SearchResults,
            status: RequestStatus::Success,
            ..Default::default()
        };

        match ContentView::of(&state) {
            ContentView::Movies(list) => assert_eq!(list.len(), 2),
            other => panic!("expected movies, got {other:?}"),
        }
    }
}
