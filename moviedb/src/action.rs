//! Actions
//!
//! Naming convention:
//! - Prefix groups related actions: `SearchQueryChange`, `SearchSubmit`
//! - "Did" marks the result of an async fetch
//! - Verbs at end: Change, Submit, Select, Focus

use moviedb_api::MovieSummary;

use crate::state::{Category, RequestToken};

/// Application actions
///
/// Categories are inferred from the prefix; fetch completions are grouped
/// under `async_result`, so `is_async_result()` marks a finished fetch.
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq)]
#[action(infer_categories)]
pub enum Action {
    /// Kick off the three startup fetches
    Init,

    // ===== Search =====
    /// Replace the search input text (no fetch)
    #[action(category = "search")]
    SearchQueryChange(String),

    /// Fetch results for the current query
    SearchSubmit,

    /// Give the search input keyboard focus
    SearchFocus,

    /// Return focus to the grid
    SearchBlur,

    // ===== Category =====
    /// Switch the displayed list (no fetch)
    CategorySelect(Category),

    // ===== Fetch results =====
    /// Result: a list fetch succeeded
    #[action(category = "async_result")]
    ListDidLoad {
        category: Category,
        request: RequestToken,
        movies: Vec<MovieSummary>,
    },

    /// Result: a list fetch failed
    #[action(category = "async_result")]
    ListDidError {
        category: Category,
        request: RequestToken,
        error: String,
    },

    // ===== UI =====
    /// Move the grid cursor to an index in the active list
    UiSelect(usize),

    /// Periodic tick for loading animation
    Tick,

    /// Exit the application
    Quit,
}

impl Action {
    /// Concise description for the action log.
    /// Shows counts instead of full movie lists.
    pub fn summary(&self) -> String {
        match self {
            Action::ListDidLoad {
                category,
                request,
                movies,
            } => format!(
                "ListDidLoad {{ {}, #{}, {} movies }}",
                category.label(),
                request.0,
                movies.len()
            ),
            Action::ListDidError {
                category,
                request,
                error,
            } => {
                let msg = if error.chars().count() > 40 {
                    format!("{}...", error.chars().take(37).collect::<String>())
                } else {
                    error.clone()
                };
                format!(
                    "ListDidError {{ {}, #{}, {:?} }}",
                    category.label(),
                    request.0,
                    msg
                )
            }
            _ => format!("{:?}", self),
        }
    }
}
