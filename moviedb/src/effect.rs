//! Effects - side effects declared by the reducer
//!
//! Effects are returned from the reducer inside a
//! `tui_dispatch::DispatchResult` and handled by the controller.
//! This keeps the reducer pure while making async operations explicit.

use moviedb_api::Endpoint;

use crate::state::{Category, RequestToken};

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch a list and report it back for `category`
    FetchList {
        category: Category,
        request: RequestToken,
        endpoint: Endpoint,
    },
}
