//! Application state - single source of truth
//!
//! Components receive `&ViewState` as props and only the reducer mutates it.
//! Lists are replaced wholesale when a fetch completes; a `MovieSummary` is
//! never edited in place.

use std::ops::{Index, IndexMut};

use moviedb_api::{Endpoint, MovieSummary};

/// Spinner animation interval
pub const LOADING_ANIM_TICK_MS: u64 = 120;

/// The four display modes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Category {
    #[default]
    Popular,
    TopRated,
    Upcoming,
    SearchResults,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Popular,
        Category::TopRated,
        Category::Upcoming,
        Category::SearchResults,
    ];

    /// Categories fetched once at startup
    pub const PRELOADED: [Category; 3] = [Category::Popular, Category::TopRated, Category::Upcoming];

    pub fn label(self) -> &'static str {
        match self {
            Category::Popular => "Popular",
            Category::TopRated => "Top Rated",
            Category::Upcoming => "Upcoming",
            Category::SearchResults => "Search Results",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Category::Popular => 0,
            Category::TopRated => 1,
            Category::Upcoming => 2,
            Category::SearchResults => 3,
        }
    }

    /// Listing endpoint for the preloaded categories. Search results have no
    /// fixed endpoint; they depend on the query.
    pub fn listing_endpoint(self) -> Option<Endpoint> {
        match self {
            Category::Popular => Some(Endpoint::Popular),
            Category::TopRated => Some(Endpoint::TopRated),
            Category::Upcoming => Some(Endpoint::Upcoming),
            Category::SearchResults => None,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Status of a fetch.
///
/// `ViewState::status` holds one of these for the whole app: it follows
/// whichever fetch transitioned last, not an aggregate of all of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RequestStatus {
    #[default]
    Initial,
    InProgress,
    Success,
    Failure,
}

impl RequestStatus {
    pub fn label(self) -> &'static str {
        match self {
            RequestStatus::Initial => "idle",
            RequestStatus::InProgress => "loading",
            RequestStatus::Success => "ok",
            RequestStatus::Failure => "failed",
        }
    }

    /// True once a fetch has completed one way or the other
    pub fn is_settled(self) -> bool {
        matches!(self, RequestStatus::Success | RequestStatus::Failure)
    }
}

/// Sequence number handed to each fetch when it is issued
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestToken(pub u64);

/// What to do with a completion that is not the latest request for its slot
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StalePolicy {
    /// Apply completions in arrival order; the last to arrive wins.
    #[default]
    ArrivalOrder,
    /// Drop completions superseded by a newer request for the same category.
    LatestOnly,
}

/// One value per category
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PerCategory<T>([T; 4]);

impl<T> PerCategory<T> {
    pub fn iter(&self) -> impl Iterator<Item = (Category, &T)> {
        Category::ALL.into_iter().zip(self.0.iter())
    }
}

impl<T> Index<Category> for PerCategory<T> {
    type Output = T;

    fn index(&self, category: Category) -> &T {
        &self.0[category.index()]
    }
}

impl<T> IndexMut<Category> for PerCategory<T> {
    fn index_mut(&mut self, category: Category) -> &mut T {
        &mut self.0[category.index()]
    }
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, Default)]
pub struct ViewState {
    pub popular: Vec<MovieSummary>,
    pub top_rated: Vec<MovieSummary>,
    pub upcoming: Vec<MovieSummary>,
    pub search_results: Vec<MovieSummary>,

    /// Shared status of the most recently transitioned fetch
    pub status: RequestStatus,

    /// Status per category, kept alongside the shared flag
    pub category_status: PerCategory<RequestStatus>,

    pub active_category: Category,
    pub search_query: String,

    /// Latest request issued per category
    pub latest_request: PerCategory<Option<RequestToken>>,
    pub(crate) next_request: u64,

    pub stale_policy: StalePolicy,

    /// Search input has focus
    pub search_mode: bool,

    /// Grid cursor within the active list
    pub selected: usize,

    /// Animation frame counter (for loading spinner)
    pub tick_count: u32,
}

impl ViewState {
    pub fn new(stale_policy: StalePolicy) -> Self {
        Self {
            stale_policy,
            ..Self::default()
        }
    }

    pub fn list(&self, category: Category) -> &[MovieSummary] {
        match category {
            Category::Popular => &self.popular,
            Category::TopRated => &self.top_rated,
            Category::Upcoming => &self.upcoming,
            Category::SearchResults => &self.search_results,
        }
    }

    pub fn list_mut(&mut self, category: Category) -> &mut Vec<MovieSummary> {
        match category {
            Category::Popular => &mut self.popular,
            Category::TopRated => &mut self.top_rated,
            Category::Upcoming => &mut self.upcoming,
            Category::SearchResults => &mut self.search_results,
        }
    }

    /// The list the grid shows
    pub fn active_list(&self) -> &[MovieSummary] {
        self.list(self.active_category)
    }

    /// Allocate the next request token and record it as the latest for
    /// `category`.
    pub fn issue_request(&mut self, category: Category) -> RequestToken {
        self.next_request += 1;
        let token = RequestToken(self.next_request);
        self.latest_request[category] = Some(token);
        token
    }

    /// Whether a completion for `request` should be applied under the
    /// current stale policy
    pub fn accepts(&self, category: Category, request: RequestToken) -> bool {
        match self.stale_policy {
            StalePolicy::ArrivalOrder => true,
            StalePolicy::LatestOnly => self.latest_request[category] == Some(request),
        }
    }
}
