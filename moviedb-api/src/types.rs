//! Wire types for TMDB list responses

use serde::{Deserialize, Serialize};

/// Image CDN prefix for `poster_path` values.
pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// One entry of a movie list.
///
/// Fields are read optimistically: only `id` is required, everything else
/// falls back to a default when TMDB omits it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
}

impl MovieSummary {
    /// Full poster image URL, if the movie has a poster.
    pub fn poster_url(&self) -> Option<String> {
        self.poster_path
            .as_deref()
            .map(|path| format!("{POSTER_BASE_URL}{path}"))
    }
}

/// Envelope shared by the list and search endpoints.
#[derive(Debug, Deserialize)]
pub struct MovieListResponse {
    #[serde(default)]
    pub page: Option<u32>,
    pub results: Vec<MovieSummary>,
}

/// Error body TMDB sends with non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub status_code: i64,
    pub status_message: String,
}
