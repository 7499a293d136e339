//! `MovieSource` trait definition.

use crate::endpoint::Endpoint;
use crate::error::FetchError;
use crate::types::MovieSummary;

/// Something that can produce a movie list for an endpoint.
///
/// Abstracts the HTTP client for substitution in tests. `trait_variant`
/// generates the `Send`-bound `MovieSource` used when fetches are spawned
/// onto the runtime.
#[trait_variant::make(MovieSource: Send)]
pub trait LocalMovieSource {
    /// Fetches one list.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] describing the transport, decoding, or
    /// upstream failure.
    async fn fetch_list(&self, endpoint: &Endpoint) -> Result<Vec<MovieSummary>, FetchError>;
}
