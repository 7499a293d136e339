//! TMDB movie list client
//!
//! This crate covers the data side of moviedb: one HTTP GET per list,
//! JSON decoding of the `results` array, and a classified error for every
//! way that can go wrong.
//!
//! # Example
//!
//! ```ignore
//! use moviedb_api::{Endpoint, MovieSource, TmdbClient};
//!
//! let client = TmdbClient::builder().api_key("secret").build()?;
//! let movies = client.fetch_list(&Endpoint::Popular).await?;
//! for movie in &movies {
//!     println!("{} ({:.1})", movie.title, movie.vote_average);
//! }
//! ```

pub mod client;
pub mod endpoint;
pub mod error;
pub mod source;
pub mod types;

pub use client::{TmdbClient, TmdbClientBuilder, DEFAULT_BASE_URL};
pub use endpoint::{Endpoint, DEFAULT_LANGUAGE};
pub use error::FetchError;
pub use source::{LocalMovieSource, MovieSource};
pub use types::{ErrorEnvelope, MovieListResponse, MovieSummary, POSTER_BASE_URL};
