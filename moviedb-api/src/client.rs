//! `TmdbClient` - TMDB list client.

use reqwest::Client;
use tracing::instrument;
use url::Url;

use crate::endpoint::{Endpoint, DEFAULT_LANGUAGE};
use crate::error::FetchError;
use crate::source::MovieSource;
use crate::types::{ErrorEnvelope, MovieListResponse, MovieSummary};

/// Default base URL for TMDB API v3.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// TMDB API client.
///
/// Every call issues a fresh GET: there is no cache, no retry and no rate
/// limiting.
#[derive(Debug, Clone)]
pub struct TmdbClient {
    http_client: Client,
    base_url: Url,
    api_key: String,
    language: String,
}

/// Builder for `TmdbClient`.
#[derive(Debug, Default)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
    language: Option<String>,
}

impl TmdbClientBuilder {
    /// Overrides the base URL (for wiremock in tests).
    ///
    /// A missing trailing slash is added so endpoint paths join below it.
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API key. Not validated: an absent key is sent empty and
    /// TMDB rejects the request.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the response language (default `en-US`).
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Fails if the default base URL cannot be parsed or the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn build(self) -> Result<TmdbClient, FetchError> {
        let mut base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http_client = Client::builder()
            .user_agent(concat!("moviedb/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::Network)?;

        Ok(TmdbClient {
            http_client,
            base_url,
            api_key: self.api_key.unwrap_or_default(),
            language: self
                .language
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    pub fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::default()
    }

    /// Base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Full URL for an endpoint, API key and language included.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidUrl`] if the path cannot be joined.
    pub fn endpoint_url(&self, endpoint: &Endpoint) -> Result<Url, FetchError> {
        Ok(endpoint.url(&self.base_url, &self.api_key, &self.language)?)
    }

    /// Issues one GET against a fully formed URL and returns its `results`.
    ///
    /// Non-2xx responses are reported as [`FetchError::Upstream`], using the
    /// TMDB `status_message` when the body carries one.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Network`] if the request or body read fails,
    /// [`FetchError::Upstream`] for non-2xx statuses and
    /// [`FetchError::ResponseParse`] if the body has no `results` array.
    #[instrument(skip_all, fields(path = %url.path()))]
    pub async fn fetch_url(&self, url: Url) -> Result<Vec<MovieSummary>, FetchError> {
        // url carries the api key in its query string; only the path is logged
        tracing::debug!("TMDB list request");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(FetchError::Network)?;

        let status = response.status();
        let body = response.text().await.map_err(FetchError::Network)?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ErrorEnvelope>(&body) {
                Ok(envelope) => envelope.status_message,
                Err(_) => body,
            };
            return Err(FetchError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: MovieListResponse =
            serde_json::from_str(&body).map_err(FetchError::ResponseParse)?;
        tracing::debug!(count = parsed.results.len(), "TMDB list response");
        Ok(parsed.results)
    }
}

impl MovieSource for TmdbClient {
    async fn fetch_list(&self, endpoint: &Endpoint) -> Result<Vec<MovieSummary>, FetchError> {
        let url = self.endpoint_url(endpoint)?;
        self.fetch_url(url).await
    }
}
