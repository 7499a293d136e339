//! Command line and environment configuration

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use moviedb_api::{FetchError, TmdbClient, DEFAULT_BASE_URL, DEFAULT_LANGUAGE};
use url::Url;

use crate::state::{StalePolicy, LOADING_ANIM_TICK_MS};

/// Browse popular, top rated and upcoming movies from TMDB, or search by title
#[derive(Parser, Debug, Clone)]
#[command(name = "moviedb")]
#[command(about, version)]
pub struct Args {
    /// TMDB v3 API key
    #[arg(long, env = "TMDB_API_KEY", default_value = "", hide_env_values = true)]
    pub api_key: String,

    /// Base URL of the TMDB v3 API
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: Url,

    /// Language sent with every request
    #[arg(long, default_value = DEFAULT_LANGUAGE)]
    pub language: String,

    /// Drop search responses superseded by a newer search
    #[arg(long)]
    pub stale_guard: bool,

    /// Write logs to this file (the terminal UI owns stdout)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Spinner frame interval in milliseconds
    #[arg(long, default_value_t = LOADING_ANIM_TICK_MS)]
    pub tick_ms: u64,
}

impl Args {
    pub fn stale_policy(&self) -> StalePolicy {
        if self.stale_guard {
            StalePolicy::LatestOnly
        } else {
            StalePolicy::ArrivalOrder
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    pub fn client(&self) -> Result<TmdbClient, FetchError> {
        TmdbClient::builder()
            .base_url(self.base_url.clone())
            .api_key(self.api_key.clone())
            .language(self.language.clone())
            .build()
    }
}
