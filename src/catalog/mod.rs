use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Genre, MovieDetails, SearchResult};

mod client;
mod map;

pub use client::TmdbClient;

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Everything the stores need from the remote catalog. Implemented by
/// [`TmdbClient`] and by fakes in tests.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// `query` must be non-empty after trimming; `page >= 1`.
    async fn search(&self, query: &str, page: i64) -> Result<SearchResult>;
    async fn details(&self, movie_id: i64) -> Result<MovieDetails>;
    async fn popular(&self, page: i64) -> Result<SearchResult>;
    async fn top_rated(&self, page: i64) -> Result<SearchResult>;
    async fn upcoming(&self, page: i64) -> Result<SearchResult>;
    async fn now_playing(&self, page: i64) -> Result<SearchResult>;
    async fn by_genre(&self, genre_id: i64, page: i64) -> Result<SearchResult>;
    async fn genres(&self) -> Result<Vec<Genre>>;
}

/// Final failure classes surfaced by the client after its internal retry
/// policy has run. An unconfigured credential is a mode switch handled by the
/// stores, not an error value.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Request timeout while calling {path}. Please check your internet connection.")]
    Timeout { path: String },

    #[error("Rate limited while calling {path} and the retry budget is exhausted.")]
    RateLimitExhausted { path: String },

    #[error("Invalid API key while calling {path}. Please check your TMDB API key configuration.")]
    InvalidCredential { path: String },

    #[error("Resource not found at {path}.")]
    NotFound { path: String },

    #[error("HTTP error {status} when calling {path}.")]
    Http { status: u16, path: String },

    #[error("Network unreachable while calling {path}: {source}")]
    NetworkUnreachable {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Malformed response from {path}: {source}")]
    MalformedResponse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
