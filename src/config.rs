use std::env;
use std::time::Duration;

pub const TMDB_BASE: &str = "https://api.themoviedb.org/3";
pub const IMAGE_BASE: &str = "https://image.tmdb.org/t/p";

/// Build-time default that means "no real credential was supplied".
pub const PLACEHOLDER_API_KEY: &str = "your_tmdb_api_key_here";

// Fixed CDN size tokens used by the transforms.
pub const POSTER_SIZE: &str = "w500";
pub const BACKDROP_SIZE: &str = "w1280";
pub const PROFILE_SIZE: &str = "w185";

pub mod endpoints {
    pub const SEARCH: &str = "/search/movie";
    pub const DETAILS: &str = "/movie";
    pub const POPULAR: &str = "/movie/popular";
    pub const TOP_RATED: &str = "/movie/top_rated";
    pub const UPCOMING: &str = "/movie/upcoming";
    pub const NOW_PLAYING: &str = "/movie/now_playing";
    pub const DISCOVER: &str = "/discover/movie";
    pub const GENRES: &str = "/genre/movie/list";
}

#[derive(Debug, Clone)]
pub struct TmdbConfig {
    pub api_key: String,
    pub base_url: String,
    pub image_base_url: String,
    pub request: RequestConfig,
}

/// Transport tuning, injectable so the retry budget and backoff are testable.
#[derive(Debug, Clone)]
pub struct RequestConfig {
    pub timeout: Duration,
    pub retry_attempts: u32,
    pub retry_delay: Duration,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            retry_attempts: 3,
            retry_delay: Duration::from_secs(1),
        }
    }
}

impl TmdbConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: TMDB_BASE.to_string(),
            image_base_url: IMAGE_BASE.to_string(),
            request: RequestConfig::default(),
        }
    }

    /// Reads `TMDB_API_KEY`; a missing variable leaves the config in
    /// unconfigured (sample data) mode rather than failing.
    pub fn from_env() -> Self {
        let api_key =
            env::var("TMDB_API_KEY").unwrap_or_else(|_| PLACEHOLDER_API_KEY.to_string());
        Self::new(api_key)
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && self.api_key != PLACEHOLDER_API_KEY
    }

    /// `{image_base}/{size}{path}`; pure, no I/O.
    pub fn image_url(&self, path: Option<&str>, size: &str) -> Option<String> {
        path.map(|p| format!("{}/{}{}", self.image_base_url, size, p))
    }
}
