use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use rand::Rng;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::{endpoints, TmdbConfig};
use crate::models::{Genre, MovieDetails, SearchResult};

use super::map::{transform_details, transform_page, GenreList, PageResponse, RawDetails};
use super::{CatalogApi, CatalogError, Result};

#[derive(Debug, Clone)]
pub struct TmdbClient {
    client: Client,
    config: TmdbConfig,
}

impl TmdbClient {
    pub fn new(config: TmdbConfig) -> anyhow::Result<Self> {
        let user_agent = format!("cinedeck/{}", env!("CARGO_PKG_VERSION"));
        let client = Client::builder()
            .timeout(config.request.timeout)
            .user_agent(user_agent)
            .build()
            .context("Failed to build TMDB HTTP client")?;
        Ok(Self { client, config })
    }

    pub fn from_env() -> anyhow::Result<Self> {
        Self::new(TmdbConfig::from_env())
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    pub fn config(&self) -> &TmdbConfig {
        &self.config
    }

    fn url(&self, path: &str, params: &[(&str, String)]) -> String {
        let mut url = format!("{}{}?api_key={}", self.config.base_url, path, self.config.api_key);
        for (key, value) in params {
            url.push('&');
            url.push_str(key);
            url.push('=');
            url.push_str(value);
        }
        url
    }

    async fn get_page(&self, path: &str, params: &[(&str, String)]) -> Result<SearchResult> {
        let url = self.url(path, params);
        let data: PageResponse = self.get_json(path, &url).await?;
        Ok(transform_page(&self.config, data))
    }

    /// Bounded retry loop over one GET. Transient classes (429 before the
    /// budget runs out, 5xx, network failures) back off and retry; everything
    /// else maps straight to a typed error naming the endpoint path.
    async fn get_json<T: DeserializeOwned>(&self, path: &str, url: &str) -> Result<T> {
        let budget = self.config.request.retry_attempts;
        let base_delay = self.config.request.retry_delay;
        let mut attempts_used = 0u32;

        loop {
            let wait = match self.client.get(url).send().await {
                Ok(res) => {
                    let status = res.status();
                    if status.is_success() {
                        let bytes = res.bytes().await.map_err(|source| {
                            CatalogError::NetworkUnreachable {
                                path: path.to_string(),
                                source,
                            }
                        })?;
                        return serde_json::from_slice(&bytes).map_err(|source| {
                            CatalogError::MalformedResponse {
                                path: path.to_string(),
                                source,
                            }
                        });
                    }
                    match status {
                        StatusCode::TOO_MANY_REQUESTS if attempts_used < budget => {
                            retry_after(&res)
                                .unwrap_or_else(|| backoff_delay(base_delay, attempts_used))
                        }
                        StatusCode::TOO_MANY_REQUESTS => {
                            return Err(CatalogError::RateLimitExhausted {
                                path: path.to_string(),
                            })
                        }
                        StatusCode::UNAUTHORIZED => {
                            return Err(CatalogError::InvalidCredential {
                                path: path.to_string(),
                            })
                        }
                        StatusCode::NOT_FOUND => {
                            return Err(CatalogError::NotFound {
                                path: path.to_string(),
                            })
                        }
                        s if s.is_server_error() && attempts_used < budget => {
                            backoff_delay(base_delay, attempts_used)
                        }
                        s => {
                            return Err(CatalogError::Http {
                                status: s.as_u16(),
                                path: path.to_string(),
                            })
                        }
                    }
                }
                Err(err) if err.is_timeout() => {
                    return Err(CatalogError::Timeout {
                        path: path.to_string(),
                    })
                }
                Err(err) => {
                    if attempts_used < budget {
                        debug!("transport error on {}: {}", path, err);
                        backoff_delay(base_delay, attempts_used)
                    } else {
                        return Err(CatalogError::NetworkUnreachable {
                            path: path.to_string(),
                            source: err,
                        });
                    }
                }
            };

            attempts_used += 1;
            warn!(
                "retrying {} in {:?} (attempt {}/{})",
                path, wait, attempts_used, budget
            );
            tokio::time::sleep(wait).await;
        }
    }
}

#[async_trait]
impl CatalogApi for TmdbClient {
    async fn search(&self, query: &str, page: i64) -> Result<SearchResult> {
        self.get_page(
            endpoints::SEARCH,
            &[
                ("query", urlencoding::encode(query).into_owned()),
                ("page", page.to_string()),
            ],
        )
        .await
    }

    async fn details(&self, movie_id: i64) -> Result<MovieDetails> {
        let path = format!("{}/{}", endpoints::DETAILS, movie_id);
        let url = self.url(
            &path,
            &[("append_to_response", "credits,videos".to_string())],
        );
        let data: RawDetails = self.get_json(&path, &url).await?;
        Ok(transform_details(&self.config, data))
    }

    async fn popular(&self, page: i64) -> Result<SearchResult> {
        self.get_page(endpoints::POPULAR, &[("page", page.to_string())])
            .await
    }

    async fn top_rated(&self, page: i64) -> Result<SearchResult> {
        self.get_page(endpoints::TOP_RATED, &[("page", page.to_string())])
            .await
    }

    async fn upcoming(&self, page: i64) -> Result<SearchResult> {
        self.get_page(endpoints::UPCOMING, &[("page", page.to_string())])
            .await
    }

    async fn now_playing(&self, page: i64) -> Result<SearchResult> {
        self.get_page(endpoints::NOW_PLAYING, &[("page", page.to_string())])
            .await
    }

    async fn by_genre(&self, genre_id: i64, page: i64) -> Result<SearchResult> {
        self.get_page(
            endpoints::DISCOVER,
            &[
                ("with_genres", genre_id.to_string()),
                ("page", page.to_string()),
            ],
        )
        .await
    }

    async fn genres(&self) -> Result<Vec<Genre>> {
        let url = self.url(endpoints::GENRES, &[]);
        let data: GenreList = self.get_json(endpoints::GENRES, &url).await?;
        Ok(data.genres)
    }
}

/// `base * 2^attempts_used` plus 0-200ms of jitter.
fn backoff_delay(base: Duration, attempts_used: u32) -> Duration {
    let jitter = rand::thread_rng().gen_range(0..200);
    base * 2u32.pow(attempts_used) + Duration::from_millis(jitter)
}

fn retry_after(res: &Response) -> Option<Duration> {
    res.headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_secs)
}
