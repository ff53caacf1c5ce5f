use std::sync::Arc;
use std::time::Duration;

use tracing::error;

use crate::catalog::{CatalogApi, CatalogError};
use crate::models::{Movie, MovieDetails, SearchResult};
use crate::sample::{BuiltinSamples, SampleSource};

pub const POPULAR_LABEL: &str = "Popular Movies";
pub const TOP_RATED_LABEL: &str = "Top Rated Movies";

const MOCK_DELAY: Duration = Duration::from_secs(1);
const MOCK_BROWSE_LIMIT: usize = 3;

/// Search/browse session state. Owns the accumulated result list, the
/// pagination cursor, and the loading/error flags; every fetch path ends in a
/// usable state, never stuck loading.
///
/// Explicitly constructed and passed by handle; the `&mut self` receivers
/// serialize mutation through the single owner.
pub struct MovieStore {
    catalog: Arc<dyn CatalogApi>,
    samples: Arc<dyn SampleSource>,
    configured: bool,
    mock_delay: Duration,

    movies: Vec<Movie>,
    search_query: String,
    selected: Option<MovieDetails>,
    loading: bool,
    error: Option<String>,
    current_page: i64,
    total_pages: i64,
    has_more: bool,
}

impl MovieStore {
    pub fn new(catalog: Arc<dyn CatalogApi>, configured: bool) -> Self {
        Self {
            catalog,
            samples: Arc::new(BuiltinSamples),
            configured,
            mock_delay: MOCK_DELAY,
            movies: Vec::new(),
            search_query: String::new(),
            selected: None,
            loading: false,
            error: None,
            current_page: 1,
            total_pages: 1,
            has_more: false,
        }
    }

    pub fn with_samples(mut self, samples: Arc<dyn SampleSource>) -> Self {
        self.samples = samples;
        self
    }

    /// Shortens the simulated latency of the unconfigured mode. Tests only.
    pub fn with_mock_delay(mut self, delay: Duration) -> Self {
        self.mock_delay = delay;
        self
    }

    pub async fn search(&mut self, query: &str, page: i64) {
        if page == 1 {
            self.search_query = query.to_string();
            self.movies.clear();
            self.current_page = 1;
        }
        self.loading = true;
        self.error = None;

        if !self.configured {
            let sampled = self.samples.filtered(query);
            tokio::time::sleep(self.mock_delay).await;
            self.apply_mock(sampled, page);
            return;
        }

        match self.catalog.search(query, page).await {
            Ok(result) => self.apply_result(result, page),
            Err(err) => {
                error!("Error searching movies: {}", err);
                self.loading = false;
                self.error = Some(format!("Failed to search movies: {err}"));
                // Never leave the first page empty after a failure.
                if page == 1 {
                    self.movies = self.samples.filtered(query);
                }
            }
        }
    }

    pub async fn load_more(&mut self) {
        if !self.has_more || self.loading || self.search_query.is_empty() {
            return;
        }
        let query = self.search_query.clone();
        let next = self.current_page + 1;
        self.search(&query, next).await;
    }

    pub fn clear(&mut self) {
        self.movies.clear();
        self.search_query.clear();
        self.current_page = 1;
        self.total_pages = 1;
        self.has_more = false;
        self.error = None;
    }

    /// Full details for one movie. Unconfigured mode promotes the already
    /// loaded list item instead of calling out; a miss returns `None`.
    pub async fn details(&mut self, movie_id: i64) -> Option<MovieDetails> {
        self.loading = true;
        self.error = None;

        if !self.configured {
            let found = self
                .movies
                .iter()
                .find(|m| m.id == movie_id)
                .cloned()
                .map(MovieDetails::from);
            self.loading = false;
            return found;
        }

        match self.catalog.details(movie_id).await {
            Ok(details) => {
                self.selected = Some(details.clone());
                self.loading = false;
                Some(details)
            }
            Err(err) => {
                error!("Error fetching movie details: {}", err);
                self.loading = false;
                self.error = Some(format!("Failed to fetch movie details: {err}"));
                None
            }
        }
    }

    pub async fn popular(&mut self, page: i64) {
        self.begin_browse(page);

        if !self.configured {
            self.apply_mock_browse(POPULAR_LABEL, page);
            return;
        }

        let outcome = self.catalog.popular(page).await;
        self.search_query = POPULAR_LABEL.to_string();
        match outcome {
            Ok(result) => self.apply_result(result, page),
            Err(err) => self.fail_browse("Failed to fetch popular movies", page, err),
        }
    }

    pub async fn top_rated(&mut self, page: i64) {
        self.begin_browse(page);

        if !self.configured {
            self.apply_mock_browse(TOP_RATED_LABEL, page);
            return;
        }

        let outcome = self.catalog.top_rated(page).await;
        self.search_query = TOP_RATED_LABEL.to_string();
        match outcome {
            Ok(result) => self.apply_result(result, page),
            Err(err) => self.fail_browse("Failed to fetch top rated movies", page, err),
        }
    }

    /// Re-issues whichever fetch produced the current label, at page 1.
    pub async fn refresh(&mut self) {
        let query = self.search_query.clone();
        if query == POPULAR_LABEL {
            self.popular(1).await;
        } else if query == TOP_RATED_LABEL {
            self.top_rated(1).await;
        } else if !query.is_empty() {
            self.search(&query, 1).await;
        }
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn movie_by_id(&self, id: i64) -> Option<&Movie> {
        self.movies.iter().find(|m| m.id == id)
    }

    pub fn query(&self) -> &str {
        &self.search_query
    }

    pub fn selected(&self) -> Option<&MovieDetails> {
        self.selected.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn current_page(&self) -> i64 {
        self.current_page
    }

    pub fn total_pages(&self) -> i64 {
        self.total_pages
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    fn begin_browse(&mut self, page: i64) {
        if page == 1 {
            self.movies.clear();
            self.current_page = 1;
        }
        self.loading = true;
        self.error = None;
    }

    // Page 1 replaces the accumulated list, later pages append in order.
    fn apply_result(&mut self, result: SearchResult, page: i64) {
        if page == 1 {
            self.movies = result.movies;
        } else {
            self.movies.extend(result.movies);
        }
        self.loading = false;
        self.current_page = result.current_page;
        self.total_pages = result.total_pages;
        self.has_more = result.current_page < result.total_pages;
    }

    fn apply_mock(&mut self, sampled: Vec<Movie>, page: i64) {
        if page == 1 {
            self.movies = sampled;
        } else {
            self.movies.extend(sampled);
        }
        self.loading = false;
        self.current_page = page;
        self.total_pages = 1;
        self.has_more = false;
    }

    fn apply_mock_browse(&mut self, label: &str, page: i64) {
        let sampled: Vec<Movie> = self
            .samples
            .all()
            .into_iter()
            .take(MOCK_BROWSE_LIMIT)
            .collect();
        self.search_query = label.to_string();
        self.apply_mock(sampled, page);
    }

    fn fail_browse(&mut self, context: &str, page: i64, err: CatalogError) {
        error!("{}: {}", context, err);
        let sampled: Vec<Movie> = self
            .samples
            .all()
            .into_iter()
            .take(MOCK_BROWSE_LIMIT)
            .collect();
        if page == 1 {
            self.movies = sampled;
        } else {
            self.movies.extend(sampled);
        }
        self.loading = false;
        self.error = Some(format!("{context}: {err}"));
        self.current_page = page;
        self.total_pages = 1;
        self.has_more = false;
    }
}
