use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use cinedeck::catalog::{CatalogApi, CatalogError};
use cinedeck::models::{Genre, Movie, MovieDetails, SearchResult};
use cinedeck::storage::JsonFileStore;
use cinedeck::store::{FavoriteStore, MovieStore, POPULAR_LABEL};

#[derive(Default)]
struct FakeCatalog {
    calls: Mutex<Vec<&'static str>>,
    pages: Mutex<VecDeque<Result<SearchResult, CatalogError>>>,
    details: Mutex<VecDeque<Result<MovieDetails, CatalogError>>>,
}

impl FakeCatalog {
    fn push_page(&self, ids: &[i64], current_page: i64, total_pages: i64) {
        self.pages.lock().unwrap().push_back(Ok(SearchResult {
            movies: ids.iter().map(|&id| movie(id)).collect(),
            total_pages,
            total_results: total_pages * ids.len() as i64,
            current_page,
        }));
    }

    fn push_page_err(&self, err: CatalogError) {
        self.pages.lock().unwrap().push_back(Err(err));
    }

    fn push_details(&self, details: MovieDetails) {
        self.details.lock().unwrap().push_back(Ok(details));
    }

    fn push_details_err(&self, err: CatalogError) {
        self.details.lock().unwrap().push_back(Err(err));
    }

    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn next_page(&self, name: &'static str) -> Result<SearchResult, CatalogError> {
        self.calls.lock().unwrap().push(name);
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected catalog call: {name}"))
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn search(&self, _query: &str, _page: i64) -> Result<SearchResult, CatalogError> {
        self.next_page("search")
    }

    async fn details(&self, _movie_id: i64) -> Result<MovieDetails, CatalogError> {
        self.calls.lock().unwrap().push("details");
        self.details
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected catalog call: details")
    }

    async fn popular(&self, _page: i64) -> Result<SearchResult, CatalogError> {
        self.next_page("popular")
    }

    async fn top_rated(&self, _page: i64) -> Result<SearchResult, CatalogError> {
        self.next_page("top_rated")
    }

    async fn upcoming(&self, _page: i64) -> Result<SearchResult, CatalogError> {
        self.next_page("upcoming")
    }

    async fn now_playing(&self, _page: i64) -> Result<SearchResult, CatalogError> {
        self.next_page("now_playing")
    }

    async fn by_genre(&self, _genre_id: i64, _page: i64) -> Result<SearchResult, CatalogError> {
        self.next_page("by_genre")
    }

    async fn genres(&self) -> Result<Vec<Genre>, CatalogError> {
        Ok(Vec::new())
    }
}

fn movie(id: i64) -> Movie {
    Movie {
        id,
        title: format!("Movie {id}"),
        year: Some(2000),
        genre: "Drama".to_string(),
        overview: "An overview.".to_string(),
        poster_path: None,
        backdrop_path: None,
        rating: 7.0,
        vote_count: 100,
        popularity: 10.0,
        release_date: "2000-01-01".to_string(),
        original_title: format!("Movie {id}"),
        adult: false,
    }
}

fn configured_store(catalog: Arc<FakeCatalog>) -> MovieStore {
    MovieStore::new(catalog, true)
}

fn mock_store() -> MovieStore {
    MovieStore::new(Arc::new(FakeCatalog::default()), false)
        .with_mock_delay(Duration::from_millis(1))
}

fn ids(store: &MovieStore) -> Vec<i64> {
    store.movies().iter().map(|m| m.id).collect()
}

#[tokio::test]
async fn pages_accumulate_in_order_and_track_has_more() {
    let catalog = Arc::new(FakeCatalog::default());
    catalog.push_page(&[1, 2], 1, 3);
    catalog.push_page(&[3, 4], 2, 3);
    catalog.push_page(&[5], 3, 3);

    let mut store = configured_store(catalog.clone());
    store.search("batman", 1).await;
    assert_eq!(ids(&store), vec![1, 2]);
    assert!(store.has_more());

    store.load_more().await;
    assert_eq!(ids(&store), vec![1, 2, 3, 4]);
    assert_eq!(store.current_page(), 2);
    assert!(store.has_more());

    store.load_more().await;
    assert_eq!(ids(&store), vec![1, 2, 3, 4, 5]);
    assert_eq!(store.current_page(), 3);
    assert!(!store.has_more());
    assert!(store.error().is_none());
    assert!(!store.loading());

    // exhausted pagination makes load_more a no-op
    store.load_more().await;
    assert_eq!(catalog.calls(), vec!["search", "search", "search"]);
}

#[tokio::test]
async fn first_page_failure_keeps_a_non_empty_list_and_an_error() {
    let catalog = Arc::new(FakeCatalog::default());
    catalog.push_page_err(CatalogError::Http {
        status: 500,
        path: "/search/movie".to_string(),
    });

    let mut store = configured_store(catalog);
    store.search("Matrix", 1).await;

    let titles: Vec<&str> = store.movies().iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["The Matrix"]);
    assert!(store.error().unwrap().starts_with("Failed to search movies"));
    assert!(!store.loading());
}

#[tokio::test]
async fn later_page_failure_keeps_the_accumulated_list() {
    let catalog = Arc::new(FakeCatalog::default());
    catalog.push_page(&[1, 2], 1, 3);
    catalog.push_page_err(CatalogError::RateLimitExhausted {
        path: "/search/movie".to_string(),
    });

    let mut store = configured_store(catalog);
    store.search("batman", 1).await;
    store.load_more().await;

    assert_eq!(ids(&store), vec![1, 2]);
    assert!(store.error().is_some());
    assert!(!store.loading());
}

#[tokio::test]
async fn popular_failure_falls_back_to_three_samples() {
    let catalog = Arc::new(FakeCatalog::default());
    catalog.push_page_err(CatalogError::NotFound {
        path: "/movie/popular".to_string(),
    });

    let mut store = configured_store(catalog);
    store.popular(1).await;

    assert_eq!(store.movies().len(), 3);
    assert_eq!(store.query(), POPULAR_LABEL);
    assert!(store
        .error()
        .unwrap()
        .starts_with("Failed to fetch popular movies"));
    assert!(!store.has_more());
    assert_eq!(store.total_pages(), 1);
}

#[tokio::test]
async fn refresh_reissues_the_current_browse_mode_at_page_one() {
    let catalog = Arc::new(FakeCatalog::default());
    catalog.push_page(&[1, 2], 1, 5);
    catalog.push_page(&[5, 6], 1, 5);

    let mut store = configured_store(catalog.clone());
    store.popular(1).await;
    assert_eq!(ids(&store), vec![1, 2]);

    store.refresh().await;
    assert_eq!(ids(&store), vec![5, 6]);
    assert_eq!(store.query(), POPULAR_LABEL);
    assert_eq!(catalog.calls(), vec!["popular", "popular"]);
}

#[tokio::test]
async fn refresh_without_a_query_is_a_noop() {
    let catalog = Arc::new(FakeCatalog::default());
    let mut store = configured_store(catalog.clone());
    store.refresh().await;
    assert!(catalog.calls().is_empty());
}

#[tokio::test]
async fn details_success_stores_the_selection() {
    let catalog = Arc::new(FakeCatalog::default());
    catalog.push_details(MovieDetails::from(movie(7)));

    let mut store = configured_store(catalog);
    let details = store.details(7).await.expect("details");

    assert_eq!(details.movie.id, 7);
    assert_eq!(store.selected().unwrap().movie.id, 7);
    assert!(store.error().is_none());
    assert!(!store.loading());
}

#[tokio::test]
async fn details_failure_records_an_error_and_returns_none() {
    let catalog = Arc::new(FakeCatalog::default());
    catalog.push_details_err(CatalogError::NotFound {
        path: "/movie/999".to_string(),
    });

    let mut store = configured_store(catalog);
    let details = store.details(999).await;

    assert!(details.is_none());
    assert!(store
        .error()
        .unwrap()
        .starts_with("Failed to fetch movie details"));
    assert!(!store.loading());
}

#[tokio::test]
async fn unconfigured_search_filters_the_sample_dataset() {
    let mut store = mock_store();
    store.search("Matrix", 1).await;

    let titles: Vec<&str> = store.movies().iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["The Matrix"]);
    assert_eq!(store.query(), "Matrix");
    assert!(store.error().is_none());
    assert!(!store.has_more());
}

#[tokio::test]
async fn unconfigured_details_promotes_loaded_items_and_misses_return_none() {
    let mut store = mock_store();
    store.popular(1).await;
    assert_eq!(store.movies().len(), 3);

    let hit = store.details(1).await.expect("loaded item");
    assert_eq!(hit.movie.title, "The Matrix");
    assert_eq!(hit.runtime, 0);

    assert!(store.details(9999).await.is_none());
    assert!(!store.loading());
}

#[tokio::test]
async fn clear_resets_the_session() {
    let mut store = mock_store();
    store.search("Matrix", 1).await;
    assert!(!store.movies().is_empty());

    store.clear();
    assert!(store.movies().is_empty());
    assert_eq!(store.query(), "");
    assert!(store.error().is_none());
    assert!(!store.has_more());
    assert_eq!(store.current_page(), 1);
}

#[tokio::test]
async fn favorites_survive_a_restart_through_the_json_store() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(JsonFileStore::new(dir.path()));

    let mut favorites = FavoriteStore::new(storage.clone());
    favorites.toggle(movie(1));
    favorites.toggle(movie(2));
    favorites.toggle(movie(1));
    favorites.flush().await;

    let mut reloaded = FavoriteStore::new(storage);
    reloaded.load().await.unwrap();
    assert_eq!(reloaded.count(), 1);
    assert!(reloaded.contains(2));
    assert!(!reloaded.contains(1));
}
