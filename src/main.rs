use anyhow::Result;
use dotenvy::dotenv;
use std::env;
use std::sync::Arc;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use cinedeck::catalog::TmdbClient;
use cinedeck::store::MovieStore;

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let loaded = dotenv();
    init_tracing();
    match loaded {
        Ok(path) => info!("Loaded environment from {:?}", path),
        Err(e) => debug!("No .env file loaded ({}) - relying on environment", e),
    }

    let client = Arc::new(TmdbClient::from_env()?);
    let configured = client.is_configured();
    if !configured {
        warn!("TMDB_API_KEY not set or placeholder - browsing built-in sample data");
    }

    let mut store = MovieStore::new(client, configured);
    match env::args().nth(1) {
        Some(query) => {
            info!("Searching for '{}'", query);
            store.search(&query, 1).await;
        }
        None => {
            info!("Fetching popular movies");
            store.popular(1).await;
        }
    }

    if let Some(err) = store.error() {
        warn!("{}", err);
    }
    for movie in store.movies() {
        println!(
            "{:>9}  {:<44} {:>7}  {:.1}",
            movie.id,
            movie.title,
            movie.year_label(),
            movie.rating
        );
    }
    info!(
        "{} results (page {}/{}{})",
        store.movies().len(),
        store.current_page(),
        store.total_pages(),
        if store.has_more() { ", more available" } else { "" }
    );

    Ok(())
}
