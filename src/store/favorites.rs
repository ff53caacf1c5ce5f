use std::sync::Arc;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::warn;

use crate::models::Movie;
use crate::storage::KeyValueStore;

pub const STORAGE_KEY: &str = "favorite-movies";

#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedFavorites {
    favorites: Vec<Movie>,
}

/// Insertion-ordered set of favorited movies, keyed by id, mirrored to the
/// key-value store on every mutation.
pub struct FavoriteStore {
    favorites: Vec<Movie>,
    storage: Arc<dyn KeyValueStore>,
    last_write: Option<JoinHandle<()>>,
}

impl FavoriteStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            favorites: Vec::new(),
            storage,
            last_write: None,
        }
    }

    /// Hydrates the set from storage; call once before first use.
    pub async fn load(&mut self) -> anyhow::Result<()> {
        if let Some(raw) = self.storage.get(STORAGE_KEY).await? {
            let data: PersistedFavorites =
                serde_json::from_str(&raw).context("Failed to decode persisted favorites")?;
            self.favorites = data.favorites;
        }
        Ok(())
    }

    pub fn add(&mut self, movie: Movie) {
        if self.contains(movie.id) {
            return;
        }
        self.favorites.push(movie);
        self.persist();
    }

    pub fn remove(&mut self, movie_id: i64) {
        let before = self.favorites.len();
        self.favorites.retain(|m| m.id != movie_id);
        if self.favorites.len() != before {
            self.persist();
        }
    }

    /// Removes if present, adds otherwise; exactly one of the two happens.
    pub fn toggle(&mut self, movie: Movie) {
        if self.contains(movie.id) {
            self.remove(movie.id);
        } else {
            self.add(movie);
        }
    }

    pub fn clear(&mut self) {
        self.favorites.clear();
        self.persist();
    }

    pub fn count(&self) -> usize {
        self.favorites.len()
    }

    pub fn contains(&self, movie_id: i64) -> bool {
        self.favorites.iter().any(|m| m.id == movie_id)
    }

    pub fn all(&self) -> &[Movie] {
        &self.favorites
    }

    pub fn by_genre(&self, genre: &str) -> Vec<Movie> {
        let needle = genre.to_lowercase();
        self.favorites
            .iter()
            .filter(|m| m.genre.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    pub fn by_year(&self, year: i32) -> Vec<Movie> {
        self.favorites
            .iter()
            .filter(|m| m.year == Some(year))
            .cloned()
            .collect()
    }

    /// Last `limit` additions, most recent first.
    pub fn recent(&self, limit: usize) -> Vec<Movie> {
        let start = self.favorites.len().saturating_sub(limit);
        let mut recent: Vec<Movie> = self.favorites[start..].to_vec();
        recent.reverse();
        recent
    }

    /// Waits for the most recent write-through to land. Mutations themselves
    /// never block on durability.
    pub async fn flush(&mut self) {
        if let Some(handle) = self.last_write.take() {
            if let Err(e) = handle.await {
                warn!("Favorites persistence task panicked: {}", e);
            }
        }
    }

    // Whole-set write-through, fire and forget; failures are logged, never
    // surfaced to the mutating caller. Each write waits on its predecessor so
    // snapshots land in mutation order.
    fn persist(&mut self) {
        let snapshot = PersistedFavorites {
            favorites: self.favorites.clone(),
        };
        let storage = Arc::clone(&self.storage);
        let previous = self.last_write.take();
        self.last_write = Some(tokio::spawn(async move {
            if let Some(previous) = previous {
                let _ = previous.await;
            }
            let payload = match serde_json::to_string(&snapshot) {
                Ok(p) => p,
                Err(e) => {
                    warn!("Failed to encode favorites: {}", e);
                    return;
                }
            };
            if let Err(e) = storage.set(STORAGE_KEY, &payload).await {
                warn!("Failed to persist favorites: {}", e);
            }
        }));
    }
}
