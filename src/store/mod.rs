mod favorites;
mod movies;
mod ui;

pub use favorites::{FavoriteStore, STORAGE_KEY};
pub use movies::{MovieStore, POPULAR_LABEL, TOP_RATED_LABEL};
pub use ui::{Theme, UiStore};
