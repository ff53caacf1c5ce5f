use once_cell::sync::Lazy;

use crate::models::Movie;

/// Source of the fallback dataset shown when the catalog is unconfigured or
/// unreachable. A trait so tests can substitute deterministic fixtures and so
/// both fallback paths share one implementation.
pub trait SampleSource: Send + Sync {
    fn all(&self) -> Vec<Movie>;

    /// Case-insensitive substring match against title, genre, or year text.
    fn filtered(&self, query: &str) -> Vec<Movie> {
        let needle = query.to_lowercase();
        self.all()
            .into_iter()
            .filter(|movie| {
                movie.title.to_lowercase().contains(&needle)
                    || movie.genre.to_lowercase().contains(&needle)
                    || movie.year_label().contains(query)
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinSamples;

impl SampleSource for BuiltinSamples {
    fn all(&self) -> Vec<Movie> {
        SAMPLE_MOVIES.clone()
    }
}

#[allow(clippy::too_many_arguments)]
fn sample(
    id: i64,
    title: &str,
    year: i32,
    genre: &str,
    overview: &str,
    rating: f64,
    vote_count: i64,
    popularity: f64,
    release_date: &str,
) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        year: Some(year),
        genre: genre.to_string(),
        overview: overview.to_string(),
        poster_path: None,
        backdrop_path: None,
        rating,
        vote_count,
        popularity,
        release_date: release_date.to_string(),
        original_title: title.to_string(),
        adult: false,
    }
}

static SAMPLE_MOVIES: Lazy<Vec<Movie>> = Lazy::new(|| {
    vec![
        sample(
            1,
            "The Matrix",
            1999,
            "Sci-Fi",
            "A computer programmer discovers that reality as he knows it is a simulation controlled by machines.",
            8.7,
            15000,
            85.5,
            "1999-03-31",
        ),
        sample(
            2,
            "Inception",
            2010,
            "Sci-Fi",
            "A thief who enters the dreams of others to steal secrets from their subconscious.",
            8.8,
            20000,
            90.2,
            "2010-07-16",
        ),
        sample(
            3,
            "The Dark Knight",
            2008,
            "Action",
            "Batman faces the Joker in a battle for Gotham City's soul.",
            9.0,
            25000,
            95.8,
            "2008-07-18",
        ),
        sample(
            4,
            "Pulp Fiction",
            1994,
            "Crime",
            "The lives of two mob hitmen, a boxer, and a pair of diner bandits intertwine.",
            8.9,
            18000,
            88.4,
            "1994-10-14",
        ),
        sample(
            5,
            "Forrest Gump",
            1994,
            "Drama",
            "A man with low IQ experiences and influences several historical events.",
            8.8,
            22000,
            87.6,
            "1994-07-06",
        ),
        sample(
            6,
            "Avatar",
            2009,
            "Sci-Fi",
            "A paraplegic Marine dispatched to the moon Pandora joins a mission to mine a precious mineral.",
            7.8,
            16000,
            82.3,
            "2009-12-18",
        ),
    ]
});
