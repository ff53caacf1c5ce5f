use serde::{Deserialize, Serialize};

/// Canonical list-view movie shape used everywhere in the app.
///
/// `id` is the sole identity key: favorites membership and list positions key
/// on it, never on content equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    /// Release year; `None` renders as "Unknown".
    pub year: Option<i32>,
    pub genre: String,
    pub overview: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub rating: f64,
    pub vote_count: i64,
    pub popularity: f64,
    pub release_date: String,
    pub original_title: String,
    pub adult: bool,
}

impl Movie {
    pub fn year_label(&self) -> String {
        self.year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDetails {
    #[serde(flatten)]
    pub movie: Movie,
    pub runtime: i64,
    pub budget: i64,
    pub revenue: i64,
    pub genres: Vec<Genre>,
    pub production_companies: Vec<ProductionCompany>,
    pub production_countries: Vec<ProductionCountry>,
    pub spoken_languages: Vec<SpokenLanguage>,
    pub status: String,
    pub tagline: String,
    pub homepage: String,
    pub imdb_id: String,
    pub cast: Vec<CastMember>,
    pub crew: Vec<CrewMember>,
    pub videos: Vec<Video>,
}

/// A list item promoted to the details shape; details-only fields are
/// defaulted. Used when the catalog is unconfigured and no fetch happens.
impl From<Movie> for MovieDetails {
    fn from(movie: Movie) -> Self {
        Self {
            movie,
            runtime: 0,
            budget: 0,
            revenue: 0,
            genres: Vec::new(),
            production_companies: Vec::new(),
            production_countries: Vec::new(),
            spoken_languages: Vec::new(),
            status: "Unknown".to_string(),
            tagline: String::new(),
            homepage: String::new(),
            imdb_id: String::new(),
            cast: Vec::new(),
            crew: Vec::new(),
            videos: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionCompany {
    pub id: i64,
    pub name: String,
    pub logo_path: Option<String>,
    pub origin_country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionCountry {
    pub iso_3166_1: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpokenLanguage {
    pub english_name: String,
    pub iso_639_1: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastMember {
    pub id: i64,
    pub name: String,
    pub character: String,
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewMember {
    pub id: i64,
    pub name: String,
    pub job: String,
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub key: String,
    pub name: String,
    #[serde(rename = "type")]
    pub video_type: String,
    pub site: String,
}

/// One page of results for one query, as reported by the catalog.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub movies: Vec<Movie>,
    pub total_pages: i64,
    pub total_results: i64,
    pub current_page: i64,
}
