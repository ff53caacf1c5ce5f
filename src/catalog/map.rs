use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

use crate::config::{TmdbConfig, BACKDROP_SIZE, POSTER_SIZE, PROFILE_SIZE};
use crate::models::{
    CastMember, CrewMember, Genre, Movie, MovieDetails, ProductionCompany, ProductionCountry,
    SearchResult, SpokenLanguage, Video,
};

const NO_OVERVIEW: &str = "No overview available";
const CAST_LIMIT: usize = 10;
const CREW_JOBS: [&str; 3] = ["Director", "Producer", "Writer"];
const TRAILER_SITE: &str = "YouTube";
const TRAILER_TYPE: &str = "Trailer";

#[derive(Debug, Deserialize)]
pub(super) struct PageResponse {
    #[serde(default)]
    results: Vec<RawMovie>,
    page: i64,
    total_pages: i64,
    total_results: i64,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawMovie {
    id: i64,
    title: String,
    original_title: Option<String>,
    overview: Option<String>,
    release_date: Option<String>,
    genre_ids: Option<Vec<i64>>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    vote_average: Option<f64>,
    vote_count: Option<i64>,
    popularity: Option<f64>,
    adult: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawDetails {
    #[serde(flatten)]
    movie: RawMovie,
    runtime: Option<i64>,
    budget: Option<i64>,
    revenue: Option<i64>,
    genres: Option<Vec<Genre>>,
    production_companies: Option<Vec<ProductionCompany>>,
    production_countries: Option<Vec<ProductionCountry>>,
    spoken_languages: Option<Vec<SpokenLanguage>>,
    status: Option<String>,
    tagline: Option<String>,
    homepage: Option<String>,
    imdb_id: Option<String>,
    credits: Option<RawCredits>,
    videos: Option<RawVideos>,
}

#[derive(Debug, Default, Deserialize)]
struct RawCredits {
    #[serde(default)]
    cast: Vec<RawPerson>,
    #[serde(default)]
    crew: Vec<RawPerson>,
}

#[derive(Debug, Deserialize)]
struct RawPerson {
    id: i64,
    name: String,
    character: Option<String>,
    job: Option<String>,
    profile_path: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawVideos {
    #[serde(default)]
    results: Vec<RawVideo>,
}

#[derive(Debug, Deserialize)]
struct RawVideo {
    id: String,
    key: String,
    name: String,
    #[serde(rename = "type")]
    video_type: String,
    site: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct GenreList {
    pub(super) genres: Vec<Genre>,
}

pub(super) fn transform_page(config: &TmdbConfig, page: PageResponse) -> SearchResult {
    SearchResult {
        movies: page
            .results
            .into_iter()
            .map(|raw| transform_movie(config, raw))
            .collect(),
        total_pages: page.total_pages,
        total_results: page.total_results,
        current_page: page.page,
    }
}

fn transform_movie(config: &TmdbConfig, raw: RawMovie) -> Movie {
    let year = raw.release_date.as_deref().and_then(release_year);
    // List endpoints deliver genre ids only; names come from the genre list.
    let genre = match raw.genre_ids {
        Some(ids) => ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(", "),
        None => "Unknown".to_string(),
    };
    let overview = raw
        .overview
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| NO_OVERVIEW.to_string());
    let poster_path = config.image_url(raw.poster_path.as_deref(), POSTER_SIZE);
    let backdrop_path = config.image_url(raw.backdrop_path.as_deref(), BACKDROP_SIZE);
    let original_title = raw
        .original_title
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| raw.title.clone());

    Movie {
        id: raw.id,
        title: raw.title,
        year,
        genre,
        overview,
        poster_path,
        backdrop_path,
        rating: raw.vote_average.unwrap_or(0.0),
        vote_count: raw.vote_count.unwrap_or(0),
        popularity: raw.popularity.unwrap_or(0.0),
        release_date: raw.release_date.unwrap_or_default(),
        original_title,
        adult: raw.adult.unwrap_or(false),
    }
}

pub(super) fn transform_details(config: &TmdbConfig, raw: RawDetails) -> MovieDetails {
    let credits = raw.credits.unwrap_or_default();
    let cast = credits
        .cast
        .into_iter()
        .take(CAST_LIMIT)
        .map(|person| CastMember {
            id: person.id,
            name: person.name,
            character: person.character.unwrap_or_default(),
            profile_path: config.image_url(person.profile_path.as_deref(), PROFILE_SIZE),
        })
        .collect();
    let crew = credits
        .crew
        .into_iter()
        .filter(|person| {
            person
                .job
                .as_deref()
                .is_some_and(|job| CREW_JOBS.contains(&job))
        })
        .map(|person| CrewMember {
            id: person.id,
            name: person.name,
            job: person.job.unwrap_or_default(),
            profile_path: config.image_url(person.profile_path.as_deref(), PROFILE_SIZE),
        })
        .collect();
    let videos = raw
        .videos
        .unwrap_or_default()
        .results
        .into_iter()
        .filter(|video| video.site == TRAILER_SITE && video.video_type == TRAILER_TYPE)
        .map(|video| Video {
            id: video.id,
            key: video.key,
            name: video.name,
            video_type: video.video_type,
            site: video.site,
        })
        .collect();

    MovieDetails {
        movie: transform_movie(config, raw.movie),
        runtime: raw.runtime.unwrap_or(0),
        budget: raw.budget.unwrap_or(0),
        revenue: raw.revenue.unwrap_or(0),
        genres: raw.genres.unwrap_or_default(),
        production_companies: raw.production_companies.unwrap_or_default(),
        production_countries: raw.production_countries.unwrap_or_default(),
        spoken_languages: raw.spoken_languages.unwrap_or_default(),
        status: raw
            .status
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "Unknown".to_string()),
        tagline: raw.tagline.unwrap_or_default(),
        homepage: raw.homepage.unwrap_or_default(),
        imdb_id: raw.imdb_id.unwrap_or_default(),
        cast,
        crew,
        videos,
    }
}

fn release_year(date: &str) -> Option<i32> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .map(|d| d.year())
        .or_else(|| date.split('-').next().and_then(|y| y.parse().ok()))
}
