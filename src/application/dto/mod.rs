// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are UI-friendly representations
// - Vocabulary tags travel as their display labels
// - Inbound DTOs convert into domain drafts; unknown tags become field errors

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{
    CensorRating, DomainError, FieldError, FilterCriteria, Genre, Language, Movie, MovieDraft,
    MovieField, PosterImage, Principal, ValidationErrors, FILTER_RATING_CEIL,
    FILTER_RATING_FLOOR,
};
use crate::db::DatabaseStats;
use crate::services::{FilterState, ListingState};

/// Poster shown when an entry's poster cannot be used for link previews
pub const PLACEHOLDER_POSTER: &str = "/placeholder-poster.jpg";

const META_REVIEW_EXCERPT_CHARS: usize = 150;

fn labels<T: ToString>(tags: &BTreeSet<T>) -> Vec<String> {
    tags.iter().map(ToString::to_string).collect()
}

fn format_timestamp(dt: &chrono::DateTime<chrono::Utc>) -> String {
    dt.to_rfc3339()
}

/// One decimal, e.g. "4.0"
pub fn rating_label(rating: f64) -> String {
    format!("{:.1}", rating)
}

// ============================================================================
// MOVIE DTOs
// ============================================================================

/// Listing card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieCardDto {
    pub id: String,
    pub title: String,
    pub poster: String,
    pub rating: f64,
    pub rating_label: String,
    pub genres: Vec<String>,
    pub languages: Vec<String>,
    pub censor: String,
    pub created_at: String,
}

impl From<&Movie> for MovieCardDto {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id.to_string(),
            title: movie.title.clone(),
            poster: movie.poster.to_string(),
            rating: movie.rating,
            rating_label: rating_label(movie.rating),
            genres: labels(&movie.genres),
            languages: labels(&movie.languages),
            censor: movie.censor.to_string(),
            created_at: format_timestamp(&movie.created_at),
        }
    }
}

impl From<Movie> for MovieCardDto {
    fn from(movie: Movie) -> Self {
        Self::from(&movie)
    }
}

/// Detail page, including the head metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDetailDto {
    pub id: String,
    pub title: String,
    pub poster: String,
    pub rating: f64,
    pub rating_label: String,
    pub genres: Vec<String>,
    pub languages: Vec<String>,
    pub censor: String,
    pub review: String,
    pub created_at: String,
    pub updated_at: String,
    pub page_title: String,
    pub meta_description: String,
    pub og_description: String,
    pub og_image: String,
}

impl From<Movie> for MovieDetailDto {
    fn from(movie: Movie) -> Self {
        let page_title = format!("{} - CineCritic Review", movie.title);
        let og_description = format!(
            "Read our review of {}. Rating: {}/5",
            movie.title, movie.rating
        );
        let excerpt: String = movie.review.chars().take(META_REVIEW_EXCERPT_CHARS).collect();
        let meta_description = format!("{}. {}...", og_description, excerpt);

        let og_image = if movie.poster.as_str().trim().is_empty() {
            PLACEHOLDER_POSTER.to_string()
        } else {
            movie.poster.to_string()
        };

        Self {
            id: movie.id.to_string(),
            rating_label: rating_label(movie.rating),
            genres: labels(&movie.genres),
            languages: labels(&movie.languages),
            censor: movie.censor.to_string(),
            created_at: format_timestamp(&movie.created_at),
            updated_at: format_timestamp(&movie.updated_at),
            poster: movie.poster.to_string(),
            rating: movie.rating,
            title: movie.title,
            review: movie.review,
            page_title,
            meta_description,
            og_description,
            og_image,
        }
    }
}

/// Admin add/edit form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MovieFormDto {
    pub title: String,
    pub genres: Vec<String>,
    pub languages: Vec<String>,
    pub censor: String,
    pub rating: f64,
    pub poster: Option<String>,
    pub review: String,
}

fn parse_tags<T>(raw: &[String], field: MovieField, errors: &mut ValidationErrors) -> BTreeSet<T>
where
    T: FromStr<Err = DomainError> + Ord,
{
    let mut tags = BTreeSet::new();
    for value in raw {
        match value.parse::<T>() {
            Ok(tag) => {
                tags.insert(tag);
            }
            Err(e) => errors.push(field, e.to_string()),
        }
    }
    tags
}

impl MovieFormDto {
    /// Parse the form into a draft. Only tag parsing happens here; the
    /// draft is validated by the write path.
    pub fn into_draft(self) -> Result<MovieDraft, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let genres = parse_tags::<Genre>(&self.genres, MovieField::Genres, &mut errors);
        let languages = parse_tags::<Language>(&self.languages, MovieField::Languages, &mut errors);

        let censor = if self.censor.trim().is_empty() {
            CensorRating::default()
        } else {
            match self.censor.parse::<CensorRating>() {
                Ok(censor) => censor,
                Err(e) => {
                    errors.push(MovieField::Censor, e.to_string());
                    CensorRating::default()
                }
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(MovieDraft {
            title: self.title,
            genres,
            languages,
            censor,
            rating: self.rating,
            poster: self
                .poster
                .filter(|p| !p.trim().is_empty())
                .map(PosterImage::new),
            review: self.review,
        })
    }
}

/// Prefill for the edit form
impl From<Movie> for MovieFormDto {
    fn from(movie: Movie) -> Self {
        Self {
            genres: labels(&movie.genres),
            languages: labels(&movie.languages),
            censor: movie.censor.to_string(),
            rating: movie.rating,
            poster: Some(movie.poster.to_string()),
            title: movie.title,
            review: movie.review,
        }
    }
}

// ============================================================================
// LISTING DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterDto {
    #[serde(default)]
    pub search_text: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    pub min_rating: f64,
    pub max_rating: f64,
    #[serde(default)]
    pub censor_ratings: Vec<String>,
}

impl Default for FilterDto {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            genres: Vec::new(),
            languages: Vec::new(),
            min_rating: FILTER_RATING_FLOOR,
            max_rating: FILTER_RATING_CEIL,
            censor_ratings: Vec::new(),
        }
    }
}

impl TryFrom<FilterDto> for FilterState {
    type Error = DomainError;

    fn try_from(dto: FilterDto) -> Result<Self, Self::Error> {
        fn parse_all<T: FromStr<Err = DomainError> + Ord>(
            raw: &[String],
        ) -> Result<BTreeSet<T>, DomainError> {
            raw.iter().map(|value| value.parse()).collect()
        }

        Ok(FilterState {
            search_text: dto.search_text,
            criteria: FilterCriteria {
                genres: parse_all(&dto.genres)?,
                languages: parse_all(&dto.languages)?,
                min_rating: dto.min_rating,
                max_rating: dto.max_rating,
                censor_ratings: parse_all(&dto.censor_ratings)?,
            },
        })
    }
}

impl From<FilterState> for FilterDto {
    fn from(state: FilterState) -> Self {
        Self {
            genres: labels(&state.criteria.genres),
            languages: labels(&state.criteria.languages),
            min_rating: state.criteria.min_rating,
            max_rating: state.criteria.max_rating,
            censor_ratings: labels(&state.criteria.censor_ratings),
            search_text: state.search_text,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingDto {
    /// loading | failed | empty_catalog | no_matches | results
    pub state: String,
    pub message: Option<String>,
    pub movies: Vec<MovieCardDto>,
}

impl From<ListingState> for ListingDto {
    fn from(listing: ListingState) -> Self {
        let message = listing.message().map(str::to_string);
        let (state, movies) = match listing {
            ListingState::Loading => ("loading", Vec::new()),
            ListingState::Failed(_) => ("failed", Vec::new()),
            ListingState::EmptyCatalog => ("empty_catalog", Vec::new()),
            ListingState::NoMatches => ("no_matches", Vec::new()),
            ListingState::Results(movies) => (
                "results",
                movies.iter().map(MovieCardDto::from).collect(),
            ),
        };

        Self {
            state: state.to_string(),
            message,
            movies,
        }
    }
}

// ============================================================================
// MAINTENANCE DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseHealthDto {
    pub integrity_ok: bool,
    pub integrity_error: Option<String>,
    pub size_bytes: i64,
    pub page_count: i64,
    pub page_size: i64,
    pub movie_count: i64,
    pub admin_count: i64,
}

impl DatabaseHealthDto {
    pub fn new(stats: DatabaseStats, integrity_error: Option<String>) -> Self {
        Self {
            integrity_ok: integrity_error.is_none(),
            integrity_error,
            size_bytes: stats.size_bytes,
            page_count: stats.page_count,
            page_size: stats.page_size,
            movie_count: stats.movie_count,
            admin_count: stats.admin_count,
        }
    }
}

// ============================================================================
// SESSION / ERROR DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionDto {
    pub uid: String,
    pub email: String,
}

impl From<Principal> for SessionDto {
    fn from(principal: Principal) -> Self {
        Self {
            uid: principal.uid,
            email: principal.email,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldErrorDto {
    pub field: String,
    pub reason: String,
}

impl From<&FieldError> for FieldErrorDto {
    fn from(error: &FieldError) -> Self {
        Self {
            field: error.field.as_str().to_string(),
            reason: error.reason.clone(),
        }
    }
}
