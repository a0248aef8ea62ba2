use std::collections::BTreeSet;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::entity::{CensorRating, Genre, Language, Movie, MovieFields, PosterImage};
use crate::domain::{DomainError, DomainResult};

/// Lowest rating a stored entry may carry
pub const RATING_MIN: f64 = 1.0;

/// Highest rating a stored entry may carry
pub const RATING_MAX: f64 = 5.0;

/// Default inline poster limit (5 MiB)
pub const DEFAULT_MAX_POSTER_BYTES: usize = 5 * 1024 * 1024;

/// Validates all Movie invariants.
/// Checked by the store before anything is persisted.
pub fn validate_movie(movie: &Movie) -> DomainResult<()> {
    if movie.title.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Movie title cannot be empty".to_string(),
        ));
    }
    if movie.genres.is_empty() {
        return Err(DomainError::InvariantViolation(
            "Movie must have at least one genre".to_string(),
        ));
    }
    if movie.languages.is_empty() {
        return Err(DomainError::InvariantViolation(
            "Movie must have at least one language".to_string(),
        ));
    }
    if !rating_in_bounds(movie.rating) {
        return Err(DomainError::InvariantViolation(format!(
            "Rating {} outside [{}, {}]",
            movie.rating, RATING_MIN, RATING_MAX
        )));
    }
    if movie.poster.as_str().trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Movie poster cannot be empty".to_string(),
        ));
    }
    if movie.review.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Movie review cannot be empty".to_string(),
        ));
    }
    if movie.updated_at < movie.created_at {
        return Err(DomainError::InvariantViolation(
            "Update timestamp precedes creation timestamp".to_string(),
        ));
    }
    Ok(())
}

fn rating_in_bounds(rating: f64) -> bool {
    !rating.is_nan() && (RATING_MIN..=RATING_MAX).contains(&rating)
}

/// Ratings keep one decimal of meaningful precision
pub fn normalize_rating(rating: f64) -> f64 {
    (rating * 10.0).round() / 10.0
}

// ============================================================================
// ADMIN DRAFT VALIDATION
// ============================================================================

/// Form fields an admin submission can be rejected on
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovieField {
    Title,
    Genres,
    Languages,
    Censor,
    Rating,
    Poster,
    Review,
}

impl MovieField {
    pub fn as_str(self) -> &'static str {
        match self {
            MovieField::Title => "title",
            MovieField::Genres => "genres",
            MovieField::Languages => "languages",
            MovieField::Censor => "censor",
            MovieField::Rating => "rating",
            MovieField::Poster => "poster",
            MovieField::Review => "review",
        }
    }
}

impl fmt::Display for MovieField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: MovieField,
    pub reason: String,
}

/// Every field-level problem found in one submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: MovieField, reason: impl Into<String>) {
        self.0.push(FieldError {
            field,
            reason: reason.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// First reason reported for a field
    pub fn reason_for(&self, field: MovieField) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.reason.as_str())
    }

    pub fn has(&self, field: MovieField) -> bool {
        self.reason_for(field).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.reason))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Raw admin form submission, before validation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieDraft {
    pub title: String,
    pub genres: BTreeSet<Genre>,
    pub languages: BTreeSet<Language>,
    pub censor: CensorRating,
    pub rating: f64,
    pub poster: Option<PosterImage>,
    pub review: String,
}

impl From<MovieFields> for MovieDraft {
    fn from(fields: MovieFields) -> Self {
        Self {
            title: fields.title,
            genres: fields.genres,
            languages: fields.languages,
            censor: fields.censor,
            rating: fields.rating,
            poster: Some(fields.poster),
            review: fields.review,
        }
    }
}

/// Tunables for draft validation
#[derive(Debug, Clone)]
pub struct DraftRules {
    pub max_poster_bytes: usize,
}

impl Default for DraftRules {
    fn default() -> Self {
        Self {
            max_poster_bytes: DEFAULT_MAX_POSTER_BYTES,
        }
    }
}

fn inline_poster_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^data:image/[A-Za-z0-9.+-]+;base64,([A-Za-z0-9+/=\s]*)$")
            .expect("inline poster pattern is valid")
    })
}

/// Decoded size of a base64 payload, without decoding it
fn base64_decoded_len(payload: &str) -> usize {
    let significant = payload.bytes().filter(|b| !b.is_ascii_whitespace()).count();
    let padding = payload.bytes().rev().take_while(|b| *b == b'=').count().min(2);
    ((significant / 4) * 3 + ((significant % 4) * 3) / 4).saturating_sub(padding)
}

fn check_poster(poster: &PosterImage, rules: &DraftRules) -> Result<(), String> {
    let reference = poster.as_str();
    if reference.starts_with("http://") || reference.starts_with("https://") {
        return Ok(());
    }

    let captures = inline_poster_pattern()
        .captures(reference)
        .ok_or_else(|| "Poster must be an image URL or data URL".to_string())?;

    let payload = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
    if base64_decoded_len(payload) > rules.max_poster_bytes {
        let limit_mb = rules.max_poster_bytes / (1024 * 1024);
        return Err(format!("Image size should be less than {}MB", limit_mb.max(1)));
    }
    Ok(())
}

/// Validates an admin submission.
///
/// Every failing field is reported, not just the first. On success the
/// trimmed fields are returned with the rating normalized to one decimal.
pub fn validate_movie_draft(
    draft: &MovieDraft,
    rules: &DraftRules,
) -> Result<MovieFields, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let title = draft.title.trim();
    if title.is_empty() {
        errors.push(MovieField::Title, "Title is required");
    }
    if draft.genres.is_empty() {
        errors.push(MovieField::Genres, "Select at least one genre");
    }
    if draft.languages.is_empty() {
        errors.push(MovieField::Languages, "Select at least one language");
    }
    let poster = draft
        .poster
        .as_ref()
        .map(|poster| poster.as_str().trim())
        .filter(|reference| !reference.is_empty())
        .map(PosterImage::new);
    match &poster {
        Some(poster) => {
            if let Err(reason) = check_poster(poster, rules) {
                errors.push(MovieField::Poster, reason);
            }
        }
        None => errors.push(MovieField::Poster, "Poster is required"),
    }
    let review = draft.review.trim();
    if review.is_empty() {
        errors.push(MovieField::Review, "Review is required");
    }
    if !rating_in_bounds(draft.rating) {
        errors.push(MovieField::Rating, "Rating must be between 1 and 5");
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(MovieFields {
        title: title.to_string(),
        genres: draft.genres.clone(),
        languages: draft.languages.clone(),
        censor: draft.censor,
        rating: normalize_rating(draft.rating),
        poster: poster.unwrap_or_else(|| PosterImage::new(String::new())),
        review: review.to_string(),
    })
}

/// Invariants that must hold true for the Movie domain:
///
/// 1. Identity is assigned by the store and never changes
/// 2. Rating is always within [1, 5]
/// 3. Genres and languages are never empty
/// 4. Title, poster and review are never blank
/// 5. created_at is set once by the store and reflects insertion order
/// 6. updated_at never precedes created_at
