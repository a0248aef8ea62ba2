use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;

/// Opaque identifier assigned by the catalog store on creation
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(String);

impl MovieId {
    /// Fresh identifier for a newly persisted entry
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for MovieId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for MovieId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Controlled genre vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Genre {
    Action,
    Comedy,
    Drama,
    Horror,
    #[serde(rename = "Sci-Fi")]
    SciFi,
    Crime,
    Thriller,
}

impl Genre {
    pub const ALL: [Genre; 7] = [
        Genre::Action,
        Genre::Comedy,
        Genre::Drama,
        Genre::Horror,
        Genre::SciFi,
        Genre::Crime,
        Genre::Thriller,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Comedy => "Comedy",
            Genre::Drama => "Drama",
            Genre::Horror => "Horror",
            Genre::SciFi => "Sci-Fi",
            Genre::Crime => "Crime",
            Genre::Thriller => "Thriller",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Genre {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Genre::ALL
            .into_iter()
            .find(|g| g.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::UnknownTag {
                vocabulary: "genre",
                value: s.to_string(),
            })
    }
}

/// Controlled language vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Language {
    English,
    Hindi,
    Telugu,
    Tamil,
    Malayalam,
    Kannada,
    Spanish,
    French,
    Japanese,
}

impl Language {
    pub const ALL: [Language; 9] = [
        Language::English,
        Language::Hindi,
        Language::Telugu,
        Language::Tamil,
        Language::Malayalam,
        Language::Kannada,
        Language::Spanish,
        Language::French,
        Language::Japanese,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::Telugu => "Telugu",
            Language::Tamil => "Tamil",
            Language::Malayalam => "Malayalam",
            Language::Kannada => "Kannada",
            Language::Spanish => "Spanish",
            Language::French => "French",
            Language::Japanese => "Japanese",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Language {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|l| l.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::UnknownTag {
                vocabulary: "language",
                value: s.to_string(),
            })
    }
}

/// Censor board certificate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CensorRating {
    U,
    #[serde(rename = "U/A")]
    UA,
    A,
}

impl CensorRating {
    pub const ALL: [CensorRating; 3] = [CensorRating::U, CensorRating::UA, CensorRating::A];

    pub fn label(self) -> &'static str {
        match self {
            CensorRating::U => "U",
            CensorRating::UA => "U/A",
            CensorRating::A => "A",
        }
    }
}

impl Default for CensorRating {
    fn default() -> Self {
        CensorRating::U
    }
}

impl fmt::Display for CensorRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CensorRating {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "U" => Ok(CensorRating::U),
            "U/A" | "UA" => Ok(CensorRating::UA),
            "A" => Ok(CensorRating::A),
            _ => Err(DomainError::UnknownTag {
                vocabulary: "censor rating",
                value: s.to_string(),
            }),
        }
    }
}

/// Reference to a poster asset: a remote URL or an inline data URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PosterImage(String);

impl PosterImage {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_inline(&self) -> bool {
        self.0.starts_with("data:")
    }
}

impl fmt::Display for PosterImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One reviewed title in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Store-assigned, immutable identifier
    pub id: MovieId,

    pub title: String,

    /// Never empty
    pub genres: BTreeSet<Genre>,

    /// Never empty
    pub languages: BTreeSet<Language>,

    pub censor: CensorRating,

    /// Always within [1.0, 5.0]
    pub rating: f64,

    pub poster: PosterImage,

    pub review: String,

    /// Store-assigned; the sole ordering key for listings
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// The editable part of an entry: everything except identity and timestamps.
/// Only produced by draft validation.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieFields {
    pub title: String,
    pub genres: BTreeSet<Genre>,
    pub languages: BTreeSet<Language>,
    pub censor: CensorRating,
    pub rating: f64,
    pub poster: PosterImage,
    pub review: String,
}

/// Partial update; `None` leaves the stored value untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieUpdate {
    pub title: Option<String>,
    pub genres: Option<BTreeSet<Genre>>,
    pub languages: Option<BTreeSet<Language>>,
    pub censor: Option<CensorRating>,
    pub rating: Option<f64>,
    pub poster: Option<PosterImage>,
    pub review: Option<String>,
}

impl From<MovieFields> for MovieUpdate {
    /// Full-document replacement, as issued by an admin edit
    fn from(fields: MovieFields) -> Self {
        Self {
            title: Some(fields.title),
            genres: Some(fields.genres),
            languages: Some(fields.languages),
            censor: Some(fields.censor),
            rating: Some(fields.rating),
            poster: Some(fields.poster),
            review: Some(fields.review),
        }
    }
}

impl MovieUpdate {
    pub fn is_empty(&self) -> bool {
        *self == MovieUpdate::default()
    }
}

impl Movie {
    /// Materialize a persisted entry from validated fields.
    /// Identity and timestamps come from the store.
    pub fn from_fields(id: MovieId, fields: MovieFields, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: fields.title,
            genres: fields.genres,
            languages: fields.languages,
            censor: fields.censor,
            rating: fields.rating,
            poster: fields.poster,
            review: fields.review,
            created_at,
            updated_at: created_at,
        }
    }

    /// Apply a field update. `created_at` is never touched.
    pub fn apply_update(&mut self, update: MovieUpdate, now: DateTime<Utc>) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(genres) = update.genres {
            self.genres = genres;
        }
        if let Some(languages) = update.languages {
            self.languages = languages;
        }
        if let Some(censor) = update.censor {
            self.censor = censor;
        }
        if let Some(rating) = update.rating {
            self.rating = rating;
        }
        if let Some(poster) = update.poster {
            self.poster = poster;
        }
        if let Some(review) = update.review {
            self.review = review;
        }

        self.updated_at = now;
    }

    /// Editable fields of this entry, e.g. to prefill the edit form
    pub fn fields(&self) -> MovieFields {
        MovieFields {
            title: self.title.clone(),
            genres: self.genres.clone(),
            languages: self.languages.clone(),
            censor: self.censor,
            rating: self.rating,
            poster: self.poster.clone(),
            review: self.review.clone(),
        }
    }
}
