// src/domain/mod.rs
//
// Domain Root - the single source of truth for the domain API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod filter;
pub mod movie;
pub mod session;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Movie Domain
pub use movie::{
    normalize_rating, validate_movie, validate_movie_draft, CensorRating, DraftRules, FieldError,
    Genre, Language, Movie, MovieDraft, MovieField, MovieFields, MovieId, MovieUpdate,
    PosterImage, ValidationErrors, DEFAULT_MAX_POSTER_BYTES, RATING_MAX, RATING_MIN,
};

// Filter/Search Engine
pub use filter::{
    filter_catalog, movie_matches, FilterCriteria, FILTER_RATING_CEIL, FILTER_RATING_FLOOR,
};

// Sessions
pub use session::{Credentials, Principal};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Unknown {vocabulary}: {value}")]
    UnknownTag {
        vocabulary: &'static str,
        value: String,
    },
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
