pub mod entity;
pub mod invariants;

pub use entity::{
    CensorRating, Genre, Language, Movie, MovieFields, MovieId, MovieUpdate, PosterImage,
};
pub use invariants::{
    normalize_rating, validate_movie, validate_movie_draft, DraftRules, FieldError, MovieDraft,
    MovieField, ValidationErrors, DEFAULT_MAX_POSTER_BYTES, RATING_MAX, RATING_MIN,
};
