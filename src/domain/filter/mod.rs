pub mod criteria;
pub mod engine;

pub use criteria::{FilterCriteria, FILTER_RATING_CEIL, FILTER_RATING_FLOOR};
pub use engine::{filter_catalog, movie_matches};
