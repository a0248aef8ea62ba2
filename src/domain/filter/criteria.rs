use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::movie::{CensorRating, Genre, Language};

/// Lower end of the filter rating range.
///
/// Stored entries can never be rated below 1.0, yet the filter range starts
/// at 0.0. The gap is kept as-is: [0, 1) simply never matches anything.
pub const FILTER_RATING_FLOOR: f64 = 0.0;

/// Upper end of the filter rating range
pub const FILTER_RATING_CEIL: f64 = 5.0;

/// Active non-search filter selections.
/// Empty sets mean "no restriction" on that dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub genres: BTreeSet<Genre>,
    pub languages: BTreeSet<Language>,
    pub min_rating: f64,
    pub max_rating: f64,
    pub censor_ratings: BTreeSet<CensorRating>,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            genres: BTreeSet::new(),
            languages: BTreeSet::new(),
            min_rating: FILTER_RATING_FLOOR,
            max_rating: FILTER_RATING_CEIL,
            censor_ratings: BTreeSet::new(),
        }
    }
}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T) {
    if !set.remove(&value) {
        set.insert(value);
    }
}

impl FilterCriteria {
    pub fn toggle_genre(&mut self, genre: Genre) {
        toggle(&mut self.genres, genre);
    }

    pub fn toggle_language(&mut self, language: Language) {
        toggle(&mut self.languages, language);
    }

    pub fn toggle_censor(&mut self, censor: CensorRating) {
        toggle(&mut self.censor_ratings, censor);
    }

    /// Bounds are taken as given; min > max is allowed and matches nothing
    pub fn set_rating_range(&mut self, min_rating: f64, max_rating: f64) {
        self.min_rating = min_rating;
        self.max_rating = max_rating;
    }

    /// True when no criterion restricts anything
    pub fn is_unrestricted(&self) -> bool {
        *self == FilterCriteria::default()
    }

    /// Number of active restrictions, for badge counts
    pub fn active_count(&self) -> usize {
        let range_active = self.min_rating != FILTER_RATING_FLOOR
            || self.max_rating != FILTER_RATING_CEIL;
        self.genres.len()
            + self.languages.len()
            + self.censor_ratings.len()
            + usize::from(range_active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_unrestricted() {
        let criteria = FilterCriteria::default();
        assert!(criteria.is_unrestricted());
        assert_eq!(criteria.min_rating, 0.0);
        assert_eq!(criteria.max_rating, 5.0);
        assert_eq!(criteria.active_count(), 0);
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut criteria = FilterCriteria::default();
        criteria.toggle_genre(Genre::Drama);
        assert!(criteria.genres.contains(&Genre::Drama));
        assert!(!criteria.is_unrestricted());

        criteria.toggle_genre(Genre::Drama);
        assert!(criteria.genres.is_empty());
        assert!(criteria.is_unrestricted());
    }

    #[test]
    fn test_inverted_range_is_stored_verbatim() {
        let mut criteria = FilterCriteria::default();
        criteria.set_rating_range(4.0, 2.0);
        assert_eq!(criteria.min_rating, 4.0);
        assert_eq!(criteria.max_rating, 2.0);
    }

    #[test]
    fn test_active_count() {
        let mut criteria = FilterCriteria::default();
        criteria.toggle_language(Language::Hindi);
        criteria.toggle_censor(CensorRating::A);
        criteria.set_rating_range(3.0, 5.0);
        assert_eq!(criteria.active_count(), 3);
    }
}
