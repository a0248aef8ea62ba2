// Filter/search engine.
//
// Pure function of (snapshot, search text, criteria). Every predicate must
// hold for an entry to pass; there is no scoring and no reordering.

use std::collections::BTreeSet;

use super::criteria::FilterCriteria;
use crate::domain::movie::Movie;

/// Case-folded search needle, computed once per evaluation
#[derive(Debug, Clone)]
struct SearchNeedle(String);

impl SearchNeedle {
    fn new(search_text: &str) -> Self {
        Self(search_text.to_lowercase())
    }

    fn matches(&self, title: &str) -> bool {
        self.0.is_empty() || title.to_lowercase().contains(&self.0)
    }
}

/// Empty selection means no restriction; otherwise at least one shared tag
fn intersects_or_unrestricted<T: Ord>(selected: &BTreeSet<T>, tags: &BTreeSet<T>) -> bool {
    selected.is_empty() || !selected.is_disjoint(tags)
}

fn matches_criteria(movie: &Movie, criteria: &FilterCriteria) -> bool {
    intersects_or_unrestricted(&criteria.genres, &movie.genres)
        && intersects_or_unrestricted(&criteria.languages, &movie.languages)
        && criteria.min_rating <= movie.rating
        && movie.rating <= criteria.max_rating
        && (criteria.censor_ratings.is_empty()
            || criteria.censor_ratings.contains(&movie.censor))
}

/// Single-entry predicate
pub fn movie_matches(movie: &Movie, search_text: &str, criteria: &FilterCriteria) -> bool {
    SearchNeedle::new(search_text).matches(&movie.title) && matches_criteria(movie, criteria)
}

/// Entries of `snapshot` that pass every predicate, in snapshot order
pub fn filter_catalog<'a>(
    snapshot: &'a [Movie],
    search_text: &str,
    criteria: &FilterCriteria,
) -> Vec<&'a Movie> {
    let needle = SearchNeedle::new(search_text);
    snapshot
        .iter()
        .filter(|movie| needle.matches(&movie.title) && matches_criteria(movie, criteria))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::movie::{CensorRating, Genre, Language, MovieId, PosterImage};
    use chrono::{Duration, TimeZone, Utc};

    fn movie(
        title: &str,
        genres: &[Genre],
        languages: &[Language],
        censor: CensorRating,
        rating: f64,
        age_minutes: i64,
    ) -> Movie {
        let created = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
            - Duration::minutes(age_minutes);
        Movie {
            id: MovieId::from(format!("id-{}", title.to_lowercase())),
            title: title.to_string(),
            genres: genres.iter().copied().collect(),
            languages: languages.iter().copied().collect(),
            censor,
            rating,
            poster: PosterImage::new(format!("https://img.example/{}.jpg", title)),
            review: format!("Review of {}", title),
            created_at: created,
            updated_at: created,
        }
    }

    /// Two-entry scenario, newest first
    fn scenario() -> Vec<Movie> {
        vec![
            movie("Nova", &[Genre::SciFi], &[Language::English], CensorRating::U, 4.2, 0),
            movie("Bloodline", &[Genre::Horror], &[Language::English], CensorRating::A, 2.0, 5),
        ]
    }

    fn catalog() -> Vec<Movie> {
        vec![
            movie("Nova", &[Genre::SciFi], &[Language::English], CensorRating::U, 4.2, 0),
            movie(
                "Bloodline",
                &[Genre::Horror],
                &[Language::English],
                CensorRating::A,
                2.0,
                1,
            ),
            movie(
                "Monsoon Wedding",
                &[Genre::Action, Genre::Drama],
                &[Language::Hindi, Language::English],
                CensorRating::UA,
                5.0,
                2,
            ),
            movie("Kaithi", &[Genre::Action, Genre::Crime], &[Language::Tamil], CensorRating::UA, 4.5, 3),
            movie("Perfect Blue", &[Genre::Thriller], &[Language::Japanese], CensorRating::A, 3.0, 4),
        ]
    }

    fn titles(result: &[&Movie]) -> Vec<String> {
        result.iter().map(|m| m.title.clone()).collect()
    }

    #[test]
    fn test_identity_with_empty_criteria() {
        let snapshot = catalog();
        let result = filter_catalog(&snapshot, "", &FilterCriteria::default());
        let expected: Vec<&Movie> = snapshot.iter().collect();
        assert_eq!(result, expected);
    }

    #[test]
    fn test_empty_snapshot_yields_empty() {
        let mut criteria = FilterCriteria::default();
        criteria.toggle_genre(Genre::Horror);
        assert!(filter_catalog(&[], "anything", &criteria).is_empty());
        assert!(filter_catalog(&[], "", &FilterCriteria::default()).is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let snapshot = scenario();
        let result = filter_catalog(&snapshot, "no", &FilterCriteria::default());
        assert_eq!(titles(&result), vec!["Nova"]);

        let result = filter_catalog(&snapshot, "BLOOD", &FilterCriteria::default());
        assert_eq!(titles(&result), vec!["Bloodline"]);
    }

    #[test]
    fn test_genre_filter_scenario() {
        let snapshot = scenario();
        let mut criteria = FilterCriteria::default();
        criteria.toggle_genre(Genre::Horror);
        let result = filter_catalog(&snapshot, "", &criteria);
        assert_eq!(titles(&result), vec!["Bloodline"]);
    }

    #[test]
    fn test_genre_uses_intersection_semantics() {
        let entry = movie(
            "Both",
            &[Genre::Action, Genre::Drama],
            &[Language::English],
            CensorRating::U,
            3.0,
            0,
        );

        let mut overlapping = FilterCriteria::default();
        overlapping.toggle_genre(Genre::Drama);
        overlapping.toggle_genre(Genre::Horror);
        assert!(movie_matches(&entry, "", &overlapping));

        let mut disjoint = FilterCriteria::default();
        disjoint.toggle_genre(Genre::Horror);
        disjoint.toggle_genre(Genre::Thriller);
        assert!(!movie_matches(&entry, "", &disjoint));
    }

    #[test]
    fn test_language_uses_intersection_semantics() {
        let snapshot = catalog();
        let mut criteria = FilterCriteria::default();
        criteria.toggle_language(Language::Hindi);
        criteria.toggle_language(Language::Tamil);
        let result = filter_catalog(&snapshot, "", &criteria);
        assert_eq!(titles(&result), vec!["Monsoon Wedding", "Kaithi"]);
    }

    #[test]
    fn test_rating_bounds_are_inclusive() {
        let top = movie("Top", &[Genre::Drama], &[Language::English], CensorRating::U, 5.0, 0);
        let mid = movie("Mid", &[Genre::Drama], &[Language::English], CensorRating::U, 3.0, 0);

        let mut full = FilterCriteria::default();
        full.set_rating_range(0.0, 5.0);
        assert!(movie_matches(&top, "", &full));

        let mut exact = FilterCriteria::default();
        exact.set_rating_range(5.0, 5.0);
        assert!(movie_matches(&top, "", &exact));

        let mut above = FilterCriteria::default();
        above.set_rating_range(3.1, 5.0);
        assert!(!movie_matches(&mid, "", &above));
    }

    #[test]
    fn test_inverted_rating_range_matches_nothing() {
        let snapshot = catalog();
        let mut criteria = FilterCriteria::default();
        criteria.set_rating_range(4.0, 2.0);
        assert!(filter_catalog(&snapshot, "", &criteria).is_empty());
    }

    #[test]
    fn test_sub_one_range_matches_nothing() {
        // The filter floor is 0 but no stored entry can be rated below 1
        let snapshot = catalog();
        let mut criteria = FilterCriteria::default();
        criteria.set_rating_range(0.0, 0.9);
        assert!(filter_catalog(&snapshot, "", &criteria).is_empty());
    }

    #[test]
    fn test_censor_membership() {
        let snapshot = catalog();
        let mut criteria = FilterCriteria::default();
        criteria.toggle_censor(CensorRating::A);
        let result = filter_catalog(&snapshot, "", &criteria);
        assert_eq!(titles(&result), vec!["Bloodline", "Perfect Blue"]);
    }

    #[test]
    fn test_predicates_combine_with_and() {
        let snapshot = catalog();
        let mut criteria = FilterCriteria::default();
        criteria.toggle_genre(Genre::Action);
        criteria.toggle_censor(CensorRating::UA);
        criteria.set_rating_range(4.6, 5.0);
        let result = filter_catalog(&snapshot, "wed", &criteria);
        assert_eq!(titles(&result), vec!["Monsoon Wedding"]);

        let result = filter_catalog(&snapshot, "kai", &criteria);
        assert!(result.is_empty());
    }

    #[test]
    fn test_result_is_ordered_subsequence() {
        let snapshot = catalog();
        let mut criteria = FilterCriteria::default();
        criteria.set_rating_range(3.0, 5.0);
        let result = filter_catalog(&snapshot, "", &criteria);

        let mut cursor = 0;
        for entry in &result {
            let position = snapshot[cursor..]
                .iter()
                .position(|m| m.id == entry.id)
                .expect("result entry must appear later in the snapshot");
            cursor += position + 1;
        }
        assert_eq!(result.len(), 4);
    }

    #[test]
    fn test_deterministic() {
        let snapshot = catalog();
        let mut criteria = FilterCriteria::default();
        criteria.toggle_language(Language::English);
        let first = filter_catalog(&snapshot, "o", &criteria);
        let second = filter_catalog(&snapshot, "o", &criteria);
        assert_eq!(first, second);
    }
}
