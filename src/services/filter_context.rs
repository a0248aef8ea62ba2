// src/services/filter_context.rs
//
// Shared search/filter context
//
// One instance is created by the application and handed to every component
// that reads or writes the search box and filter panel. Writers go through
// the methods below; readers either take a snapshot or watch for changes.
// Watchers are only woken when the state actually changed.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::domain::{CensorRating, FilterCriteria, Genre, Language};

/// Everything the listing needs besides the catalog itself
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub search_text: String,
    pub criteria: FilterCriteria,
}

pub struct FilterContext {
    state: watch::Sender<FilterState>,
}

impl FilterContext {
    pub fn new() -> Self {
        Self::with_state(FilterState::default())
    }

    pub fn with_state(initial: FilterState) -> Self {
        let (state, _) = watch::channel(initial);
        Self { state }
    }

    pub fn snapshot(&self) -> FilterState {
        self.state.borrow().clone()
    }

    pub fn watch(&self) -> watch::Receiver<FilterState> {
        self.state.subscribe()
    }

    pub fn set_search_text(&self, text: impl Into<String>) {
        let text = text.into();
        self.state.send_if_modified(|state| {
            if state.search_text == text {
                return false;
            }
            state.search_text = text;
            true
        });
    }

    pub fn set_criteria(&self, criteria: FilterCriteria) {
        self.update_criteria(|current| *current = criteria);
    }

    /// Apply an arbitrary edit to the criteria
    pub fn update_criteria(&self, edit: impl FnOnce(&mut FilterCriteria)) {
        self.state.send_if_modified(|state| {
            let before = state.criteria.clone();
            edit(&mut state.criteria);
            state.criteria != before
        });
    }

    pub fn toggle_genre(&self, genre: Genre) {
        self.update_criteria(|c| c.toggle_genre(genre));
    }

    pub fn toggle_language(&self, language: Language) {
        self.update_criteria(|c| c.toggle_language(language));
    }

    pub fn toggle_censor(&self, censor: CensorRating) {
        self.update_criteria(|c| c.toggle_censor(censor));
    }

    pub fn set_rating_range(&self, min_rating: f64, max_rating: f64) {
        self.update_criteria(|c| c.set_rating_range(min_rating, max_rating));
    }

    /// Resets every filter. The search text is kept.
    pub fn clear_filters(&self) {
        self.set_criteria(FilterCriteria::default());
    }
}

impl Default for FilterContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggles_round_trip() {
        let ctx = FilterContext::new();

        ctx.toggle_genre(Genre::Horror);
        ctx.toggle_language(Language::Tamil);
        ctx.toggle_censor(CensorRating::A);
        let state = ctx.snapshot();
        assert!(state.criteria.genres.contains(&Genre::Horror));
        assert!(state.criteria.languages.contains(&Language::Tamil));
        assert!(state.criteria.censor_ratings.contains(&CensorRating::A));

        ctx.toggle_genre(Genre::Horror);
        assert!(ctx.snapshot().criteria.genres.is_empty());
    }

    #[test]
    fn test_clear_filters_keeps_search_text() {
        let ctx = FilterContext::new();
        ctx.set_search_text("nova");
        ctx.toggle_genre(Genre::Drama);
        ctx.set_rating_range(3.0, 4.0);

        ctx.clear_filters();

        let state = ctx.snapshot();
        assert_eq!(state.search_text, "nova");
        assert!(state.criteria.is_unrestricted());
    }

    #[test]
    fn test_inverted_range_is_stored_as_given() {
        let ctx = FilterContext::new();
        ctx.set_rating_range(4.0, 2.0);

        let criteria = ctx.snapshot().criteria;
        assert_eq!(criteria.min_rating, 4.0);
        assert_eq!(criteria.max_rating, 2.0);
    }

    #[tokio::test]
    async fn test_watchers_only_wake_on_real_changes() {
        let ctx = FilterContext::new();
        let mut watcher = ctx.watch();

        ctx.set_search_text("");
        ctx.clear_filters();
        assert!(!watcher.has_changed().unwrap());

        ctx.set_search_text("blood");
        watcher.changed().await.unwrap();
        assert_eq!(watcher.borrow_and_update().search_text, "blood");
    }
}
