// src/application/commands/catalog_commands.rs
//
// Public catalog commands
//
// RULES:
// - Accept DTOs
// - Call services
// - Return DTOs
// - Never contain business logic

use crate::application::dto::{FilterDto, ListingDto, MovieDetailDto};
use crate::application::error_handling::{CommandResult, ErrorResponse};
use crate::application::state::AppState;
use crate::domain::MovieId;
use crate::error::AppError;
use crate::services::{CatalogBridge, CatalogListing, FilterState, ListingState};

/// Replace the shared search/filter context
pub fn apply_filters(state: &AppState, dto: FilterDto) -> CommandResult<FilterDto> {
    let filters = FilterState::try_from(dto).map_err(AppError::from)?;

    state.filters.set_search_text(filters.search_text);
    state.filters.set_criteria(filters.criteria);

    Ok(FilterDto::from(state.filters.snapshot()))
}

/// Reset every filter, keeping the search text
pub fn clear_filters(state: &AppState) -> FilterDto {
    state.filters.clear_filters();
    FilterDto::from(state.filters.snapshot())
}

/// Open a live listing over the shared filter context.
/// The caller owns the returned listing and closes it on teardown.
pub async fn open_listing(state: &AppState) -> CatalogListing {
    let bridge = CatalogBridge::open(state.store.as_ref()).await;
    CatalogListing::new(bridge, state.filters.clone())
}

/// One-shot listing: waits for the first snapshot, then releases the subscription
pub async fn list_movies(state: &AppState) -> ListingDto {
    let mut listing = open_listing(state).await;

    let mut current = listing.state();
    while matches!(current, ListingState::Loading) {
        match listing.next_change().await {
            Some(next) => current = next,
            None => break,
        }
    }

    listing.close();
    ListingDto::from(current)
}

pub async fn get_movie_detail(state: &AppState, movie_id: &str) -> CommandResult<MovieDetailDto> {
    match state.store.get(&MovieId::from(movie_id)).await {
        Ok(movie) => Ok(MovieDetailDto::from(movie)),
        Err(AppError::NotFound) => Err(ErrorResponse::not_found("Movie")),
        Err(e) => Err(ErrorResponse::from_app_error(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::test_support::{seeded_state, signed_in_state};
    use crate::application::error_handling::ErrorType;

    #[tokio::test]
    async fn test_list_movies_empty_catalog() {
        let (_dir, state) = signed_in_state().await;

        let listing = list_movies(&state).await;

        assert_eq!(listing.state, "empty_catalog");
        assert_eq!(listing.message.as_deref(), Some("No movies found"));
    }

    #[tokio::test]
    async fn test_list_movies_applies_shared_filters() {
        let (_dir, state) = seeded_state().await;

        apply_filters(
            &state,
            FilterDto {
                search_text: "NO".to_string(),
                ..FilterDto::default()
            },
        )
        .unwrap();
        let listing = list_movies(&state).await;
        let titles: Vec<&str> = listing.movies.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Nova"]);

        apply_filters(
            &state,
            FilterDto {
                genres: vec!["Horror".to_string()],
                ..FilterDto::default()
            },
        )
        .unwrap();
        let listing = list_movies(&state).await;
        assert_eq!(listing.movies.len(), 1);
        assert_eq!(listing.movies[0].title, "Bloodline");

        apply_filters(
            &state,
            FilterDto {
                min_rating: 4.0,
                max_rating: 2.0,
                ..FilterDto::default()
            },
        )
        .unwrap();
        assert_eq!(list_movies(&state).await.state, "no_matches");
    }

    #[tokio::test]
    async fn test_clear_filters_keeps_search() {
        let (_dir, state) = seeded_state().await;
        apply_filters(
            &state,
            FilterDto {
                search_text: "blood".to_string(),
                censor_ratings: vec!["A".to_string()],
                ..FilterDto::default()
            },
        )
        .unwrap();

        let cleared = clear_filters(&state);

        assert_eq!(cleared.search_text, "blood");
        assert!(cleared.censor_ratings.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_filter_tag_is_rejected() {
        let (_dir, state) = seeded_state().await;
        let err = apply_filters(
            &state,
            FilterDto {
                genres: vec!["Western".to_string()],
                ..FilterDto::default()
            },
        )
        .unwrap_err();

        assert_eq!(err.error_type, ErrorType::DomainError);
    }

    #[tokio::test]
    async fn test_detail_not_found() {
        let (_dir, state) = seeded_state().await;
        let err = get_movie_detail(&state, "missing").await.unwrap_err();
        assert_eq!(err.error_type, ErrorType::NotFound);
        assert_eq!(err.message, "Movie not found");
    }
}
