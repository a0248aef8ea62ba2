// src/application/commands/admin_commands.rs
//
// Admin catalog commands. Every one of them requires an active session.

use log::info;

use crate::application::dto::{MovieCardDto, MovieFormDto};
use crate::application::error_handling::CommandResult;
use crate::application::state::AppState;
use crate::domain::MovieId;
use crate::services::{DeleteConfirmation, DeleteOutcome};

/// Dashboard listing, newest first
pub async fn list_admin_movies(state: &AppState) -> CommandResult<Vec<MovieCardDto>> {
    let movies = state.admin_service.list_movies().await?;
    Ok(movies.iter().map(MovieCardDto::from).collect())
}

/// Returns the new movie id
pub async fn create_movie(state: &AppState, form: MovieFormDto) -> CommandResult<String> {
    let draft = form.into_draft().map_err(crate::error::AppError::from)?;
    let movie_id = state.admin_service.create_movie(draft).await?;
    Ok(movie_id.to_string())
}

pub async fn load_movie_form(state: &AppState, movie_id: &str) -> CommandResult<MovieFormDto> {
    let movie = state
        .admin_service
        .load_for_edit(&MovieId::from(movie_id))
        .await?;
    Ok(MovieFormDto::from(movie))
}

pub async fn update_movie(
    state: &AppState,
    movie_id: &str,
    form: MovieFormDto,
) -> CommandResult<()> {
    let draft = form.into_draft().map_err(crate::error::AppError::from)?;
    state
        .admin_service
        .update_movie(&MovieId::from(movie_id), draft)
        .await?;
    Ok(())
}

/// Returns whether the entry was deleted
pub async fn delete_movie(state: &AppState, movie_id: &str, confirmed: bool) -> CommandResult<bool> {
    let confirmation = if confirmed {
        DeleteConfirmation::Confirmed
    } else {
        DeleteConfirmation::Declined
    };

    let outcome = state
        .admin_service
        .delete_movie(&MovieId::from(movie_id), confirmation)
        .await?;

    if outcome == DeleteOutcome::Cancelled {
        info!("Delete of {} not confirmed", movie_id);
    }
    Ok(outcome == DeleteOutcome::Deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::test_support::{nova_form, seeded_state, signed_in_state};
    use crate::application::error_handling::ErrorType;

    #[tokio::test]
    async fn test_create_and_edit_round_trip() {
        let (_dir, state) = signed_in_state().await;

        let id = create_movie(&state, nova_form()).await.unwrap();

        let mut form = load_movie_form(&state, &id).await.unwrap();
        assert_eq!(form.title, "Nova");
        form.review = "Better on a second watch.".to_string();
        update_movie(&state, &id, form).await.unwrap();

        let dashboard = list_admin_movies(&state).await.unwrap();
        assert_eq!(dashboard.len(), 1);
        assert_eq!(dashboard[0].id, id);
        let event_types: Vec<String> = state
            .event_bus
            .get_event_log()
            .into_iter()
            .map(|e| e.event_type)
            .collect();
        assert!(event_types.ends_with(&["MovieCreated".to_string(), "MovieUpdated".to_string()]));
        assert!(state
            .event_bus
            .get_event_log()
            .iter()
            .all(|entry| entry.handler_count == 1));
    }

    #[tokio::test]
    async fn test_invalid_form_reports_every_field() {
        let (_dir, state) = signed_in_state().await;
        let form = MovieFormDto {
            rating: 0.0,
            ..MovieFormDto::default()
        };

        let err = create_movie(&state, form).await.unwrap_err();

        assert_eq!(err.error_type, ErrorType::Validation);
        let fields: Vec<&str> = err.field_errors.iter().map(|f| f.field.as_str()).collect();
        for expected in ["title", "genres", "languages", "poster", "review", "rating"] {
            assert!(fields.contains(&expected), "missing {}", expected);
        }
        assert!(list_admin_movies(&state).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let (_dir, state) = seeded_state().await;
        let before = list_admin_movies(&state).await.unwrap();
        let target = before[0].id.clone();

        assert!(!delete_movie(&state, &target, false).await.unwrap());
        assert_eq!(list_admin_movies(&state).await.unwrap().len(), before.len());

        assert!(delete_movie(&state, &target, true).await.unwrap());
        assert_eq!(list_admin_movies(&state).await.unwrap().len(), before.len() - 1);
    }

    #[tokio::test]
    async fn test_edit_of_missing_movie_is_not_found() {
        let (_dir, state) = signed_in_state().await;
        let err = load_movie_form(&state, "ghost").await.unwrap_err();
        assert_eq!(err.error_type, ErrorType::NotFound);
    }
}
