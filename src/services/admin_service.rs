// src/services/admin_service.rs
//
// Admin write path
//
// Thin pass-through to the Catalog Store:
// - Every operation requires an active session
// - Drafts are validated before anything reaches the store
// - Delete needs an explicit confirmation
// - Writes are fire-once; no local catalog mutation, the next snapshot is the truth

use std::sync::Arc;

use log::info;

use crate::domain::{
    validate_movie_draft, Credentials, DraftRules, Movie, MovieDraft, MovieId, MovieUpdate,
    Principal,
};
use crate::error::{AppError, AppResult};
use crate::events::{
    EventBus, MovieCreated, MovieDeleted, MovieUpdated, SessionEnded, SessionStarted,
};
use crate::integrations::{CatalogStore, IdentityProvider};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteConfirmation {
    Confirmed,
    Declined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
}

pub struct AdminService {
    store: Arc<dyn CatalogStore>,
    identity: Arc<dyn IdentityProvider>,
    event_bus: Arc<EventBus>,
    rules: DraftRules,
}

impl AdminService {
    pub fn new(
        store: Arc<dyn CatalogStore>,
        identity: Arc<dyn IdentityProvider>,
        event_bus: Arc<EventBus>,
        rules: DraftRules,
    ) -> Self {
        Self {
            store,
            identity,
            event_bus,
            rules,
        }
    }

    pub async fn sign_in(&self, credentials: Credentials) -> AppResult<Principal> {
        let principal = self.identity.authenticate(credentials).await?;

        self.event_bus.emit(SessionStarted::new(
            principal.uid.clone(),
            principal.email.clone(),
        ));

        Ok(principal)
    }

    pub async fn sign_out(&self) -> AppResult<()> {
        let previous = self.identity.current_session();
        self.identity.end_session().await?;

        if let Some(principal) = previous {
            self.event_bus.emit(SessionEnded::new(principal.uid));
        }
        Ok(())
    }

    /// The active session, or `Unauthenticated`
    pub fn require_session(&self) -> AppResult<Principal> {
        self.identity
            .current_session()
            .ok_or(AppError::Unauthenticated)
    }

    pub async fn create_movie(&self, draft: MovieDraft) -> AppResult<MovieId> {
        let principal = self.require_session()?;
        let fields = validate_movie_draft(&draft, &self.rules)?;
        let title = fields.title.clone();

        let movie_id = self.store.create(fields).await?;

        info!("{} added \"{}\" ({})", principal.email, title, movie_id);
        self.event_bus
            .emit(MovieCreated::new(movie_id.clone(), title, principal.email));

        Ok(movie_id)
    }

    /// Full replacement of the editable fields
    pub async fn update_movie(&self, movie_id: &MovieId, draft: MovieDraft) -> AppResult<()> {
        let principal = self.require_session()?;
        let fields = validate_movie_draft(&draft, &self.rules)?;

        self.store
            .update(movie_id, MovieUpdate::from(fields))
            .await?;

        info!("{} updated {}", principal.email, movie_id);
        self.event_bus
            .emit(MovieUpdated::new(movie_id.clone(), principal.email));

        Ok(())
    }

    pub async fn delete_movie(
        &self,
        movie_id: &MovieId,
        confirmation: DeleteConfirmation,
    ) -> AppResult<DeleteOutcome> {
        let principal = self.require_session()?;

        if confirmation == DeleteConfirmation::Declined {
            info!("Delete of {} cancelled", movie_id);
            return Ok(DeleteOutcome::Cancelled);
        }

        self.store.delete(movie_id).await?;

        info!("{} deleted {}", principal.email, movie_id);
        self.event_bus
            .emit(MovieDeleted::new(movie_id.clone(), principal.email));

        Ok(DeleteOutcome::Deleted)
    }

    /// Current stored entry, to prefill the edit form
    pub async fn load_for_edit(&self, movie_id: &MovieId) -> AppResult<Movie> {
        self.require_session()?;
        self.store.get(movie_id).await
    }

    /// Dashboard listing, newest first
    pub async fn list_movies(&self) -> AppResult<Vec<Movie>> {
        self.require_session()?;
        self.store.list().await
    }
}
