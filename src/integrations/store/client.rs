// src/integrations/store/client.rs
//
// Catalog Store collaborator surface
//
// ARCHITECTURE:
// - The store owns persistence and ordering (createdAt descending)
// - Writes are fire-once; the next pushed snapshot is the source of truth
// - Subscriptions are explicit handles and must be closed by their owner

use std::sync::Arc;

use async_trait::async_trait;

use super::subscription::CatalogSubscription;
use crate::domain::{Movie, MovieFields, MovieId, MovieUpdate};
use crate::error::AppResult;

/// Full catalog, newest first
pub type Snapshot = Arc<Vec<Movie>>;

/// One delivery on a live subscription
#[derive(Debug, Clone)]
pub enum StoreEvent {
    Snapshot(Snapshot),
    /// The subscription failed; no further events follow
    Error(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Assigns id and timestamps
    async fn create(&self, fields: MovieFields) -> AppResult<MovieId>;

    /// Partial update; `NotFound` when the id is absent
    async fn update(&self, id: &MovieId, update: MovieUpdate) -> AppResult<()>;

    async fn delete(&self, id: &MovieId) -> AppResult<()>;

    /// `NotFound` when the id is absent
    async fn get(&self, id: &MovieId) -> AppResult<Movie>;

    /// One-shot ordered read
    async fn list(&self) -> AppResult<Vec<Movie>>;

    /// Live stream of full ordered snapshots until the handle is closed
    async fn subscribe(&self) -> AppResult<CatalogSubscription>;
}
