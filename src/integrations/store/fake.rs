// src/integrations/store/fake.rs
//
// In-memory store double for tests. Pushes are driven by the test, not by
// writes, so a test can deliver snapshots or errors at any moment,
// including after a subscriber closed its handle.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use chrono::Utc;

use super::client::{CatalogStore, Snapshot, StoreEvent};
use super::subscription::{CatalogSubscription, SubscriptionHub};
use crate::domain::{Movie, MovieFields, MovieId, MovieUpdate};
use crate::error::{AppError, AppResult};

#[derive(Default)]
pub struct FakeCatalogStore {
    hub: Arc<SubscriptionHub>,
    movies: Mutex<Vec<Movie>>,
    subscribe_error: Mutex<Option<String>>,
}

impl FakeCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_movies(movies: Vec<Movie>) -> Self {
        let store = Self::new();
        *store.movies.lock().unwrap_or_else(PoisonError::into_inner) = movies;
        store
    }

    /// Subsequent `subscribe` calls fail with this message
    pub fn fail_subscribe(&self, message: &str) {
        *self
            .subscribe_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(message.to_string());
    }

    pub fn push_snapshot(&self, movies: Vec<Movie>) -> Snapshot {
        let snapshot: Snapshot = Arc::new(movies);
        self.hub.publish(StoreEvent::Snapshot(Arc::clone(&snapshot)));
        snapshot
    }

    pub fn push_error(&self, message: &str) {
        self.hub.publish(StoreEvent::Error(message.to_string()));
    }

    pub fn active_subscriptions(&self) -> usize {
        self.hub.active_count()
    }

    fn movies(&self) -> std::sync::MutexGuard<'_, Vec<Movie>> {
        self.movies.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl CatalogStore for FakeCatalogStore {
    async fn create(&self, fields: MovieFields) -> AppResult<MovieId> {
        let movie = Movie::from_fields(MovieId::generate(), fields, Utc::now());
        let id = movie.id.clone();
        self.movies().insert(0, movie);
        Ok(id)
    }

    async fn update(&self, id: &MovieId, update: MovieUpdate) -> AppResult<()> {
        let mut movies = self.movies();
        let movie = movies
            .iter_mut()
            .find(|m| &m.id == id)
            .ok_or(AppError::NotFound)?;
        movie.apply_update(update, Utc::now());
        Ok(())
    }

    async fn delete(&self, id: &MovieId) -> AppResult<()> {
        let mut movies = self.movies();
        let before = movies.len();
        movies.retain(|m| &m.id != id);
        if movies.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn get(&self, id: &MovieId) -> AppResult<Movie> {
        self.movies()
            .iter()
            .find(|m| &m.id == id)
            .cloned()
            .ok_or(AppError::NotFound)
    }

    async fn list(&self) -> AppResult<Vec<Movie>> {
        Ok(self.movies().clone())
    }

    /// No initial snapshot: the test decides when the first one lands
    async fn subscribe(&self) -> AppResult<CatalogSubscription> {
        let failure = self
            .subscribe_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(message) = failure {
            return Err(AppError::Store(message));
        }
        Ok(self.hub.register(None))
    }
}
