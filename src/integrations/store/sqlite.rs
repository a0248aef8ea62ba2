// src/integrations/store/sqlite.rs
//
// Catalog Store backed by the local SQLite database.
//
// RULES:
// - Entity invariants are re-checked before every write
// - Blocking SQLite work runs on the blocking pool
// - Every successful write publishes a fresh snapshot to open subscriptions
// - No event emission (services own that)

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Duration, SubsecRound, Utc};
use log::{debug, error, info};

use super::client::{CatalogStore, StoreEvent};
use super::subscription::{CatalogSubscription, SubscriptionHub};
use crate::domain::{validate_movie, Movie, MovieFields, MovieId, MovieUpdate};
use crate::error::{AppError, AppResult};
use crate::repositories::MovieRepository;

/// Hands out strictly increasing creation timestamps at microsecond precision
struct CreationClock {
    last: Mutex<Option<DateTime<Utc>>>,
}

impl CreationClock {
    fn starting_after(last: Option<DateTime<Utc>>) -> Self {
        Self {
            last: Mutex::new(last),
        }
    }

    fn next(&self) -> DateTime<Utc> {
        let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
        let now = Utc::now().trunc_subsecs(6);

        let stamp = match *last {
            Some(previous) if now <= previous => previous + Duration::microseconds(1),
            _ => now,
        };

        *last = Some(stamp);
        stamp
    }
}

pub struct LocalCatalogStore {
    repo: Arc<dyn MovieRepository>,
    hub: Arc<SubscriptionHub>,
    clock: CreationClock,
}

impl LocalCatalogStore {
    pub fn open(repo: Arc<dyn MovieRepository>) -> AppResult<Self> {
        let latest = repo.latest_created_at()?;
        debug!("Catalog store opened, latest entry at {:?}", latest);

        Ok(Self {
            repo,
            hub: SubscriptionHub::new(),
            clock: CreationClock::starting_after(latest),
        })
    }

    pub fn active_subscriptions(&self) -> usize {
        self.hub.active_count()
    }

    async fn read_all(&self) -> AppResult<Vec<Movie>> {
        let repo = Arc::clone(&self.repo);
        blocking(move || repo.list_newest_first()).await
    }

    async fn publish_snapshot(&self) {
        if self.hub.active_count() == 0 {
            return;
        }

        match self.read_all().await {
            Ok(movies) => self.hub.publish(StoreEvent::Snapshot(Arc::new(movies))),
            Err(e) => {
                error!("Failed to read catalog snapshot: {}", e);
                self.hub.publish(StoreEvent::Error(e.to_string()));
            }
        }
    }
}

async fn blocking<T, F>(work: F) -> AppResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> AppResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(work).await?
}

#[async_trait]
impl CatalogStore for LocalCatalogStore {
    async fn create(&self, fields: MovieFields) -> AppResult<MovieId> {
        let movie = Movie::from_fields(MovieId::generate(), fields, self.clock.next());
        validate_movie(&movie)?;

        let id = movie.id.clone();
        let repo = Arc::clone(&self.repo);
        blocking(move || repo.insert(&movie)).await?;

        info!("Stored movie {}", id);
        self.publish_snapshot().await;
        Ok(id)
    }

    async fn update(&self, id: &MovieId, update: MovieUpdate) -> AppResult<()> {
        let mut movie = self.get(id).await?;

        let now = Utc::now().trunc_subsecs(6).max(movie.created_at);
        movie.apply_update(update, now);
        validate_movie(&movie)?;

        let repo = Arc::clone(&self.repo);
        blocking(move || repo.update(&movie)).await?;

        info!("Updated movie {}", id);
        self.publish_snapshot().await;
        Ok(())
    }

    async fn delete(&self, id: &MovieId) -> AppResult<()> {
        let repo = Arc::clone(&self.repo);
        let target = id.clone();
        blocking(move || repo.delete(&target)).await?;

        info!("Deleted movie {}", id);
        self.publish_snapshot().await;
        Ok(())
    }

    async fn get(&self, id: &MovieId) -> AppResult<Movie> {
        let repo = Arc::clone(&self.repo);
        let target = id.clone();
        blocking(move || repo.get_by_id(&target))
            .await?
            .ok_or(AppError::NotFound)
    }

    async fn list(&self) -> AppResult<Vec<Movie>> {
        self.read_all().await
    }

    async fn subscribe(&self) -> AppResult<CatalogSubscription> {
        let current = self.read_all().await?;
        Ok(self
            .hub
            .register(Some(StoreEvent::Snapshot(Arc::new(current)))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_database;
    use crate::domain::{CensorRating, Genre, Language, PosterImage};
    use crate::repositories::SqliteMovieRepository;
    use std::collections::BTreeSet;

    fn store() -> (tempfile::TempDir, LocalCatalogStore) {
        let dir = tempfile::tempdir().unwrap();
        let pool = open_database(&dir.path().join("store.db"), 2).unwrap();
        let repo = Arc::new(SqliteMovieRepository::new(Arc::new(pool)));
        (dir, LocalCatalogStore::open(repo).unwrap())
    }

    fn fields(title: &str) -> MovieFields {
        MovieFields {
            title: title.to_string(),
            genres: BTreeSet::from([Genre::SciFi]),
            languages: BTreeSet::from([Language::English]),
            censor: CensorRating::U,
            rating: 4.2,
            poster: PosterImage::new("https://img.example/nova.jpg"),
            review: "Quietly ambitious.".to_string(),
        }
    }

    fn titles(event: Option<StoreEvent>) -> Vec<String> {
        match event {
            Some(StoreEvent::Snapshot(movies)) => movies.iter().map(|m| m.title.clone()).collect(),
            other => panic!("expected snapshot, got {:?}", other),
        }
    }

    #[test]
    fn test_clock_is_strictly_monotonic() {
        let future = Utc::now() + Duration::hours(1);
        let clock = CreationClock::starting_after(Some(future));

        let a = clock.next();
        let b = clock.next();

        assert!(a > future);
        assert!(b > a);
        assert_eq!(b - a, Duration::microseconds(1));
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let (_dir, store) = store();

        let id = store.create(fields("Nova")).await.unwrap();
        let movie = store.get(&id).await.unwrap();

        assert_eq!(movie.title, "Nova");
        assert_eq!(movie.created_at, movie.updated_at);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let (_dir, store) = store();
        let result = store.get(&MovieId::from("missing")).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_list_is_newest_first_for_rapid_creates() {
        let (_dir, store) = store();

        for title in ["First", "Second", "Third"] {
            store.create(fields(title)).await.unwrap();
        }

        let listed: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.title)
            .collect();
        assert_eq!(listed, vec!["Third", "Second", "First"]);
    }

    #[tokio::test]
    async fn test_subscribe_pushes_current_then_each_write() {
        let (_dir, store) = store();
        store.create(fields("Nova")).await.unwrap();

        let mut sub = store.subscribe().await.unwrap();
        assert_eq!(titles(sub.next().await), vec!["Nova"]);

        let id = store.create(fields("Bloodline")).await.unwrap();
        assert_eq!(titles(sub.next().await), vec!["Bloodline", "Nova"]);

        store.delete(&id).await.unwrap();
        assert_eq!(titles(sub.next().await), vec!["Nova"]);

        sub.close();
        assert_eq!(store.active_subscriptions(), 0);
    }

    #[tokio::test]
    async fn test_update_is_partial_and_keeps_created_at() {
        let (_dir, store) = store();
        let id = store.create(fields("Nova")).await.unwrap();
        let before = store.get(&id).await.unwrap();

        let update = MovieUpdate {
            rating: Some(3.5),
            ..MovieUpdate::default()
        };
        store.update(&id, update).await.unwrap();

        let after = store.get(&id).await.unwrap();
        assert_eq!(after.rating, 3.5);
        assert_eq!(after.title, "Nova");
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at >= before.updated_at);
    }

    #[tokio::test]
    async fn test_invalid_entity_is_never_persisted() {
        let (_dir, store) = store();
        let mut bad = fields("Nova");
        bad.genres.clear();

        let result = store.create(bad).await;

        assert!(matches!(result, Err(AppError::Domain(_))));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_are_not_found() {
        let (_dir, store) = store();
        let ghost = MovieId::from("ghost");

        assert!(matches!(
            store.update(&ghost, MovieUpdate::default()).await,
            Err(AppError::NotFound)
        ));
        assert!(matches!(store.delete(&ghost).await, Err(AppError::NotFound)));
    }
}
