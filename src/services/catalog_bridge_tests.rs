// src/services/catalog_bridge_tests.rs
//
// Subscription bridge lifecycle against a store double that pushes on demand
//
// INVARIANTS TESTED:
// - Loading until the first snapshot, distinct from an empty catalog
// - Each snapshot replaces the published catalog whole, in emission order
// - Pushes after close never mutate the published catalog
// - close() is idempotent and releases the store subscription exactly once
// - A store error is a distinguishable, terminal state

#[cfg(test)]
mod bridge_lifecycle_tests {
    use std::collections::BTreeSet;
    use std::sync::Arc;

    use chrono::{Duration, TimeZone, Utc};

    use crate::domain::{CensorRating, Genre, Language, Movie, MovieId, PosterImage};
    use crate::integrations::store::fake::FakeCatalogStore;
    use crate::services::catalog_bridge::{CatalogBridge, CatalogView};
    use crate::services::filter_context::FilterContext;
    use crate::services::listing_service::{CatalogListing, ListingState};

    fn movie(title: &str, genre: Genre, rating: f64, censor: CensorRating, minute: i64) -> Movie {
        let created =
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap() + Duration::minutes(minute);
        Movie {
            id: MovieId::generate(),
            title: title.to_string(),
            genres: BTreeSet::from([genre]),
            languages: BTreeSet::from([Language::English]),
            censor,
            rating,
            poster: PosterImage::new("https://img.example/p.jpg"),
            review: "Seen it.".to_string(),
            created_at: created,
            updated_at: created,
        }
    }

    fn nova_and_bloodline() -> Vec<Movie> {
        vec![
            movie("Nova", Genre::SciFi, 4.2, CensorRating::U, 2),
            movie("Bloodline", Genre::Horror, 2.0, CensorRating::A, 1),
        ]
    }

    fn titles(view: &CatalogView) -> Vec<String> {
        view.snapshot()
            .map(|s| s.iter().map(|m| m.title.clone()).collect())
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn test_loading_until_first_snapshot() {
        let store = FakeCatalogStore::new();
        let mut bridge = CatalogBridge::open(&store).await;

        assert!(bridge.view().is_loading());
        assert_eq!(bridge.drain(), 0);
        assert!(bridge.view().is_loading());

        store.push_snapshot(Vec::new());
        let view = bridge.next_update().await.unwrap();

        assert!(!view.is_loading());
        assert_eq!(view.snapshot().map(|s| s.len()), Some(0));
    }

    #[tokio::test]
    async fn test_snapshots_apply_in_emission_order() {
        let store = FakeCatalogStore::new();
        let mut bridge = CatalogBridge::open(&store).await;

        store.push_snapshot(vec![movie("Nova", Genre::SciFi, 4.2, CensorRating::U, 1)]);
        store.push_snapshot(nova_and_bloodline());

        assert_eq!(bridge.drain(), 2);
        assert_eq!(titles(&bridge.view()), vec!["Nova", "Bloodline"]);
    }

    #[tokio::test]
    async fn test_push_after_close_does_not_mutate_catalog() {
        let store = FakeCatalogStore::new();
        let mut bridge = CatalogBridge::open(&store).await;
        store.push_snapshot(nova_and_bloodline());
        bridge.drain();

        bridge.close();
        store.push_snapshot(Vec::new());
        store.push_error("late failure");

        assert_eq!(bridge.drain(), 0);
        assert!(bridge.next_update().await.is_none());
        assert_eq!(titles(&bridge.view()), vec!["Nova", "Bloodline"]);
    }

    #[tokio::test]
    async fn test_close_is_idempotent_and_releases_once() {
        let store = FakeCatalogStore::new();
        let mut bridge = CatalogBridge::open(&store).await;
        let _other = CatalogBridge::open(&store).await;
        assert_eq!(store.active_subscriptions(), 2);

        bridge.close();
        bridge.close();

        assert!(!bridge.is_open());
        assert_eq!(store.active_subscriptions(), 1);
    }

    #[tokio::test]
    async fn test_drop_releases_subscription() {
        let store = FakeCatalogStore::new();
        {
            let _bridge = CatalogBridge::open(&store).await;
            assert_eq!(store.active_subscriptions(), 1);
        }
        assert_eq!(store.active_subscriptions(), 0);
    }

    #[tokio::test]
    async fn test_store_error_is_distinguishable_and_terminal() {
        let store = FakeCatalogStore::new();
        let mut bridge = CatalogBridge::open(&store).await;
        store.push_snapshot(nova_and_bloodline());
        bridge.drain();

        store.push_error("connection lost");
        let view = bridge.next_update().await.unwrap();

        assert_eq!(view.error(), Some("connection lost"));
        assert!(!bridge.is_open());
        assert_eq!(store.active_subscriptions(), 0);

        store.push_snapshot(Vec::new());
        assert!(bridge.next_update().await.is_none());
        assert_eq!(bridge.view().error(), Some("connection lost"));
    }

    #[tokio::test]
    async fn test_subscribe_failure_opens_in_failed_state() {
        let store = FakeCatalogStore::new();
        store.fail_subscribe("permission denied");

        let mut bridge = CatalogBridge::open(&store).await;

        assert!(bridge.view().error().unwrap().contains("permission denied"));
        assert!(!bridge.is_open());
        assert!(bridge.next_update().await.is_none());
    }

    #[tokio::test]
    async fn test_watchers_observe_whole_snapshots() {
        let store = FakeCatalogStore::new();
        let mut bridge = CatalogBridge::open(&store).await;
        let mut watcher = bridge.watch();

        let pushed = store.push_snapshot(nova_and_bloodline());
        bridge.next_update().await.unwrap();

        watcher.changed().await.unwrap();
        let seen = watcher.borrow_and_update().clone();
        assert!(Arc::ptr_eq(seen.snapshot().unwrap(), &pushed));
    }

    #[tokio::test]
    async fn test_listing_reevaluates_on_snapshot_and_filter_change() {
        let store = FakeCatalogStore::new();
        let bridge = CatalogBridge::open(&store).await;
        let filters = Arc::new(FilterContext::new());
        let mut listing = CatalogListing::new(bridge, Arc::clone(&filters));

        assert_eq!(listing.state(), ListingState::Loading);

        store.push_snapshot(nova_and_bloodline());
        match listing.next_change().await.unwrap() {
            ListingState::Results(movies) => assert_eq!(movies.len(), 2),
            other => panic!("expected results, got {:?}", other),
        }

        filters.set_search_text("no");
        match listing.next_change().await.unwrap() {
            ListingState::Results(movies) => {
                let names: Vec<&str> = movies.iter().map(|m| m.title.as_str()).collect();
                assert_eq!(names, vec!["Nova"]);
            }
            other => panic!("expected results, got {:?}", other),
        }

        filters.set_search_text("");
        filters.toggle_genre(Genre::Horror);
        let state = listing.next_change().await.unwrap();
        match state {
            ListingState::Results(movies) => assert_eq!(movies[0].title, "Bloodline"),
            other => panic!("expected results, got {:?}", other),
        }

        listing.close();
        assert_eq!(store.active_subscriptions(), 0);
    }
}
