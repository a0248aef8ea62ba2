// src/services/catalog_bridge.rs
//
// Catalog Subscription Bridge
//
// Holds exactly one live store subscription for the lifetime of a view and
// publishes every pushed snapshot as the current in-memory catalog.
//
// RULES:
// - Loading until the first snapshot lands (never confused with "empty")
// - Snapshots are applied in emission order, each replacing the previous one whole
// - A store error is terminal: the view turns Failed and the subscription is released
// - No retry here; reopening is the caller's decision
// - After close nothing is applied any more

use log::{debug, info, warn};
use tokio::sync::watch;

use crate::integrations::store::{CatalogStore, CatalogSubscription, Snapshot, StoreEvent};

/// What the bridge currently publishes
#[derive(Debug, Clone)]
pub enum CatalogView {
    Loading,
    Ready(Snapshot),
    Failed(String),
}

impl CatalogView {
    pub fn snapshot(&self) -> Option<&Snapshot> {
        match self {
            CatalogView::Ready(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, CatalogView::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            CatalogView::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

pub struct CatalogBridge;

impl CatalogBridge {
    /// Never fails: a subscribe error is reported through the view
    pub async fn open(store: &dyn CatalogStore) -> BridgeHandle {
        match store.subscribe().await {
            Ok(subscription) => {
                info!("Catalog bridge opened (subscription {})", subscription.id());
                BridgeHandle::new(Some(subscription), CatalogView::Loading)
            }
            Err(e) => {
                warn!("Catalog subscription could not be opened: {}", e);
                BridgeHandle::new(None, CatalogView::Failed(e.to_string()))
            }
        }
    }
}

/// Scoped owner of the subscription. Dropping it closes the subscription.
pub struct BridgeHandle {
    subscription: Option<CatalogSubscription>,
    view: watch::Sender<CatalogView>,
}

impl BridgeHandle {
    fn new(subscription: Option<CatalogSubscription>, initial: CatalogView) -> Self {
        let (view, _) = watch::channel(initial);
        Self { subscription, view }
    }

    pub fn view(&self) -> CatalogView {
        self.view.borrow().clone()
    }

    pub fn watch(&self) -> watch::Receiver<CatalogView> {
        self.view.subscribe()
    }

    /// True until closed or failed
    pub fn is_open(&self) -> bool {
        self.subscription.is_some()
    }

    /// Wait for the next store event and apply it.
    /// Returns the new view, or `None` once the bridge no longer listens.
    pub async fn next_update(&mut self) -> Option<CatalogView> {
        let subscription = self.subscription.as_mut()?;
        let event = match subscription.next().await {
            Some(event) => event,
            None => StoreEvent::Error("Catalog subscription ended".to_string()),
        };
        Some(self.apply(event))
    }

    /// Apply everything already delivered without waiting. Returns how many
    /// events were applied.
    pub fn drain(&mut self) -> usize {
        let mut applied = 0;
        while let Some(event) = self.subscription.as_mut().and_then(|s| s.try_next()) {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    /// Idempotent
    pub fn close(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.close();
            info!("Catalog bridge closed (subscription {})", subscription.id());
        }
    }

    fn apply(&mut self, event: StoreEvent) -> CatalogView {
        let next = match event {
            StoreEvent::Snapshot(snapshot) => {
                debug!("Applying catalog snapshot of {} entries", snapshot.len());
                CatalogView::Ready(snapshot)
            }
            StoreEvent::Error(reason) => {
                warn!("Catalog subscription failed: {}", reason);
                self.close();
                CatalogView::Failed(reason)
            }
        };
        self.view.send_replace(next.clone());
        next
    }
}

impl Drop for BridgeHandle {
    fn drop(&mut self) {
        self.close();
    }
}
