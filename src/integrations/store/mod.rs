// src/integrations/store/mod.rs

pub mod client;
pub mod sqlite;
pub mod subscription;

#[cfg(test)]
pub mod fake;

pub use client::{CatalogStore, Snapshot, StoreEvent};
pub use sqlite::LocalCatalogStore;
pub use subscription::{CatalogSubscription, SubscriptionHub};

#[cfg(test)]
pub use client::MockCatalogStore;
