// src/integrations/mod.rs
//
// External collaborators, each behind a trait
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - Services depend on the traits, never on a concrete implementation

pub mod identity;
pub mod store;

pub use identity::{IdentityProvider, LocalIdentityProvider};
pub use store::{
    CatalogStore, CatalogSubscription, LocalCatalogStore, Snapshot, StoreEvent, SubscriptionHub,
};
