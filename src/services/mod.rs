// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod admin_service;
pub mod catalog_bridge;
pub mod filter_context;
pub mod listing_service;

#[cfg(test)]
mod catalog_bridge_tests;

// Re-export all services and their types
pub use admin_service::{AdminService, DeleteConfirmation, DeleteOutcome};

pub use catalog_bridge::{BridgeHandle, CatalogBridge, CatalogView};

pub use filter_context::{FilterContext, FilterState};

pub use listing_service::{
    listing_state, CatalogListing, ListingState, EMPTY_CATALOG_MESSAGE, NO_MATCHES_MESSAGE,
};
