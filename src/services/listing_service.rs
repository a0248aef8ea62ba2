// src/services/listing_service.rs
//
// Public listing: combines the bridge's catalog with the shared filter
// context and derives what the listing page shows.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;

use super::catalog_bridge::{BridgeHandle, CatalogView};
use super::filter_context::{FilterContext, FilterState};
use crate::domain::{filter_catalog, Movie};

pub const EMPTY_CATALOG_MESSAGE: &str = "No movies found";
pub const NO_MATCHES_MESSAGE: &str = "No movies match your filters";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum ListingState {
    Loading,
    Failed(String),
    /// The store holds no entries at all
    EmptyCatalog,
    /// Entries exist but none pass the current filters
    NoMatches,
    Results(Vec<Movie>),
}

impl ListingState {
    /// Placeholder text for the non-result states
    pub fn message(&self) -> Option<&str> {
        match self {
            ListingState::Failed(reason) => Some(reason),
            ListingState::EmptyCatalog => Some(EMPTY_CATALOG_MESSAGE),
            ListingState::NoMatches => Some(NO_MATCHES_MESSAGE),
            ListingState::Loading | ListingState::Results(_) => None,
        }
    }
}

/// Pure derivation of the listing from its two inputs
pub fn listing_state(view: &CatalogView, filters: &FilterState) -> ListingState {
    match view {
        CatalogView::Loading => ListingState::Loading,
        CatalogView::Failed(reason) => ListingState::Failed(reason.clone()),
        CatalogView::Ready(snapshot) if snapshot.is_empty() => ListingState::EmptyCatalog,
        CatalogView::Ready(snapshot) => {
            let visible = filter_catalog(snapshot, &filters.search_text, &filters.criteria);
            if visible.is_empty() {
                ListingState::NoMatches
            } else {
                ListingState::Results(visible.into_iter().cloned().collect())
            }
        }
    }
}

/// A live listing: re-evaluates whenever a snapshot lands or the filters change
pub struct CatalogListing {
    bridge: BridgeHandle,
    filters: Arc<FilterContext>,
    filter_changes: watch::Receiver<FilterState>,
}

impl CatalogListing {
    pub fn new(bridge: BridgeHandle, filters: Arc<FilterContext>) -> Self {
        let filter_changes = filters.watch();
        Self {
            bridge,
            filters,
            filter_changes,
        }
    }

    pub fn state(&self) -> ListingState {
        listing_state(&self.bridge.view(), &self.filters.snapshot())
    }

    pub fn filters(&self) -> &FilterContext {
        &self.filters
    }

    /// Suspend until either input changes, then return the new state.
    /// `None` once the bridge stopped listening and the filters cannot change.
    pub async fn next_change(&mut self) -> Option<ListingState> {
        if !self.bridge.is_open() {
            self.filter_changes.changed().await.ok()?;
            self.filter_changes.borrow_and_update();
            return Some(self.state());
        }

        let filters_changed = tokio::select! {
            update = self.bridge.next_update() => update.map(|_| false),
            changed = self.filter_changes.changed() => changed.ok().map(|_| true),
        }?;

        if filters_changed {
            self.filter_changes.borrow_and_update();
        }
        Some(self.state())
    }

    pub fn close(&mut self) {
        self.bridge.close();
    }
}
