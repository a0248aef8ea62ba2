// src/lib.rs
// CineCritic - movie review catalog
//
// Architecture:
// - Domain-centric: entities, invariants and the pure filter engine live in `domain`
// - Collaborators behind traits: the catalog store and the identity provider
// - Event-driven: services announce writes and session changes on the bus
// - Explicit: subscriptions are handles that are opened and closed by their owner
// - Application Layer: DTO boundary used by the CLI

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;
pub mod integrations;

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    filter_catalog,
    movie_matches,
    validate_movie,
    validate_movie_draft,
    CensorRating,
    Credentials,
    DraftRules,
    // Filtering
    FilterCriteria,
    Genre,
    Language,
    // Movie
    Movie,
    MovieDraft,
    MovieField,
    MovieFields,
    MovieId,
    MovieUpdate,
    PosterImage,
    // Sessions
    Principal,
    ValidationErrors,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Configuration
// ============================================================================

pub use config::AppConfig;

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus,
    register_audit_handlers,
    DomainEvent,
    EventBus,
    EventLogEntry,
    MovieCreated,
    MovieDeleted,
    MovieUpdated,
    SessionEnded,
    SessionStarted,
};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{open_database, ConnectionPool};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{
    AccountRepository,
    MovieRepository,
    SqliteAccountRepository,
    SqliteMovieRepository,
};

// ============================================================================
// PUBLIC API - Integrations
// ============================================================================

pub use integrations::{
    CatalogStore,
    CatalogSubscription,
    IdentityProvider,
    LocalCatalogStore,
    LocalIdentityProvider,
    Snapshot,
    StoreEvent,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    listing_state,
    // Admin write path
    AdminService,
    BridgeHandle,
    // Subscription bridge
    CatalogBridge,
    CatalogListing,
    CatalogView,
    DeleteConfirmation,
    DeleteOutcome,
    // Shared filter context
    FilterContext,
    FilterState,
    // Listing
    ListingState,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{AppState, ErrorResponse};
