// src/events/mod.rs
//
// Internal Event System - Public API

pub mod bus;
pub mod handlers;
pub mod types;

// ============================================================================
// PUBLIC EXPORTS - Event Types and Bus Only
// ============================================================================

pub use types::DomainEvent;

pub use types::{
    // Catalog
    MovieCreated,
    MovieDeleted,
    MovieUpdated,

    // Session
    SessionEnded,
    SessionStarted,
};

pub use bus::{EventBus, EventLogEntry};

pub use handlers::register_audit_handlers;

/// Initialize a new event bus
pub fn create_event_bus() -> EventBus {
    EventBus::new()
}
