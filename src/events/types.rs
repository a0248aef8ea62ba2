// src/events/types.rs
//
// Domain events. Each event is an immutable fact that has already occurred.
//
// RULES:
// - Events are facts, not commands
// - Events carry only the data needed to react

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::MovieId;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

macro_rules! impl_domain_event {
    ($event:ident) => {
        impl DomainEvent for $event {
            fn event_id(&self) -> Uuid {
                self.event_id
            }
            fn occurred_at(&self) -> DateTime<Utc> {
                self.occurred_at
            }
            fn event_type(&self) -> &'static str {
                stringify!($event)
            }
        }
    };
}

// ============================================================================
// CATALOG EVENTS
// ============================================================================

/// Emitted after the store accepted a new entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieCreated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub movie_id: MovieId,
    pub title: String,
    pub created_by: String,
}

impl MovieCreated {
    pub fn new(movie_id: MovieId, title: String, created_by: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            movie_id,
            title,
            created_by,
        }
    }
}

impl_domain_event!(MovieCreated);

/// Emitted after an admin edit was stored
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub movie_id: MovieId,
    pub updated_by: String,
}

impl MovieUpdated {
    pub fn new(movie_id: MovieId, updated_by: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            movie_id,
            updated_by,
        }
    }
}

impl_domain_event!(MovieUpdated);

/// Emitted after an irrevocable delete
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDeleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub movie_id: MovieId,
    pub deleted_by: String,
}

impl MovieDeleted {
    pub fn new(movie_id: MovieId, deleted_by: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            movie_id,
            deleted_by,
        }
    }
}

impl_domain_event!(MovieDeleted);

// ============================================================================
// SESSION EVENTS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStarted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub uid: String,
    pub email: String,
}

impl SessionStarted {
    pub fn new(uid: String, email: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            uid,
            email,
        }
    }
}

impl_domain_event!(SessionStarted);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEnded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub uid: String,
}

impl SessionEnded {
    pub fn new(uid: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            uid,
        }
    }
}

impl_domain_event!(SessionEnded);
