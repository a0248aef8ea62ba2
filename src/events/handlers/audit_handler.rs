// src/events/handlers/audit_handler.rs
//
// Audit trail for admin activity.
//
// Every catalog write and session change is written as one line under the
// `cinecritic::audit` log target, so it can be routed separately
// (e.g. RUST_LOG=cinecritic::audit=info).

use log::info;

use crate::events::{
    DomainEvent, EventBus, MovieCreated, MovieDeleted, MovieUpdated, SessionEnded,
    SessionStarted,
};

pub const AUDIT_TARGET: &str = "cinecritic::audit";

pub fn register_audit_handlers(bus: &EventBus) {
    bus.subscribe::<MovieCreated, _>(|event| record(event, &movie_created_line(event)));
    bus.subscribe::<MovieUpdated, _>(|event| record(event, &movie_updated_line(event)));
    bus.subscribe::<MovieDeleted, _>(|event| record(event, &movie_deleted_line(event)));
    bus.subscribe::<SessionStarted, _>(|event| record(event, &session_started_line(event)));
    bus.subscribe::<SessionEnded, _>(|event| record(event, &session_ended_line(event)));
}

fn record<E: DomainEvent>(event: &E, line: &str) {
    info!(
        target: AUDIT_TARGET,
        "{} {} {}",
        event.occurred_at().to_rfc3339(),
        event.event_type(),
        line
    );
}

fn movie_created_line(event: &MovieCreated) -> String {
    format!(
        "{} added '{}' ({})",
        event.created_by, event.title, event.movie_id
    )
}

fn movie_updated_line(event: &MovieUpdated) -> String {
    format!("{} edited {}", event.updated_by, event.movie_id)
}

fn movie_deleted_line(event: &MovieDeleted) -> String {
    format!("{} deleted {}", event.deleted_by, event.movie_id)
}

fn session_started_line(event: &SessionStarted) -> String {
    format!("{} signed in (uid {})", event.email, event.uid)
}

fn session_ended_line(event: &SessionEnded) -> String {
    format!("uid {} signed out", event.uid)
}
