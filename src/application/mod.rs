// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - This layer sits above services and integrations
// - It provides the boundary between the UI (CLI) and the services
// - It translates between DTOs and domain entities
// - No error crosses this boundary unconverted

pub mod commands;
pub mod dto;
pub mod error_handling;
pub mod routes;
pub mod state;

pub use commands::*;
pub use dto::*;
pub use error_handling::{CommandResult, ErrorResponse, ErrorType};
pub use routes::{resolve_admin_route, AdminPage, AdminRoute, RouteDecision};
pub use state::AppState;
