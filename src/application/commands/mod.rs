// src/application/commands/mod.rs
//
// Command Handlers
//
// ARCHITECTURE:
// - Commands are thin adapters between the UI and services
// - Commands accept DTOs, return DTOs
// - Commands convert every error into an ErrorResponse
// - Commands NEVER contain business logic

pub mod admin_commands;
pub mod auth_commands;
pub mod catalog_commands;
pub mod maintenance_commands;

#[cfg(test)]
pub(crate) mod test_support;

pub use admin_commands::*;
pub use auth_commands::*;
pub use catalog_commands::*;
pub use maintenance_commands::*;
