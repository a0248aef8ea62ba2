// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO invariant enforcement
// - NO event emission
// - Explicit SQL only

pub mod account_repository;
pub mod movie_repository;

pub use account_repository::{AccountRepository, AdminAccount, SqliteAccountRepository};
pub use movie_repository::{MovieRepository, SqliteMovieRepository};
