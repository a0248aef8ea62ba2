// src/db/mod.rs
//
// Database module
//
// Provides:
// - Connection pooling
// - Schema migrations
// - Database utilities

pub mod connection;
pub mod migrations;

pub use connection::{create_connection_pool, get_connection, ConnectionPool, PooledConn};

pub use migrations::{
    get_database_stats, initialize_database, verify_database_integrity, DatabaseStats,
};

use std::path::Path;

use crate::error::AppResult;

/// Pool over `db_path` with the schema applied
pub fn open_database(db_path: &Path, max_size: u32) -> AppResult<ConnectionPool> {
    let pool = create_connection_pool(db_path, max_size)?;
    {
        let conn = get_connection(&pool)?;
        initialize_database(&conn)?;
    }
    Ok(pool)
}
