// src/application/commands/maintenance_commands.rs

use std::sync::Arc;

use log::warn;

use crate::application::dto::DatabaseHealthDto;
use crate::application::error_handling::CommandResult;
use crate::application::state::AppState;
use crate::db::{get_connection, get_database_stats, verify_database_integrity};
use crate::error::{AppError, AppResult};

/// Integrity check plus size and row counts. A failed integrity check is
/// reported in the DTO rather than as an error.
pub async fn check_database(state: &AppState) -> CommandResult<DatabaseHealthDto> {
    let pool = Arc::clone(&state.pool);

    let health = tokio::task::spawn_blocking(move || -> AppResult<DatabaseHealthDto> {
        let conn = get_connection(&pool)?;
        let integrity_error = verify_database_integrity(&conn).err().map(|e| e.to_string());
        if let Some(reason) = &integrity_error {
            warn!("{}", reason);
        }
        let stats = get_database_stats(&conn)?;
        Ok(DatabaseHealthDto::new(stats, integrity_error))
    })
    .await
    .map_err(AppError::from)??;

    Ok(health)
}
