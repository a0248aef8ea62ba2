// src/config.rs
//
// Runtime configuration, read from the environment.
// Unset variables fall back to logged defaults; malformed ones are errors.

use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use log::{info, warn};

use crate::domain::{DraftRules, DEFAULT_MAX_POSTER_BYTES};
use crate::error::{AppError, AppResult};

pub const DB_PATH_VAR: &str = "CINECRITIC_DB_PATH";
pub const POOL_SIZE_VAR: &str = "CINECRITIC_POOL_SIZE";
pub const MAX_POSTER_BYTES_VAR: &str = "CINECRITIC_MAX_POSTER_BYTES";

const DEFAULT_POOL_SIZE: u32 = 8;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub pool_size: u32,
    pub max_poster_bytes: usize,
}

impl AppConfig {
    pub fn load() -> AppResult<Self> {
        let database_path = match var(DB_PATH_VAR) {
            Some(path) => PathBuf::from(path),
            None => default_database_path()?,
        };

        let pool_size = try_load(POOL_SIZE_VAR, DEFAULT_POOL_SIZE)?;
        if pool_size == 0 {
            return Err(AppError::Config(format!("{} must be at least 1", POOL_SIZE_VAR)));
        }

        Ok(Self {
            database_path,
            pool_size,
            max_poster_bytes: try_load(MAX_POSTER_BYTES_VAR, DEFAULT_MAX_POSTER_BYTES)?,
        })
    }

    /// Same configuration pointed at another database file
    pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = path.into();
        self
    }

    pub fn draft_rules(&self) -> DraftRules {
        DraftRules {
            max_poster_bytes: self.max_poster_bytes,
        }
    }
}

/// `{APP_DATA}/cinecritic/cinecritic.db`
pub fn default_database_path() -> AppResult<PathBuf> {
    let app_data_dir = dirs::data_dir()
        .ok_or_else(|| AppError::Config("Could not determine app data directory".to_string()))?;

    Ok(app_data_dir.join("cinecritic").join("cinecritic.db"))
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn try_load<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr + Display,
    T::Err: Display,
{
    match var(key) {
        Some(raw) => raw.trim().parse().map_err(|e| {
            warn!("Invalid {key} value: {e}");
            AppError::Config(format!("Invalid {}: {}", key, e))
        }),
        None => {
            info!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}
