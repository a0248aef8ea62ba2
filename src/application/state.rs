// src/application/state.rs

use std::sync::Arc;

use log::info;

use crate::config::AppConfig;
use crate::db::{open_database, ConnectionPool};
use crate::error::AppResult;
use crate::events::{create_event_bus, register_audit_handlers, EventBus};
use crate::integrations::{CatalogStore, LocalCatalogStore, LocalIdentityProvider};
use crate::repositories::{SqliteAccountRepository, SqliteMovieRepository};
use crate::services::{AdminService, FilterContext};

/// Application state shared by every command.
/// All fields are Arc-wrapped; collaborators are built once in `initialize`.
pub struct AppState {
    pub config: AppConfig,
    pub pool: Arc<ConnectionPool>,
    pub event_bus: Arc<EventBus>,
    pub store: Arc<dyn CatalogStore>,
    pub identity: Arc<LocalIdentityProvider>,
    pub admin_service: Arc<AdminService>,
    pub filters: Arc<FilterContext>,
}

impl AppState {
    pub fn initialize(config: AppConfig) -> AppResult<Self> {
        info!("Opening catalog at {}", config.database_path.display());

        let pool = Arc::new(open_database(&config.database_path, config.pool_size)?);

        let movie_repo = Arc::new(SqliteMovieRepository::new(Arc::clone(&pool)));
        let account_repo = Arc::new(SqliteAccountRepository::new(Arc::clone(&pool)));

        let store: Arc<dyn CatalogStore> = Arc::new(LocalCatalogStore::open(movie_repo)?);
        let identity = Arc::new(LocalIdentityProvider::new(account_repo));
        let event_bus = Arc::new(create_event_bus());
        register_audit_handlers(&event_bus);

        let admin_service = Arc::new(AdminService::new(
            Arc::clone(&store),
            identity.clone(),
            Arc::clone(&event_bus),
            config.draft_rules(),
        ));

        Ok(Self {
            config,
            pool,
            event_bus,
            store,
            identity,
            admin_service,
            filters: Arc::new(FilterContext::new()),
        })
    }
}
