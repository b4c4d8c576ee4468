use std::sync::Arc;

use sea_orm::{ConnectOptions, Database};
use sqlx::postgres::PgPool;

use crate::config::{Config, StorageBackend};
use crate::repositories::{LocalStore, SeaOrmStore, TemplateStore, TripStore};
use crate::services::{PackingService, TemplateService, TripService};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub templates: TemplateService,
    pub trips: TripService,
    pub packing: PackingService,
}

impl AppState {
    /// Create a new AppState for the configured storage backend
    pub async fn new(config: Config) -> Result<Self, AppStateError> {
        match config.storage_backend {
            StorageBackend::Postgres => {
                let database_url = config
                    .database_url
                    .clone()
                    .ok_or(AppStateError::MissingDatabaseUrl)?;

                // Connect to PostgreSQL with SQLx (for migrations)
                let pg_pool = PgPool::connect(&database_url)
                    .await
                    .map_err(|e| AppStateError::Postgres(e.to_string()))?;

                // Run migrations
                sqlx::migrate!("./migrations")
                    .run(&pg_pool)
                    .await
                    .map_err(|e| AppStateError::Migration(e.to_string()))?;
                pg_pool.close().await;

                // Connect to PostgreSQL with SeaORM
                let mut opt = ConnectOptions::new(&database_url);
                opt.max_connections(20)
                    .min_connections(1)
                    .sqlx_logging(true);

                let db = Database::connect(opt)
                    .await
                    .map_err(|e| AppStateError::Postgres(e.to_string()))?;

                let store = Arc::new(SeaOrmStore::new(db));
                Ok(Self::with_stores(config, store.clone(), store))
            }
            StorageBackend::Local => {
                let store = match &config.data_file {
                    Some(path) => LocalStore::open(path)
                        .await
                        .map_err(|e| AppStateError::Local(e.to_string()))?,
                    None => LocalStore::new(),
                };

                let store = Arc::new(store);
                Ok(Self::with_stores(config, store.clone(), store))
            }
        }
    }

    /// Create AppState over the given stores (tests pass an in-memory store)
    pub fn with_stores(
        config: Config,
        trips: Arc<dyn TripStore>,
        templates: Arc<dyn TemplateStore>,
    ) -> Self {
        Self {
            config,
            templates: TemplateService::new(templates.clone(), trips.clone()),
            trips: TripService::new(trips.clone(), templates.clone()),
            packing: PackingService::new(trips, templates),
        }
    }

    /// In-memory state with default configuration
    pub fn in_memory() -> Self {
        let store = Arc::new(LocalStore::new());
        Self::with_stores(Config::in_memory(), store.clone(), store)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppStateError {
    #[error("DATABASE_URL is required for the postgres backend")]
    MissingDatabaseUrl,

    #[error("PostgreSQL connection error: {0}")]
    Postgres(String),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Local store error: {0}")]
    Local(String),
}
