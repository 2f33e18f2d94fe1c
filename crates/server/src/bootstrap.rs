use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use thiserror::Error;
use tracing::info;
use weddy_core::cache::{CacheClient, MemoryCache};
use weddy_core::config::{AppConfig, CacheBackend, ConfigError, LoadOptions};
use weddy_db::{connect_with_config, migrations, DbPool, SqlVenueSource};

use crate::health::{self, HealthState};
use crate::images::{self, ImageState};
use crate::recommend::{self, RecommendState};

pub struct Application {
    pub config: AppConfig,
    pub db_pool: DbPool,
    pub cache: Option<Arc<dyn CacheClient>>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("database connection failed: {0}")]
    DatabaseConnect(#[source] sqlx::Error),
    #[error("database migration failed: {0}")]
    Migration(#[source] sqlx::migrate::MigrateError),
}

pub async fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config).await
}

pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let db_pool =
        connect_with_config(&config.database).await.map_err(BootstrapError::DatabaseConnect)?;
    info!(
        event_name = "system.bootstrap.database_connected",
        correlation_id = "bootstrap",
        "database connection established"
    );

    migrations::run_pending(&db_pool).await.map_err(BootstrapError::Migration)?;
    info!(
        event_name = "system.bootstrap.migrations_applied",
        correlation_id = "bootstrap",
        "database migrations applied"
    );

    let cache = cache_client(&config);
    info!(
        event_name = "system.bootstrap.cache_selected",
        correlation_id = "bootstrap",
        backend = ?config.cache.backend,
        "cache backend selected"
    );

    Ok(Application { config, db_pool, cache })
}

/// `None` when caching is disabled; health then reports the cache as
/// `disabled` instead of probing a no-op client.
pub fn cache_client(config: &AppConfig) -> Option<Arc<dyn CacheClient>> {
    match config.cache.backend {
        CacheBackend::Disabled => None,
        CacheBackend::Memory => {
            let ttl = Duration::from_secs(config.cache.ttl_secs);
            Some(Arc::new(MemoryCache::new(Some(ttl))))
        }
    }
}

impl Application {
    pub fn router(&self) -> Router {
        Router::new()
            .merge(health::router(HealthState::new(self.db_pool.clone(), self.cache.clone())))
            .merge(images::router(ImageState::new(self.config.images.base_path.clone())))
            .merge(recommend::router(RecommendState::new(
                SqlVenueSource::new(self.db_pool.clone()),
                self.config.recommend.default_limit,
            )))
    }
}
