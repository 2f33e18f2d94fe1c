use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;
use tracing::warn;
use weddy_core::cache::CacheClient;
use weddy_db::DbPool;

const CACHE_PROBE_KEY: &str = "health_check";
const CACHE_PROBE_TTL: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct HealthState {
    db_pool: DbPool,
    cache: Option<Arc<dyn CacheClient>>,
}

impl HealthState {
    pub fn new(db_pool: DbPool, cache: Option<Arc<dyn CacheClient>>) -> Self {
        Self { db_pool, cache }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceStatus {
    Connected,
    Failed,
    Disabled,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ServiceCheck {
    pub status: ServiceStatus,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Services {
    pub database: ServiceCheck,
    pub cache: ServiceCheck,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LivenessResponse {
    pub status: &'static str,
    pub message: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub services: Services,
    pub checked_at: String,
}

pub fn router(state: HealthState) -> Router {
    Router::new()
        .route("/health", get(liveness))
        .route("/health/db", get(dependencies))
        .with_state(state)
}

pub async fn liveness() -> Json<LivenessResponse> {
    Json(LivenessResponse { status: "healthy", message: "API is running" })
}

pub async fn dependencies(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let database = database_check(&state.db_pool).await;
    let cache = match &state.cache {
        Some(cache) => cache_check(cache.as_ref()).await,
        None => ServiceCheck {
            status: ServiceStatus::Disabled,
            message: "Cache backend is disabled".to_string(),
        },
    };

    let healthy = database.status != ServiceStatus::Failed && cache.status != ServiceStatus::Failed;
    if !healthy {
        warn!(
            event_name = "system.health.degraded",
            correlation_id = "health",
            database = ?database.status,
            cache = ?cache.status,
            "dependency health check failed"
        );
    }

    let payload = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" },
        services: Services { database, cache },
        checked_at: Utc::now().to_rfc3339(),
    };

    let status_code = if healthy { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status_code, Json(payload))
}

async fn database_check(pool: &DbPool) -> ServiceCheck {
    match weddy_db::ping(pool).await {
        Ok(()) => ServiceCheck {
            status: ServiceStatus::Connected,
            message: "Database connection successful".to_string(),
        },
        Err(error) => ServiceCheck {
            status: ServiceStatus::Failed,
            message: format!("Database connection failed: {error}"),
        },
    }
}

async fn cache_check(cache: &dyn CacheClient) -> ServiceCheck {
    let probe = json!({"status": "ok"});
    let round_trip = async {
        cache.set(CACHE_PROBE_KEY, probe.clone(), Some(CACHE_PROBE_TTL)).await?;
        cache.get(CACHE_PROBE_KEY).await
    };

    match round_trip.await {
        Ok(Some(value)) if value == probe => ServiceCheck {
            status: ServiceStatus::Connected,
            message: "Cache connection successful".to_string(),
        },
        Ok(_) => ServiceCheck {
            status: ServiceStatus::Failed,
            message: "Cache read/write test failed".to_string(),
        },
        Err(error) => ServiceCheck {
            status: ServiceStatus::Failed,
            message: format!("Cache connection failed: {error}"),
        },
    }
}
