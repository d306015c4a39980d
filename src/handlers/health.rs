// handlers/health.rs - GET /api/health handler

use axum::extract::State;
use chrono::Utc;
use serde::Serialize;

use crate::database::DatabaseManager;
use crate::middleware::{ApiResponse, ApiResult};
use crate::normalize::Timestamp;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthOut {
    pub name: &'static str,
    pub version: String,
    pub database: bool,
    pub now: Timestamp,
}

/// Liveness check. Always succeeds; `database` reports whether a ping got
/// through, and `now` comes back in the configured timezone and format.
pub async fn health(State(state): State<AppState>) -> ApiResult<HealthOut> {
    let database = match DatabaseManager::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Database health check failed: {}", e);
            false
        }
    };

    Ok(ApiResponse::success(HealthOut {
        name: env!("CARGO_PKG_NAME"),
        version: state.settings.version.clone(),
        database,
        now: Utc::now().into(),
    }))
}
