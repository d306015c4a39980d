use std::time::Duration;

use axum::{
    extract::{Request, State},
    http::Method,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;
use crate::state::AppState;

/// Writes still allowed in demo mode.
const DEMO_WRITE_ALLOWLIST: [&str; 4] = [
    "/api/system/login",
    "/api/system/logout",
    "/front/login/check",
    "/front/register",
];

/// Answer with the timeout envelope once `request_timeout` elapses.
pub async fn request_timeout(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let limit = Duration::from_secs(state.settings.request_timeout);
    let path = request.uri().path().to_owned();

    match tokio::time::timeout(limit, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!("Request to {} timed out after {:?}", path, limit);
            ApiError::Timeout.into_response()
        }
    }
}

/// Demo mode: reject `POST`s outside the allowlist.
pub async fn disallow_modify(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if state.settings.disallow_modify
        && request.method() == Method::POST
        && !DEMO_WRITE_ALLOWLIST.contains(&request.uri().path())
    {
        tracing::debug!("Rejected write to {} in demo mode", request.uri().path());
        return ApiError::no_permission("演示环境不支持修改数据，请下载源码本地部署体验").into_response();
    }
    next.run(request).await
}
