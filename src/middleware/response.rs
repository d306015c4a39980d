use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::ApiError;
use crate::normalize::{Node, Normalizer};
use crate::state::AppState;

/// Handler result awaiting the success envelope.
///
/// The tree is built here, while the handler's own types are still at hand;
/// [`unified_resp`] localizes timestamps and writes the body.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self { data }
    }
}

impl ApiResponse<()> {
    /// Success with `data: []`.
    pub fn empty() -> Self {
        Self { data: () }
    }
}

/// Tree carried from the handler to [`unified_resp`] in response extensions.
#[derive(Debug, Clone)]
struct PendingData(Node);

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        match Normalizer::to_node(&self.data) {
            Ok(node) => {
                let mut response = StatusCode::OK.into_response();
                response.extensions_mut().insert(PendingData(node));
                response
            }
            Err(e) => ApiError::from(e).into_response(),
        }
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, ApiError>;

/// Render pending handler results as success envelopes.
///
/// The inner service is awaited exactly once. Responses without a pending
/// tree (errors, static files) pass through, except bare 405s from the
/// router, which get the method error envelope.
pub async fn unified_resp(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;

    if let Some(PendingData(node)) = response.extensions_mut().remove::<PendingData>() {
        return state.normalizer.envelope(node).into_response();
    }
    if response.status() == StatusCode::METHOD_NOT_ALLOWED {
        return ApiError::RequestMethod.into_response();
    }
    response
}
