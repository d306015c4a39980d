// handlers/front/login.rs - POST /front/register handler

use axum::extract::State;

use crate::middleware::{ApiResponse, ApiResult, ValidJson};
use crate::schemas::front::login::FrontRegisterIn;
use crate::services::FrontUserService;
use crate::state::AppState;

/// POST /front/register - `{"username", "password", "client"}`
///
/// Allowed in demo mode.
pub async fn register(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<FrontRegisterIn>,
) -> ApiResult<()> {
    FrontUserService::new(&state).register(&input).await?;
    Ok(ApiResponse::empty())
}
