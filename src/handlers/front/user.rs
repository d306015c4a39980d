// handlers/front/user.rs - /front/user/* handlers

use axum::extract::State;

use crate::middleware::{ApiResponse, ApiResult, CurrentUser, ValidJson};
use crate::schemas::front::user::{UserCenterOut, UserChangePwdIn, UserEditIn, UserInfoOut};
use crate::services::FrontUserService;
use crate::state::AppState;

/// GET /front/user/center
pub async fn user_center(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<UserCenterOut> {
    let center = FrontUserService::new(&state).center(user.id).await?;
    Ok(ApiResponse::success(center))
}

/// GET /front/user/info
pub async fn user_info(State(state): State<AppState>, user: CurrentUser) -> ApiResult<UserInfoOut> {
    let info = FrontUserService::new(&state).info(user.id).await?;
    Ok(ApiResponse::success(info))
}

/// POST /front/user/edit - `{"field", "value"}` on the caller's own account
pub async fn user_edit(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidJson(input): ValidJson<UserEditIn>,
) -> ApiResult<()> {
    FrontUserService::new(&state).edit(user.id, &input).await?;
    Ok(ApiResponse::empty())
}

/// POST /front/user/changePwd
pub async fn user_change_pwd(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidJson(input): ValidJson<UserChangePwdIn>,
) -> ApiResult<()> {
    FrontUserService::new(&state).change_pwd(user.id, &input).await?;
    Ok(ApiResponse::empty())
}
