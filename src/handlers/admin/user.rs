// handlers/admin/user.rs - /api/user/* handlers

use axum::extract::State;

use crate::middleware::{ApiResponse, ApiResult, ValidJson, ValidQuery};
use crate::schemas::admin::user::{UserDetailIn, UserEditIn, UserInfoOut, UserListIn};
use crate::schemas::{PageParams, PageResult};
use crate::services::AdminUserService;
use crate::state::AppState;

/// GET /api/user/list - Paged user search
///
/// Query: `pageNo`, `pageSize`, `keyword`, `channel`, `startTime`, `endTime`.
/// `createTime` and `lastLoginTime` of each row are rendered in the
/// configured timezone.
pub async fn user_list(
    State(state): State<AppState>,
    ValidQuery(page): ValidQuery<PageParams>,
    ValidQuery(filter): ValidQuery<UserListIn>,
) -> ApiResult<PageResult<UserInfoOut>> {
    let result = AdminUserService::new(&state).list(&page, &filter).await?;
    Ok(ApiResponse::success(result))
}

/// GET /api/user/detail?id=
pub async fn user_detail(
    State(state): State<AppState>,
    ValidQuery(input): ValidQuery<UserDetailIn>,
) -> ApiResult<UserInfoOut> {
    let user = AdminUserService::new(&state).detail(input.id).await?;
    Ok(ApiResponse::success(user))
}

/// POST /api/user/edit - Change one field: `{"id", "field", "value"}`
pub async fn user_edit(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<UserEditIn>,
) -> ApiResult<()> {
    AdminUserService::new(&state).edit(&input).await?;
    Ok(ApiResponse::empty())
}
