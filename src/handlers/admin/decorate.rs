// handlers/admin/decorate.rs - /api/decorate/tabbar/* handlers

use axum::extract::State;

use crate::middleware::{ApiResponse, ApiResult, ValidJson};
use crate::schemas::admin::decorate::{DecorateTabbarOut, DecorateTabbarSaveIn};
use crate::services::TabbarService;
use crate::state::AppState;

/// GET /api/decorate/tabbar/detail
pub async fn tabbar_detail(State(state): State<AppState>) -> ApiResult<DecorateTabbarOut> {
    let tabbar = TabbarService::new(&state).detail().await?;
    Ok(ApiResponse::success(tabbar))
}

/// POST /api/decorate/tabbar/save
///
/// Replaces the whole navigation. Icon URLs may be sent absolute; they are
/// stored relative to the upload domain.
pub async fn tabbar_save(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<DecorateTabbarSaveIn>,
) -> ApiResult<()> {
    TabbarService::new(&state).save(&input).await?;
    Ok(ApiResponse::empty())
}
