//! User handlers
//!
//! Profile view and account settings.

use axum::{
    extract::{Path, State},
    Json,
};
use userbind_service::dto::{AccountSettingsResponse, UpdateSettingsRequest, UserDetailResponse};
use userbind_service::UserService;

use crate::extractors::{AuthUser, OptionalAuthUser, UserIdPath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// User detail view
///
/// GET /user/:uid
pub async fn user_detail(
    State(state): State<AppState>,
    OptionalAuthUser(viewer): OptionalAuthUser,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Json<UserDetailResponse>> {
    let ctx = state.service_context();
    let mut view = UserService::new(ctx).user_detail(path.user_id()?).await?;
    state
        .hooks()
        .run_user_detail(ctx, viewer.as_ref(), &mut view)
        .await?;
    Ok(Json(view))
}

/// Current account settings
///
/// GET /user/:uid/settings
pub async fn get_settings(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Json<AccountSettingsResponse>> {
    let settings = UserService::new(state.service_context())
        .get_settings(&actor, path.user_id()?)
        .await?;
    Ok(Json(settings))
}

/// Write account settings
///
/// PATCH /user/:uid/settings
pub async fn update_settings(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(path): Path<UserIdPath>,
    ValidatedJson(request): ValidatedJson<UpdateSettingsRequest>,
) -> ApiResult<Json<AccountSettingsResponse>> {
    let settings = UserService::new(state.service_context())
        .update_settings(&actor, path.user_id()?, request)
        .await?;
    Ok(Json(settings))
}
