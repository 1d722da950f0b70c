//! Student binding handlers
//!
//! Invite management, bulk import, redemption and the forced-binding check.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use userbind_core::DomainError;
use userbind_service::dto::{
    BindingRequiredResponse, CreateInviteRequest, ImportFormResponse, ImportRequest,
    ImportResponse, InviteResponse, ManageInvitesResponse, RedeemConfirmResponse,
};
use userbind_service::{BindingService, ImportService, InviteService, ServiceError};

use crate::extractors::{AdminUser, InviteCodePath, OptionalAuthUser, PageQuery, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Paginated invite list
///
/// GET /user-bind/manage?page=N
pub async fn manage(
    State(state): State<AppState>,
    _admin: AdminUser,
    query: PageQuery,
) -> ApiResult<Json<ManageInvitesResponse>> {
    let view = InviteService::new(state.service_context())
        .manage_page(query.page)
        .await?;
    Ok(Json(view))
}

/// Create a single invite
///
/// POST /user-bind/manage
pub async fn create_invite(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(request): ValidatedJson<CreateInviteRequest>,
) -> ApiResult<Created<Json<InviteResponse>>> {
    let service = InviteService::new(state.service_context());
    let code = service
        .create_invite(&request.student_id, &request.student_name)
        .await?;
    let invite = service
        .get_invite(&code)
        .await?
        .ok_or_else(|| ServiceError::internal("created invite is missing"))?;
    Ok(Created(Json(InviteResponse::from(&invite))))
}

/// Import form
///
/// GET /user-bind/import
pub async fn import_form(_admin: AdminUser) -> Json<ImportFormResponse> {
    Json(ImportFormResponse::default())
}

/// Bulk import, one invite per line
///
/// POST /user-bind/import
pub async fn import(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(request): ValidatedJson<ImportRequest>,
) -> ApiResult<Json<ImportResponse>> {
    let response = ImportService::new(state.service_context())
        .import(&request.text)
        .await?;
    Ok(Json(response))
}

/// Binding check for flagged students
///
/// GET /user-bind/check
pub async fn check(OptionalAuthUser(user): OptionalAuthUser) -> Response {
    match user {
        None => Redirect::to("/login").into_response(),
        Some(user) if user.needs_binding() => {
            Json(BindingRequiredResponse::for_user(&user)).into_response()
        }
        Some(_) => Redirect::to("/").into_response(),
    }
}

/// Delete an invite in any state
///
/// POST /user-bind/delete/:code
pub async fn delete_invite(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(path): Path<InviteCodePath>,
) -> ApiResult<Redirect> {
    InviteService::new(state.service_context())
        .delete_invite(path.code())
        .await?;
    Ok(Redirect::to("/user-bind/manage"))
}

/// Redemption confirmation
///
/// GET /user-bind/:code
pub async fn redeem_confirm(
    State(state): State<AppState>,
    OptionalAuthUser(viewer): OptionalAuthUser,
    Path(path): Path<InviteCodePath>,
) -> ApiResult<Json<RedeemConfirmResponse>> {
    let invite = BindingService::new(state.service_context())
        .validate_redeemable(path.code(), viewer.as_ref())
        .await?;

    Ok(Json(RedeemConfirmResponse {
        code: invite.code,
        student_id: invite.student_id,
        student_name: invite.student_name,
        can_redeem: viewer.is_some(),
    }))
}

/// Redeem an invite for the logged-in account
///
/// POST /user-bind/:code
pub async fn redeem(
    State(state): State<AppState>,
    OptionalAuthUser(viewer): OptionalAuthUser,
    Path(path): Path<InviteCodePath>,
) -> ApiResult<Redirect> {
    let user = viewer.ok_or(DomainError::NotLoggedIn)?;

    BindingService::new(state.service_context())
        .redeem(path.code(), user.id)
        .await?;

    Ok(Redirect::to("/"))
}
