//! Authentication handlers
//!
//! Endpoints for registration, login and logout.

use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use userbind_service::dto::{AuthResponse, LoginRequest, RegisterRequest};
use userbind_service::AuthService;

use crate::extractors::{AuthUser, ValidatedJson, SESSION_COOKIE};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Register a new account
///
/// POST /register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<Json<AuthResponse>>> {
    let service = AuthService::new(state.service_context());
    let response = service.register(request).await?;
    Ok(Created(Json(response)))
}

/// Login with handle and password; sets the session cookie
///
/// POST /login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<(CookieJar, Json<AuthResponse>)> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request).await?;
    let jar = jar.add(session_cookie(response.access_token.clone()));
    Ok((jar, Json(response)))
}

/// Clear the session cookie
///
/// POST /logout
pub async fn logout(AuthUser(user): AuthUser, jar: CookieJar) -> (CookieJar, NoContent) {
    tracing::info!(user_id = %user.id, "User logged out");
    (
        jar.remove(Cookie::build(SESSION_COOKIE).path("/")),
        NoContent,
    )
}
