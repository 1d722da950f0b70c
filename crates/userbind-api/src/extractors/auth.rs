//! Authentication extractors
//!
//! The access token is read from the `Authorization: Bearer` header, falling
//! back to the `sid` session cookie.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, HeaderMap},
};
use axum_extra::{
    extract::cookie::CookieJar,
    headers::{authorization::Bearer, Authorization, HeaderMapExt},
};
use userbind_core::{Privileges, User};
use userbind_service::{AuthService, ServiceError};

use crate::response::ApiError;
use crate::state::AppState;

/// Session cookie carrying the access token
pub const SESSION_COOKIE: &str = "sid";

/// Account resolved earlier in the request, stored in request extensions
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Access token from the Authorization header, else from the session cookie
pub fn request_token(headers: &HeaderMap) -> Option<String> {
    if let Some(Authorization(bearer)) = headers.typed_get::<Authorization<Bearer>>() {
        return Some(bearer.token().to_string());
    }
    CookieJar::from_headers(headers)
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
}

/// Resolve the caller's account. Invalid tokens count as anonymous.
pub async fn resolve_user(state: &AppState, headers: &HeaderMap) -> Option<User> {
    let token = request_token(headers)?;
    match AuthService::new(state.service_context())
        .authenticate(&token)
        .await
    {
        Ok(user) => Some(user),
        Err(ServiceError::App(e)) if e.is_auth_failure() => {
            tracing::warn!(error = %e, "Rejected access token");
            None
        }
        Err(e) => {
            tracing::error!(error = %e, "Session lookup failed");
            None
        }
    }
}

/// Authenticated account; rejects anonymous requests with 401
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(CurrentUser(user)) = parts.extensions.get::<CurrentUser>() {
            return Ok(AuthUser(user.clone()));
        }

        let token = request_token(&parts.headers).ok_or(ApiError::MissingAuth)?;
        let app_state = AppState::from_ref(state);

        let user = AuthService::new(app_state.service_context())
            .authenticate(&token)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Invalid access token");
                ApiError::from(e)
            })?;

        Ok(AuthUser(user))
    }
}

/// Authenticated account if any
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<User>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(CurrentUser(user)) = parts.extensions.get::<CurrentUser>() {
            return Ok(OptionalAuthUser(Some(user.clone())));
        }

        let app_state = AppState::from_ref(state);
        Ok(OptionalAuthUser(
            resolve_user(&app_state, &parts.headers).await,
        ))
    }
}

/// Account holding `MANAGE_DOMAIN`.
///
/// Everyone else, anonymous callers included, is refused with 403 before the
/// handler runs.
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let OptionalAuthUser(user) = OptionalAuthUser::from_request_parts(parts, state).await?;

        match user {
            Some(user) if user.privileges.has(Privileges::MANAGE_DOMAIN) => Ok(AdminUser(user)),
            _ => Err(ServiceError::permission_denied("MANAGE_DOMAIN").into()),
        }
    }
}
