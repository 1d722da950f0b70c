//! Forced-binding gate
//!
//! Flagged school students without an identity are sent to the binding check
//! page until they redeem an invite.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use crate::extractors::{resolve_user, CurrentUser};
use crate::state::AppState;

/// Where unbound students are redirected
pub const BINDING_CHECK_PATH: &str = "/user-bind/check";

/// Paths reachable while unbound
const EXEMPT_PREFIXES: &[&str] = &["/user-bind", "/logout", "/api", "/login", "/register"];

pub fn is_exempt(path: &str) -> bool {
    EXEMPT_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

/// Redirect unbound students, pass everyone else through.
///
/// The resolved account is stored as [`CurrentUser`] so extractors do not
/// authenticate twice.
pub async fn binding_gate(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(user) = resolve_user(&state, req.headers()).await {
        if user.needs_binding() && !is_exempt(req.uri().path()) {
            debug!(user_id = %user.id, path = %req.uri().path(), "Binding required, redirecting");
            return Redirect::to(BINDING_CHECK_PATH).into_response();
        }
        req.extensions_mut().insert(CurrentUser(user));
    }

    next.run(req).await
}
