//! Post-login redirect
//!
//! Layered on `POST /login` only.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::Cookie;
use tracing::info;
use userbind_service::AuthService;

use super::binding_gate::BINDING_CHECK_PATH;
use crate::extractors::SESSION_COOKIE;
use crate::state::AppState;

/// Session token set by the response, if any
fn session_from_response(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| Cookie::parse(value).ok())
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
}

/// Send a freshly logged-in unbound student to the binding check page,
/// keeping the session cookie from the login response.
pub async fn redirect_unbound_after_login(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let response = next.run(req).await;
    if !response.status().is_success() {
        return response;
    }

    let Some(token) = session_from_response(response.headers()) else {
        return response;
    };
    let Ok(user) = AuthService::new(state.service_context())
        .authenticate(&token)
        .await
    else {
        return response;
    };
    if !user.needs_binding() {
        return response;
    }

    info!(user_id = %user.id, "Logged-in account must bind a student identity");
    let mut redirect = Redirect::to(BINDING_CHECK_PATH).into_response();
    for cookie in response.headers().get_all(header::SET_COOKIE) {
        redirect
            .headers_mut()
            .append(header::SET_COOKIE, cookie.clone());
    }
    redirect
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_session_from_response() {
        let mut headers = HeaderMap::new();
        headers.append(header::SET_COOKIE, HeaderValue::from_static("theme=dark; Path=/"));
        headers.append(
            header::SET_COOKIE,
            HeaderValue::from_static("sid=tok123; Path=/; HttpOnly"),
        );
        assert_eq!(session_from_response(&headers).as_deref(), Some("tok123"));
    }

    #[test]
    fn test_no_session_cookie() {
        assert!(session_from_response(&HeaderMap::new()).is_none());
    }
}
