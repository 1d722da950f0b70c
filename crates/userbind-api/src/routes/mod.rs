//! Route definitions

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::handlers::{auth, contests, health, home, settings, user_bind, users};
use crate::middleware::{binding_gate, redirect_unbound_after_login};
use crate::response::ApiError;
use crate::state::AppState;

/// All routes behind the binding gate
pub fn create_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .merge(auth_routes(state))
        .merge(user_bind_routes())
        .merge(user_routes())
        .merge(contest_routes())
        .route("/api/settings/account", get(settings::account_settings))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), binding_gate))
}

/// Health check routes, mounted outside the gate
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health::health_check))
}

fn auth_routes(state: &AppState) -> Router<AppState> {
    let login = Router::new()
        .route("/login", post(auth::login))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            redirect_unbound_after_login,
        ));

    Router::new()
        .route("/register", post(auth::register))
        .route("/logout", post(auth::logout))
        .merge(login)
}

/// Invite management, import, redemption and the binding check
fn user_bind_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/user-bind/manage",
            get(user_bind::manage).post(user_bind::create_invite),
        )
        .route(
            "/user-bind/import",
            get(user_bind::import_form).post(user_bind::import),
        )
        .route("/user-bind/check", get(user_bind::check))
        .route("/user-bind/delete/:code", post(user_bind::delete_invite))
        .route(
            "/user-bind/:code",
            get(user_bind::redeem_confirm).post(user_bind::redeem),
        )
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user/:uid", get(users::user_detail))
        .route(
            "/user/:uid/settings",
            get(users::get_settings).patch(users::update_settings),
        )
}

fn contest_routes() -> Router<AppState> {
    Router::new().route("/contest/:id/scoreboard", get(contests::scoreboard))
}

async fn not_found() -> ApiError {
    ApiError::from(userbind_common::AppError::NotFound("route".to_string()))
}
