//! Home page

use axum::{extract::State, Json};
use userbind_service::dto::{CurrentUserResponse, HomeResponse};

use crate::extractors::OptionalAuthUser;
use crate::state::AppState;

/// GET /
pub async fn home(
    State(state): State<AppState>,
    OptionalAuthUser(user): OptionalAuthUser,
) -> Json<HomeResponse> {
    Json(HomeResponse {
        name: state.config().app.name.clone(),
        user: user.as_ref().map(CurrentUserResponse::from),
    })
}
