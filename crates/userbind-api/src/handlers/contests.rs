//! Contest handlers

use axum::{
    extract::{Path, State},
    Json,
};
use userbind_service::dto::ScoreboardResponse;
use userbind_service::ScoreboardService;

use crate::extractors::{ContestIdPath, OptionalAuthUser};
use crate::response::ApiResult;
use crate::state::AppState;

/// Contest scoreboard
///
/// GET /contest/:id/scoreboard
pub async fn scoreboard(
    State(state): State<AppState>,
    OptionalAuthUser(viewer): OptionalAuthUser,
    Path(path): Path<ContestIdPath>,
) -> ApiResult<Json<ScoreboardResponse>> {
    let ctx = state.service_context();
    let mut view = ScoreboardService::new(ctx)
        .scoreboard(path.contest_id()?)
        .await?;
    state
        .hooks()
        .run_scoreboard(ctx, viewer.as_ref(), &mut view)
        .await?;
    Ok(Json(view))
}
