//! Contest scoreboard reads

use tracing::instrument;

use crate::dto::ScoreboardResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct ScoreboardService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ScoreboardService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Rows ordered by rank, before view hooks run
    #[instrument(skip(self))]
    pub async fn scoreboard(&self, contest_id: i64) -> ServiceResult<ScoreboardResponse> {
        let rows = self.ctx.scoreboard_repo().find_rows(contest_id).await?;
        Ok(ScoreboardResponse { contest_id, rows })
    }
}
