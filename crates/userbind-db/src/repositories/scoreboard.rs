//! PostgreSQL implementation of ScoreboardRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use userbind_core::entities::ScoreboardRow;
use userbind_core::traits::{RepoResult, ScoreboardRepository};

use crate::models::ScoreboardRowModel;

use super::error::map_db_error;

/// Reads the scoreboard materialized by the contest pipeline
#[derive(Clone)]
pub struct PgScoreboardRepository {
    pool: PgPool,
}

impl PgScoreboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScoreboardRepository for PgScoreboardRepository {
    #[instrument(skip(self))]
    async fn find_rows(&self, contest_id: i64) -> RepoResult<Vec<ScoreboardRow>> {
        let rows = sqlx::query_as::<_, ScoreboardRowModel>(
            r#"
            SELECT s.rank, s.user_id, u.handle, s.score, s.accepted
            FROM contest_scoreboard s
            JOIN users u ON u.id = s.user_id
            WHERE s.contest_id = $1
            ORDER BY s.rank ASC, s.user_id ASC
            "#,
        )
        .bind(contest_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(ScoreboardRow::from).collect())
    }
}
