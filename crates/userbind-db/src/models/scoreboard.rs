//! Scoreboard row model (joined with users for the handle)

use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct ScoreboardRowModel {
    pub rank: i32,
    pub user_id: i64,
    pub handle: String,
    pub score: i64,
    pub accepted: i32,
}
