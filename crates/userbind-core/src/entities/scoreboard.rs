//! Scoreboard rows produced by the contest pipeline

use serde::Serialize;

use crate::value_objects::UserId;

/// User column of a scoreboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreboardUserCell {
    pub user_id: UserId,
    pub handle: String,
    /// Overrides the handle when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreboardRow {
    pub rank: u32,
    pub user: ScoreboardUserCell,
    pub score: i64,
    pub accepted: u32,
}

impl ScoreboardRow {
    pub fn new(rank: u32, user_id: UserId, handle: String, score: i64, accepted: u32) -> Self {
        Self {
            rank,
            user: ScoreboardUserCell {
                user_id,
                handle,
                display_name: None,
            },
            score,
            accepted,
        }
    }
}
