//! Scoreboard row mapper

use userbind_core::entities::ScoreboardRow;
use userbind_core::value_objects::UserId;

use crate::models::ScoreboardRowModel;

impl From<ScoreboardRowModel> for ScoreboardRow {
    fn from(model: ScoreboardRowModel) -> Self {
        ScoreboardRow::new(
            u32::try_from(model.rank).unwrap_or(0),
            UserId::new(model.user_id),
            model.handle,
            model.score,
            u32::try_from(model.accepted).unwrap_or(0),
        )
    }
}
