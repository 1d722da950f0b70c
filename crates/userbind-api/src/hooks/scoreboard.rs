use std::collections::HashMap;

use axum::async_trait;
use userbind_core::{Privileges, User, UserId};
use userbind_service::dto::ScoreboardResponse;
use userbind_service::services::display_name_for;
use userbind_service::{ServiceContext, ServiceResult};

use super::ViewHook;

/// Reveals real names of school students to domain managers
pub struct ScoreboardNameHook;

#[async_trait]
impl ViewHook<ScoreboardResponse> for ScoreboardNameHook {
    fn name(&self) -> &'static str {
        "scoreboard_real_names"
    }

    async fn apply(
        &self,
        ctx: &ServiceContext,
        viewer: Option<&User>,
        view: &mut ScoreboardResponse,
    ) -> ServiceResult<()> {
        let is_manager = viewer.is_some_and(|v| v.privileges.has(Privileges::MANAGE_DOMAIN));
        if !is_manager || view.rows.is_empty() {
            return Ok(());
        }

        let ids: Vec<UserId> = view.rows.iter().map(|r| r.user.user_id).collect();
        let users: HashMap<UserId, User> = ctx
            .user_repo()
            .find_many(&ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        for row in &mut view.rows {
            let Some(user) = users.get(&row.user.user_id) else {
                continue;
            };
            if user.is_school_student && !user.student_name.is_empty() {
                row.user.display_name = Some(display_name_for(user, true));
            }
        }
        Ok(())
    }
}
