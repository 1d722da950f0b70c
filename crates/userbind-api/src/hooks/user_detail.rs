use axum::async_trait;
use userbind_core::User;
use userbind_service::dto::{BindInfo, UserDetailResponse};
use userbind_service::{ServiceContext, ServiceResult, UserService};

use super::ViewHook;

/// Shows the bound identity on the profile of flagged school students
pub struct UserDetailBindHook;

#[async_trait]
impl ViewHook<UserDetailResponse> for UserDetailBindHook {
    fn name(&self) -> &'static str {
        "user_detail_bind"
    }

    async fn apply(
        &self,
        ctx: &ServiceContext,
        _viewer: Option<&User>,
        view: &mut UserDetailResponse,
    ) -> ServiceResult<()> {
        if !view.is_school_student {
            return Ok(());
        }
        let user = UserService::new(ctx).get_user(view.id).await?;
        view.bind = Some(BindInfo::from_user(&user));
        Ok(())
    }
}
