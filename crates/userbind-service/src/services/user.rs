//! User service
//!
//! Read paths for account views and the generic account-settings write.

use tracing::{info, instrument};

use userbind_core::entities::User;
use userbind_core::error::DomainError;
use userbind_core::value_objects::UserId;

use crate::dto::{AccountSettingsResponse, UpdateSettingsRequest, UserDetailResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: UserId) -> ServiceResult<User> {
        Ok(self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?)
    }

    /// Public profile, before view hooks run
    pub async fn user_detail(&self, user_id: UserId) -> ServiceResult<UserDetailResponse> {
        let user = self.get_user(user_id).await?;
        Ok(UserDetailResponse::from(&user))
    }

    #[instrument(skip(self, actor), fields(actor = %actor.id))]
    pub async fn get_settings(
        &self,
        actor: &User,
        target: UserId,
    ) -> ServiceResult<AccountSettingsResponse> {
        Self::check_settings_access(actor, target)?;
        let user = self.get_user(target).await?;
        Ok(AccountSettingsResponse::from(&user))
    }

    /// Merge the given settings into the target account
    #[instrument(skip(self, actor, request), fields(actor = %actor.id))]
    pub async fn update_settings(
        &self,
        actor: &User,
        target: UserId,
        request: UpdateSettingsRequest,
    ) -> ServiceResult<AccountSettingsResponse> {
        Self::check_settings_access(actor, target)?;

        if request.is_empty() {
            let user = self.get_user(target).await?;
            return Ok(AccountSettingsResponse::from(&user));
        }

        let student_id = request.student_id.as_deref().map(str::trim);
        let student_name = request.student_name.as_deref().map(str::trim);

        let user = self
            .ctx
            .user_repo()
            .update_settings(target, student_id, student_name, request.is_school_student)
            .await?;

        info!(
            target = %target,
            is_school_student = user.is_school_student,
            is_bound = user.is_bound(),
            "Account settings changed"
        );

        Ok(AccountSettingsResponse::from(&user))
    }

    fn check_settings_access(actor: &User, target: UserId) -> ServiceResult<()> {
        if actor.can_edit_settings_of(target) {
            Ok(())
        } else if actor.id == target {
            Err(ServiceError::permission_denied("EDIT_OWN_PROFILE"))
        } else {
            Err(ServiceError::permission_denied("MANAGE_DOMAIN"))
        }
    }
}
