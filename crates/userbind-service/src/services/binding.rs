//! Binding rules
//!
//! Ties a student identity to an account, either directly or by redeeming an
//! invite code.

use chrono::Utc;
use tracing::{info, instrument, warn};

use userbind_core::entities::{StudentInvite, User};
use userbind_core::error::DomainError;
use userbind_core::value_objects::UserId;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::invite::InviteService;

/// Name shown for `user` to other people.
///
/// `student_name(handle)` when revealing real names of a flagged student with
/// a known name, the handle otherwise.
pub fn display_name_for(user: &User, reveal_real: bool) -> String {
    user.display_name(reveal_real)
}

/// Binding service
pub struct BindingService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BindingService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    async fn load_user(&self, user_id: UserId) -> ServiceResult<User> {
        Ok(self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?)
    }

    #[instrument(skip(self))]
    pub async fn is_bound(&self, user_id: UserId) -> ServiceResult<bool> {
        Ok(self.load_user(user_id).await?.is_bound())
    }

    /// Flagged as a school student but without an identity
    #[instrument(skip(self))]
    pub async fn needs_binding(&self, user_id: UserId) -> ServiceResult<bool> {
        Ok(self.load_user(user_id).await?.needs_binding())
    }

    /// Write the identity and flag the account. Overwrites any previous one.
    #[instrument(skip(self))]
    pub async fn bind(
        &self,
        user_id: UserId,
        student_id: &str,
        student_name: &str,
    ) -> ServiceResult<()> {
        self.ctx
            .user_repo()
            .set_student_identity(user_id, student_id, student_name)
            .await?;
        info!(user_id = %user_id, student_id, "Student identity bound");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn display_name(&self, user_id: UserId, reveal_real: bool) -> ServiceResult<String> {
        let user = self.load_user(user_id).await?;
        Ok(display_name_for(&user, reveal_real))
    }

    /// Checks shared by the confirmation view and the redemption itself.
    ///
    /// Unknown codes are not found; used codes and bound viewers are refused.
    #[instrument(skip(self, viewer), fields(viewer = ?viewer.map(|u| u.id)))]
    pub async fn validate_redeemable(
        &self,
        code: &str,
        viewer: Option<&User>,
    ) -> ServiceResult<StudentInvite> {
        let invite = InviteService::new(self.ctx)
            .get_invite(code)
            .await?
            .ok_or_else(|| DomainError::InviteNotFound(code.to_string()))?;

        if invite.is_used() {
            return Err(DomainError::InviteAlreadyUsed(code.to_string()).into());
        }

        if let Some(user) = viewer {
            if user.is_bound() {
                return Err(DomainError::AlreadyBound(user.id).into());
            }
        }

        Ok(invite)
    }

    /// Consume `code` and bind its identity to `user_id`.
    ///
    /// The claim and the identity write commit together: a caller that loses
    /// a race, or whose account write fails, leaves the invite unused and the
    /// account untouched.
    #[instrument(skip(self))]
    pub async fn redeem(&self, code: &str, user_id: UserId) -> ServiceResult<()> {
        let user = self.load_user(user_id).await?;
        self.validate_redeemable(code, Some(&user)).await?;

        let invite = match self.ctx.invite_repo().redeem(code, user_id, Utc::now()).await {
            Ok(invite) => invite,
            Err(e @ DomainError::InviteAlreadyUsed(_)) => {
                warn!(user_id = %user_id, "Invite claimed by another redemption");
                return Err(e.into());
            }
            Err(e @ DomainError::AlreadyBound(_)) => {
                warn!(user_id = %user_id, "Account bound by another redemption");
                return Err(e.into());
            }
            Err(e) => return Err(e.into()),
        };

        info!(user_id = %user_id, student_id = %invite.student_id, "Invite redeemed");
        Ok(())
    }
}
