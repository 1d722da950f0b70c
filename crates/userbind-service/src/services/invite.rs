//! Invite store
//!
//! Creation, lookup, redemption marker, paginated listing and deletion of
//! student invite codes.

use std::collections::HashMap;

use chrono::Utc;
use tracing::{info, instrument, warn};

use userbind_core::entities::{
    generate_invite_code, StudentInvite, MAX_STUDENT_ID_LEN, MAX_STUDENT_NAME_LEN,
};
use userbind_core::error::DomainError;
use userbind_core::value_objects::{InvitePage, UserId};

use crate::dto::{InviteResponse, InviteRowResponse, ManageInvitesResponse, UserSummary};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Attempts before giving up on a colliding generated code
const CREATE_ATTEMPTS: usize = 3;

/// Invite service
pub struct InviteService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> InviteService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create an unused invite for a student and return its code
    #[instrument(skip(self))]
    pub async fn create_invite(&self, student_id: &str, student_name: &str) -> ServiceResult<String> {
        let student_id = student_id.trim();
        let student_name = student_name.trim();
        if student_id.is_empty() || student_name.is_empty() {
            return Err(ServiceError::validation(
                "student_id and student_name are required",
            ));
        }
        if student_id.chars().count() > MAX_STUDENT_ID_LEN {
            return Err(ServiceError::validation(format!(
                "student_id must be at most {MAX_STUDENT_ID_LEN} characters"
            )));
        }
        if student_name.chars().count() > MAX_STUDENT_NAME_LEN {
            return Err(ServiceError::validation(format!(
                "student_name must be at most {MAX_STUDENT_NAME_LEN} characters"
            )));
        }

        for attempt in 1..=CREATE_ATTEMPTS {
            let invite = StudentInvite::new(
                generate_invite_code(),
                student_id.to_string(),
                student_name.to_string(),
            );

            match self.ctx.invite_repo().create(&invite).await {
                Ok(()) => {
                    info!(student_id = %invite.student_id, "Invite created");
                    return Ok(invite.code);
                }
                Err(DomainError::InviteCodeExists) => {
                    warn!(attempt, "Generated invite code collided, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(DomainError::InviteCodeExists.into())
    }

    /// Point lookup by code
    #[instrument(skip(self))]
    pub async fn get_invite(&self, code: &str) -> ServiceResult<Option<StudentInvite>> {
        Ok(self.ctx.invite_repo().find_by_code(code).await?)
    }

    /// Record the redemption. Only the first caller for a code succeeds.
    #[instrument(skip(self))]
    pub async fn mark_used(&self, code: &str, user_id: UserId) -> ServiceResult<()> {
        let claimed = self
            .ctx
            .invite_repo()
            .claim(code, user_id, Utc::now())
            .await?;

        if !claimed {
            return Err(DomainError::InviteAlreadyUsed(code.to_string()).into());
        }
        Ok(())
    }

    /// One page of invites, newest first. Pages are 1-based.
    #[instrument(skip(self))]
    pub async fn list_invites(&self, page: i64) -> ServiceResult<InvitePage> {
        let page_size = self.ctx.invite_page_size();
        let page = InvitePage::normalize_page(page);

        let total = self.ctx.invite_repo().count().await?;
        let records = self
            .ctx
            .invite_repo()
            .list_page(InvitePage::offset(page, page_size), i64::from(page_size))
            .await?;

        Ok(InvitePage {
            records,
            total,
            page,
            page_count: InvitePage::page_count(total, page_size),
        })
    }

    /// Management view: a page of invites with redeemers resolved
    #[instrument(skip(self))]
    pub async fn manage_page(&self, page: i64) -> ServiceResult<ManageInvitesResponse> {
        let listing = self.list_invites(page).await?;

        let mut ids: Vec<UserId> = listing.records.iter().filter_map(|i| i.used_by).collect();
        ids.sort_unstable();
        ids.dedup();

        let users: HashMap<UserId, UserSummary> = self
            .ctx
            .user_repo()
            .find_many(&ids)
            .await?
            .iter()
            .map(|u| (u.id, UserSummary::from(u)))
            .collect();

        let invites = listing
            .records
            .iter()
            .map(|invite| InviteRowResponse {
                invite: InviteResponse::from(invite),
                used_by_user: invite.used_by.and_then(|id| users.get(&id).cloned()),
            })
            .collect();

        Ok(ManageInvitesResponse {
            invites,
            page: listing.page,
            page_count: listing.page_count,
            total: listing.total,
        })
    }

    /// Delete regardless of state; unknown codes are ignored
    #[instrument(skip(self))]
    pub async fn delete_invite(&self, code: &str) -> ServiceResult<()> {
        self.ctx.invite_repo().delete(code).await?;
        info!("Invite deleted");
        Ok(())
    }
}
