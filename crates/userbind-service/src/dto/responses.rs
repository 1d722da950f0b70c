//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize`. Page-like endpoints return these
//! as JSON view models; rendering them is left to the frontend.

use chrono::{DateTime, Utc};
use serde::Serialize;

use userbind_core::entities::{ScoreboardRow, StudentInvite, User};
use userbind_core::settings::SettingDescriptor;
use userbind_core::value_objects::{Privileges, UserId};

// ============================================================================
// User Responses
// ============================================================================

/// The logged-in account
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub id: UserId,
    pub handle: String,
    pub email: String,
    pub privileges: Privileges,
    pub is_school_student: bool,
    pub is_bound: bool,
}

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            handle: user.handle.clone(),
            email: user.email.clone(),
            privileges: user.privileges,
            is_school_student: user.is_school_student,
            is_bound: user.is_bound(),
        }
    }
}

/// Short user reference used in listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    pub id: UserId,
    pub handle: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            handle: user.handle.clone(),
        }
    }
}

/// Identity block attached to flagged accounts on the user detail view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BindInfo {
    pub student_id: String,
    pub student_name: String,
    pub is_bound: bool,
}

impl BindInfo {
    /// Unset fields are shown as "-"
    pub fn from_user(user: &User) -> Self {
        let or_dash = |s: &str| {
            if s.is_empty() {
                "-".to_string()
            } else {
                s.to_string()
            }
        };
        Self {
            student_id: or_dash(&user.student_id),
            student_name: or_dash(&user.student_name),
            is_bound: user.is_bound(),
        }
    }
}

/// User detail view
#[derive(Debug, Clone, Serialize)]
pub struct UserDetailResponse {
    pub id: UserId,
    pub handle: String,
    pub created_at: DateTime<Utc>,
    pub is_school_student: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bind: Option<BindInfo>,
}

impl From<&User> for UserDetailResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            handle: user.handle.clone(),
            created_at: user.created_at,
            is_school_student: user.is_school_student,
            bind: None,
        }
    }
}

/// Current values of every registered account setting
#[derive(Debug, Clone, Serialize)]
pub struct AccountSettingsResponse {
    pub user_id: UserId,
    pub student_id: String,
    pub student_name: String,
    pub is_school_student: bool,
}

impl From<&User> for AccountSettingsResponse {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            student_id: user.student_id.clone(),
            student_name: user.student_name.clone(),
            is_school_student: user.is_school_student,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SettingsRegistryResponse {
    pub settings: &'static [SettingDescriptor],
}

// ============================================================================
// Auth Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: CurrentUserResponse,
}

/// Home page view
#[derive(Debug, Clone, Serialize)]
pub struct HomeResponse {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<CurrentUserResponse>,
}

// ============================================================================
// Invite Responses
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InviteResponse {
    pub code: String,
    pub student_id: String,
    pub student_name: String,
    pub created_at: DateTime<Utc>,
    pub used: bool,
    pub used_by: Option<UserId>,
    pub used_at: Option<DateTime<Utc>>,
}

impl From<&StudentInvite> for InviteResponse {
    fn from(invite: &StudentInvite) -> Self {
        Self {
            code: invite.code.clone(),
            student_id: invite.student_id.clone(),
            student_name: invite.student_name.clone(),
            created_at: invite.created_at,
            used: invite.used,
            used_by: invite.used_by,
            used_at: invite.used_at,
        }
    }
}

/// Management row: the invite plus the account that redeemed it
#[derive(Debug, Clone, Serialize)]
pub struct InviteRowResponse {
    #[serde(flatten)]
    pub invite: InviteResponse,
    pub used_by_user: Option<UserSummary>,
}

/// Invite management page
#[derive(Debug, Clone, Serialize)]
pub struct ManageInvitesResponse {
    pub invites: Vec<InviteRowResponse>,
    pub page: u32,
    pub page_count: u32,
    pub total: u64,
}

/// Import form view
#[derive(Debug, Clone, Serialize)]
pub struct ImportFormResponse {
    pub format: &'static str,
    pub example: &'static str,
}

impl Default for ImportFormResponse {
    fn default() -> Self {
        Self {
            format: "<student_id> <student_name>, one per line",
            example: "S001 Alice Lee\nS002 Bob",
        }
    }
}

/// Outcome of one import line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportLineResult {
    pub student_id: String,
    pub student_name: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportResponse {
    pub results: Vec<ImportLineResult>,
    pub succeeded: usize,
    pub failed: usize,
}

impl ImportResponse {
    pub fn new(results: Vec<ImportLineResult>) -> Self {
        let succeeded = results.iter().filter(|r| r.success).count();
        let failed = results.len() - succeeded;
        Self {
            results,
            succeeded,
            failed,
        }
    }
}

/// Redemption confirmation view
#[derive(Debug, Clone, Serialize)]
pub struct RedeemConfirmResponse {
    pub code: String,
    pub student_id: String,
    pub student_name: String,
    /// Whether the viewer can submit the redemption
    pub can_redeem: bool,
}

/// Shown to flagged accounts that have not bound an identity yet
#[derive(Debug, Clone, Serialize)]
pub struct BindingRequiredResponse {
    pub binding_required: bool,
    pub message: String,
    pub user: CurrentUserResponse,
}

impl BindingRequiredResponse {
    pub fn for_user(user: &User) -> Self {
        Self {
            binding_required: true,
            message: "Your account must be bound to a student identity. \
                      Open the invite link you received to continue."
                .to_string(),
            user: CurrentUserResponse::from(user),
        }
    }
}

// ============================================================================
// Scoreboard
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ScoreboardResponse {
    pub contest_id: i64,
    pub rows: Vec<ScoreboardRow>,
}

// ============================================================================
// Health
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}
