//! Request and response shapes used by the integration tests

use serde::{Deserialize, Serialize};

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub handle: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn new(handle: &str) -> Self {
        Self {
            handle: handle.to_string(),
            email: format!("{handle}@example.com"),
            password: "Password123".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub handle: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct CreateInviteRequest {
    pub student_id: String,
    pub student_name: String,
}

impl CreateInviteRequest {
    pub fn new(student_id: &str, student_name: &str) -> Self {
        Self {
            student_id: student_id.to_string(),
            student_name: student_name.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ImportRequest {
    pub text: String,
}

#[derive(Debug, Default, Serialize)]
pub struct UpdateSettingsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_school_student: Option<bool>,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CurrentUserResponse {
    pub id: i64,
    pub handle: String,
    pub privileges: u64,
    pub is_school_student: bool,
    pub is_bound: bool,
}

#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: CurrentUserResponse,
}

#[derive(Debug, Deserialize)]
pub struct InviteResponse {
    pub code: String,
    pub student_id: String,
    pub student_name: String,
    pub used: bool,
    pub used_by: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub handle: String,
}

#[derive(Debug, Deserialize)]
pub struct InviteRowResponse {
    #[serde(flatten)]
    pub invite: InviteResponse,
    pub used_by_user: Option<UserSummary>,
}

#[derive(Debug, Deserialize)]
pub struct ManageInvitesResponse {
    pub invites: Vec<InviteRowResponse>,
    pub page: u32,
    pub page_count: u32,
    pub total: u64,
}

#[derive(Debug, Deserialize)]
pub struct ImportLineResult {
    pub student_id: String,
    pub student_name: String,
    pub success: bool,
    pub code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ImportResponse {
    pub results: Vec<ImportLineResult>,
    pub succeeded: usize,
    pub failed: usize,
}

#[derive(Debug, Deserialize)]
pub struct RedeemConfirmResponse {
    pub code: String,
    pub student_id: String,
    pub student_name: String,
    pub can_redeem: bool,
}

#[derive(Debug, Deserialize)]
pub struct BindInfo {
    pub student_id: String,
    pub student_name: String,
    pub is_bound: bool,
}

#[derive(Debug, Deserialize)]
pub struct UserDetailResponse {
    pub id: i64,
    pub handle: String,
    pub is_school_student: bool,
    pub bind: Option<BindInfo>,
}

#[derive(Debug, Deserialize)]
pub struct AccountSettingsResponse {
    pub user_id: i64,
    pub student_id: String,
    pub student_name: String,
    pub is_school_student: bool,
}

#[derive(Debug, Deserialize)]
pub struct ScoreboardUserCell {
    pub user_id: i64,
    pub handle: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ScoreboardRow {
    pub rank: u32,
    pub user: ScoreboardUserCell,
    pub score: i64,
}

#[derive(Debug, Deserialize)]
pub struct ScoreboardResponse {
    pub contest_id: i64,
    pub rows: Vec<ScoreboardRow>,
}

#[derive(Debug, Deserialize)]
pub struct BindingRequiredResponse {
    pub binding_required: bool,
    pub user: CurrentUserResponse,
}
