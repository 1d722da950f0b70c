//! Student invite database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for student_invites table
#[derive(Debug, Clone, FromRow)]
pub struct StudentInviteModel {
    pub code: String,
    pub student_id: String,
    pub student_name: String,
    pub created_at: DateTime<Utc>,
    pub used: bool,
    pub used_by: Option<i64>,
    pub used_at: Option<DateTime<Utc>>,
}
