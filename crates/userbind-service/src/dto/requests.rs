//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 32, message = "Handle must be 2-32 characters"))]
    pub handle: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
}

/// Login by handle
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 32, message = "Handle is required"))]
    pub handle: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

// ============================================================================
// Invite Requests
// ============================================================================

/// Single invite creation from the management page
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateInviteRequest {
    #[validate(length(min = 1, max = 64, message = "Student ID must be 1-64 characters"))]
    pub student_id: String,

    #[validate(length(min = 1, max = 128, message = "Student name must be 1-128 characters"))]
    pub student_name: String,
}

/// Bulk import: one `<student_id> <name...>` entry per line
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ImportRequest {
    #[validate(length(max = 1_000_000, message = "Import text is too large"))]
    pub text: String,
}

// ============================================================================
// Account Settings
// ============================================================================

/// Partial write of the identity settings; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSettingsRequest {
    #[validate(length(max = 64, message = "Student ID must be at most 64 characters"))]
    pub student_id: Option<String>,

    #[validate(length(max = 128, message = "Student name must be at most 128 characters"))]
    pub student_name: Option<String>,

    pub is_school_student: Option<bool>,
}

impl UpdateSettingsRequest {
    pub fn is_empty(&self) -> bool {
        self.student_id.is_none() && self.student_name.is_none() && self.is_school_student.is_none()
    }
}
