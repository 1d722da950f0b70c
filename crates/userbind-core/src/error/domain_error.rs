//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::UserId;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Invite code not found")]
    InviteNotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(UserId),

    // =========================================================================
    // Forbidden (user-facing, not retryable)
    // =========================================================================
    #[error("Invite code has already been used")]
    InviteAlreadyUsed(String),

    #[error("Your account is already bound to a student identity")]
    AlreadyBound(UserId),

    #[error("You must be logged in")]
    NotLoggedIn,

    #[error("Missing privilege: {0}")]
    MissingPrivilege(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Invite code already exists")]
    InviteCodeExists,

    #[error("Handle already in use")]
    HandleAlreadyExists,

    #[error("Email already in use")]
    EmailAlreadyExists,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::InviteNotFound(_) => "UNKNOWN_INVITE",
            Self::UserNotFound(_) => "UNKNOWN_USER",

            Self::InviteAlreadyUsed(_) => "INVITE_ALREADY_USED",
            Self::AlreadyBound(_) => "ALREADY_BOUND",
            Self::NotLoggedIn => "NOT_LOGGED_IN",
            Self::MissingPrivilege(_) => "MISSING_PRIVILEGE",

            Self::InviteCodeExists => "INVITE_CODE_EXISTS",
            Self::HandleAlreadyExists => "HANDLE_ALREADY_EXISTS",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",

            Self::ValidationError(_) => "VALIDATION_ERROR",

            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::InviteNotFound(_) | Self::UserNotFound(_))
    }

    /// Check if this is a user-facing refusal (403)
    pub fn is_forbidden(&self) -> bool {
        matches!(
            self,
            Self::InviteAlreadyUsed(_) | Self::AlreadyBound(_) | Self::NotLoggedIn
        )
    }

    /// Check if this is a missing-privilege error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::MissingPrivilege(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::InviteCodeExists | Self::HandleAlreadyExists | Self::EmailAlreadyExists
        )
    }

    /// Infrastructure failures; everything else is caused by the request
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::DatabaseError(_) | Self::InternalError(_))
    }
}
