//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{ScoreboardRow, StudentInvite, User};
use crate::error::DomainError;
use crate::value_objects::UserId;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Invite Repository
// ============================================================================

#[async_trait]
pub trait InviteRepository: Send + Sync {
    /// Find invite by code
    async fn find_by_code(&self, code: &str) -> RepoResult<Option<StudentInvite>>;

    /// Insert a new invite. Fails with `InviteCodeExists` on a duplicate code.
    async fn create(&self, invite: &StudentInvite) -> RepoResult<()>;

    /// Atomically flip `used` from false to true.
    ///
    /// Returns true only for the caller that performed the transition.
    async fn claim(&self, code: &str, user_id: UserId, at: DateTime<Utc>) -> RepoResult<bool>;

    /// Claim `code` for `user_id` and write its identity onto the account as
    /// one unit, returning the consumed invite.
    ///
    /// Fails with `InviteNotFound`, `InviteAlreadyUsed` or `AlreadyBound`; on
    /// any error neither record is changed.
    async fn redeem(
        &self,
        code: &str,
        user_id: UserId,
        at: DateTime<Utc>,
    ) -> RepoResult<StudentInvite>;

    /// Newest first (`created_at DESC, code ASC`)
    async fn list_page(&self, offset: i64, limit: i64) -> RepoResult<Vec<StudentInvite>>;

    /// Total number of invites
    async fn count(&self) -> RepoResult<u64>;

    /// Delete an invite; absent codes are not an error
    async fn delete(&self, code: &str) -> RepoResult<()>;
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Batch lookup; missing ids are left out of the result
    async fn find_many(&self, ids: &[UserId]) -> RepoResult<Vec<User>>;

    /// Find user by handle (case-insensitive)
    async fn find_by_handle(&self, handle: &str) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Create a new user, returning it with its assigned id
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<User>;

    /// Merge identity settings; `None` fields are left untouched
    async fn update_settings(
        &self,
        id: UserId,
        student_id: Option<&str>,
        student_name: Option<&str>,
        is_school_student: Option<bool>,
    ) -> RepoResult<User>;

    /// Write the identity fields and set `is_school_student`
    async fn set_student_identity(
        &self,
        id: UserId,
        student_id: &str,
        student_name: &str,
    ) -> RepoResult<()>;

    /// Write the identity only while the account has none.
    ///
    /// Returns false when the account is already bound.
    async fn bind_if_unbound(
        &self,
        id: UserId,
        student_id: &str,
        student_name: &str,
    ) -> RepoResult<bool>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>>;

    /// Number of registered accounts
    async fn count(&self) -> RepoResult<u64>;
}

// ============================================================================
// Scoreboard Repository
// ============================================================================

#[async_trait]
pub trait ScoreboardRepository: Send + Sync {
    /// Rows of a contest scoreboard, ordered by rank
    async fn find_rows(&self, contest_id: i64) -> RepoResult<Vec<ScoreboardRow>>;
}
