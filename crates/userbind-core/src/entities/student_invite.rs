//! StudentInvite entity - a single-use code granting one student identity

use chrono::{DateTime, Utc};

use crate::value_objects::UserId;

/// Length of generated invite codes (62-symbol alphabet, ~142 bits)
pub const INVITE_CODE_LEN: usize = 24;

/// Longest student id the store accepts, in characters
pub const MAX_STUDENT_ID_LEN: usize = 64;

/// Longest student name the store accepts, in characters
pub const MAX_STUDENT_NAME_LEN: usize = 128;

/// Invite record tying a code to a student identity.
///
/// Once `used` flips to true, `used_by` and `used_at` are set and the record
/// is never modified again. Administrators may delete it in any state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentInvite {
    pub code: String,
    pub student_id: String,
    pub student_name: String,
    pub created_at: DateTime<Utc>,
    pub used: bool,
    pub used_by: Option<UserId>,
    pub used_at: Option<DateTime<Utc>>,
}

impl StudentInvite {
    /// Create a fresh, unused invite
    pub fn new(code: String, student_id: String, student_name: String) -> Self {
        Self {
            code,
            student_id,
            student_name,
            created_at: Utc::now(),
            used: false,
            used_by: None,
            used_at: None,
        }
    }

    #[inline]
    pub fn is_used(&self) -> bool {
        self.used
    }

    /// Record the redemption on an in-memory copy.
    ///
    /// Returns false (and changes nothing) when the invite was already used.
    pub fn mark_used(&mut self, user_id: UserId, at: DateTime<Utc>) -> bool {
        if self.used {
            return false;
        }
        self.used = true;
        self.used_by = Some(user_id);
        self.used_at = Some(at);
        true
    }
}

/// Generate a cryptographically secure random invite code
pub fn generate_invite_code() -> String {
    use rand::Rng;

    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

    let mut rng = rand::thread_rng();
    (0..INVITE_CODE_LEN)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}
