//! User entity - a platform account carrying the student identity fields

use chrono::{DateTime, Utc};

use crate::value_objects::{Privileges, UserId};

/// Platform account.
///
/// `student_id` and `student_name` are empty strings while unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub handle: String,
    pub email: String,
    pub privileges: Privileges,
    pub student_id: String,
    pub student_name: String,
    pub is_school_student: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with required fields
    pub fn new(id: UserId, handle: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            handle,
            email,
            privileges: Privileges::DEFAULT,
            student_id: String::new(),
            student_name: String::new(),
            is_school_student: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_privileges(mut self, privileges: Privileges) -> Self {
        self.privileges = privileges;
        self
    }

    /// True iff both identity fields are filled in
    #[inline]
    pub fn is_bound(&self) -> bool {
        !self.student_id.is_empty() && !self.student_name.is_empty()
    }

    /// Flagged as a school student but no identity attached yet
    #[inline]
    pub fn needs_binding(&self) -> bool {
        self.is_school_student && !self.is_bound()
    }

    /// Name shown to other users.
    ///
    /// With `reveal_real`, flagged students with a known name are shown as
    /// `student_name(handle)`; everyone else is shown by handle.
    pub fn display_name(&self, reveal_real: bool) -> String {
        if reveal_real && self.is_school_student && !self.student_name.is_empty() {
            format!("{}({})", self.student_name, self.handle)
        } else {
            self.handle.clone()
        }
    }

    /// Attach a student identity and flag the account
    pub fn bind(&mut self, student_id: String, student_name: String) {
        self.student_id = student_id;
        self.student_name = student_name;
        self.is_school_student = true;
        self.updated_at = Utc::now();
    }

    /// Check whether `self` may edit the settings of `target`
    pub fn can_edit_settings_of(&self, target: UserId) -> bool {
        if self.privileges.has(Privileges::MANAGE_DOMAIN) {
            return true;
        }
        self.id == target && self.privileges.has(Privileges::EDIT_OWN_PROFILE)
    }
}
