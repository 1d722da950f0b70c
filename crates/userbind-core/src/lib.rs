//! # userbind-core
//!
//! Domain layer for student identity binding: invite records, the user
//! identity fields, privileges, the account settings registry and the
//! repository traits the infrastructure layer implements.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod settings;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    generate_invite_code, ScoreboardRow, ScoreboardUserCell, StudentInvite, User, INVITE_CODE_LEN,
};
pub use error::DomainError;
pub use settings::{SettingDescriptor, SettingKind, ACCOUNT_SETTINGS};
pub use traits::{InviteRepository, RepoResult, ScoreboardRepository, UserRepository};
pub use value_objects::{InvitePage, Privileges, UserId, UserIdParseError};
