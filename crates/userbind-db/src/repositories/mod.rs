//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in userbind-core.

mod error;
mod scoreboard;
mod student_invite;
mod user;

pub use scoreboard::PgScoreboardRepository;
pub use student_invite::PgInviteRepository;
pub use user::PgUserRepository;
