//! Database models - SQLx-compatible structs for PostgreSQL tables

mod scoreboard;
mod student_invite;
mod user;

pub use scoreboard::ScoreboardRowModel;
pub use student_invite::StudentInviteModel;
pub use user::UserModel;
