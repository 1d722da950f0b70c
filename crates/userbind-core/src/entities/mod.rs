//! Domain entities - core business objects

mod scoreboard;
mod student_invite;
mod user;

pub use scoreboard::{ScoreboardRow, ScoreboardUserCell};
pub use student_invite::{
    generate_invite_code, StudentInvite, INVITE_CODE_LEN, MAX_STUDENT_ID_LEN, MAX_STUDENT_NAME_LEN,
};
pub use user::User;
