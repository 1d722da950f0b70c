//! Value objects - immutable types that represent domain concepts

mod invite_page;
mod privileges;
mod user_id;

pub use invite_page::InvitePage;
pub use privileges::Privileges;
pub use user_id::{UserId, UserIdParseError};
