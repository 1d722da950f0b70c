//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, and paging.

mod auth;
mod pagination;
mod path;
mod validated;

pub use auth::{
    request_token, resolve_user, AdminUser, AuthUser, CurrentUser, OptionalAuthUser,
    SESSION_COOKIE,
};
pub use pagination::{PageParams, PageQuery};
pub use path::{ContestIdPath, InviteCodePath, UserIdPath};
pub use validated::ValidatedJson;
