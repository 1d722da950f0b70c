//! Business logic services
//!
//! Each service borrows the shared `ServiceContext` for the duration of a
//! request and orchestrates repository calls behind the domain rules.

pub mod auth;
pub mod binding;
pub mod context;
pub mod error;
pub mod import;
pub mod invite;
pub mod scoreboard;
pub mod user;

// Re-export all services for convenience
pub use auth::AuthService;
pub use binding::{display_name_for, BindingService};
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use import::{parse_import_text, ImportLine, ImportService};
pub use invite::InviteService;
pub use scoreboard::ScoreboardService;
pub use user::UserService;
