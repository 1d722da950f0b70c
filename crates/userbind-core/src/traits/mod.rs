//! Repository traits (ports)

mod repositories;

pub use repositories::{InviteRepository, RepoResult, ScoreboardRepository, UserRepository};
