//! # userbind-db
//!
//! Database layer implementing the `userbind-core` repository traits with
//! PostgreSQL via SQLx.
//!
//! - Connection pool management and migrations
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use userbind_db::{create_pool, DatabaseConfig, PgInviteRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::from_env()).await?;
//!     let invites = PgInviteRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{
    create_pool, default_migrations_dir, run_migrations, DatabaseConfig, MigrationError, PgPool,
};
pub use repositories::{PgInviteRepository, PgScoreboardRepository, PgUserRepository};
