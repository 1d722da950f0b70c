//! # userbind-service
//!
//! Application layer containing the invite store, binding rules, bulk import,
//! authentication and the read paths for user and scoreboard views.

pub mod dto;
pub mod services;

/// In-memory repository implementations for tests
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use services::{
    AuthService, BindingService, ImportService, InviteService, ScoreboardService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, UserService,
};
