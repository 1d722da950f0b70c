//! Service context - dependency container for services
//!
//! Holds the repositories and shared utilities every service borrows. Built
//! once at startup and shared behind an `Arc` by the HTTP layer.

use std::sync::Arc;

use userbind_common::auth::JwtService;
use userbind_core::traits::{InviteRepository, ScoreboardRepository, UserRepository};

use super::error::{ServiceError, ServiceResult};

/// Default number of invites per management page
pub const DEFAULT_INVITE_PAGE_SIZE: u32 = 50;

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    invite_repo: Arc<dyn InviteRepository>,
    scoreboard_repo: Arc<dyn ScoreboardRepository>,

    // Services
    jwt_service: Arc<JwtService>,

    invite_page_size: u32,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        invite_repo: Arc<dyn InviteRepository>,
        scoreboard_repo: Arc<dyn ScoreboardRepository>,
        jwt_service: Arc<JwtService>,
        invite_page_size: u32,
    ) -> Self {
        Self {
            user_repo,
            invite_repo,
            scoreboard_repo,
            jwt_service,
            invite_page_size,
        }
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn invite_repo(&self) -> &dyn InviteRepository {
        self.invite_repo.as_ref()
    }

    pub fn scoreboard_repo(&self) -> &dyn ScoreboardRepository {
        self.scoreboard_repo.as_ref()
    }

    // === Services ===

    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Invites shown per management page
    pub fn invite_page_size(&self) -> u32 {
        self.invite_page_size
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("jwt_service", &self.jwt_service)
            .field("invite_page_size", &self.invite_page_size)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    invite_repo: Option<Arc<dyn InviteRepository>>,
    scoreboard_repo: Option<Arc<dyn ScoreboardRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    invite_page_size: Option<u32>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn invite_repo(mut self, repo: Arc<dyn InviteRepository>) -> Self {
        self.invite_repo = Some(repo);
        self
    }

    pub fn scoreboard_repo(mut self, repo: Arc<dyn ScoreboardRepository>) -> Self {
        self.scoreboard_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn invite_page_size(mut self, size: u32) -> Self {
        self.invite_page_size = Some(size);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let invite_page_size = self.invite_page_size.unwrap_or(DEFAULT_INVITE_PAGE_SIZE);
        if invite_page_size == 0 {
            return Err(ServiceError::validation("invite_page_size must be positive"));
        }

        Ok(ServiceContext::new(
            self.user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.invite_repo
                .ok_or_else(|| ServiceError::validation("invite_repo is required"))?,
            self.scoreboard_repo
                .ok_or_else(|| ServiceError::validation("scoreboard_repo is required"))?,
            self.jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            invite_page_size,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{InMemoryInviteRepository, InMemoryScoreboardRepository, InMemoryUserRepository};

    #[test]
    fn test_builder_requires_dependencies() {
        let err = ServiceContextBuilder::new().build().unwrap_err();
        assert!(matches!(err, ServiceError::Validation(msg) if msg.contains("user_repo")));
    }

    #[test]
    fn test_builder_defaults_page_size() {
        let users = Arc::new(InMemoryUserRepository::new());
        let ctx = ServiceContextBuilder::new()
            .user_repo(users.clone())
            .invite_repo(Arc::new(InMemoryInviteRepository::new(users)))
            .scoreboard_repo(Arc::new(InMemoryScoreboardRepository::new()))
            .jwt_service(Arc::new(JwtService::new("secret-for-tests", 900)))
            .build()
            .unwrap();
        assert_eq!(ctx.invite_page_size(), DEFAULT_INVITE_PAGE_SIZE);
    }
}
