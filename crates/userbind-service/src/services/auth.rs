//! Authentication service
//!
//! Handles account registration, login, and resolving access tokens back to
//! accounts.

use tracing::{info, instrument, warn};
use uuid::Uuid;

use userbind_common::auth::{hash_password, validate_password_strength, verify_password};
use userbind_common::AppError;
use userbind_core::entities::User;
use userbind_core::value_objects::{Privileges, UserId};

use crate::dto::{AuthResponse, CurrentUserResponse, LoginRequest, RegisterRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new account.
    ///
    /// The first account on an empty directory is made a domain manager.
    #[instrument(skip(self, request), fields(handle = %request.handle))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        validate_password_strength(&request.password)?;

        if self
            .ctx
            .user_repo()
            .find_by_handle(&request.handle)
            .await?
            .is_some()
        {
            return Err(ServiceError::conflict("Handle already in use"));
        }

        let password_hash = hash_password(&request.password)?;

        let mut user = User::new(UserId::default(), request.handle, request.email);
        if self.ctx.user_repo().count().await? == 0 {
            user = user.with_privileges(Privileges::DEFAULT | Privileges::MANAGE_DOMAIN);
        }

        let user = self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, admin = user.privileges.is_admin(), "User registered");

        self.issue_token(&user)
    }

    /// Login with handle and password
    #[instrument(skip(self, request), fields(handle = %request.handle))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_handle(&request.handle)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: unknown handle");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        if !verify_password(&request.password, &password_hash)? {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        info!(user_id = %user.id, "User logged in");

        self.issue_token(&user)
    }

    /// Resolve an access token to its account
    #[instrument(skip(self, token))]
    pub async fn authenticate(&self, token: &str) -> ServiceResult<User> {
        let claims = self.ctx.jwt_service().decode_token(token)?;
        let user_id = claims.user_id()?;

        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user_id, "Token refers to a missing account");
                ServiceError::App(AppError::InvalidToken)
            })
    }

    fn issue_token(&self, user: &User) -> ServiceResult<AuthResponse> {
        let session_id = Uuid::new_v4().to_string();
        let jwt = self.ctx.jwt_service();
        let access_token = jwt.generate_access_token(user.id, Some(session_id))?;

        Ok(AuthResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: jwt.access_token_expiry(),
            user: CurrentUserResponse::from(user),
        })
    }
}
