//! Path parameter extractors

use serde::Deserialize;
use userbind_core::UserId;

use crate::response::ApiError;

/// `/user-bind/:code` and `/user-bind/delete/:code`
#[derive(Debug, Deserialize)]
pub struct InviteCodePath {
    pub code: String,
}

impl InviteCodePath {
    pub fn code(&self) -> &str {
        &self.code
    }
}

/// `/user/:uid`
#[derive(Debug, Deserialize)]
pub struct UserIdPath {
    pub uid: String,
}

impl UserIdPath {
    pub fn user_id(&self) -> Result<UserId, ApiError> {
        UserId::parse(&self.uid).map_err(|_| ApiError::invalid_path("Invalid uid format"))
    }
}

/// `/contest/:id/scoreboard`
#[derive(Debug, Deserialize)]
pub struct ContestIdPath {
    pub id: String,
}

impl ContestIdPath {
    pub fn contest_id(&self) -> Result<i64, ApiError> {
        self.id
            .trim()
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid contest id format"))
    }
}
