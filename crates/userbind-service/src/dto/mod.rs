//! Data transfer objects for API requests and responses
//!
//! - Request DTOs with validation for API inputs
//! - Response DTOs (view models) for serializing API outputs

pub mod requests;
pub mod responses;

pub use requests::{
    CreateInviteRequest, ImportRequest, LoginRequest, RegisterRequest, UpdateSettingsRequest,
};

pub use responses::{
    AccountSettingsResponse, AuthResponse, BindInfo, BindingRequiredResponse, CurrentUserResponse,
    HealthResponse, HomeResponse, ImportFormResponse, ImportLineResult, ImportResponse,
    InviteResponse, InviteRowResponse, ManageInvitesResponse, RedeemConfirmResponse,
    ScoreboardResponse, SettingsRegistryResponse, UserDetailResponse, UserSummary,
};
