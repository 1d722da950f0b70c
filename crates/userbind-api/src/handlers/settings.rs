//! Account settings registry

use axum::Json;
use userbind_core::ACCOUNT_SETTINGS;
use userbind_service::dto::SettingsRegistryResponse;

/// Descriptors of every account setting
///
/// GET /api/settings/account
pub async fn account_settings() -> Json<SettingsRegistryResponse> {
    Json(SettingsRegistryResponse {
        settings: ACCOUNT_SETTINGS,
    })
}
