//! Application state
//!
//! Holds the shared state for the Axum application: the service context,
//! the configuration and the view hooks.

use std::sync::Arc;

use userbind_common::{AppConfig, JwtService};
use userbind_service::ServiceContext;

use crate::hooks::ViewHooks;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    service_context: Arc<ServiceContext>,
    config: Arc<AppConfig>,
    hooks: Arc<ViewHooks>,
}

impl AppState {
    /// Create a new AppState with the standard view hooks
    pub fn new(service_context: ServiceContext, config: AppConfig) -> Self {
        Self::with_hooks(service_context, config, ViewHooks::with_defaults())
    }

    pub fn with_hooks(service_context: ServiceContext, config: AppConfig, hooks: ViewHooks) -> Self {
        Self {
            service_context: Arc::new(service_context),
            config: Arc::new(config),
            hooks: Arc::new(hooks),
        }
    }

    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn hooks(&self) -> &ViewHooks {
        &self.hooks
    }

    pub fn jwt_service(&self) -> &JwtService {
        self.service_context.jwt_service()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &"ServiceContext")
            .field("config", &"AppConfig")
            .field("hooks", &self.hooks)
            .finish()
    }
}
