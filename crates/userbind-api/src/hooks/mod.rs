//! View hooks
//!
//! Handlers compute a view model, then pass it through the hooks registered
//! for that view, in registration order.

mod scoreboard;
mod user_detail;

use std::fmt;
use std::sync::Arc;

use axum::async_trait;
use userbind_core::User;
use userbind_service::dto::{ScoreboardResponse, UserDetailResponse};
use userbind_service::{ServiceContext, ServiceResult};

pub use scoreboard::ScoreboardNameHook;
pub use user_detail::UserDetailBindHook;

/// Augments a view model of type `V` before it is returned
#[async_trait]
pub trait ViewHook<V>: Send + Sync {
    /// Hook name for logs
    fn name(&self) -> &'static str;

    async fn apply(
        &self,
        ctx: &ServiceContext,
        viewer: Option<&User>,
        view: &mut V,
    ) -> ServiceResult<()>;
}

/// Ordered hook lists, one per augmentable view
#[derive(Default)]
pub struct ViewHooks {
    user_detail: Vec<Arc<dyn ViewHook<UserDetailResponse>>>,
    scoreboard: Vec<Arc<dyn ViewHook<ScoreboardResponse>>>,
}

impl ViewHooks {
    /// No hooks at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// The identity-binding hooks
    pub fn with_defaults() -> Self {
        Self::empty()
            .on_user_detail(UserDetailBindHook)
            .on_scoreboard(ScoreboardNameHook)
    }

    pub fn on_user_detail(mut self, hook: impl ViewHook<UserDetailResponse> + 'static) -> Self {
        self.user_detail.push(Arc::new(hook));
        self
    }

    pub fn on_scoreboard(mut self, hook: impl ViewHook<ScoreboardResponse> + 'static) -> Self {
        self.scoreboard.push(Arc::new(hook));
        self
    }

    pub async fn run_user_detail(
        &self,
        ctx: &ServiceContext,
        viewer: Option<&User>,
        view: &mut UserDetailResponse,
    ) -> ServiceResult<()> {
        run_all(&self.user_detail, ctx, viewer, view).await
    }

    pub async fn run_scoreboard(
        &self,
        ctx: &ServiceContext,
        viewer: Option<&User>,
        view: &mut ScoreboardResponse,
    ) -> ServiceResult<()> {
        run_all(&self.scoreboard, ctx, viewer, view).await
    }
}

async fn run_all<V>(
    hooks: &[Arc<dyn ViewHook<V>>],
    ctx: &ServiceContext,
    viewer: Option<&User>,
    view: &mut V,
) -> ServiceResult<()> {
    for hook in hooks {
        tracing::trace!(hook = hook.name(), "Running view hook");
        hook.apply(ctx, viewer, view).await?;
    }
    Ok(())
}

impl fmt::Debug for ViewHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let user_detail: Vec<_> = self.user_detail.iter().map(|h| h.name()).collect();
        let scoreboard: Vec<_> = self.scoreboard.iter().map(|h| h.name()).collect();
        f.debug_struct("ViewHooks")
            .field("user_detail", &user_detail)
            .field("scoreboard", &scoreboard)
            .finish()
    }
}
