//! State

use std::sync::Arc;

use greengrocer_app::context::AppContext;

/// Services shared by every handler, injected once at the root router.
pub(crate) struct State {
    pub(crate) app: AppContext,
}

impl State {
    #[must_use]
    pub(crate) fn from_app_context(app: AppContext) -> Arc<Self> {
        Arc::new(Self { app })
    }
}
