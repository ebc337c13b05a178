//! App state depot helpers.

use std::sync::Arc;

use salvo::prelude::{Depot, StatusError};
use tracing::error;

use crate::state::State;

/// Read the shared [`State`] injected at the root router.
pub(crate) trait StateExt {
    fn state_or_500(&self) -> Result<Arc<State>, StatusError>;
}

impl StateExt for Depot {
    fn state_or_500(&self) -> Result<Arc<State>, StatusError> {
        self.obtain::<Arc<State>>().cloned().map_err(|_missing| {
            error!("app state missing from depot");

            StatusError::internal_server_error()
        })
    }
}
