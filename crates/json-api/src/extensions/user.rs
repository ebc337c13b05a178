//! Current user depot helpers.

use greengrocer_app::auth::AuthenticatedUser;
use salvo::prelude::{Depot, StatusError};

const CURRENT_USER_DEPOT_KEY: &str = "current_user";

/// Store and read the caller resolved by the auth middleware.
pub(crate) trait CurrentUserExt {
    fn insert_current_user(&mut self, user: AuthenticatedUser);

    fn current_user_or_401(&self) -> Result<AuthenticatedUser, StatusError>;

    fn admin_or_403(&self) -> Result<AuthenticatedUser, StatusError>;
}

impl CurrentUserExt for Depot {
    fn insert_current_user(&mut self, user: AuthenticatedUser) {
        self.insert(CURRENT_USER_DEPOT_KEY, user);
    }

    fn current_user_or_401(&self) -> Result<AuthenticatedUser, StatusError> {
        self.get::<AuthenticatedUser>(CURRENT_USER_DEPOT_KEY)
            .copied()
            .map_err(|_missing| StatusError::unauthorized().brief("Authentication required"))
    }

    fn admin_or_403(&self) -> Result<AuthenticatedUser, StatusError> {
        let user = self.current_user_or_401()?;

        if !user.is_admin {
            return Err(StatusError::forbidden().brief("Admin access required"));
        }

        Ok(user)
    }
}
