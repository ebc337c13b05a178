//! Verify Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    auth::{UserResponse, into_status_error},
    extensions::*,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VerifyResponse {
    /// The user the token belongs to
    pub user: UserResponse,
}

/// Verify Handler
///
/// Returns the profile of the bearer token's user.
#[endpoint(
    tags("auth"),
    summary = "Verify Token",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<VerifyResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let caller = depot.current_user_or_401()?;

    let user = state
        .app
        .auth
        .current_user(caller.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(VerifyResponse { user: user.into() }))
}
