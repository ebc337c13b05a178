//! Login Handler

use salvo::{oapi::extract::JsonBody, prelude::*};

use greengrocer_app::auth::Password;

use crate::{
    auth::{CredentialsRequest, SessionResponse, into_status_error},
    extensions::*,
};

/// Login Handler
///
/// Exchanges email and password for a bearer token.
#[endpoint(
    tags("auth"),
    summary = "Login",
    responses(
        (status_code = StatusCode::OK, description = "Signed in"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid email or password"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CredentialsRequest>,
    depot: &mut Depot,
) -> Result<Json<SessionResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let request = json.into_inner();

    let session = state
        .app
        .auth
        .login(&request.email, Password::new(request.password))
        .await
        .map_err(into_status_error)?;

    Ok(Json(session.into()))
}
