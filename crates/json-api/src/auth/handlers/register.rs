//! Register Handler

use salvo::{oapi::extract::JsonBody, prelude::*};
use tracing::info;

use greengrocer_app::auth::Password;

use crate::{
    auth::{CredentialsRequest, SessionResponse, into_status_error},
    extensions::*,
};

/// Register Handler
///
/// Creates a customer account and signs it in.
#[endpoint(
    tags("auth"),
    summary = "Register",
    responses(
        (status_code = StatusCode::CREATED, description = "Account created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid email or password"),
        (status_code = StatusCode::CONFLICT, description = "Email already registered"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CredentialsRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SessionResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let request = json.into_inner();

    let session = state
        .app
        .auth
        .register(&request.email, Password::new(request.password))
        .await
        .map_err(into_status_error)?;

    info!(user_uuid = %session.user.uuid, "registered user");

    res.status_code(StatusCode::CREATED);

    Ok(Json(session.into()))
}
