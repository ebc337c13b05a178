//! Healthcheck Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::extensions::*;

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// `ok` when every dependency is reachable, otherwise `degraded`
    pub status: String,

    /// `ok` or `unreachable`
    pub database: String,
}

/// Healthcheck handler
///
/// Reports whether the database answers a trivial query. Responds 503 when it
/// does not.
#[endpoint(
    tags("health"),
    summary = "Health check endpoint",
    responses(
        (status_code = StatusCode::OK, description = "Database reachable"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Database unreachable"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<HealthResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let response = match state.app.health.check_database().await {
        Ok(()) => HealthResponse {
            status: "ok".to_string(),
            database: "ok".to_string(),
        },
        Err(error) => {
            warn!(%error, "database healthcheck failed");

            res.status_code(StatusCode::SERVICE_UNAVAILABLE);

            HealthResponse {
                status: "degraded".to_string(),
                database: "unreachable".to_string(),
            }
        }
    };

    Ok(Json(response))
}
