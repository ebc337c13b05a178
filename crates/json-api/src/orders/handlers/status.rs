//! Update Order Status Handler

use std::str::FromStr;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use greengrocer::status::OrderStatus;
use greengrocer_app::domain::orders::OrdersServiceError;

use crate::{
    extensions::*,
    observability::record_status_transition,
    orders::{OrderResponse, errors::into_status_error},
};

/// Update Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateStatusRequest {
    /// `pending`, `in-progress` or `delivered`
    pub status: String,
}

/// Update Order Status Handler
///
/// Moves an order to the next status. Admin only.
#[endpoint(
    tags("orders"),
    summary = "Update Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Status updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unrecognised status"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Out-of-sequence transition"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdateStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let caller = depot.admin_or_403()?;

    let status = OrderStatus::from_str(&json.into_inner().status)
        .map_err(|error| into_status_error(OrdersServiceError::InvalidTransition(error)))?;

    let (order, change) = state
        .app
        .orders
        .update_status(caller, order.into_inner().into(), status)
        .await
        .map_err(into_status_error)?;

    record_status_transition(change.to);

    info!(
        order_uuid = %order.uuid,
        from = %change.from,
        to = %change.to,
        "order status changed"
    );

    Ok(Json(order.into()))
}
