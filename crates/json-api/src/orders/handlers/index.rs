//! Order Index Handler

use salvo::prelude::*;

use crate::{
    extensions::*,
    orders::{OrdersResponse, errors::into_status_error},
};

/// Order Index Handler
///
/// Returns the signed-in user's orders, newest first.
#[endpoint(
    tags("orders"),
    summary = "List My Orders",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let caller = depot.current_user_or_401()?;

    let orders = state
        .app
        .orders
        .list_orders_for_user(caller.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into()))
}
