//! Create Order Handler

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use greengrocer::orders::{DeliveryDetails, OrderLine, OrderRequest};
use greengrocer_app::domain::orders::{
    OrdersServiceError, data::NewOrder, records::OrderUuid,
};

use crate::{
    extensions::*,
    observability::record_order_placed,
    orders::{
        OrderResponse,
        errors::{into_status_error, record_placement_failure},
    },
};

/// Requested product and quantity
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderLineRequest {
    pub product: Uuid,
    pub quantity: u32,
}

/// Create Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    pub customer_name: String,

    pub contact_number: String,

    pub delivery_address: String,

    #[serde(default)]
    pub notes: Option<String>,

    /// Lines in the order they were added to the cart
    pub items: Vec<OrderLineRequest>,
}

impl TryFrom<CreateOrderRequest> for OrderRequest {
    type Error = OrdersServiceError;

    fn try_from(request: CreateOrderRequest) -> Result<Self, Self::Error> {
        let delivery = DeliveryDetails {
            customer_name: request.customer_name,
            contact_number: request.contact_number,
            delivery_address: request.delivery_address,
            notes: request.notes,
        };

        let lines = request
            .items
            .into_iter()
            .map(|line| OrderLine {
                product: line.product,
                quantity: line.quantity,
            })
            .collect();

        OrderRequest::new(delivery, lines).map_err(Into::into)
    }
}

/// Create Order Handler
///
/// Places an order for the signed-in user. Stock is taken for every line or
/// for none of them.
#[endpoint(
    tags("orders"),
    summary = "Place Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid order"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::CONFLICT, description = "Insufficient stock"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let caller = depot.current_user_or_401()?;

    let request = OrderRequest::try_from(json.into_inner()).map_err(reject)?;

    let order = state
        .app
        .orders
        .place_order(NewOrder {
            uuid: OrderUuid::new(),
            user: caller.uuid,
            request,
        })
        .await
        .map_err(reject)?;

    record_order_placed();

    info!(
        order_uuid = %order.uuid,
        user_uuid = %order.user_uuid,
        total_amount = %order.total_amount,
        "order placed"
    );

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}

fn reject(error: OrdersServiceError) -> StatusError {
    record_placement_failure(&error);

    into_status_error(error)
}
