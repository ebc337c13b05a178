//! Get Order Handler

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{OrderResponse, errors::into_status_error},
};

/// Get Order Handler
///
/// Returns an order to its owner or to an admin. Anyone else gets a 404.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let caller = depot.current_user_or_401()?;

    let order = state
        .app
        .orders
        .get_order(caller, order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use greengrocer::status::OrderStatus;
    use greengrocer_app::domain::orders::{
        MockOrdersService, OrdersServiceError, records::OrderUuid,
    };

    use crate::test_helpers::{TEST_CUSTOMER, customer_service, make_order, orders_state};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        customer_service(
            orders_state(orders),
            Router::with_path("orders/{order}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_get_returns_order_with_snapshots() -> TestResult {
        let uuid = OrderUuid::new();

        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .withf(move |viewer, order| *viewer == TEST_CUSTOMER && *order == uuid)
            .return_once(move |viewer, order| {
                Ok(make_order(order, viewer.uuid, OrderStatus::Pending))
            });

        orders.expect_place_order().never();
        orders.expect_list_orders_for_user().never();
        orders.expect_list_all_orders().never();
        orders.expect_update_status().never();

        let response: OrderResponse = TestClient::get(format!("http://example.com/orders/{uuid}"))
            .send(&make_service(orders))
            .await
            .take_json()
            .await?;

        assert_eq!(response.uuid, uuid.into_uuid());
        assert_eq!(response.items.len(), 1, "expected one item");
        assert_eq!(response.items[0].unit_price, "2.99");
        assert_eq!(response.items[0].line_total, "5.98");
        assert_eq!(response.total_amount, "5.98");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_someone_elses_order_returns_404() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/orders/{}", OrderUuid::new()))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
