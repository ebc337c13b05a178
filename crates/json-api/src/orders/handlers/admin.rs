//! Admin Order Index Handler

use salvo::prelude::*;

use crate::{
    extensions::*,
    orders::{OrdersResponse, errors::into_status_error},
};

/// Admin Order Index Handler
///
/// Returns every order with its owner's email, newest first.
#[endpoint(
    tags("admin"),
    summary = "List All Orders",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let caller = depot.admin_or_403()?;

    let orders = state
        .app
        .orders
        .list_all_orders(caller)
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use greengrocer::status::OrderStatus;
    use greengrocer_app::domain::{
        orders::{MockOrdersService, records::OrderUuid},
        users::records::UserUuid,
    };

    use crate::test_helpers::{TEST_ADMIN, admin_service, customer_service, make_order, orders_state};

    use super::*;

    fn route() -> Router {
        Router::with_path("admin/orders").get(handler)
    }

    #[tokio::test]
    async fn test_admin_sees_every_order_with_email() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_list_all_orders()
            .once()
            .withf(|viewer| *viewer == TEST_ADMIN)
            .return_once(|_| {
                Ok(vec![
                    make_order(OrderUuid::new(), UserUuid::new(), OrderStatus::Delivered),
                    make_order(OrderUuid::new(), UserUuid::new(), OrderStatus::Pending),
                ])
            });

        let response: OrdersResponse = TestClient::get("http://example.com/admin/orders")
            .send(&admin_service(orders_state(orders), route()))
            .await
            .take_json()
            .await?;

        assert_eq!(response.orders.len(), 2, "expected two orders");
        assert!(
            response.orders.iter().all(|order| order.user_email == "ada@example.com"),
            "expected owner emails on every order"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_customer_is_forbidden() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_list_all_orders().never();

        let res = TestClient::get("http://example.com/admin/orders")
            .send(&customer_service(orders_state(orders), route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
