//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use greengrocer::{pricing::PricingError, status::StatusTransitionError};
use greengrocer_app::domain::orders::OrdersServiceError;

use crate::observability::{OrderRejection, record_order_rejected};

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::InvalidRequest(_) => StatusError::bad_request().brief(error.to_string()),
        OrdersServiceError::ProductNotFound(_) => {
            StatusError::not_found().brief(error.to_string())
        }
        OrdersServiceError::InsufficientStock { .. } => {
            StatusError::conflict().brief(error.to_string())
        }
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::Forbidden => {
            StatusError::forbidden().brief("Admin access required")
        }
        OrdersServiceError::InvalidTransition(StatusTransitionError::Unrecognised(_)) => {
            StatusError::bad_request().brief(error.to_string())
        }
        OrdersServiceError::InvalidTransition(_) | OrdersServiceError::StatusConflict => {
            StatusError::conflict().brief(error.to_string())
        }
        OrdersServiceError::AlreadyExists => StatusError::conflict().brief("Order already exists"),
        OrdersServiceError::InvalidReference | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::Pricing(ref pricing @ PricingError::OutOfRange { .. }) => {
            StatusError::bad_request().brief(format!("Order total {pricing}"))
        }
        OrdersServiceError::Pricing(_) | OrdersServiceError::Sql(_) => {
            error!("order processing failed: {error}");

            StatusError::internal_server_error()
        }
    }
}

/// Count a failed placement before mapping it to a response.
pub(crate) fn record_placement_failure(error: &OrdersServiceError) {
    let reason = match error {
        OrdersServiceError::InvalidRequest(_)
        | OrdersServiceError::Pricing(PricingError::OutOfRange { .. }) => {
            OrderRejection::InvalidRequest
        }
        OrdersServiceError::ProductNotFound(_) => OrderRejection::ProductNotFound,
        OrdersServiceError::InsufficientStock { .. } => OrderRejection::InsufficientStock,
        _ => return,
    };

    record_order_rejected(reason);
}

#[cfg(test)]
mod tests {
    use greengrocer::{orders::OrderRequestError, pricing, status::OrderStatus};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn insufficient_stock_is_a_conflict_with_availability() {
        let status = into_status_error(OrdersServiceError::InsufficientStock {
            product: Uuid::nil(),
            name: "Fresh Apples".to_string(),
            available: 5,
            requested: 10,
        });

        assert_eq!(status.code.as_u16(), 409);
        assert_eq!(status.brief, "Insufficient stock for Fresh Apples. Available: 5");
    }

    #[test]
    fn unknown_product_is_not_found() {
        let status = into_status_error(OrdersServiceError::ProductNotFound(Uuid::nil()));

        assert_eq!(status.code.as_u16(), 404);
    }

    #[test]
    fn unrecognised_status_is_a_bad_request() {
        let status = into_status_error(OrdersServiceError::InvalidTransition(
            StatusTransitionError::Unrecognised("shipped".to_string()),
        ));

        assert_eq!(status.code.as_u16(), 400);
    }

    #[test]
    fn out_of_sequence_status_is_a_conflict() {
        let status = into_status_error(OrdersServiceError::InvalidTransition(
            StatusTransitionError::OutOfSequence {
                from: OrderStatus::Pending,
                to: OrderStatus::Delivered,
            },
        ));

        assert_eq!(status.code.as_u16(), 409);
    }

    #[test]
    fn blank_fields_are_bad_requests() {
        let status = into_status_error(OrdersServiceError::InvalidRequest(
            OrderRequestError::MissingField("delivery address"),
        ));

        assert_eq!(status.code.as_u16(), 400);
        assert_eq!(status.brief, "delivery address is required");
    }

    #[test]
    fn total_above_storable_range_is_a_bad_request() {
        let status = into_status_error(OrdersServiceError::Pricing(PricingError::OutOfRange {
            amount: Decimal::new(1_009_999_999_899, 2),
            max: pricing::max_order_total(),
        }));

        assert_eq!(status.code.as_u16(), 400);
        assert_eq!(
            status.brief,
            "Order total 10099999998.99 exceeds the maximum of 9999999999.99"
        );
    }

    #[test]
    fn overflow_is_an_internal_error() {
        let status = into_status_error(OrdersServiceError::Pricing(PricingError::Overflow));

        assert_eq!(status.code.as_u16(), 500);
    }
}
