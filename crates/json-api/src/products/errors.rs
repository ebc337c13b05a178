//! Product Errors

use salvo::http::StatusError;
use tracing::error;

use greengrocer_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Product already exists")
        }
        ProductsServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        ProductsServiceError::InvalidPrice(_)
        | ProductsServiceError::InvalidStock
        | ProductsServiceError::InvalidPagination => {
            StatusError::bad_request().brief(error.to_string())
        }
        ProductsServiceError::InvalidReference
        | ProductsServiceError::MissingRequiredData
        | ProductsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid product payload")
        }
        ProductsServiceError::Sql(source) => {
            error!("product storage failed: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use greengrocer::pricing::{self, PricingError};
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn price_above_storable_range_is_a_bad_request() {
        let status = into_status_error(ProductsServiceError::InvalidPrice(
            PricingError::OutOfRange {
                amount: Decimal::new(100_000_000_000, 2),
                max: pricing::max_unit_price(),
            },
        ));

        assert_eq!(status.code.as_u16(), 400);
        assert_eq!(
            status.brief,
            "1000000000.00 exceeds the maximum of 99999999.99"
        );
    }

    #[test]
    fn invalid_data_is_a_bad_request() {
        let status = into_status_error(ProductsServiceError::InvalidData);

        assert_eq!(status.code.as_u16(), 400);
    }
}
