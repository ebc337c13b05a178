//! Test Helpers

use std::str::FromStr;

use greengrocer::{
    orders::{DeliveryDetails, OrderLine, OrderRequest},
    products::Category,
};
use rust_decimal::Decimal;
use testresult::TestResult;

use crate::{
    auth::{AuthenticatedUser, Password},
    domain::{
        products::{
            ProductsService,
            data::NewProduct,
            records::{ProductRecord, ProductUuid},
        },
        users::records::{UserRecord, UserUuid},
    },
    test::TestContext,
};

/// A fruit with a placeholder description and image.
pub(crate) fn new_product(name: &str, price: &str, stock: u32) -> TestResult<NewProduct> {
    Ok(NewProduct {
        uuid: ProductUuid::new(),
        name: name.to_string(),
        description: format!("{name} from the market"),
        price: Decimal::from_str(price)?,
        image: "https://images.example.com/produce.jpg".to_string(),
        category: Category::Fruit,
        stock,
    })
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    name: &str,
    price: &str,
    stock: u32,
) -> TestResult<ProductRecord> {
    Ok(ctx
        .products
        .create_product(new_product(name, price, stock)?)
        .await?)
}

pub(crate) async fn create_user(
    ctx: &TestContext,
    email: &str,
    is_admin: bool,
) -> TestResult<UserRecord> {
    Ok(ctx
        .auth
        .create_user(email, &Password::new("secret1"), is_admin)
        .await?)
}

pub(crate) fn delivery() -> DeliveryDetails {
    DeliveryDetails {
        customer_name: "Ada Lovelace".to_string(),
        contact_number: "555-0100".to_string(),
        delivery_address: "12 Analytical Row".to_string(),
        notes: None,
    }
}

pub(crate) fn order_request(lines: &[(ProductUuid, u32)]) -> TestResult<OrderRequest> {
    let lines = lines
        .iter()
        .map(|&(product, quantity)| OrderLine {
            product: product.into_uuid(),
            quantity,
        })
        .collect();

    Ok(OrderRequest::new(delivery(), lines)?)
}

pub(crate) fn customer(uuid: UserUuid) -> AuthenticatedUser {
    AuthenticatedUser {
        uuid,
        is_admin: false,
    }
}

pub(crate) fn admin(uuid: UserUuid) -> AuthenticatedUser {
    AuthenticatedUser {
        uuid,
        is_admin: true,
    }
}
