//! Test helpers.

use std::sync::Arc;

use greengrocer::{
    orders::{DeliveryDetails, OrderItemSnapshot},
    products::Category,
    status::OrderStatus,
};
use greengrocer_app::{
    auth::{AuthenticatedUser, MockAuthService},
    context::AppContext,
    domain::{
        orders::{MockOrdersService, records::{OrderRecord, OrderUuid}},
        products::{MockProductsService, records::{ProductRecord, ProductUuid}},
        users::records::{UserRecord, UserUuid},
    },
    health::MockHealthService,
};
use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, state::State};

pub(crate) const TEST_CUSTOMER: AuthenticatedUser = AuthenticatedUser {
    uuid: UserUuid::from_uuid(Uuid::from_u128(1)),
    is_admin: false,
};

pub(crate) const TEST_ADMIN: AuthenticatedUser = AuthenticatedUser {
    uuid: UserUuid::from_uuid(Uuid::from_u128(2)),
    is_admin: true,
};

#[salvo::handler]
pub(crate) async fn inject_customer(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_current_user(TEST_CUSTOMER);
    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
pub(crate) async fn inject_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_current_user(TEST_ADMIN);
    ctrl.call_next(req, depot, res).await;
}

pub(crate) fn strict_products_mock() -> MockProductsService {
    let mut products = MockProductsService::new();

    products.expect_list_products().never();
    products.expect_get_product().never();
    products.expect_create_product().never();
    products.expect_update_product().never();
    products.expect_delete_product().never();

    products
}

pub(crate) fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_place_order().never();
    orders.expect_list_orders_for_user().never();
    orders.expect_get_order().never();
    orders.expect_list_all_orders().never();
    orders.expect_update_status().never();

    orders
}

pub(crate) fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_register().never();
    auth.expect_login().never();
    auth.expect_authenticate_bearer().never();
    auth.expect_current_user().never();

    auth
}

pub(crate) fn strict_health_mock() -> MockHealthService {
    let mut health = MockHealthService::new();

    health.expect_check_database().never();

    health
}

pub(crate) fn state_with(
    products: MockProductsService,
    orders: MockOrdersService,
    auth: MockAuthService,
) -> Arc<State> {
    state_with_health(products, orders, auth, strict_health_mock())
}

pub(crate) fn state_with_health(
    products: MockProductsService,
    orders: MockOrdersService,
    auth: MockAuthService,
    health: MockHealthService,
) -> Arc<State> {
    State::from_app_context(AppContext {
        products: Arc::new(products),
        orders: Arc::new(orders),
        auth: Arc::new(auth),
        health: Arc::new(health),
    })
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    state_with(strict_products_mock(), strict_orders_mock(), auth)
}

/// Serve `route` with no caller injected.
pub(crate) fn public_service(state: Arc<State>, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state)).push(route))
}

/// Serve `route` as the test customer.
pub(crate) fn customer_service(state: Arc<State>, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_customer)
            .push(route),
    )
}

/// Serve `route` as the test admin.
pub(crate) fn admin_service(state: Arc<State>, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_admin)
            .push(route),
    )
}

pub(crate) fn products_state(products: MockProductsService) -> Arc<State> {
    state_with(products, strict_orders_mock(), strict_auth_mock())
}

pub(crate) fn orders_state(orders: MockOrdersService) -> Arc<State> {
    state_with(strict_products_mock(), orders, strict_auth_mock())
}

pub(crate) fn make_product(uuid: ProductUuid) -> ProductRecord {
    ProductRecord {
        uuid,
        name: "Fresh Apples".to_string(),
        description: "Crisp red apples".to_string(),
        price: Decimal::new(299, 2),
        image: "apples.jpg".to_string(),
        category: Category::Fruit,
        stock: 5,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_user(user: AuthenticatedUser) -> UserRecord {
    UserRecord {
        uuid: user.uuid,
        email: "ada@example.com".to_string(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        is_admin: user.is_admin,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_order(uuid: OrderUuid, owner: UserUuid, status: OrderStatus) -> OrderRecord {
    OrderRecord {
        uuid,
        user_uuid: owner,
        user_email: "ada@example.com".to_string(),
        delivery: DeliveryDetails {
            customer_name: "Ada Lovelace".to_string(),
            contact_number: "555-0100".to_string(),
            delivery_address: "12 Analytical Row".to_string(),
            notes: None,
        },
        items: vec![OrderItemSnapshot {
            product: Uuid::from_u128(10),
            name: "Fresh Apples".to_string(),
            unit_price: Decimal::new(299, 2),
            quantity: 2,
        }],
        total_amount: Decimal::new(598, 2),
        status,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
