//! Create Product Handler

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use greengrocer_app::domain::products::{
    data::{NewProduct, ProductUpdate},
    records::ProductUuid,
};

use crate::{
    extensions::*,
    products::{ProductRequest, ProductResponse, errors::into_status_error},
};

/// Create Product Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateProductRequest {
    /// Optional client-chosen UUID; one is generated when absent
    #[serde(default)]
    pub uuid: Option<Uuid>,

    pub name: String,

    pub description: String,

    /// Unit price as a decimal string, e.g. `"2.99"`
    pub price: String,

    pub image: String,

    /// `fruit` or `vegetable`
    pub category: String,

    pub stock: u32,
}

impl TryFrom<CreateProductRequest> for NewProduct {
    type Error = StatusError;

    fn try_from(request: CreateProductRequest) -> Result<Self, Self::Error> {
        let fields = ProductUpdate::try_from(ProductRequest {
            name: request.name,
            description: request.description,
            price: request.price,
            image: request.image,
            category: request.category,
            stock: request.stock,
        })?;

        Ok(NewProduct {
            uuid: request.uuid.map_or_else(ProductUuid::new, ProductUuid::from_uuid),
            name: fields.name,
            description: fields.description,
            price: fields.price,
            image: fields.image,
            category: fields.category,
            stock: fields.stock,
        })
    }
}

/// Create Product Handler
#[endpoint(
    tags("products"),
    summary = "Create Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Product created"),
        (status_code = StatusCode::CONFLICT, description = "Product already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateProductRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.state_or_500()?;
    depot.admin_or_403()?;

    let product = state
        .app
        .products
        .create_product(json.into_inner().try_into()?)
        .await
        .map_err(into_status_error)?;

    info!(product_uuid = %product.uuid, name = %product.name, "created product");

    res.add_header(LOCATION, format!("/products/{}", product.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(product.into()))
}
