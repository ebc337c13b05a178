//! Product Handlers

use std::str::FromStr;

use rust_decimal::Decimal;
use salvo::{oapi::ToSchema, prelude::StatusError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use greengrocer::products::Category;
use greengrocer_app::domain::products::{data::ProductUpdate, records::ProductRecord};

use crate::extensions::*;

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub uuid: Uuid,

    pub name: String,

    pub description: String,

    /// Unit price as a decimal string, e.g. `"2.99"`
    pub price: String,

    /// Image reference
    pub image: String,

    /// `fruit` or `vegetable`
    pub category: String,

    /// Units in stock
    pub stock: u32,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        ProductResponse {
            uuid: product.uuid.into(),
            name: product.name,
            description: product.description,
            price: product.price.to_string(),
            image: product.image,
            category: product.category.to_string(),
            stock: product.stock,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

/// Product fields sent on create and update.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductRequest {
    pub name: String,

    pub description: String,

    /// Unit price as a decimal string, e.g. `"2.99"`
    pub price: String,

    pub image: String,

    /// `fruit` or `vegetable`
    pub category: String,

    pub stock: u32,
}

impl TryFrom<ProductRequest> for ProductUpdate {
    type Error = StatusError;

    fn try_from(request: ProductRequest) -> Result<Self, Self::Error> {
        Ok(ProductUpdate {
            name: request.name,
            description: request.description,
            price: Decimal::from_str(request.price.trim()).or_400("could not parse price")?,
            image: request.image,
            category: Category::from_str(&request.category).or_400("could not parse category")?,
            stock: request.stock,
        })
    }
}
