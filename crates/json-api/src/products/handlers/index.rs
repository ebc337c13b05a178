//! Product Index Handler

use std::str::FromStr;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use greengrocer::products::Category;
use greengrocer_app::domain::products::data::ProductQuery;

use crate::{
    extensions::*,
    products::{ProductResponse, errors::into_status_error},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    /// The products on this page, newest first
    pub products: Vec<ProductResponse>,

    pub current_page: u32,

    pub total_pages: u64,

    /// Products matching the filter across all pages
    pub total_products: u64,
}

/// Product Index Handler
///
/// Returns one page of the catalog.
#[endpoint(tags("products"), summary = "List Products")]
pub(crate) async fn handler(
    page: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    category: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let category = category
        .into_inner()
        .map(|value| Category::from_str(&value))
        .transpose()
        .or_400("could not parse \"category\" query parameter")?;

    let query = ProductQuery::new(page.into_inner(), limit.into_inner(), category)
        .map_err(into_status_error)?;

    let page = state
        .app
        .products
        .list_products(query)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        current_page: page.page,
        total_pages: page.total_pages(),
        total_products: page.total,
        products: page.products.into_iter().map(Into::into).collect(),
    }))
}
