//! Product Records

use greengrocer::products::Category;
use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::uuids::TypedUuid;

/// Product UUID
pub type ProductUuid = TypedUuid<ProductRecord>;

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image: String,
    pub category: Category,
    pub stock: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// One page of a product listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductsPage {
    pub products: Vec<ProductRecord>,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
}

impl ProductsPage {
    /// Number of pages needed to show every matching product.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(u64::from(self.limit.max(1)))
    }
}
