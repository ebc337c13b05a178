//! Products Data

use greengrocer::products::Category;
use rust_decimal::Decimal;

use crate::domain::products::{errors::ProductsServiceError, records::ProductUuid};

/// Default number of products per page.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Largest page a caller may ask for.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image: String,
    pub category: Category,
    pub stock: u32,
}

/// Product Update Data
///
/// Replaces every editable field.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image: String,
    pub category: Category,
    pub stock: u32,
}

/// Product listing query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductQuery {
    page: u32,
    limit: u32,
    category: Option<Category>,
}

impl ProductQuery {
    /// Build a query, applying defaults for missing values.
    ///
    /// # Errors
    ///
    /// Returns [`ProductsServiceError::InvalidPagination`] when `page` is zero or
    /// `limit` is outside `1..=100`.
    pub fn new(
        page: Option<u32>,
        limit: Option<u32>,
        category: Option<Category>,
    ) -> Result<Self, ProductsServiceError> {
        let page = page.unwrap_or(1);
        let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT);

        if page == 0 || !(1..=MAX_PAGE_LIMIT).contains(&limit) {
            return Err(ProductsServiceError::InvalidPagination);
        }

        Ok(Self {
            page,
            limit,
            category,
        })
    }

    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
    }

    #[must_use]
    pub fn category(&self) -> Option<Category> {
        self.category
    }

    /// Rows to skip before this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
            category: None,
        }
    }
}
