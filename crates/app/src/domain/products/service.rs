//! Products service.

use async_trait::async_trait;
use greengrocer::pricing;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::products::{
        data::{NewProduct, ProductQuery, ProductUpdate},
        errors::ProductsServiceError,
        records::{ProductRecord, ProductUuid, ProductsPage},
        repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        query: ProductQuery,
    ) -> Result<ProductsPage, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let products = self.repository.list_products(&mut tx, &query).await?;
        let total = self
            .repository
            .count_products(&mut tx, query.category())
            .await?;

        tx.commit().await?;

        Ok(ProductsPage {
            products,
            page: query.page(),
            limit: query.limit(),
            total,
        })
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let name = required_name(&product.name)?;
        let price = pricing::validate_price(product.price)?;
        let stock = stock_value(product.stock)?;

        let product = NewProduct {
            name,
            price,
            ..product
        };

        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .repository
            .create_product(&mut tx, &product, stock)
            .await?;

        tx.commit().await?;

        info!(product = %created.uuid, name = %created.name, "product created");

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let name = required_name(&update.name)?;
        let price = pricing::validate_price(update.price)?;
        let stock = stock_value(update.stock)?;

        let update = ProductUpdate {
            name,
            price,
            ..update
        };

        let mut tx = self.db.begin_transaction().await?;

        let updated = self
            .repository
            .update_product(&mut tx, product, &update, stock)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        info!(%product, "product deleted");

        Ok(())
    }
}

fn required_name(name: &str) -> Result<String, ProductsServiceError> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ProductsServiceError::MissingRequiredData);
    }

    Ok(name.to_string())
}

fn stock_value(stock: u32) -> Result<i32, ProductsServiceError> {
    i32::try_from(stock).map_err(|_err| ProductsServiceError::InvalidStock)
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves one page of products, newest first.
    async fn list_products(&self, query: ProductQuery)
    -> Result<ProductsPage, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError>;

    /// Creates a new product.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Replaces a product's editable fields.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Soft-deletes a product.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use greengrocer::{pricing::PricingError, products::Category};
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::test::{TestContext, helpers::new_product};

    use super::*;

    #[tokio::test]
    async fn create_product_returns_stored_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let product = new_product("Fresh Apples", "2.99", 100)?;
        let uuid = product.uuid;

        let created = ctx.products.create_product(product).await?;

        assert_eq!(created.uuid, uuid);
        assert_eq!(created.name, "Fresh Apples");
        assert_eq!(created.price, Decimal::from_str("2.99")?);
        assert_eq!(created.stock, 100);
        assert_eq!(created.category, Category::Fruit);
        assert!(created.deleted_at.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn create_product_rejects_sub_cent_price() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .create_product(new_product("Kiwi", "3.499", 1)?)
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidPrice(_))),
            "expected InvalidPrice, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_product_rejects_price_above_column_range() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .create_product(new_product("Truffle Crate", "1000000000.00", 1)?)
            .await;

        assert!(
            matches!(
                result,
                Err(ProductsServiceError::InvalidPrice(PricingError::OutOfRange { .. }))
            ),
            "expected an out of range price, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_product_rejects_blank_name() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .create_product(new_product("   ", "1.00", 1)?)
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::MissingRequiredData)),
            "expected MissingRequiredData, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_product_duplicate_uuid_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;
        let product = new_product("Kiwi", "3.49", 10)?;

        ctx.products.create_product(product.clone()).await?;

        let result = ctx.products.create_product(product).await;

        assert!(
            matches!(result, Err(ProductsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_product_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.products.get_product(ProductUuid::new()).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn list_products_pages_newest_first() -> TestResult {
        let ctx = TestContext::new().await;

        let mut created = Vec::new();

        for index in 0..3 {
            let product = ctx
                .products
                .create_product(new_product(&format!("Product {index}"), "1.00", 5)?)
                .await?;

            created.push(product.uuid);
        }

        let first = ctx
            .products
            .list_products(ProductQuery::new(Some(1), Some(2), None)?)
            .await?;

        let second = ctx
            .products
            .list_products(ProductQuery::new(Some(2), Some(2), None)?)
            .await?;

        let first_uuids: Vec<ProductUuid> = first.products.iter().map(|p| p.uuid).collect();
        let second_uuids: Vec<ProductUuid> = second.products.iter().map(|p| p.uuid).collect();

        assert_eq!(first.total, 3);
        assert_eq!(first.total_pages(), 2);
        assert_eq!(first_uuids, created.iter().rev().take(2).copied().collect::<Vec<_>>());
        assert_eq!(second_uuids, created.first().copied().into_iter().collect::<Vec<_>>());

        Ok(())
    }

    #[tokio::test]
    async fn list_products_filters_by_category() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.products
            .create_product(new_product("Fresh Apples", "2.99", 10)?)
            .await?;

        let mut carrots = new_product("Fresh Carrots", "1.49", 10)?;
        carrots.category = Category::Vegetable;
        ctx.products.create_product(carrots).await?;

        let page = ctx
            .products
            .list_products(ProductQuery::new(None, None, Some(Category::Vegetable))?)
            .await?;

        assert_eq!(page.total, 1);
        assert_eq!(
            page.products.first().map(|p| p.name.as_str()),
            Some("Fresh Carrots")
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_product_replaces_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let product = ctx
            .products
            .create_product(new_product("Avocados", "2.99", 80)?)
            .await?;

        let updated = ctx
            .products
            .update_product(
                product.uuid,
                ProductUpdate {
                    name: "Hass Avocados".to_string(),
                    description: "Creamy".to_string(),
                    price: Decimal::from_str("3.25")?,
                    image: "avocado.jpg".to_string(),
                    category: Category::Fruit,
                    stock: 12,
                },
            )
            .await?;

        assert_eq!(updated.uuid, product.uuid);
        assert_eq!(updated.name, "Hass Avocados");
        assert_eq!(updated.price, Decimal::from_str("3.25")?);
        assert_eq!(updated.stock, 12);

        Ok(())
    }

    #[tokio::test]
    async fn update_product_unknown_uuid_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .update_product(
                ProductUuid::new(),
                ProductUpdate {
                    name: "Ghost".to_string(),
                    description: String::new(),
                    price: Decimal::ONE,
                    image: String::new(),
                    category: Category::Fruit,
                    stock: 1,
                },
            )
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn deleted_product_is_hidden() -> TestResult {
        let ctx = TestContext::new().await;
        let product = ctx
            .products
            .create_product(new_product("Lychee", "7.99", 45)?)
            .await?;

        ctx.products.delete_product(product.uuid).await?;

        let result = ctx.products.get_product(product.uuid).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        let page = ctx.products.list_products(ProductQuery::default()).await?;

        assert!(
            !page.products.iter().any(|p| p.uuid == product.uuid),
            "deleted product should not appear in list"
        );
        assert_eq!(page.total, 0);

        Ok(())
    }

    #[tokio::test]
    async fn delete_product_twice_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let product = ctx
            .products
            .create_product(new_product("Figs", "6.99", 55)?)
            .await?;

        ctx.products.delete_product(product.uuid).await?;

        let result = ctx.products.delete_product(product.uuid).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }
}
