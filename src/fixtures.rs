//! Fixtures
//!
//! Loads catalog definitions from YAML files such as `fixtures/catalog.yml`.

use std::{fs, path::Path};

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::{pricing, products::Category};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price for {product}: {price}")]
    InvalidPrice {
        /// Product name
        product: String,
        /// Price as written in the fixture
        price: String,
    },

    /// Blank product name
    #[error("Product at position {0} has no name")]
    MissingName(usize),
}

/// Catalog fixture as written in YAML.
#[derive(Debug, Deserialize)]
struct CatalogFixture {
    products: Vec<ProductFixture>,
}

/// Product fixture as written in YAML.
#[derive(Debug, Deserialize)]
struct ProductFixture {
    name: String,
    description: String,
    price: String,
    image: String,
    category: Category,
    stock: u32,
}

/// A catalog product ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Name
    pub name: String,

    /// Description
    pub description: String,

    /// Unit price, two decimal places
    pub price: Decimal,

    /// Image reference
    pub image: String,

    /// Category
    pub category: Category,

    /// Units in stock
    pub stock: u32,
}

/// Load a catalog fixture from a file.
///
/// # Errors
///
/// Returns [`FixtureError`] if the file cannot be read or any product is invalid.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Vec<CatalogEntry>, FixtureError> {
    let contents = fs::read_to_string(path)?;

    parse_catalog(&contents)
}

/// Parse a catalog fixture from YAML text.
///
/// # Errors
///
/// Returns [`FixtureError`] if the YAML is malformed or any product is invalid.
pub fn parse_catalog(contents: &str) -> Result<Vec<CatalogEntry>, FixtureError> {
    let fixture: CatalogFixture = serde_norway::from_str(contents)?;

    fixture
        .products
        .into_iter()
        .enumerate()
        .map(|(position, product)| into_entry(position, product))
        .collect()
}

fn into_entry(position: usize, product: ProductFixture) -> Result<CatalogEntry, FixtureError> {
    let name = product.name.trim().to_string();

    if name.is_empty() {
        return Err(FixtureError::MissingName(position));
    }

    let price = product
        .price
        .trim()
        .parse::<Decimal>()
        .ok()
        .and_then(|price| pricing::validate_price(price).ok())
        .ok_or_else(|| FixtureError::InvalidPrice {
            product: name.clone(),
            price: product.price.clone(),
        })?;

    Ok(CatalogEntry {
        name,
        description: product.description,
        price,
        image: product.image,
        category: product.category,
        stock: product.stock,
    })
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_products() -> TestResult {
        let entries = parse_catalog(
            r#"
products:
  - name: Fresh Apples
    description: Crisp apples
    price: "2.99"
    image: apples.jpg
    category: fruit
    stock: 100
"#,
        )?;

        assert_eq!(
            entries,
            vec![CatalogEntry {
                name: "Fresh Apples".to_string(),
                description: "Crisp apples".to_string(),
                price: Decimal::from_str("2.99")?,
                image: "apples.jpg".to_string(),
                category: Category::Fruit,
                stock: 100,
            }]
        );

        Ok(())
    }

    #[test]
    fn rejects_sub_cent_prices() {
        let result = parse_catalog(
            r#"
products:
  - name: Kiwi
    description: Tangy
    price: "3.499"
    image: kiwi.jpg
    category: fruit
    stock: 1
"#,
        );

        assert!(
            matches!(result, Err(FixtureError::InvalidPrice { .. })),
            "expected invalid price, got {result:?}"
        );
    }

    #[test]
    fn rejects_unknown_category() {
        let result = parse_catalog(
            r#"
products:
  - name: Milk
    description: Dairy
    price: "1.00"
    image: milk.jpg
    category: dairy
    stock: 1
"#,
        );

        assert!(
            matches!(result, Err(FixtureError::Yaml(_))),
            "expected YAML error, got {result:?}"
        );
    }
}
