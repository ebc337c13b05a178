//! Cart Store
//!
//! Keeps the cart across restarts. A missing file is an empty cart.

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::Mutex,
};

use greengrocer::cart::Cart;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartStoreError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed cart: {0}")]
    Json(#[from] serde_json::Error),
}

/// Durable cart storage.
pub trait CartStore: Send + Sync {
    /// Load the saved cart, or an empty one if nothing was saved.
    ///
    /// # Errors
    ///
    /// Returns an error if stored data cannot be read or parsed.
    fn load(&self) -> Result<Cart, CartStoreError>;

    /// Replace the saved cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart cannot be written.
    fn save(&self, cart: &Cart) -> Result<(), CartStoreError>;

    /// Forget the saved cart.
    ///
    /// # Errors
    ///
    /// Returns an error if stored data cannot be removed.
    fn clear(&self) -> Result<(), CartStoreError>;
}

/// Cart saved as JSON in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CartStore for JsonFileStore {
    fn load(&self) -> Result<Cart, CartStoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(Cart::new()),
            Err(error) => Err(error.into()),
        }
    }

    fn save(&self, cart: &Cart) -> Result<(), CartStoreError> {
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.path, serde_json::to_vec(cart)?)?;

        Ok(())
    }

    fn clear(&self) -> Result<(), CartStoreError> {
        match fs::remove_file(&self.path) {
            Err(error) if error.kind() != io::ErrorKind::NotFound => Err(error.into()),
            _ => Ok(()),
        }
    }
}

/// Cart kept in memory only.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    cart: Mutex<Option<Cart>>,
}

impl CartStore for InMemoryStore {
    fn load(&self) -> Result<Cart, CartStoreError> {
        let saved = self.cart.lock().map_or(None, |cart| cart.clone());

        Ok(saved.unwrap_or_default())
    }

    fn save(&self, cart: &Cart) -> Result<(), CartStoreError> {
        if let Ok(mut saved) = self.cart.lock() {
            *saved = Some(cart.clone());
        }

        Ok(())
    }

    fn clear(&self) -> Result<(), CartStoreError> {
        if let Ok(mut saved) = self.cart.lock() {
            *saved = None;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use greengrocer::cart::CartProduct;
    use rust_decimal::Decimal;
    use testresult::TestResult;
    use uuid::Uuid;

    use super::*;

    fn cart() -> TestResult<Cart> {
        let mut cart = Cart::new();

        cart.add(
            CartProduct {
                product: Uuid::from_u128(1),
                name: "Fresh Apples".to_string(),
                unit_price: Decimal::new(299, 2),
                image: "apples.jpg".to_string(),
            },
            2,
        )?;

        Ok(cart)
    }

    #[test]
    fn missing_file_loads_an_empty_cart() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = JsonFileStore::new(dir.path().join("cart.json"));

        assert!(store.load()?.is_empty());

        Ok(())
    }

    #[test]
    fn saved_cart_survives_a_new_store() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested").join("cart.json");

        JsonFileStore::new(&path).save(&cart()?)?;

        let loaded = JsonFileStore::new(&path).load()?;

        assert_eq!(loaded, cart()?);

        Ok(())
    }

    #[test]
    fn clear_removes_the_file_and_tolerates_absence() -> TestResult {
        let dir = tempfile::tempdir()?;
        let store = JsonFileStore::new(dir.path().join("cart.json"));

        store.save(&cart()?)?;
        store.clear()?;
        store.clear()?;

        assert!(!store.path().exists());

        Ok(())
    }

    #[test]
    fn malformed_file_is_reported() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("cart.json");
        fs::write(&path, "{not json")?;

        assert!(matches!(
            JsonFileStore::new(path).load(),
            Err(CartStoreError::Json(_))
        ));

        Ok(())
    }

    #[test]
    fn in_memory_store_round_trip() -> TestResult {
        let store = InMemoryStore::default();

        store.save(&cart()?)?;
        assert_eq!(store.load()?.unit_count(), 2);

        store.clear()?;
        assert!(store.load()?.is_empty());

        Ok(())
    }
}
