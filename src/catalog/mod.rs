//! # Product Catalog
//!
//! The ordered, read-only list of drinks shown on the screen. The built-in
//! catalog holds three records; `--catalog <FILE>` swaps in a JSON array of
//! records with the same shape:
//!
//! ```json
//! [
//!   {
//!     "id": 1,
//!     "image": "coffee1",
//!     "name": "Strawberry Cheesecake Frappuccino",
//!     "price": 28,
//!     "size": "420ml",
//!     "description": "A dreamy combination of ..."
//!   }
//! ]
//! ```

mod product;

pub use product::Product;

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Reasons a catalog file is rejected.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("duplicate product id {0}")]
    DuplicateId(u32),
    #[error("product {0} has an empty name")]
    EmptyName(u32),
    #[error("product {id} has an invalid price {price}")]
    InvalidPrice { id: u32, price: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn builtin() -> Self {
        Self {
            products: product::builtin_products(),
        }
    }

    /// Wrap an already-built list after checking it.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        validate(&products)?;
        Ok(Self { products })
    }

    /// Load a JSON catalog file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;
        let products: Vec<Product> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse catalog file: {}", path.display()))?;
        let catalog = Self::new(products)
            .with_context(|| format!("Invalid catalog file: {}", path.display()))?;
        log::info!(
            "Loaded {} products from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, index: usize) -> Option<&Product> {
        self.products.get(index)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn validate(products: &[Product]) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for p in products {
        if !seen.insert(p.id) {
            return Err(CatalogError::DuplicateId(p.id));
        }
        if p.name.trim().is_empty() {
            return Err(CatalogError::EmptyName(p.id));
        }
        if !p.price.is_finite() || p.price < 0.0 {
            return Err(CatalogError::InvalidPrice {
                id: p.id,
                price: p.price,
            });
        }
    }
    Ok(())
}
