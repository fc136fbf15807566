//! Collaborators the cart store talks to.
//!
//! The store only sees these traits; `rocketshoes-infra` provides the HTTP and
//! storage adapters, tests provide in-process fakes.

use async_trait::async_trait;
use thiserror::Error;

use rocketshoes_core::ProductId;
use rocketshoes_inventory::Stock;
use rocketshoes_products::Product;

/// Failure talking to a remote storefront service.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("product {0} not found")]
    NotFound(ProductId),
    #[error("network error: {0}")]
    Network(String),
    #[error("API error ({0}): {1}")]
    Api(u16, String),
    #[error("parse error: {0}")]
    Parse(String),
}

/// Failure reading or writing the local cart snapshot.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StorageError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

/// Current stock level lookup.
#[async_trait]
pub trait StockService: Send + Sync {
    /// Fetch the stock level for `product_id`. Never cached by callers.
    async fn stock(&self, product_id: ProductId) -> Result<Stock, ServiceError>;
}

/// Full product record lookup.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn product(&self, product_id: ProductId) -> Result<Product, ServiceError>;
}

/// String key/value storage holding the cart snapshot.
#[async_trait]
pub trait CartStorage: Send + Sync {
    async fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value stored under `key`.
    async fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
