//! Cart operation errors.

use thiserror::Error;

use rocketshoes_core::{DomainError, ProductId};

use crate::notice::{CartOperation, Notice};
use crate::ports::{ServiceError, StorageError};

/// Why a cart operation was rejected.
///
/// Every variant leaves the cart exactly as it was before the call.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// The requested quantity is above the product's current stock level.
    #[error(
        "requested quantity exceeds stock for product {product_id}: requested {requested}, available {available}"
    )]
    StockExceeded {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    /// Remove/update targeted a product that has no line item.
    #[error("product {0} is not in the cart")]
    NotInCart(ProductId),

    /// Stock or catalog lookup failed.
    #[error("lookup failed: {0}")]
    Lookup(#[from] ServiceError),

    /// The catalog answered with a different product than the one requested.
    #[error("catalog returned product {returned} for requested product {requested}")]
    CatalogMismatch {
        requested: ProductId,
        returned: ProductId,
    },

    #[error("cart storage failed: {0}")]
    Storage(#[from] StorageError),

    /// Cart data violated a cart invariant (e.g. a corrupt stored snapshot).
    #[error("cart invariant violated: {0}")]
    Domain(#[from] DomainError),
}

impl CartError {
    pub fn is_stock_exceeded(&self) -> bool {
        matches!(self, Self::StockExceeded { .. })
    }

    /// The user-facing notice for this error raised by `operation`.
    ///
    /// Stock problems get their own message; everything else collapses into
    /// the operation's generic failure message.
    pub fn notice(&self, operation: CartOperation) -> Notice {
        if self.is_stock_exceeded() {
            return Notice::StockExceeded;
        }
        match operation {
            CartOperation::Add => Notice::AddFailed,
            CartOperation::Remove => Notice::RemoveFailed,
            CartOperation::UpdateAmount => Notice::UpdateFailed,
        }
    }
}
