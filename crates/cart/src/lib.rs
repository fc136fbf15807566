//! Shopping cart domain + state store.
//!
//! - [`Cart`] / [`LineItem`]: pure cart model and stock reconciliation rules.
//! - [`CartStore`]: async state container that asks the storefront for stock
//!   and products, persists every committed cart and reports rejections.
//! - [`ports`]: the traits the store's collaborators implement.

pub mod cart;
pub mod error;
pub mod line_item;
pub mod notice;
pub mod ports;
pub mod store;

pub use cart::{AddPlan, Cart};
pub use error::CartError;
pub use line_item::LineItem;
pub use notice::{CartOperation, Notice, Notifier, TracingNotifier};
pub use ports::{CartStorage, ProductCatalog, ServiceError, StockService, StorageError};
pub use store::{AmountUpdate, AmountUpdateOutcome, CART_STORAGE_KEY, CartStore, CartStoreBuilder};
