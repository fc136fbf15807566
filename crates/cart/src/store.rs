//! `CartStore`: the cart state container shared by the client surfaces.
//!
//! Each operation:
//! 1. takes the single-writer lock (overlapping calls run one after another),
//! 2. reads the committed cart and a fresh stock level,
//! 3. computes the next cart with the pure rules in [`crate::cart`],
//! 4. writes the snapshot to storage, then publishes the new cart.
//!
//! A failure at any step returns a typed [`CartError`], forwards a [`Notice`]
//! to the notifier and leaves the committed cart untouched.

use std::sync::Arc;

use tokio::sync::{Mutex, watch};

use rocketshoes_core::ProductId;

use crate::cart::{AddPlan, Cart};
use crate::error::CartError;
use crate::line_item::LineItem;
use crate::notice::{CartOperation, Notice, Notifier, TracingNotifier};
use crate::ports::{CartStorage, ProductCatalog, StockService};

/// Storage key of the cart snapshot.
pub const CART_STORAGE_KEY: &str = "@RocketShoes:cart";

/// Request to set a line item's amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountUpdate {
    pub product_id: ProductId,
    /// Requested amount. Values <= 0 are ignored.
    pub amount: i64,
}

impl AmountUpdate {
    pub fn new(product_id: ProductId, amount: i64) -> Self {
        Self { product_id, amount }
    }
}

/// Result of a successful [`CartStore::update_product_amount`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum AmountUpdateOutcome {
    /// The line item now holds the requested amount.
    Updated(LineItem),
    /// The requested amount was <= 0; nothing was looked up or changed.
    Ignored,
}

/// Builder for [`CartStore`].
pub struct CartStoreBuilder {
    stock: Arc<dyn StockService>,
    catalog: Arc<dyn ProductCatalog>,
    storage: Arc<dyn CartStorage>,
    notifier: Arc<dyn Notifier>,
    storage_key: String,
}

impl CartStoreBuilder {
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Load the stored cart (or start empty) and build the store.
    ///
    /// A stored snapshot that cannot be decoded, or that breaks the cart
    /// invariants, is an error; it is never silently replaced.
    pub async fn open(self) -> Result<CartStore, CartError> {
        let cart = match self.storage.load(&self.storage_key).await? {
            Some(raw) => Cart::from_snapshot(&raw)?,
            None => Cart::empty(),
        };
        tracing::info!(key = %self.storage_key, items = cart.len(), "cart loaded");

        let (state, _) = watch::channel(cart);
        Ok(CartStore {
            stock: self.stock,
            catalog: self.catalog,
            storage: self.storage,
            notifier: self.notifier,
            storage_key: self.storage_key,
            state,
            writer: Mutex::new(()),
        })
    }
}

/// Cart state plus the collaborators needed to change it.
///
/// Owned by the application and shared as `Arc<CartStore>`.
pub struct CartStore {
    stock: Arc<dyn StockService>,
    catalog: Arc<dyn ProductCatalog>,
    storage: Arc<dyn CartStorage>,
    notifier: Arc<dyn Notifier>,
    storage_key: String,
    state: watch::Sender<Cart>,
    writer: Mutex<()>,
}

impl core::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CartStore")
            .field("storage_key", &self.storage_key)
            .field("cart", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

impl CartStore {
    pub fn builder(
        stock: Arc<dyn StockService>,
        catalog: Arc<dyn ProductCatalog>,
        storage: Arc<dyn CartStorage>,
    ) -> CartStoreBuilder {
        CartStoreBuilder {
            stock,
            catalog,
            storage,
            notifier: Arc::new(TracingNotifier),
            storage_key: CART_STORAGE_KEY.to_string(),
        }
    }

    /// Snapshot of the committed cart.
    pub fn cart(&self) -> Cart {
        self.state.borrow().clone()
    }

    /// Receiver that observes every committed cart.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.state.subscribe()
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Add one unit of `product_id`, creating its line item if needed.
    ///
    /// Returns the resulting line item.
    #[tracing::instrument(skip_all, fields(product_id = %product_id))]
    pub async fn add_product(&self, product_id: ProductId) -> Result<LineItem, CartError> {
        let result = self.try_add_product(product_id).await;
        self.report(CartOperation::Add, result)
    }

    /// Remove the line item for `product_id`.
    ///
    /// Returns the removed line item.
    #[tracing::instrument(skip_all, fields(product_id = %product_id))]
    pub async fn remove_product(&self, product_id: ProductId) -> Result<LineItem, CartError> {
        let result = self.try_remove_product(product_id).await;
        self.report(CartOperation::Remove, result)
    }

    /// Set the amount of an existing line item, bounded by current stock.
    #[tracing::instrument(
        skip_all,
        fields(product_id = %update.product_id, amount = update.amount)
    )]
    pub async fn update_product_amount(
        &self,
        update: AmountUpdate,
    ) -> Result<AmountUpdateOutcome, CartError> {
        if update.amount <= 0 {
            tracing::debug!("non-positive amount ignored");
            return Ok(AmountUpdateOutcome::Ignored);
        }
        let result = self.try_update_product_amount(update).await;
        self.report(CartOperation::UpdateAmount, result)
    }

    async fn try_add_product(&self, product_id: ProductId) -> Result<LineItem, CartError> {
        let _writer = self.writer.lock().await;
        let current = self.cart();

        let stock = self.stock.stock(product_id).await?;
        tracing::debug!(available = stock.amount, "stock fetched");

        let next = match current.plan_add(product_id, &stock)? {
            AddPlan::Incremented(next) => next,
            AddPlan::NeedsProduct => {
                let product = self.catalog.product(product_id).await?;
                if product.id != product_id {
                    return Err(CartError::CatalogMismatch {
                        requested: product_id,
                        returned: product.id,
                    });
                }
                current.with_new_item(product)?
            }
        };

        let item = line_of(&next, product_id)?;
        self.commit(next).await?;
        tracing::info!(amount = item.amount, "product added to cart");
        Ok(item)
    }

    async fn try_remove_product(&self, product_id: ProductId) -> Result<LineItem, CartError> {
        let _writer = self.writer.lock().await;
        let (next, removed) = self
            .cart()
            .without(product_id)
            .ok_or(CartError::NotInCart(product_id))?;

        self.commit(next).await?;
        tracing::info!("product removed from cart");
        Ok(removed)
    }

    async fn try_update_product_amount(
        &self,
        update: AmountUpdate,
    ) -> Result<AmountUpdateOutcome, CartError> {
        let AmountUpdate { product_id, amount } = update;
        let _writer = self.writer.lock().await;

        let stock = self.stock.stock(product_id).await?;
        tracing::debug!(available = stock.amount, "stock fetched");

        let next = self.cart().plan_amount_update(product_id, amount, &stock)?;
        let item = line_of(&next, product_id)?;
        self.commit(next).await?;
        tracing::info!("product amount updated");
        Ok(AmountUpdateOutcome::Updated(item))
    }

    /// Persist `next`, then make it the committed cart.
    async fn commit(&self, next: Cart) -> Result<(), CartError> {
        let snapshot = next.to_snapshot()?;
        self.storage.save(&self.storage_key, &snapshot).await?;
        self.state.send_replace(next);
        Ok(())
    }

    fn report<T>(
        &self,
        operation: CartOperation,
        result: Result<T, CartError>,
    ) -> Result<T, CartError> {
        if let Err(err) = &result {
            let notice: Notice = err.notice(operation);
            tracing::debug!(operation = %operation, error = %err, "cart operation rejected");
            self.notifier.notify(notice, err);
        }
        result
    }
}

fn line_of(cart: &Cart, product_id: ProductId) -> Result<LineItem, CartError> {
    cart.get(product_id)
        .cloned()
        .ok_or(CartError::NotInCart(product_id))
}
