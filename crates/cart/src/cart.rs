//! The cart aggregate and its stock reconciliation rules.
//!
//! Pure domain logic: callers fetch the stock level and product record, the
//! cart decides what the next state is. Every transition returns a new `Cart`
//! and leaves `self` untouched, so a rejected operation never needs rollback.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use rocketshoes_core::entity::first_duplicate_id;
use rocketshoes_core::{DomainError, DomainResult, ProductId};
use rocketshoes_inventory::Stock;
use rocketshoes_products::Product;

use crate::error::CartError;
use crate::line_item::LineItem;

/// Ordered line items keyed by product id.
///
/// Invariants: at most one line item per product, every amount >= 1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct Cart {
    items: Vec<LineItem>,
}

/// Outcome of reconciling an add request against the current stock.
#[derive(Debug, Clone, PartialEq)]
pub enum AddPlan {
    /// The product was already in the cart; its amount went up by one.
    Incremented(Cart),
    /// The product is new; the caller must fetch it and call [`Cart::with_new_item`].
    NeedsProduct,
}

impl Cart {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a cart from existing line items, checking the cart invariants.
    pub fn from_items(items: Vec<LineItem>) -> DomainResult<Self> {
        if let Some(id) = first_duplicate_id(&items) {
            return Err(DomainError::invariant(format!(
                "product {id} appears more than once"
            )));
        }
        if let Some(item) = items.iter().find(|item| item.amount == 0) {
            return Err(DomainError::validation(format!(
                "product {} has amount 0",
                item.product_id()
            )));
        }
        Ok(Self { items })
    }

    /// Decode a stored snapshot (JSON array of line items).
    pub fn from_snapshot(raw: &str) -> DomainResult<Self> {
        serde_json::from_str(raw)
            .map_err(|e| DomainError::validation(format!("malformed cart snapshot: {e}")))
    }

    /// Encode the cart as the stored snapshot string.
    pub fn to_snapshot(&self) -> DomainResult<String> {
        serde_json::to_string(&self.items)
            .map_err(|e| DomainError::validation(format!("cart cannot be encoded: {e}")))
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, product_id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.product_id() == product_id)
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.get(product_id).is_some()
    }

    /// Amount held for `product_id`, 0 when absent.
    pub fn amount_of(&self, product_id: ProductId) -> u32 {
        self.get(product_id).map_or(0, |item| item.amount)
    }

    /// Amount per product, for "already in cart" badges.
    pub fn amounts(&self) -> BTreeMap<ProductId, u32> {
        self.items
            .iter()
            .map(|item| (item.product_id(), item.amount))
            .collect()
    }

    /// Sum of all line subtotals.
    pub fn total(&self) -> f64 {
        self.items.iter().map(LineItem::subtotal).sum()
    }

    /// Reconcile "one more unit of `product_id`" against `stock`.
    pub fn plan_add(&self, product_id: ProductId, stock: &Stock) -> Result<AddPlan, CartError> {
        let current = self.amount_of(product_id);
        let requested = i64::from(current) + 1;
        ensure_in_stock(product_id, requested, stock)?;

        if current == 0 {
            return Ok(AddPlan::NeedsProduct);
        }
        let amount = current.checked_add(1).ok_or_else(|| {
            CartError::Domain(DomainError::validation(format!(
                "amount for product {product_id} is out of range"
            )))
        })?;
        let next = self
            .with_amount(product_id, amount)
            .ok_or(CartError::NotInCart(product_id))?;
        Ok(AddPlan::Incremented(next))
    }

    /// Append a line item with one unit of `product`.
    pub fn with_new_item(&self, product: Product) -> DomainResult<Self> {
        if self.contains(product.id) {
            return Err(DomainError::invariant(format!(
                "product {} is already in the cart",
                product.id
            )));
        }
        let mut items = self.items.clone();
        items.push(LineItem::new(product));
        Ok(Self { items })
    }

    /// Reconcile "set `product_id` to `requested` units" against `stock`.
    ///
    /// Stock is checked before presence, so an over-stock request for a
    /// product that is not in the cart reports the stock problem.
    pub fn plan_amount_update(
        &self,
        product_id: ProductId,
        requested: i64,
        stock: &Stock,
    ) -> Result<Self, CartError> {
        ensure_in_stock(product_id, requested, stock)?;
        let amount = u32::try_from(requested).map_err(|_| {
            CartError::Domain(DomainError::validation(format!(
                "amount {requested} is out of range"
            )))
        })?;
        if amount == 0 {
            return Err(CartError::Domain(DomainError::validation(
                "amount must be positive",
            )));
        }
        self.with_amount(product_id, amount)
            .ok_or(CartError::NotInCart(product_id))
    }

    /// Copy of the cart with `product_id` removed, plus the removed item.
    pub fn without(&self, product_id: ProductId) -> Option<(Self, LineItem)> {
        let index = self
            .items
            .iter()
            .position(|item| item.product_id() == product_id)?;
        let mut items = self.items.clone();
        let removed = items.remove(index);
        Some((Self { items }, removed))
    }

    fn with_amount(&self, product_id: ProductId, amount: u32) -> Option<Self> {
        let index = self
            .items
            .iter()
            .position(|item| item.product_id() == product_id)?;
        let mut items = self.items.clone();
        items[index].amount = amount;
        Some(Self { items })
    }
}

fn ensure_in_stock(product_id: ProductId, requested: i64, stock: &Stock) -> Result<(), CartError> {
    if stock.allows(requested) {
        Ok(())
    } else {
        Err(CartError::StockExceeded {
            product_id,
            requested,
            available: stock.amount,
        })
    }
}

impl TryFrom<Vec<LineItem>> for Cart {
    type Error = DomainError;

    fn try_from(items: Vec<LineItem>) -> Result<Self, Self::Error> {
        Self::from_items(items)
    }
}

impl From<Cart> for Vec<LineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = core::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
