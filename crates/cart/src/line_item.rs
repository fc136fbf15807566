use serde::{Deserialize, Serialize};

use rocketshoes_core::{Entity, ProductId};
use rocketshoes_products::Product;

/// One product in the cart plus its quantity.
///
/// Serialized as the product's flat attribute object with an extra `amount`
/// field, the layout the stored snapshot uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(flatten)]
    pub product: Product,
    pub amount: u32,
}

impl LineItem {
    /// A fresh line item holding one unit of `product`.
    pub fn new(mut product: Product) -> Self {
        // A catalog attribute named `amount` would collide with the quantity field.
        product.attributes.remove("amount");
        Self { product, amount: 1 }
    }

    pub fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// `price * amount`.
    pub fn subtotal(&self) -> f64 {
        self.product.price * f64::from(self.amount)
    }
}

impl Entity for LineItem {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.product.id
    }
}
