use serde::{Deserialize, Serialize};

use rocketshoes_core::ProductId;

/// Stock level of a product at the time it was fetched.
///
/// `amount` is the maximum quantity a single cart may hold. The API may report
/// zero or even negative values for sold-out products.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    /// Absent in some API responses; the caller knows which product it asked for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    pub amount: i64,
}

impl Stock {
    pub fn new(id: ProductId, amount: i64) -> Self {
        Self {
            id: Some(id),
            amount,
        }
    }

    /// Whether a cart may hold `requested` units of this product.
    pub fn allows(&self, requested: i64) -> bool {
        requested <= self.amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_up_to_amount() {
        let stock = Stock::new(ProductId::new(1), 3);
        assert!(stock.allows(1));
        assert!(stock.allows(3));
        assert!(!stock.allows(4));
    }

    #[test]
    fn sold_out_allows_nothing_positive() {
        let stock = Stock::new(ProductId::new(1), 0);
        assert!(!stock.allows(1));
    }

    #[test]
    fn decodes_with_and_without_id() {
        let with_id: Stock = serde_json::from_str(r#"{"id":4,"amount":2}"#).unwrap();
        assert_eq!(with_id, Stock::new(ProductId::new(4), 2));

        let bare: Stock = serde_json::from_str(r#"{"amount":9}"#).unwrap();
        assert_eq!(bare.id, None);
        assert_eq!(bare.amount, 9);
    }
}
