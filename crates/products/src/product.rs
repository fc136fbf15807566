use serde::{Deserialize, Serialize};

use rocketshoes_core::ProductId;

/// Catalog attributes beyond the ones the client relies on.
pub type ProductAttributes = serde_json::Map<String, serde_json::Value>;

/// A catalog product.
///
/// `id`, `title`, `price` and `image` are typed; anything else the catalog
/// returns is kept verbatim in `attributes` and written back out unchanged.
/// Only `id` is required. A record without `title`, `price` or `image` gets
/// an empty string or zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(default)]
    pub title: String,
    /// Unit price in the storefront's currency.
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub image: String,
    #[serde(flatten)]
    pub attributes: ProductAttributes,
}

impl Product {
    pub fn new(id: ProductId, title: impl Into<String>, price: f64, image: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            image: image.into(),
            attributes: ProductAttributes::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&serde_json::Value> {
        self.attributes.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_catalog_payload_with_extra_attributes() {
        let payload = json!({
            "id": 1,
            "title": "Tênis de Caminhada Leve Confortável",
            "price": 179.9,
            "image": "https://example.com/shoe1.jpg",
            "brand": "rocket",
            "sizes": [38, 39, 40]
        });

        let product: Product = serde_json::from_value(payload).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price, 179.9);
        assert_eq!(product.attribute("brand"), Some(&json!("rocket")));
        assert_eq!(product.attribute("sizes"), Some(&json!([38, 39, 40])));
    }

    #[test]
    fn encodes_flat_object() {
        let product = Product::new(ProductId::new(2), "Runner", 99.5, "runner.jpg")
            .with_attribute("color", json!("blue"));

        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 2,
                "title": "Runner",
                "price": 99.5,
                "image": "runner.jpg",
                "color": "blue"
            })
        );
    }

    #[test]
    fn sparse_record_falls_back_to_defaults() {
        let payload = json!({ "id": 1, "brand": "rocket" });

        let product: Product = serde_json::from_value(payload).unwrap();
        assert_eq!(product.title, "");
        assert_eq!(product.price, 0.0);
        assert_eq!(product.image, "");
        assert_eq!(product.attribute("brand"), Some(&json!("rocket")));
    }

    #[test]
    fn missing_id_is_rejected() {
        let payload = json!({ "title": "No id", "price": 10.0, "image": "x.jpg" });
        assert!(serde_json::from_value::<Product>(payload).is_err());
    }
}
