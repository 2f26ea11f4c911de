//! Product-shaped entries held in wishlists and carts.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Price, ProductId};

/// A product as saved to a wishlist.
///
/// Only `id`, `name`, `price` and `category` are required; any other fields
/// the catalog attached (slug, rating, stock, ...) are kept verbatim in
/// [`Product::extra`] so a hydrate/persist cycle never loses data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// Create a product with the required fields and no image or extras.
    #[must_use]
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Price,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            category: category.into(),
            image: None,
            extra: Map::new(),
        }
    }

    /// Set the product image URL.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Minimal schema check applied to entries read back from storage.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.id.is_empty() && !self.name.trim().is_empty() && !self.price.is_negative()
    }
}

/// A cart line: the subset of a product the cart persists plus a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    #[serde(default)]
    pub image: Option<String>,
    pub quantity: u32,
}

impl CartLine {
    /// A single unit of `product`.
    #[must_use]
    pub fn single(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            quantity: 1,
        }
    }

    /// Price of the whole line.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }

    /// Minimal schema check applied to entries read back from storage.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.id.is_empty() && !self.name.trim().is_empty() && !self.price.is_negative()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_product_keeps_extra_fields() {
        let raw = json!({
            "id": "p1",
            "name": "Mug",
            "price": 12.5,
            "category": "kitchen",
            "slug": "mug",
            "rating": 4
        });
        let product: Product = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(product.extra.get("slug"), Some(&json!("mug")));
        assert_eq!(serde_json::to_value(&product).unwrap(), raw);
    }

    #[test]
    fn test_product_requires_category() {
        let raw = json!({ "id": "p1", "name": "Mug", "price": 12.5 });
        assert!(serde_json::from_value::<Product>(raw).is_err());
    }

    #[test]
    fn test_product_validation() {
        assert!(Product::new("p1", "Mug", Price::from_cents(100), "kitchen").is_valid());
        assert!(!Product::new("", "Mug", Price::from_cents(100), "kitchen").is_valid());
        assert!(!Product::new("p1", "  ", Price::from_cents(100), "kitchen").is_valid());
        assert!(!Product::new("p1", "Mug", Price::from_cents(-100), "kitchen").is_valid());
    }

    #[test]
    fn test_cart_line_from_product() {
        let product =
            Product::new("p1", "Mug", Price::from_cents(250), "kitchen").with_image("/mug.png");
        let line = CartLine::single(&product);
        assert_eq!(line.quantity, 1);
        assert_eq!(line.image.as_deref(), Some("/mug.png"));
        assert_eq!(line.line_total(), Price::from_cents(250));
    }

    #[test]
    fn test_cart_line_layout() {
        let line = CartLine {
            id: ProductId::new("p1"),
            name: "Mug".to_owned(),
            price: Price::from_cents(250),
            image: None,
            quantity: 3,
        };
        assert_eq!(
            serde_json::to_value(&line).unwrap(),
            json!({ "id": "p1", "name": "Mug", "price": 2.5, "image": null, "quantity": 3 })
        );
    }

    #[test]
    fn test_cart_line_rejects_negative_quantity() {
        let raw = json!({ "id": "p1", "name": "Mug", "price": 2.5, "quantity": -1 });
        assert!(serde_json::from_value::<CartLine>(raw).is_err());
    }
}
