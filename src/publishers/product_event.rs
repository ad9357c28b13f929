use serde::{Deserialize, Serialize};

use crate::products::Product;

/// What happened to the catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductEventKind {
    Created,
    Updated,
    Deleted,
}

/// A catalog change, as published on the `product_events` queue.
///
/// Serialized as JSON:
///
/// ```json
/// { "event": "created", "product": { "id": 1, "name": "...", ... } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductEvent {
    pub event: ProductEventKind,
    pub product: Product,
}

impl ProductEvent {
    pub fn created(product: Product) -> Self {
        Self {
            event: ProductEventKind::Created,
            product,
        }
    }

    pub fn updated(product: Product) -> Self {
        Self {
            event: ProductEventKind::Updated,
            product,
        }
    }

    pub fn deleted(product: Product) -> Self {
        Self {
            event: ProductEventKind::Deleted,
            product,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ProductEvent;
    use crate::products::Product;

    #[test]
    fn wire_shape_is_stable() {
        let event = ProductEvent::created(Product {
            id: 7,
            name: "Jalebi".into(),
            category: "sweets".into(),
            price: 4.25,
            stock: 30,
            image: "https://cdn.example.com/jalebi.png".into(),
        });

        let encoded = serde_json::to_value(&event).unwrap();
        assert_eq!(
            serde_json::json!({
                "event": "created",
                "product": {
                    "id": 7,
                    "name": "Jalebi",
                    "category": "sweets",
                    "price": 4.25,
                    "stock": 30,
                    "image": "https://cdn.example.com/jalebi.png",
                }
            }),
            encoded
        );

        let decoded: ProductEvent = serde_json::from_value(encoded).unwrap();
        assert_eq!(event, decoded);
    }
}
