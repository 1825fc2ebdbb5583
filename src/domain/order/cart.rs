//! Shopping cart as returned by the product service.

use serde::{Deserialize, Deserializer, Serialize};

/// A single line in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: String,
    pub quantity: u32,
}

impl CartItem {
    pub fn new(product_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// A user's cart.
///
/// Fetched per call and never cached here. When the product service cannot
/// answer, callers receive [`Cart::unavailable`] instead of an error; order
/// logic treats that as "proceed with an empty order".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub user_id: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<CartItem>,

    /// Set only on the fallback value. Never sent over the wire.
    #[serde(skip)]
    degraded: bool,
}

impl Cart {
    /// Creates a live cart.
    pub fn new(id: Option<i64>, user_id: impl Into<String>, items: Vec<CartItem>) -> Self {
        Self {
            id,
            user_id: user_id.into(),
            items,
            degraded: false,
        }
    }

    /// The empty/unknown cart returned when the product service is unavailable.
    pub fn unavailable(user_id: impl Into<String>) -> Self {
        Self {
            id: None,
            user_id: user_id.into(),
            items: Vec::new(),
            degraded: true,
        }
    }

    /// Returns true if this is the fallback value rather than live data.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities across all lines.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}

/// Treats an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_product_service_payload() {
        let json = r#"{
            "id": 42,
            "userId": "u1",
            "items": [
                {"productId": "p1", "quantity": 2},
                {"productId": "p2", "quantity": 1}
            ]
        }"#;

        let cart: Cart = serde_json::from_str(json).unwrap();

        assert_eq!(cart.id, Some(42));
        assert_eq!(cart.user_id, "u1");
        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.items[0], CartItem::new("p1", 2));
        assert!(!cart.is_degraded());
    }

    #[test]
    fn missing_items_deserialize_as_empty() {
        let cart: Cart = serde_json::from_str(r#"{"userId": "u1"}"#).unwrap();

        assert!(cart.is_empty());
        assert_eq!(cart.id, None);
        assert!(!cart.is_degraded());
    }

    #[test]
    fn null_items_deserialize_as_empty() {
        let cart: Cart =
            serde_json::from_str(r#"{"id": 1, "userId": "u1", "items": null}"#).unwrap();

        assert_eq!(cart.id, Some(1));
        assert!(cart.is_empty());
        assert!(!cart.is_degraded());
    }

    #[test]
    fn null_user_id_deserializes_as_empty() {
        let cart: Cart = serde_json::from_str(r#"{"id": null, "userId": null}"#).unwrap();

        assert_eq!(cart.user_id, "");
        assert_eq!(cart.id, None);
    }

    #[test]
    fn unavailable_cart_is_empty_and_degraded() {
        let cart = Cart::unavailable("u1");

        assert_eq!(cart.user_id, "u1");
        assert!(cart.is_empty());
        assert!(cart.is_degraded());
        assert_eq!(cart.total_quantity(), 0);
    }

    #[test]
    fn degraded_marker_is_not_serialized() {
        let json = serde_json::to_value(Cart::unavailable("u1")).unwrap();

        assert!(json.get("degraded").is_none());
        assert_eq!(json["userId"], "u1");
    }

    #[test]
    fn total_quantity_sums_lines() {
        let cart = Cart::new(
            Some(1),
            "u1",
            vec![CartItem::new("p1", 3), CartItem::new("p2", 4)],
        );

        assert_eq!(cart.total_quantity(), 7);
    }
}
