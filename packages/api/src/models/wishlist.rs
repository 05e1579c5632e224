//! Wishlist entries.
//!
//! `GET /wishlist/{userId}` returns rows whose own `id` is the wishlist row and
//! whose product is either nested under `product` or flattened into the row
//! (`productId`, `productName`, `productPrice`, `productImageUrl`, ...).

use serde_json::Value;

use super::product::{normalize_product, Product, RawProduct};
use crate::lenient;

#[derive(Clone, Debug, PartialEq)]
pub struct WishlistItem {
    pub wishlist_id: Option<i64>,
    pub product: Product,
}

fn row_id(row: &Value, key: &str) -> Option<i64> {
    match row.get(key)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub fn normalize_wishlist_item(row: Value) -> Option<WishlistItem> {
    let wishlist_id = row_id(&row, "id");
    let raw: RawProduct = match row.get("product") {
        Some(nested @ Value::Object(_)) => serde_json::from_value(nested.clone()).ok()?,
        _ => {
            let mut raw: RawProduct = serde_json::from_value(row.clone()).ok()?;
            raw.id = row_id(&row, "productId").or(raw.id);
            raw
        }
    };
    Some(WishlistItem {
        wishlist_id,
        product: normalize_product(raw)?,
    })
}

pub fn normalize_wishlist(value: Value) -> Vec<WishlistItem> {
    lenient::list_from_value::<Value>(value)
        .into_iter()
        .filter_map(normalize_wishlist_item)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flattened_rows() {
        let items = normalize_wishlist(json!([
            {"id": 31, "productId": 4, "productName": "Bamboo Brush", "productPrice": "120",
             "productImageUrl": "b.png", "isEcoFriendly": true, "stockQuantity": 5}
        ]));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].wishlist_id, Some(31));
        assert_eq!(items[0].product.id, 4);
        assert_eq!(items[0].product.name, "Bamboo Brush");
        assert_eq!(items[0].product.price, 120.0);
        assert_eq!(items[0].product.image_url.as_deref(), Some("b.png"));
    }

    #[test]
    fn test_nested_product_rows() {
        let items = normalize_wishlist(json!({"content": [
            {"id": 2, "product": {"id": 9, "name": "Tote", "price": 49}},
            {"id": 3, "product": {"name": "no id"}}
        ]}));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].wishlist_id, Some(2));
        assert_eq!(items[0].product.id, 9);
    }
}
