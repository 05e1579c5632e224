//! Server-side cart rows as returned by `GET /cart/details/{userId}` and
//! `GET /cart/user/{userId}`.

use serde::Deserialize;
use store::CartLine;

use crate::lenient::{self, non_empty};

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCartItem {
    #[serde(default, deserialize_with = "lenient::i64_opt")]
    pub cart_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::i64_opt")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::i64_opt")]
    pub product_id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::f64_opt")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::u32_opt")]
    pub quantity: Option<u32>,
    #[serde(default, deserialize_with = "lenient::u32_opt")]
    pub eco_points: Option<u32>,
    #[serde(default, deserialize_with = "lenient::f64_opt")]
    pub carbon_saved: Option<f64>,
}

/// One row of the signed-in user's server cart.
#[derive(Clone, Debug, PartialEq)]
pub struct CartItem {
    pub cart_id: Option<i64>,
    pub product_id: i64,
    pub name: String,
    pub image: Option<String>,
    pub price: f64,
    pub quantity: u32,
    pub eco_points: u32,
    pub carbon_saved: f64,
}

impl CartItem {
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }

    /// The snapshot line this row corresponds to.
    pub fn to_line(&self) -> CartLine {
        CartLine {
            product_id: self.product_id,
            quantity: self.quantity,
            price: self.price,
            cart_id: self.cart_id,
            name: Some(self.name.clone()),
            image: self.image.clone(),
            eco_points: self.eco_points,
            carbon_saved: self.carbon_saved,
        }
    }
}

/// Rows without a product id are dropped. `id` stands in for `cartId` on the
/// plain `/cart/user` listing.
pub fn normalize_cart_item(raw: RawCartItem) -> Option<CartItem> {
    let product_id = raw.product_id?;
    Some(CartItem {
        cart_id: raw.cart_id.or(raw.id),
        product_id,
        name: non_empty(&raw.name)
            .or_else(|| non_empty(&raw.product_name))
            .unwrap_or_else(|| "Product".to_string()),
        image: non_empty(&raw.image).or_else(|| non_empty(&raw.image_url)),
        price: raw.price.unwrap_or(0.0),
        quantity: raw.quantity.unwrap_or(1),
        eco_points: raw.eco_points.unwrap_or(0),
        carbon_saved: raw.carbon_saved.unwrap_or(0.0),
    })
}

pub fn normalize_cart(value: serde_json::Value) -> Vec<CartItem> {
    lenient::list_from_value::<RawCartItem>(value)
        .into_iter()
        .filter_map(normalize_cart_item)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_details_shape() {
        let items = normalize_cart(json!([
            {"cartId": 11, "productId": 4, "name": "Bamboo Brush", "image": "b.png",
             "price": "120.00", "quantity": 2, "ecoPoints": 5, "carbonSaved": 0.4}
        ]));
        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.cart_id, Some(11));
        assert_eq!(item.line_total(), 240.0);
        let line = item.to_line();
        assert_eq!(line.product_id, 4);
        assert_eq!(line.quantity, 2);
        assert_eq!(line.cart_id, Some(11));
    }

    #[test]
    fn test_user_listing_shape() {
        let items = normalize_cart(json!([
            {"id": 3, "productId": 8, "productName": "Tote", "imageUrl": "t.png", "price": 50},
            {"id": 4}
        ]));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].cart_id, Some(3));
        assert_eq!(items[0].name, "Tote");
        assert_eq!(items[0].image.as_deref(), Some("t.png"));
        assert_eq!(items[0].quantity, 1);
    }
}
