//! Seller catalog management.

use serde::{Deserialize, Serialize};

use super::product::Product;
use crate::lenient;

/// Category ids the seller form offers, in display order.
pub const SELLER_CATEGORIES: &[(i64, &str)] = &[
    (1, "Electronics"),
    (2, "Fashion"),
    (3, "Home & Garden"),
    (4, "Books"),
    (5, "Food & Beverages"),
    (6, "Personal Care"),
];

/// Body of `POST /seller/products` and `PUT /seller/products/{id}`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category_id: i64,
    pub stock_quantity: u32,
    pub weight: f64,
    pub shipping_distance: f64,
    pub carbon_footprint_score: f64,
    pub eco_friendly: bool,
    pub image_url: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerStats {
    #[serde(default, deserialize_with = "lenient::f64_opt")]
    pub total_sales: Option<f64>,
    #[serde(default, deserialize_with = "lenient::u32_opt")]
    pub total_orders: Option<u32>,
    #[serde(default, deserialize_with = "lenient::u32_opt")]
    pub total_products: Option<u32>,
    #[serde(default, deserialize_with = "lenient::f64_opt")]
    pub carbon_saved: Option<f64>,
}

impl SellerStats {
    /// Stand-in when the stats endpoint is unavailable: product count and the
    /// sum of carbon scores, with sales and orders at zero.
    pub fn derive_from(products: &[Product]) -> Self {
        Self {
            total_sales: Some(0.0),
            total_orders: Some(0),
            total_products: Some(u32::try_from(products.len()).unwrap_or(u32::MAX)),
            carbon_saved: Some(products.iter().filter_map(|p| p.carbon_score).sum()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::product::normalize_products;
    use serde_json::json;

    #[test]
    fn test_derive_stats_from_products() {
        let products = normalize_products(json!([
            {"id": 1, "carbonFootprintScore": 2.5},
            {"id": 2, "carbonScore": "1.5"},
            {"id": 3}
        ]));
        let stats = SellerStats::derive_from(&products);
        assert_eq!(stats.total_products, Some(3));
        assert_eq!(stats.carbon_saved, Some(4.0));
        assert_eq!(stats.total_sales, Some(0.0));
    }

    #[test]
    fn test_stats_payload_with_string_numbers() {
        let stats: SellerStats = serde_json::from_value(json!({
            "totalSales": "15999.50", "totalOrders": 12, "totalProducts": "4"
        }))
        .unwrap();
        assert_eq!(stats.total_sales, Some(15999.5));
        assert_eq!(stats.total_products, Some(4));
        assert_eq!(stats.carbon_saved, None);
    }

    #[test]
    fn test_payload_wire_shape() {
        let payload = ProductPayload {
            name: "Jute Bag".into(),
            description: "Sturdy".into(),
            price: 49.0,
            category_id: 2,
            stock_quantity: 10,
            weight: 0.5,
            shipping_distance: 50.0,
            carbon_footprint_score: 1.2,
            eco_friendly: true,
            image_url: String::new(),
        };
        let v = serde_json::to_value(&payload).unwrap();
        assert_eq!(v["categoryId"], 2);
        assert_eq!(v["carbonFootprintScore"], 1.2);
        assert_eq!(v["ecoFriendly"], true);
    }
}
