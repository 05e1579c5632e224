//! # Catalog products
//!
//! The backend is inconsistent about product field names depending on which
//! endpoint (and which DTO) produced the payload. [`RawProduct`] accepts every
//! spelling seen in the wild; [`normalize_product`] collapses it into the strict
//! [`Product`] the views render.
//!
//! | Field | Accepted spellings (first non-empty wins) |
//! |-------|-------------------------------------------|
//! | price | `price`, `productPrice` |
//! | original price | `originalPrice`, `compareAtPrice`, else price |
//! | rating | `rating`, `averageRating` |
//! | reviews | `reviews`, `reviewCount` |
//! | carbon score | `carbonScore`, `carbonFootprintScore` |
//! | stock | `stockQuantity`, `stock`, `availableQuantity` |
//! | shipping | `shipping`, `shippingInfo` |
//! | category | `category` (string or `{name}`), `categoryName` |
//! | image | `imageUrl`, `productImageUrl`, `image`, `images[0]` |
//!
//! A product counts as eco-friendly when it has a carbon score of at most
//! [`ECO_FRIENDLY_MAX_SCORE`]; without a score the backend's flag is used.

use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

use crate::lenient::{self, non_empty};

pub const ECO_FRIENDLY_MAX_SCORE: f64 = 3.0;
pub const DEFAULT_CATEGORY: &str = "Sustainable Picks";
pub const DEFAULT_SHIPPING: &str = "Ships sustainably";
/// Filter chips shown even before the catalog loads.
pub const FILTER_CATEGORIES: &[&str] = &["Home & Living", "Fashion", "Electronics", "Beauty"];

/// Category as either a bare name or an embedded entity.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawCategory {
    Name(String),
    Entity {
        #[serde(default, deserialize_with = "lenient::text_opt")]
        name: Option<String>,
    },
    Other(IgnoredAny),
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    #[serde(default, deserialize_with = "lenient::i64_opt")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::text_opt")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text_opt")]
    pub product_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text_opt")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::f64_opt")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::f64_opt")]
    pub product_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::f64_opt")]
    pub original_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::f64_opt")]
    pub compare_at_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::f64_opt")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient::f64_opt")]
    pub average_rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient::u32_opt")]
    pub reviews: Option<u32>,
    #[serde(default, deserialize_with = "lenient::u32_opt")]
    pub review_count: Option<u32>,
    #[serde(default, deserialize_with = "lenient::f64_opt")]
    pub carbon_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient::f64_opt")]
    pub carbon_footprint_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient::bool_opt")]
    pub is_eco_friendly: Option<bool>,
    #[serde(default, deserialize_with = "lenient::bool_opt")]
    pub eco_friendly: Option<bool>,
    #[serde(default, deserialize_with = "lenient::u32_opt")]
    pub stock_quantity: Option<u32>,
    #[serde(default, deserialize_with = "lenient::u32_opt")]
    pub stock: Option<u32>,
    #[serde(default, deserialize_with = "lenient::u32_opt")]
    pub available_quantity: Option<u32>,
    #[serde(default, deserialize_with = "lenient::text_opt")]
    pub shipping: Option<String>,
    #[serde(default, deserialize_with = "lenient::text_opt")]
    pub shipping_info: Option<String>,
    #[serde(default)]
    pub category: Option<RawCategory>,
    #[serde(default, deserialize_with = "lenient::text_opt")]
    pub category_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::i64_opt")]
    pub category_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::text_opt")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::text_opt")]
    pub product_image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::text_opt")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient::first_image")]
    pub images: Option<String>,
    #[serde(default, deserialize_with = "lenient::u32_opt")]
    pub eco_points: Option<u32>,
    #[serde(default, deserialize_with = "lenient::text_opt")]
    pub seller_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::i64_opt")]
    pub seller_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::bool_opt")]
    pub is_active: Option<bool>,
}

/// Normalised catalog product.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub original_price: f64,
    pub rating: f64,
    pub reviews: u32,
    pub carbon_score: Option<f64>,
    pub is_eco_friendly: bool,
    pub stock_quantity: u32,
    pub shipping: String,
    pub category_id: Option<i64>,
    pub category_name: String,
    pub image_url: Option<String>,
    pub eco_points: u32,
    pub seller_name: Option<String>,
    pub seller_id: Option<i64>,
    pub is_active: bool,
}

impl Product {
    pub fn in_stock(&self) -> bool {
        self.stock_quantity > 0
    }

    /// Percentage off the original price, if discounted.
    pub fn discount_percent(&self) -> Option<u32> {
        if self.original_price > self.price && self.original_price > 0.0 {
            Some((((self.original_price - self.price) / self.original_price) * 100.0).round() as u32)
        } else {
            None
        }
    }

    /// `"All"` matches every product.
    pub fn in_category(&self, label: &str) -> bool {
        label == "All" || self.category_name.eq_ignore_ascii_case(label)
    }

    pub fn matches_query(&self, query: &str) -> bool {
        let q = query.trim().to_lowercase();
        q.is_empty()
            || self.name.to_lowercase().contains(&q)
            || self.description.to_lowercase().contains(&q)
    }
}

fn category_name(raw: &RawProduct) -> String {
    let from_category = match &raw.category {
        Some(RawCategory::Name(n)) => non_empty(&Some(n.clone())),
        Some(RawCategory::Entity { name }) => non_empty(name),
        Some(RawCategory::Other(_)) | None => None,
    };
    from_category
        .or_else(|| non_empty(&raw.category_name))
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string())
}

/// Collapse a raw product. Products without an id cannot be linked and are dropped.
pub fn normalize_product(raw: RawProduct) -> Option<Product> {
    let id = raw.id?;
    let price = raw.price.or(raw.product_price).unwrap_or(0.0);
    let carbon_score = raw.carbon_score.or(raw.carbon_footprint_score);
    let is_eco_friendly = match carbon_score {
        Some(score) => score <= ECO_FRIENDLY_MAX_SCORE,
        None => raw.is_eco_friendly.or(raw.eco_friendly).unwrap_or(false),
    };
    let image_url = non_empty(&raw.image_url)
        .or_else(|| non_empty(&raw.product_image_url))
        .or_else(|| non_empty(&raw.image))
        .or_else(|| non_empty(&raw.images));

    Some(Product {
        id,
        name: non_empty(&raw.name)
            .or_else(|| non_empty(&raw.product_name))
            .unwrap_or_else(|| format!("Product #{id}")),
        description: raw.description.clone().unwrap_or_default(),
        price,
        original_price: raw.original_price.or(raw.compare_at_price).unwrap_or(price),
        rating: raw.rating.or(raw.average_rating).unwrap_or(0.0),
        reviews: raw.reviews.or(raw.review_count).unwrap_or(0),
        carbon_score,
        is_eco_friendly,
        stock_quantity: raw
            .stock_quantity
            .or(raw.stock)
            .or(raw.available_quantity)
            .unwrap_or(0),
        shipping: non_empty(&raw.shipping)
            .or_else(|| non_empty(&raw.shipping_info))
            .unwrap_or_else(|| DEFAULT_SHIPPING.to_string()),
        category_id: raw.category_id,
        category_name: category_name(&raw),
        image_url,
        eco_points: raw.eco_points.unwrap_or(0),
        seller_name: non_empty(&raw.seller_name),
        seller_id: raw.seller_id,
        is_active: raw.is_active.unwrap_or(true),
    })
}

/// Normalise a product list payload (bare array or page).
pub fn normalize_products(value: serde_json::Value) -> Vec<Product> {
    lenient::list_from_value::<RawProduct>(value)
        .into_iter()
        .filter_map(normalize_product)
        .collect()
}

/// Category filter labels: the defaults first, then any new ones in catalog order.
pub fn category_labels(products: &[Product], defaults: &[&str]) -> Vec<String> {
    let mut labels: Vec<String> = vec!["All".to_string()];
    for label in defaults
        .iter()
        .map(|s| s.to_string())
        .chain(products.iter().map(|p| p.category_name.clone()))
    {
        if !labels.contains(&label) {
            labels.push(label);
        }
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalize(v: serde_json::Value) -> Product {
        normalize_product(serde_json::from_value(v).unwrap()).unwrap()
    }

    #[test]
    fn test_canonical_dto_shape() {
        let p = normalize(json!({
            "id": 4, "name": "Bamboo Brush", "price": 120.5, "carbonScore": 1.2,
            "stockQuantity": 30, "imageUrl": "https://img/b.png", "categoryName": "Home & Living",
            "ecoPoints": 12, "sellerName": "Verde"
        }));
        assert_eq!(p.price, 120.5);
        assert_eq!(p.original_price, 120.5);
        assert!(p.is_eco_friendly);
        assert_eq!(p.stock_quantity, 30);
        assert_eq!(p.category_name, "Home & Living");
        assert_eq!(p.image_url.as_deref(), Some("https://img/b.png"));
        assert_eq!(p.eco_points, 12);
    }

    #[test]
    fn test_alternate_field_names() {
        let p = normalize(json!({
            "id": "9", "productName": "Jute Bag", "productPrice": "49.99",
            "carbonFootprintScore": "4.5", "stock": 3, "image": "j.png",
            "category": {"id": 2, "name": "Fashion"}, "shippingInfo": "Free"
        }));
        assert_eq!(p.id, 9);
        assert_eq!(p.name, "Jute Bag");
        assert_eq!(p.price, 49.99);
        assert_eq!(p.carbon_score, Some(4.5));
        assert!(!p.is_eco_friendly);
        assert_eq!(p.stock_quantity, 3);
        assert_eq!(p.image_url.as_deref(), Some("j.png"));
        assert_eq!(p.category_name, "Fashion");
        assert_eq!(p.shipping, "Free");
    }

    #[test]
    fn test_fallbacks_and_defaults() {
        let p = normalize(json!({
            "id": 1, "availableQuantity": 8, "images": ["first.png", "second.png"],
            "isEcoFriendly": true, "imageUrl": ""
        }));
        assert_eq!(p.name, "Product #1");
        assert_eq!(p.price, 0.0);
        assert!(p.is_eco_friendly);
        assert_eq!(p.stock_quantity, 8);
        assert_eq!(p.image_url.as_deref(), Some("first.png"));
        assert_eq!(p.category_name, DEFAULT_CATEGORY);
        assert_eq!(p.shipping, DEFAULT_SHIPPING);
        assert!(p.in_stock());
    }

    #[test]
    fn test_stock_prefers_stock_quantity_even_when_zero() {
        let p = normalize(json!({"id": 2, "stockQuantity": 0, "stock": 5}));
        assert_eq!(p.stock_quantity, 0);
        assert!(!p.in_stock());
    }

    #[test]
    fn test_missing_id_is_dropped() {
        let raw: RawProduct = serde_json::from_value(json!({"name": "Ghost"})).unwrap();
        assert!(normalize_product(raw).is_none());
    }

    #[test]
    fn test_normalize_products_page_and_array() {
        let page = json!({"content": [{"id": 1}, {"id": 2}, {"name": "no id"}]});
        assert_eq!(normalize_products(page).len(), 2);
        assert_eq!(normalize_products(json!([{"id": 3}])).len(), 1);
        assert!(normalize_products(json!(null)).is_empty());
    }

    #[test]
    fn test_odd_field_shapes_keep_the_product() {
        let products = normalize_products(json!([
            {"id": 1, "name": "Tote", "imageUrl": "t.png", "images": [{"url": "t.png"}]},
            {"id": 2, "name": "Cup"},
            {"id": 3, "images": [{"alt": "none"}, {"url": "side.png"}], "name": {"en": "Mug"},
             "category": 7, "isEcoFriendly": "true", "shipping": ["Free"]},
            {"id": 4, "images": "cover.png", "category": {"name": null}, "categoryName": "Beauty"}
        ]));
        let ids: Vec<i64> = products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(products[0].image_url.as_deref(), Some("t.png"));
        assert_eq!(products[2].image_url.as_deref(), Some("side.png"));
        assert_eq!(products[2].name, "Product #3");
        assert_eq!(products[2].category_name, DEFAULT_CATEGORY);
        assert_eq!(products[2].shipping, DEFAULT_SHIPPING);
        assert!(products[2].is_eco_friendly);
        assert_eq!(products[3].image_url, None);
        assert_eq!(products[3].category_name, "Beauty");
    }

    #[test]
    fn test_discount_and_query() {
        let p = normalize(json!({"id": 5, "name": "Solar Lamp", "price": 75, "originalPrice": 100}));
        assert_eq!(p.discount_percent(), Some(25));
        assert!(p.matches_query("lamp"));
        assert!(p.matches_query("  "));
        assert!(!p.matches_query("kettle"));
        assert!(p.in_category("All"));
        assert!(p.in_category("sustainable picks"));
        assert!(!p.in_category("Fashion"));
    }

    #[test]
    fn test_category_labels_keep_defaults_first() {
        let products = vec![
            normalize(json!({"id": 1, "categoryName": "Tech"})),
            normalize(json!({"id": 2, "categoryName": "Fashion"})),
            normalize(json!({"id": 3, "categoryName": "Tech"})),
        ];
        let labels = category_labels(&products, &["Home & Living", "Fashion"]);
        assert_eq!(labels, vec!["All", "Home & Living", "Fashion", "Tech"]);
    }
}
