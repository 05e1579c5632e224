//! # Orders
//!
//! ## Placing an order
//!
//! [`ShippingInfo`] is what the checkout form collects. It is flattened into
//! the single multi-line `shippingAddress` string the backend stores, and sent
//! with the cart lines as an [`OrderRequest`]. Only cash on delivery is
//! accepted; [`PaymentMethod::Upi`] exists so the checkout can offer it and
//! refuse it.
//!
//! ## Reading orders
//!
//! `GET /orders/customer` returns the signed-in customer's orders. Timestamps
//! are Java `LocalDateTime` values (no offset) and are read as UTC.
//!
//! ## Tree planting
//!
//! A delivered order unlocks a tree-planting submission for
//! [`TREE_PLANTING_WINDOW_HOURS`] after delivery (or after creation when the
//! backend has no delivery timestamp).

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use store::CartLine;

use crate::lenient::{self, non_empty};

pub const TREE_PLANTING_WINDOW_HOURS: i64 = 24;
pub const DEFAULT_COUNTRY: &str = "India";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
            OrderStatus::Unknown => "UNKNOWN",
        }
    }

    /// Customers confirm delivery themselves once an order has shipped.
    pub fn can_confirm_delivery(&self) -> bool {
        matches!(self, OrderStatus::Shipped)
    }
}

fn status_or_unknown<'de, D: Deserializer<'de>>(d: D) -> Result<OrderStatus, D::Error> {
    let v = serde_json::Value::deserialize(d)?;
    Ok(serde_json::from_value(v).unwrap_or(OrderStatus::Unknown))
}

fn timestamp_opt<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DateTime<Utc>>, D::Error> {
    let v: Option<String> = lenient::string_opt(d)?;
    Ok(v.as_deref().and_then(parse_timestamp))
}

fn product_or_none<'de, D: Deserializer<'de>>(d: D) -> Result<Option<OrderProduct>, D::Error> {
    let v = serde_json::Value::deserialize(d)?;
    Ok(serde_json::from_value(v).ok())
}

/// RFC 3339, or a zone-less `LocalDateTime` read as UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderProduct {
    #[serde(default, deserialize_with = "lenient::i64_opt")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient::text_opt")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text_opt")]
    pub image_url: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default, deserialize_with = "product_or_none")]
    pub product: Option<OrderProduct>,
    #[serde(default, deserialize_with = "lenient::text_opt")]
    pub product_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::u32_opt")]
    pub quantity: Option<u32>,
    #[serde(default, deserialize_with = "lenient::f64_opt")]
    pub price: Option<f64>,
}

impl OrderItem {
    pub fn name(&self) -> String {
        self.product
            .as_ref()
            .and_then(|p| non_empty(&p.name))
            .or_else(|| non_empty(&self.product_name))
            .unwrap_or_else(|| "Product".to_string())
    }

    pub fn image_url(&self) -> Option<String> {
        self.product.as_ref().and_then(|p| non_empty(&p.image_url))
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default, deserialize_with = "lenient::i64_opt")]
    pub id: Option<i64>,
    #[serde(default = "unknown_status", deserialize_with = "status_or_unknown")]
    pub status: OrderStatus,
    #[serde(default, deserialize_with = "lenient::f64_opt")]
    pub total_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text_opt")]
    pub payment_method: Option<String>,
    #[serde(default, deserialize_with = "lenient::text_opt")]
    pub shipping_address: Option<String>,
    #[serde(default, deserialize_with = "timestamp_opt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp_opt")]
    pub delivered_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub order_items: Vec<OrderItem>,
}

fn unknown_status() -> OrderStatus {
    OrderStatus::Unknown
}

/// What the tree-planting panel of an order shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreePlanting {
    Available,
    Expired,
    NotDelivered,
}

impl Order {
    pub fn payment_label(&self) -> String {
        match self.payment_method.as_deref() {
            Some("CASH_ON_DELIVERY") => "Cash on Delivery".to_string(),
            Some(other) if !other.trim().is_empty() => other.to_string(),
            _ => "N/A".to_string(),
        }
    }

    /// First line of the stored address, for the compact "Ship To" column.
    pub fn ship_to_summary(&self) -> Option<String> {
        let address = non_empty(&self.shipping_address)?;
        address
            .split([',', '\n'])
            .next()
            .map(|s| s.trim().to_string())
    }

    pub fn tree_planting(&self, now: DateTime<Utc>) -> TreePlanting {
        if self.status != OrderStatus::Delivered {
            return TreePlanting::NotDelivered;
        }
        match self.delivered_at.or(self.created_at) {
            Some(at) if now - at <= Duration::hours(TREE_PLANTING_WINDOW_HOURS) => {
                TreePlanting::Available
            }
            _ => TreePlanting::Expired,
        }
    }
}

pub fn normalize_orders(value: serde_json::Value) -> Vec<Order> {
    lenient::list_from_value(value)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    CashOnDelivery,
    Upi,
}

impl PaymentMethod {
    pub fn is_available(&self) -> bool {
        matches!(self, PaymentMethod::CashOnDelivery)
    }

    pub fn title(&self) -> &'static str {
        match self {
            PaymentMethod::CashOnDelivery => "Cash on Delivery",
            PaymentMethod::Upi => "UPI / Online Payment",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PaymentMethod::CashOnDelivery => "Pay when your order arrives",
            PaymentMethod::Upi => "Pay via Razorpay (UPI, Card, Netbanking)",
        }
    }
}

pub const UPI_UNAVAILABLE: &str =
    "Feature in improvement! UPI payment through Razorpay will be updated soon.";

/// Checkout shipping form.
#[derive(Clone, Debug, PartialEq)]
pub struct ShippingInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

impl Default for ShippingInfo {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            zip_code: String::new(),
            country: DEFAULT_COUNTRY.to_string(),
        }
    }
}

impl ShippingInfo {
    /// Prefill names and email from the signed-in user.
    pub fn for_user(user: &store::StoredUser) -> Self {
        Self {
            first_name: user.first_name.clone().unwrap_or_default(),
            last_name: user.last_name.clone().unwrap_or_default(),
            email: user.email.clone().unwrap_or_default(),
            ..Self::default()
        }
    }

    pub fn format_address(&self) -> String {
        format!(
            "{} {}\n{}\n{}, {} {}\n{}\nPhone: {}",
            self.first_name,
            self.last_name,
            self.address,
            self.city,
            self.state,
            self.zip_code,
            self.country,
            self.phone
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: i64,
    pub quantity: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub cart_items: Vec<OrderLine>,
    pub shipping_address: String,
    pub payment_method: PaymentMethod,
    pub notes: String,
    pub eco_points_used: u32,
    pub eco_points_discount: f64,
    pub is_eco_boost: bool,
}

impl OrderRequest {
    pub fn new(lines: &[CartLine], shipping: &ShippingInfo, notes: &str) -> Self {
        Self {
            cart_items: lines
                .iter()
                .map(|l| OrderLine {
                    product_id: l.product_id,
                    quantity: l.quantity.max(1),
                })
                .collect(),
            shipping_address: shipping.format_address(),
            payment_method: PaymentMethod::CashOnDelivery,
            notes: notes.to_string(),
            eco_points_used: 0,
            eco_points_discount: 0.0,
            is_eco_boost: false,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_opt")]
    pub order_id: Option<String>,
}

impl OrderConfirmation {
    pub fn reference(&self) -> String {
        self.id.clone().or_else(|| self.order_id.clone()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn order(v: serde_json::Value) -> Order {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn test_order_shape_and_unknown_status() {
        let orders = normalize_orders(json!([
            {"id": 1, "status": "SHIPPED", "totalPrice": "2199.00", "paymentMethod": "CASH_ON_DELIVERY",
             "shippingAddress": "Asha Rao\n12 Leaf St\nPune, MH 411001", "createdAt": "2024-05-01T10:15:30",
             "orderItems": [{"product": {"name": "Jute Bag"}, "quantity": 2, "price": 99}]},
            {"id": 2, "status": "ON_HOLD"},
            {"id": 3, "status": null}
        ]));
        assert_eq!(orders.len(), 3);
        assert_eq!(orders[0].status, OrderStatus::Shipped);
        assert!(orders[0].status.can_confirm_delivery());
        assert_eq!(orders[0].total_price, Some(2199.0));
        assert_eq!(orders[0].payment_label(), "Cash on Delivery");
        assert_eq!(orders[0].ship_to_summary().as_deref(), Some("Asha Rao"));
        assert_eq!(orders[0].order_items[0].name(), "Jute Bag");
        assert_eq!(orders[1].status, OrderStatus::Unknown);
        assert_eq!(orders[2].status, OrderStatus::Unknown);
        assert_eq!(orders[1].payment_label(), "N/A");
    }

    #[test]
    fn test_sparse_orders_are_kept() {
        let orders = normalize_orders(json!([
            {"id": 1, "status": "SHIPPED", "orderItems": null},
            {"status": "PENDING", "orderItems": []},
            {"id": 3, "status": 7, "paymentMethod": {"type": "COD"},
             "orderItems": [{"product": "Jute Bag", "quantity": 1}, 5]}
        ]));
        let ids: Vec<_> = orders.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![Some(1), None, Some(3)]);
        assert!(orders[0].order_items.is_empty());
        assert!(orders[0].status.can_confirm_delivery());
        assert_eq!(orders[2].status, OrderStatus::Unknown);
        assert_eq!(orders[2].payment_label(), "N/A");
        assert_eq!(orders[2].order_items.len(), 1);
        assert_eq!(orders[2].order_items[0].name(), "Product");
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2024-05-01T10:15:30").is_some());
        assert!(parse_timestamp("2024-05-01T10:15:30.123456").is_some());
        assert!(parse_timestamp("2024-05-01T10:15:30Z").is_some());
        assert!(parse_timestamp("2024-05-01T10:15:30+05:30").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_tree_planting_window() {
        let delivered = order(json!({
            "id": 5, "status": "DELIVERED",
            "createdAt": "2024-05-01T08:00:00", "deliveredAt": "2024-05-02T08:00:00"
        }));
        let at = |s: &str| parse_timestamp(s).unwrap();
        assert_eq!(delivered.tree_planting(at("2024-05-03T07:59:59")), TreePlanting::Available);
        assert_eq!(delivered.tree_planting(at("2024-05-03T08:00:01")), TreePlanting::Expired);

        let no_delivery_time = order(json!({"id": 6, "status": "DELIVERED", "createdAt": "2024-05-01T08:00:00"}));
        assert_eq!(no_delivery_time.tree_planting(at("2024-05-01T20:00:00")), TreePlanting::Available);

        let pending = order(json!({"id": 7, "status": "PENDING"}));
        assert_eq!(pending.tree_planting(Utc::now()), TreePlanting::NotDelivered);
    }

    #[test]
    fn test_order_request_wire_shape() {
        let shipping = ShippingInfo {
            first_name: "Asha".into(),
            last_name: "Rao".into(),
            email: "a@r.in".into(),
            phone: "9876543210".into(),
            address: "12 Leaf St".into(),
            city: "Pune".into(),
            state: "MH".into(),
            zip_code: "411001".into(),
            ..ShippingInfo::default()
        };
        let lines = vec![CartLine::new(4, 2, 120.0), CartLine::new(9, 0, 10.0)];
        let req = OrderRequest::new(&lines, &shipping, "");
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["paymentMethod"], "CASH_ON_DELIVERY");
        assert_eq!(v["cartItems"][0]["productId"], 4);
        assert_eq!(v["cartItems"][1]["quantity"], 1);
        assert_eq!(
            v["shippingAddress"],
            "Asha Rao\n12 Leaf St\nPune, MH 411001\nIndia\nPhone: 9876543210"
        );
    }

    #[test]
    fn test_upi_is_offered_but_unavailable() {
        assert!(PaymentMethod::CashOnDelivery.is_available());
        assert!(!PaymentMethod::Upi.is_available());
    }

    #[test]
    fn test_confirmation_reference() {
        let c: OrderConfirmation = serde_json::from_value(json!({"orderId": 42})).unwrap();
        assert_eq!(c.reference(), "42");
        let c: OrderConfirmation = serde_json::from_value(json!({"id": "A-1", "orderId": 42})).unwrap();
        assert_eq!(c.reference(), "A-1");
    }
}
