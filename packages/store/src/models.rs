//! # Persisted client models
//!
//! The shapes written to the key-value store. They are `Serialize + Deserialize`
//! with camelCase field names so a snapshot written by one build of the client
//! reads back in another.
//!
//! | Type | Stored under |
//! |------|--------------|
//! | [`StoredUser`] | [`crate::keys::USER`] |
//! | [`CartLine`] (as an array) | [`crate::keys::CART`] |
//! | [`Theme`] (as a bare string) | [`crate::keys::THEME`] |

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Marketplace role, as issued by the backend at login.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    #[serde(alias = "admin", alias = "Admin")]
    Admin,
    #[serde(alias = "seller", alias = "Seller")]
    Seller,
    #[serde(alias = "customer", alias = "Customer")]
    Customer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Seller => "SELLER",
            Role::Customer => "CUSTOMER",
        }
    }

    /// Where a freshly signed-in user of this role lands.
    pub fn landing_path(&self) -> &'static str {
        match self {
            Role::Admin => "/admin/dashboard",
            Role::Seller => "/seller/dashboard",
            Role::Customer => "/products",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User record kept next to the token.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredUser {
    pub user_id: i64,
    pub username: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl StoredUser {
    /// "First Last" when either name is set, otherwise the username.
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() {
            self.username.clone()
        } else {
            parts.join(" ")
        }
    }
}

/// One line of the locally persisted cart snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: i64,
    #[serde(default, deserialize_with = "loose_u32")]
    pub quantity: u32,
    #[serde(default, deserialize_with = "loose_f64")]
    pub price: f64,
    /// Server-side cart row, once the backend has confirmed the line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cart_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "loose_u32")]
    pub eco_points: u32,
    /// Kilograms of CO₂ saved per unit.
    #[serde(default, deserialize_with = "loose_f64")]
    pub carbon_saved: f64,
}

/// A number, a numeric string, or anything else as `None`.
fn loose_number(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

fn loose_f64<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(loose_number(&Value::deserialize(d)?).unwrap_or(0.0))
}

/// Whole non-negative counts; fractions, negatives and junk read as 0.
fn loose_u32<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    let n = loose_number(&Value::deserialize(d)?).unwrap_or(0.0);
    if n.fract() == 0.0 && n >= 0.0 && n <= f64::from(u32::MAX) {
        Ok(n as u32)
    } else {
        Ok(0)
    }
}

impl CartLine {
    pub fn new(product_id: i64, quantity: u32, price: f64) -> Self {
        Self {
            product_id,
            quantity,
            price,
            cart_id: None,
            name: None,
            image: None,
            eco_points: 0,
            carbon_saved: 0.0,
        }
    }

    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// Colour scheme preference. Anything unrecognised reads as light.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_accepts_backend_and_lowercase_spellings() {
        let r: Role = serde_json::from_str("\"SELLER\"").unwrap();
        assert_eq!(r, Role::Seller);
        let r: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(r, Role::Admin);
        assert!(serde_json::from_str::<Role>("\"GUEST\"").is_err());
    }

    #[test]
    fn test_role_landing_paths() {
        assert_eq!(Role::Customer.landing_path(), "/products");
        assert_eq!(Role::Admin.landing_path(), "/admin/dashboard");
        assert_eq!(Role::Seller.landing_path(), "/seller/dashboard");
    }

    #[test]
    fn test_stored_user_reads_login_shape() {
        let raw = r#"{"userId":7,"username":"mira","role":"CUSTOMER","firstName":"Mira","lastName":null,"email":"m@x.io"}"#;
        let user: StoredUser = serde_json::from_str(raw).unwrap();
        assert_eq!(user.user_id, 7);
        assert_eq!(user.role, Role::Customer);
        assert_eq!(user.display_name(), "Mira");
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        let user = StoredUser {
            user_id: 1,
            username: "root".to_string(),
            role: Role::Admin,
            first_name: Some("  ".to_string()),
            last_name: None,
            email: None,
        };
        assert_eq!(user.display_name(), "root");
    }

    #[test]
    fn test_cart_line_defaults_missing_fields() {
        let line: CartLine = serde_json::from_str(r#"{"productId":3}"#).unwrap();
        assert_eq!(line.quantity, 0);
        assert_eq!(line.price, 0.0);
        assert!(line.cart_id.is_none());
    }

    #[test]
    fn test_theme_parse_and_toggle() {
        assert_eq!(Theme::parse("dark"), Theme::Dark);
        assert_eq!(Theme::parse("sepia"), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::default().as_str(), "light");
    }
}
