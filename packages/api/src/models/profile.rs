use serde::Deserialize;

use crate::lenient::{self, non_empty};

pub const NOT_SET: &str = "Not Set";

/// `GET /customer/profile/{userId}`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerProfile {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub street_address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient::f64_opt")]
    pub carbon_saved: Option<f64>,
    #[serde(default, deserialize_with = "lenient::u32_opt")]
    pub eco_points: Option<u32>,
}

impl CustomerProfile {
    pub fn display_name(&self) -> String {
        let first = non_empty(&self.first_name);
        let last = non_empty(&self.last_name);
        if first.is_some() || last.is_some() {
            return format!("{} {}", first.unwrap_or_default(), last.unwrap_or_default())
                .trim()
                .to_string();
        }
        non_empty(&self.name)
            .or_else(|| non_empty(&self.username))
            .unwrap_or_else(|| "User".to_string())
    }

    /// Structured address parts joined with commas, else the free-form
    /// address, else "Not Set".
    pub fn format_address(&self) -> String {
        let parts: Vec<String> = [
            &self.street_address,
            &self.city,
            &self.state,
            &self.zip_code,
            &self.country,
        ]
        .into_iter()
        .filter_map(non_empty)
        .collect();
        if !parts.is_empty() {
            return parts.join(", ");
        }
        non_empty(&self.address).unwrap_or_else(|| NOT_SET.to_string())
    }

    pub fn phone_label(&self) -> String {
        non_empty(&self.phone).unwrap_or_else(|| NOT_SET.to_string())
    }

    pub fn email_label(&self) -> String {
        non_empty(&self.email).unwrap_or_else(|| "N/A".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_address_prefers_structured_parts() {
        let p: CustomerProfile = serde_json::from_value(json!({
            "streetAddress": "12 Leaf St", "city": "Pune", "state": "", "zipCode": "411001",
            "address": "ignored"
        }))
        .unwrap();
        assert_eq!(p.format_address(), "12 Leaf St, Pune, 411001");

        let p: CustomerProfile = serde_json::from_value(json!({"address": "PO Box 4"})).unwrap();
        assert_eq!(p.format_address(), "PO Box 4");

        assert_eq!(CustomerProfile::default().format_address(), NOT_SET);
    }

    #[test]
    fn test_labels() {
        let p: CustomerProfile = serde_json::from_value(json!({
            "lastName": "Rao", "carbonSaved": "12.5", "ecoPoints": 40
        }))
        .unwrap();
        assert_eq!(p.display_name(), "Rao");
        assert_eq!(p.phone_label(), NOT_SET);
        assert_eq!(p.email_label(), "N/A");
        assert_eq!(p.carbon_saved, Some(12.5));
        assert_eq!(CustomerProfile::default().display_name(), "User");
    }
}
