use serde::Deserialize;
use store::CartLine;

use crate::lenient::{self, non_empty};

/// `GET /suggestions/greener/{productId}`: a lower-emission product in the
/// same category, if the backend found one.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GreenerAlternative {
    #[serde(deserialize_with = "lenient::i64_opt")]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::f64_opt")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::f64_opt")]
    pub unit_price: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient::f64_opt")]
    pub emission_per_unit: Option<f64>,
    #[serde(default)]
    pub is_green: Option<bool>,
}

impl GreenerAlternative {
    pub fn display_name(&self) -> String {
        non_empty(&self.name)
            .or_else(|| non_empty(&self.product_name))
            .unwrap_or_else(|| "Greener option".to_string())
    }

    pub fn price(&self) -> f64 {
        self.price.or(self.unit_price).unwrap_or(0.0)
    }

    pub fn image(&self) -> Option<String> {
        non_empty(&self.image_url).or_else(|| non_empty(&self.image))
    }

    pub fn emission(&self) -> f64 {
        self.emission_per_unit.unwrap_or(0.0)
    }

    /// Whole-percent carbon reduction against the current product's score;
    /// zero when the current product has no positive score.
    pub fn carbon_reduction_percent(&self, current_carbon: f64) -> i64 {
        if current_carbon > 0.0 {
            (((current_carbon - self.emission()) / current_carbon) * 100.0).round() as i64
        } else {
            0
        }
    }

    pub fn price_difference(&self, current_price: f64) -> f64 {
        self.price() - current_price
    }

    /// Cart line that replaces the current product with this alternative.
    pub fn to_cart_line(&self, quantity: u32) -> Option<CartLine> {
        let mut line = CartLine::new(self.id?, quantity.max(1), self.price());
        line.name = Some(self.display_name());
        line.image = self.image();
        Some(line)
    }
}

/// Decode a suggestion body; anything unusable means "no alternative".
pub fn normalize_alternative(value: serde_json::Value) -> Option<GreenerAlternative> {
    serde_json::from_value::<GreenerAlternative>(value)
        .ok()
        .filter(|a| a.id.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_alternative_fields_and_reduction() {
        let alt = normalize_alternative(json!({
            "id": 12, "productName": "Steel Bottle", "unitPrice": "349",
            "image": "s.png", "emissionPerUnit": 1.0, "isGreen": true
        }))
        .unwrap();
        assert_eq!(alt.display_name(), "Steel Bottle");
        assert_eq!(alt.price(), 349.0);
        assert_eq!(alt.carbon_reduction_percent(4.0), 75);
        assert_eq!(alt.carbon_reduction_percent(0.0), 0);
        assert_eq!(alt.price_difference(299.0), 50.0);

        let line = alt.to_cart_line(2).unwrap();
        assert_eq!(line.product_id, 12);
        assert_eq!(line.quantity, 2);
        assert_eq!(line.image.as_deref(), Some("s.png"));
    }

    #[test]
    fn test_empty_or_malformed_means_none() {
        assert!(normalize_alternative(json!(null)).is_none());
        assert!(normalize_alternative(json!({"message": "none"})).is_none());
        assert!(normalize_alternative(json!({"id": null})).is_none());
    }
}
