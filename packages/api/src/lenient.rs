//! Serde helpers for the loosely typed payloads the backend returns.
//!
//! Numbers arrive as JSON numbers, as strings (`BigDecimal` columns), or as
//! `null`. Lists arrive bare or wrapped in a Spring `Page` (`{"content": [...]}`).
//! These helpers accept all of them and map anything unusable to `None` / empty
//! instead of failing the whole payload.

use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Int(i64),
    Float(f64),
    Str(String),
    Other(IgnoredAny),
}

impl Loose {
    fn as_f64(&self) -> Option<f64> {
        match self {
            Loose::Int(i) => Some(*i as f64),
            Loose::Float(f) if f.is_finite() => Some(*f),
            Loose::Str(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
            _ => None,
        }
    }

    fn as_i64(&self) -> Option<i64> {
        match self {
            Loose::Int(i) => Some(*i),
            Loose::Float(f) if f.fract() == 0.0 && f.is_finite() => Some(*f as i64),
            Loose::Str(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        }
    }

    fn into_string(self) -> Option<String> {
        match self {
            Loose::Int(i) => Some(i.to_string()),
            Loose::Float(f) => Some(f.to_string()),
            Loose::Str(s) if !s.trim().is_empty() => Some(s),
            _ => None,
        }
    }
}

pub fn f64_opt<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    let v: Option<Loose> = Option::deserialize(d)?;
    Ok(v.and_then(|v| v.as_f64()))
}

pub fn i64_opt<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
    let v: Option<Loose> = Option::deserialize(d)?;
    Ok(v.and_then(|v| v.as_i64()))
}

pub fn u32_opt<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
    let v: Option<Loose> = Option::deserialize(d)?;
    Ok(v
        .and_then(|v| v.as_i64())
        .and_then(|i| u32::try_from(i).ok()))
}

/// Ids and references that may be numeric or textual.
pub fn string_opt<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let v: Option<Loose> = Option::deserialize(d)?;
    Ok(v.and_then(Loose::into_string))
}

/// Text fields. Anything that is not a string (objects, arrays, booleans) reads as `None`.
pub fn text_opt<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let v: Option<Loose> = Option::deserialize(d)?;
    Ok(match v {
        Some(Loose::Str(s)) => Some(s),
        _ => None,
    })
}

/// Booleans, also as `"true"`/`"false"` strings.
pub fn bool_opt<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Bool(b) => Some(b),
        Value::String(s) => s.trim().parse::<bool>().ok(),
        _ => None,
    })
}

/// Nested lists: `null` or a non-list reads as empty, and bad items are skipped.
pub fn list<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(list_from_value(Value::deserialize(d)?))
}

/// First usable image of an `images` array: a string, or an object's `url`.
pub fn first_image<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let Value::Array(items) = Value::deserialize(d)? else {
        return Ok(None);
    };
    Ok(items.into_iter().find_map(|item| match item {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Object(mut map) => match map.remove("url") {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
            _ => None,
        },
        _ => None,
    }))
}

/// `Some(s)` only for a non-blank string; JavaScript-style truthiness for `||` chains.
pub fn non_empty(s: &Option<String>) -> Option<String> {
    s.as_ref()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Items of a bare array or of a page's `content`. Items that fail to decode are skipped.
pub fn list_from_value<T: DeserializeOwned>(value: Value) -> Vec<T> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("content") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };
    let total = items.len();
    let decoded: Vec<T> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();
    if decoded.len() != total {
        tracing::debug!("Skipped {} undecodable list items", total - decoded.len());
    }
    decoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Probe {
        #[serde(default, deserialize_with = "f64_opt")]
        price: Option<f64>,
        #[serde(default, deserialize_with = "u32_opt")]
        stock: Option<u32>,
        #[serde(default, deserialize_with = "string_opt")]
        id: Option<String>,
    }

    #[test]
    fn test_numbers_strings_and_nulls() {
        let p: Probe = serde_json::from_value(json!({"price": "19.50", "stock": 4, "id": 12})).unwrap();
        assert_eq!(p.price, Some(19.5));
        assert_eq!(p.stock, Some(4));
        assert_eq!(p.id.as_deref(), Some("12"));

        let p: Probe = serde_json::from_value(json!({"price": null, "stock": -1, "id": ""})).unwrap();
        assert_eq!(p, Probe { price: None, stock: None, id: None });

        let p: Probe = serde_json::from_value(json!({"price": {"amount": 1}, "stock": "many"})).unwrap();
        assert_eq!(p.price, None);
        assert_eq!(p.stock, None);

        let p: Probe = serde_json::from_value(json!({})).unwrap();
        assert_eq!(p.price, None);
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Nested {
        #[serde(default, deserialize_with = "text_opt")]
        label: Option<String>,
        #[serde(default, deserialize_with = "bool_opt")]
        active: Option<bool>,
        #[serde(default, deserialize_with = "list")]
        values: Vec<u32>,
        #[serde(default, deserialize_with = "first_image")]
        images: Option<String>,
    }

    #[test]
    fn test_odd_shapes_degrade_per_field() {
        let n: Nested = serde_json::from_value(json!({
            "label": {"en": "x"}, "active": "true", "values": null, "images": [{"url": "a.png"}]
        }))
        .unwrap();
        assert_eq!(n, Nested { label: None, active: Some(true), values: vec![], images: Some("a.png".into()) });

        let n: Nested = serde_json::from_value(json!({
            "label": "ok", "active": 1, "values": [1, "x", 3], "images": [null, "", "b.png"]
        }))
        .unwrap();
        assert_eq!(n.label.as_deref(), Some("ok"));
        assert_eq!(n.active, None);
        assert_eq!(n.values, vec![1, 3]);
        assert_eq!(n.images.as_deref(), Some("b.png"));

        let n: Nested = serde_json::from_value(json!({"images": "c.png"})).unwrap();
        assert_eq!(n.images, None);
    }

    #[test]
    fn test_list_from_bare_array_and_page() {
        let bare: Vec<Probe> = list_from_value(json!([{"price": 1}, {"price": 2}]));
        assert_eq!(bare.len(), 2);

        let paged: Vec<Probe> = list_from_value(json!({"content": [{"price": 3}], "totalPages": 1}));
        assert_eq!(paged[0].price, Some(3.0));

        let neither: Vec<Probe> = list_from_value(json!({"message": "oops"}));
        assert!(neither.is_empty());

        let mixed: Vec<Probe> = list_from_value(json!([{"price": 1}, "junk", 7]));
        assert_eq!(mixed.len(), 1);
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(&Some("  ".to_string())), None);
        assert_eq!(non_empty(&Some(" a ".to_string())).as_deref(), Some("a"));
        assert_eq!(non_empty(&None), None);
    }
}
