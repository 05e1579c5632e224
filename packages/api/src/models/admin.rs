use serde::Deserialize;

use crate::lenient::{self, non_empty};

/// An admin sign-up awaiting approval.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingAdmin {
    #[serde(deserialize_with = "lenient::i64_opt")]
    pub id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl PendingAdmin {
    pub fn username_label(&self) -> String {
        non_empty(&self.username).unwrap_or_else(|| "Unknown User".to_string())
    }

    pub fn email_label(&self) -> String {
        non_empty(&self.email).unwrap_or_else(|| "Not Provided".to_string())
    }
}

pub fn normalize_pending_admins(value: serde_json::Value) -> Vec<PendingAdmin> {
    lenient::list_from_value::<PendingAdmin>(value)
        .into_iter()
        .filter(|a| a.id.is_some())
        .collect()
}

/// What the admin is moderating when rejecting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectTarget {
    User,
    Product,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pending_admins() {
        let admins = normalize_pending_admins(json!([
            {"id": 3, "username": "ops", "email": ""},
            {"id": null, "username": "ghost"}
        ]));
        assert_eq!(admins.len(), 1);
        assert_eq!(admins[0].username_label(), "ops");
        assert_eq!(admins[0].email_label(), "Not Provided");
    }
}
