//! # Login and registration payloads
//!
//! ## [`LoginResponse`]
//!
//! What `POST /auth/login` returns: the bearer token plus the user's profile
//! fields. [`LoginResponse::into_session`] splits it into the token and the
//! [`StoredUser`] record the client persists next to it.
//!
//! ## [`RegisterRequest`]
//!
//! Self-service sign-up. Only `CUSTOMER` and `SELLER` accounts can be requested;
//! admin accounts are created by approval on the backend.

use serde::{Deserialize, Serialize};
use store::{Role, StoredUser};

use crate::lenient;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login as returned by the backend.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    #[serde(default, deserialize_with = "lenient::i64_opt")]
    pub user_id: Option<i64>,
    pub username: String,
    pub role: Role,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl LoginResponse {
    /// Token and user record, or `None` when the backend omitted the user id.
    pub fn into_session(self) -> Option<(String, StoredUser)> {
        let user_id = self.user_id?;
        Some((
            self.token,
            StoredUser {
                user_id,
                username: self.username,
                role: self.role,
                first_name: self.first_name,
                last_name: self.last_name,
                email: self.email,
            },
        ))
    }
}

/// Account type a visitor may sign up for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountType {
    #[default]
    Customer,
    Seller,
}

impl AccountType {
    pub fn role(&self) -> Role {
        match self {
            AccountType::Customer => Role::Customer,
            AccountType::Seller => Role::Seller,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: AccountType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_into_session() {
        let raw = r#"{"token":"jwt","userId":"15","username":"sam","role":"SELLER","firstName":"Sam","lastName":"Oak","email":"s@o.io"}"#;
        let resp: LoginResponse = serde_json::from_str(raw).unwrap();
        let (token, user) = resp.into_session().unwrap();
        assert_eq!(token, "jwt");
        assert_eq!(user.user_id, 15);
        assert_eq!(user.role, Role::Seller);
        assert_eq!(user.display_name(), "Sam Oak");
    }

    #[test]
    fn test_login_response_without_user_id_is_rejected() {
        let raw = r#"{"token":"jwt","username":"sam","role":"CUSTOMER"}"#;
        let resp: LoginResponse = serde_json::from_str(raw).unwrap();
        assert!(resp.into_session().is_none());
    }

    #[test]
    fn test_register_request_wire_shape() {
        let req = RegisterRequest {
            username: "green".to_string(),
            email: "g@x.io".to_string(),
            password: "secret123".to_string(),
            first_name: "Gr".to_string(),
            last_name: "Een".to_string(),
            role: AccountType::Seller,
        };
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["firstName"], "Gr");
        assert_eq!(v["role"], "SELLER");
        assert_eq!(AccountType::Seller.role(), Role::Seller);
    }
}
