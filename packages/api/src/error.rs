use thiserror::Error;

/// Failure of a backend call. Every variant is terminal for the user action
/// that triggered it; nothing is retried.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("unexpected response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },

    #[error("you must be logged in")]
    NotSignedIn,
}

impl ApiError {
    /// Text for an inline banner: the backend's own message when it sent one,
    /// otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status { message, .. } if !message.trim().is_empty() => message.clone(),
            ApiError::NotSignedIn => self.to_string(),
            _ => fallback.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Pull a human-readable message out of an error body.
///
/// Spring returns either `{"message": "..."}`, `{"error": "..."}` or plain text.
pub(crate) fn extract_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(s) = value.get(key).and_then(|v| v.as_str()) {
                return s.to_string();
            }
        }
        if let Some(s) = value.as_str() {
            return s.to_string();
        }
        return String::new();
    }
    body.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_message_shapes() {
        assert_eq!(extract_message(r#"{"message":"Bad credentials"}"#), "Bad credentials");
        assert_eq!(extract_message(r#"{"error":"Forbidden","status":403}"#), "Forbidden");
        assert_eq!(extract_message("Item removed successfully"), "Item removed successfully");
        assert_eq!(extract_message(r#""quoted""#), "quoted");
        assert_eq!(extract_message(r#"{"status":500}"#), "");
    }

    #[test]
    fn test_user_message_prefers_backend_text() {
        let e = ApiError::Status {
            status: 401,
            message: "Invalid username or password".to_string(),
        };
        assert_eq!(e.user_message("Login failed."), "Invalid username or password");
        assert_eq!(e.status(), Some(401));

        let e = ApiError::Status {
            status: 500,
            message: String::new(),
        };
        assert_eq!(e.user_message("Login failed."), "Login failed.");

        let e = ApiError::Decode {
            endpoint: "/products".to_string(),
            reason: "eof".to_string(),
        };
        assert_eq!(e.user_message("Failed to load products."), "Failed to load products.");
    }
}
