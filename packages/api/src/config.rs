//! # Client configuration - `ecobazaar.toml`
//!
//! Where the backend lives and how often polling views refresh.
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:8081/api"
//!
//! [orders]
//! poll_interval_secs = 30   # 0 disables polling
//! ```
//!
//! Every section has a `Default`, so an empty or partial file is equivalent to
//! the defaults. Web builds cannot read files or the environment at runtime;
//! [`ClientConfig::from_build_env`] embeds an optional `ECOBAZAAR_API_URL`
//! override at compile time instead.

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "http://localhost:8081/api";

/// Top-level client configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub orders: OrdersConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to. No trailing slash needed.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrdersConfig {
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u32,
}

fn default_poll_interval() -> u32 {
    30
}

impl Default for OrdersConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api: ApiConfig {
                base_url: base_url.into(),
            },
            orders: OrdersConfig::default(),
        }
    }

    /// Defaults, with `ECOBAZAAR_API_URL` applied if it was set when compiling.
    pub fn from_build_env() -> Self {
        match option_env!("ECOBAZAAR_API_URL") {
            Some(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::default(),
        }
    }

    pub fn with_poll_interval(mut self, secs: u32) -> Self {
        self.orders.poll_interval_secs = secs;
        self
    }

    pub fn filename() -> &'static str {
        "ecobazaar.toml"
    }

    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = ClientConfig::from_toml("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api.base_url, DEFAULT_API_URL);
        assert_eq!(config.orders.poll_interval_secs, 30);
    }

    #[test]
    fn test_partial_file() {
        let config = ClientConfig::from_toml("[api]\nbase_url = \"https://shop.example/api\"\n").unwrap();
        assert_eq!(config.api.base_url, "https://shop.example/api");
        assert_eq!(config.orders.poll_interval_secs, 30);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = ClientConfig::new("http://10.0.0.2:8081/api").with_poll_interval(0);
        let text = config.to_toml().unwrap();
        assert_eq!(ClientConfig::from_toml(&text).unwrap(), config);
    }
}
