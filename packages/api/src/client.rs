//! HTTP plumbing shared by every endpoint module.

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{extract_message, ApiError};

/// REST client for the marketplace backend.
///
/// Cheap to clone; clones share the connection pool. Attach the session token
/// with [`with_token`](ApiClient::with_token) before calling endpoints that need
/// a signed-in user.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send and turn non-2xx responses into [`ApiError::Status`].
    pub(crate) async fn send(&self, builder: RequestBuilder, path: &str) -> Result<Response, ApiError> {
        let response = builder.send().await.map_err(|e| {
            tracing::warn!("Request to {} failed: {}", path, e);
            ApiError::Network(e)
        })?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        tracing::warn!("{} returned {}", path, status);
        Err(ApiError::Status {
            status: status.as_u16(),
            message: extract_message(&body),
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response, path: &str) -> Result<T, ApiError> {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode {
            endpoint: path.to_string(),
            reason: e.to_string(),
        })
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(self.request(Method::GET, path), path).await?;
        Self::decode(response, path).await
    }

    /// GET a payload whose shape is normalised by the caller.
    pub(crate) async fn get_value(&self, path: &str) -> Result<Value, ApiError> {
        let response = self.send(self.request(Method::GET, path), path).await?;
        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| ApiError::Decode {
            endpoint: path.to_string(),
            reason: e.to_string(),
        })
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send(self.request(Method::POST, path).json(body), path)
            .await?;
        Self::decode(response, path).await
    }

    /// Send a request whose response body is irrelevant or a plain message.
    pub(crate) async fn execute<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<String, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let mut builder = self.request(method, path);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let response = self.send(builder, path).await?;
        let text = response.text().await.unwrap_or_default();
        Ok(extract_message(&text))
    }

    pub(crate) fn require_token(&self) -> Result<(), ApiError> {
        if self.token.is_some() {
            Ok(())
        } else {
            Err(ApiError::NotSignedIn)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slashes() {
        let client = ApiClient::new(&ClientConfig::new("http://localhost:8081/api/"));
        assert_eq!(client.base_url(), "http://localhost:8081/api");
        assert_eq!(client.url("/products"), "http://localhost:8081/api/products");
        assert_eq!(client.url("cart/user/3"), "http://localhost:8081/api/cart/user/3");
    }

    #[test]
    fn test_require_token() {
        let client = ApiClient::new(&ClientConfig::default());
        assert!(matches!(client.require_token(), Err(ApiError::NotSignedIn)));
        let client = client.with_token(Some("t".to_string()));
        assert!(client.require_token().is_ok());
        assert!(client.has_token());
    }
}
