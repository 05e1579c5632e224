use store::StoredUser;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{LoginRequest, LoginResponse, RegisterRequest};

impl ApiClient {
    /// `POST /auth/login`. Returns the token and the user record to persist.
    pub async fn login(&self, username: &str, password: &str) -> Result<(String, StoredUser), ApiError> {
        let body = LoginRequest {
            username: username.trim().to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.post_json("/auth/login", &body).await?;
        let session = response.into_session().ok_or_else(|| ApiError::Decode {
            endpoint: "/auth/login".to_string(),
            reason: "response has no userId".to_string(),
        })?;
        tracing::debug!("Login accepted for {}", session.1.username);
        Ok(session)
    }

    /// `POST /auth/register`. The backend's confirmation text is returned.
    pub async fn register(&self, request: &RegisterRequest) -> Result<String, ApiError> {
        let message = self
            .execute(reqwest::Method::POST, "/auth/register", Some(request))
            .await?;
        tracing::info!("Registered {} as {:?}", request.username, request.role);
        Ok(message)
    }
}
