use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::CustomerProfile;

impl ApiClient {
    pub async fn customer_profile(&self, user_id: i64) -> Result<CustomerProfile, ApiError> {
        self.require_token()?;
        self.get_json(&format!("/customer/profile/{user_id}")).await
    }
}
