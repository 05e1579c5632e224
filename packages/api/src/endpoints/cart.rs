use reqwest::Method;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::cart::normalize_cart;
use crate::models::CartItem;

impl ApiClient {
    /// The user's server cart: `/cart/details/{id}`, falling back to
    /// `/cart/user/{id}` when the details view fails.
    pub async fn cart(&self, user_id: i64) -> Result<Vec<CartItem>, ApiError> {
        match self.get_value(&format!("/cart/details/{user_id}")).await {
            Ok(value) => Ok(normalize_cart(value)),
            Err(e) => {
                tracing::warn!("Cart details failed, trying plain listing: {}", e);
                self.cart_listing(user_id).await
            }
        }
    }

    /// `GET /cart/user/{id}` only.
    pub async fn cart_listing(&self, user_id: i64) -> Result<Vec<CartItem>, ApiError> {
        let value = self.get_value(&format!("/cart/user/{user_id}")).await?;
        Ok(normalize_cart(value))
    }

    pub async fn add_to_cart(&self, user_id: i64, product_id: i64, quantity: u32) -> Result<String, ApiError> {
        self.require_token()?;
        let path = format!("/cart/{user_id}/add?productId={product_id}&quantity={}", quantity.max(1));
        self.execute::<()>(Method::POST, &path, None).await
    }

    /// Delete one server cart row. Returns the backend's confirmation text.
    pub async fn remove_cart_row(&self, cart_id: i64) -> Result<String, ApiError> {
        self.execute::<()>(Method::DELETE, &format!("/cart/{cart_id}"), None)
            .await
    }

    pub async fn clear_cart(&self, user_id: i64) -> Result<(), ApiError> {
        self.require_token()?;
        self.execute::<()>(Method::DELETE, &format!("/cart/{user_id}/clear"), None)
            .await?;
        Ok(())
    }
}
