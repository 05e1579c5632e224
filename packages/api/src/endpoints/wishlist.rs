use reqwest::Method;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::wishlist::normalize_wishlist;
use crate::models::WishlistItem;

impl ApiClient {
    pub async fn wishlist(&self, user_id: i64) -> Result<Vec<WishlistItem>, ApiError> {
        self.require_token()?;
        let value = self.get_value(&format!("/wishlist/{user_id}")).await?;
        Ok(normalize_wishlist(value))
    }

    pub async fn add_to_wishlist(&self, user_id: i64, product_id: i64) -> Result<String, ApiError> {
        self.require_token()?;
        let path = format!("/wishlist/{user_id}/add?productId={product_id}");
        self.execute::<()>(Method::POST, &path, None).await
    }

    pub async fn remove_from_wishlist(&self, wishlist_id: i64) -> Result<(), ApiError> {
        self.require_token()?;
        self.execute::<()>(Method::DELETE, &format!("/wishlist/{wishlist_id}"), None)
            .await?;
        Ok(())
    }
}
