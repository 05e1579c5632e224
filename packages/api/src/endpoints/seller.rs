use reqwest::Method;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::product::normalize_products;
use crate::models::{Product, ProductPayload, SellerStats};

impl ApiClient {
    pub async fn seller_products(&self) -> Result<Vec<Product>, ApiError> {
        self.require_token()?;
        Ok(normalize_products(self.get_value("/seller/products").await?))
    }

    pub async fn create_product(&self, payload: &ProductPayload) -> Result<(), ApiError> {
        self.require_token()?;
        self.execute(Method::POST, "/seller/products", Some(payload))
            .await?;
        Ok(())
    }

    pub async fn update_product(&self, id: i64, payload: &ProductPayload) -> Result<(), ApiError> {
        self.require_token()?;
        self.execute(Method::PUT, &format!("/seller/products/{id}"), Some(payload))
            .await?;
        Ok(())
    }

    pub async fn delete_product(&self, id: i64) -> Result<(), ApiError> {
        self.require_token()?;
        self.execute::<()>(Method::DELETE, &format!("/seller/products/{id}"), None)
            .await?;
        Ok(())
    }

    /// Dashboard stats, derived from `products` when the stats endpoint fails.
    pub async fn seller_stats(&self, products: &[Product]) -> SellerStats {
        match self.get_json::<SellerStats>("/seller/dashboard/stats").await {
            Ok(stats) => stats,
            Err(e) => {
                tracing::info!("Stats endpoint unavailable, deriving from products: {}", e);
                SellerStats::derive_from(products)
            }
        }
    }
}
