use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::product::{normalize_product, normalize_products, RawProduct};
use crate::models::Product;

impl ApiClient {
    /// `GET /products`, bare array or page.
    pub async fn products(&self) -> Result<Vec<Product>, ApiError> {
        let value = self.get_value("/products").await?;
        let products = normalize_products(value);
        tracing::debug!("Loaded {} products", products.len());
        Ok(products)
    }

    pub async fn product(&self, id: i64) -> Result<Product, ApiError> {
        let path = format!("/products/{id}");
        let raw: RawProduct = self.get_json(&path).await?;
        normalize_product(raw).ok_or(ApiError::Decode {
            endpoint: path,
            reason: "product has no id".to_string(),
        })
    }
}
