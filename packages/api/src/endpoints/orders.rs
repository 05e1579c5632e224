use reqwest::Method;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::order::normalize_orders;
use crate::models::{Order, OrderConfirmation, OrderRequest};

impl ApiClient {
    pub async fn create_order(&self, request: &OrderRequest) -> Result<OrderConfirmation, ApiError> {
        self.require_token()?;
        let confirmation: OrderConfirmation = self.post_json("/orders", request).await?;
        tracing::info!("Order {} placed", confirmation.reference());
        Ok(confirmation)
    }

    /// `GET /orders/customer`, newest first as the backend returns them.
    pub async fn customer_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.require_token()?;
        let value = self.get_value("/orders/customer").await?;
        Ok(normalize_orders(value))
    }

    pub async fn mark_delivered(&self, order_id: i64) -> Result<(), ApiError> {
        self.require_token()?;
        self.execute::<()>(Method::PUT, &format!("/orders/{order_id}/deliver"), None)
            .await?;
        Ok(())
    }
}
