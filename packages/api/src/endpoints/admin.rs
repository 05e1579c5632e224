use reqwest::Method;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::admin::normalize_pending_admins;
use crate::models::product::normalize_products;
use crate::models::{PendingAdmin, Product, RejectTarget};

impl ApiClient {
    pub async fn pending_admins(&self) -> Result<Vec<PendingAdmin>, ApiError> {
        self.require_token()?;
        Ok(normalize_pending_admins(
            self.get_value("/admin/pending-admins").await?,
        ))
    }

    pub async fn pending_products(&self) -> Result<Vec<Product>, ApiError> {
        self.require_token()?;
        Ok(normalize_products(self.get_value("/admin/pending-products").await?))
    }

    /// Every product, active or not.
    pub async fn all_products(&self) -> Result<Vec<Product>, ApiError> {
        self.require_token()?;
        Ok(normalize_products(self.get_value("/admin/products").await?))
    }

    pub async fn approve_admin(&self, id: i64) -> Result<(), ApiError> {
        self.moderate(Method::PUT, format!("/admin/approve-admin/{id}")).await
    }

    pub async fn approve_product(&self, id: i64) -> Result<(), ApiError> {
        self.moderate(Method::PUT, format!("/admin/approve-product/{id}")).await
    }

    pub async fn reject(&self, target: RejectTarget, id: i64) -> Result<(), ApiError> {
        let path = match target {
            RejectTarget::User => format!("/admin/reject-user/{id}"),
            RejectTarget::Product => format!("/admin/reject-product/{id}"),
        };
        self.moderate(Method::DELETE, path).await
    }

    pub async fn remove_product(&self, id: i64) -> Result<(), ApiError> {
        self.moderate(Method::DELETE, format!("/admin/products/{id}")).await
    }

    async fn moderate(&self, method: Method, path: String) -> Result<(), ApiError> {
        self.require_token()?;
        self.execute::<()>(method, &path, None).await?;
        tracing::info!("Moderation call {} succeeded", path);
        Ok(())
    }
}
