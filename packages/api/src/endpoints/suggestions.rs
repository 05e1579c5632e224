use crate::client::ApiClient;
use crate::models::suggestion::normalize_alternative;
use crate::models::GreenerAlternative;

impl ApiClient {
    /// A greener alternative for `product_id`. Failures and empty answers
    /// both mean "none"; the cart shows nothing in that case.
    pub async fn greener_alternative(&self, product_id: i64) -> Option<GreenerAlternative> {
        match self
            .get_value(&format!("/suggestions/greener/{product_id}"))
            .await
        {
            Ok(value) => normalize_alternative(value),
            Err(e) => {
                tracing::debug!("No greener alternative for {}: {}", product_id, e);
                None
            }
        }
    }
}
