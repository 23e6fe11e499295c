//! [`OrderGateway`] over `POST /pedidos`.

use async_trait::async_trait;

use orderdesk_sales::{CreatedOrder, GatewayError, OrderGateway, SubmittedOrder};

use crate::client::{ApiClient, ApiError};
use crate::endpoints;

impl From<ApiError> for GatewayError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Network(msg) => GatewayError::Network(msg),
            ApiError::Api { status, message } => GatewayError::Api { status, message },
            ApiError::Decode(msg) => GatewayError::Decode(msg),
        }
    }
}

#[async_trait]
impl OrderGateway for ApiClient {
    async fn create_order(&self, order: &SubmittedOrder) -> Result<CreatedOrder, GatewayError> {
        let created: CreatedOrder = self.post_json(endpoints::ORDERS, order).await?;
        tracing::debug!(order_id = %created.id, "order service accepted order");
        Ok(created)
    }
}
