//! Hand a validated order to the order service.

use std::sync::Arc;

use thiserror::Error;

use orderdesk_sales::{CreatedOrder, GatewayError, OrderGateway, SubmittedOrder};

/// The order service did not create the order.
///
/// Displays only a generic message; the cause is kept for logs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("could not create order")]
pub struct SubmissionFailure {
    #[source]
    cause: GatewayError,
}

impl SubmissionFailure {
    pub fn cause(&self) -> &GatewayError {
        &self.cause
    }
}

/// Submit `order` once, without retrying.
///
/// The call runs on its own task: if the caller stops waiting (the workflow is
/// closed), the request still completes and its result is dropped.
pub async fn submit_order(
    gateway: Arc<dyn OrderGateway>,
    order: SubmittedOrder,
) -> Result<CreatedOrder, SubmissionFailure> {
    let task = tokio::spawn(async move { gateway.create_order(&order).await });

    let result = match task.await {
        Ok(result) => result,
        Err(join_err) => Err(GatewayError::Network(format!(
            "submission task failed: {join_err}"
        ))),
    };

    match result {
        Ok(created) => {
            tracing::info!(order_id = %created.id, number = %created.display_number(), "order created");
            Ok(created)
        }
        Err(cause) => {
            tracing::error!(error = %cause, "order submission failed");
            Err(SubmissionFailure { cause })
        }
    }
}
