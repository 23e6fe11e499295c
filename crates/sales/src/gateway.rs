//! Port to the external order-creation service.

use std::sync::RwLock;

use async_trait::async_trait;
use thiserror::Error;

use orderdesk_core::OrderId;

use crate::order::{CreatedOrder, OrderStatus, SubmittedOrder};

/// Transport or backend failure while creating an order.
///
/// The detail is meant for logs; users only ever see a generic message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("network error: {0}")]
    Network(String),

    #[error("order service error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("could not decode order service response: {0}")]
    Decode(String),
}

/// Creates orders. Creation is atomic on the service side; callers never retry.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    async fn create_order(&self, order: &SubmittedOrder) -> Result<CreatedOrder, GatewayError>;
}

#[derive(Debug, Default)]
struct GatewayState {
    submitted: Vec<SubmittedOrder>,
    failure: Option<GatewayError>,
}

/// In-memory order service.
///
/// Intended for tests/dev. Records every order it accepts and assigns
/// sequential ids starting at 1.
#[derive(Debug, Default)]
pub struct InMemoryOrderGateway {
    state: RwLock<GatewayState>,
}

impl InMemoryOrderGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with `error` (or succeed again with `None`).
    pub fn fail_with(&self, error: Option<GatewayError>) {
        if let Ok(mut state) = self.state.write() {
            state.failure = error;
        }
    }

    pub fn submitted(&self) -> Vec<SubmittedOrder> {
        self.state
            .read()
            .map(|s| s.submitted.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl OrderGateway for InMemoryOrderGateway {
    async fn create_order(&self, order: &SubmittedOrder) -> Result<CreatedOrder, GatewayError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| GatewayError::Network("lock poisoned".to_string()))?;

        if let Some(err) = state.failure.clone() {
            return Err(err);
        }

        state.submitted.push(order.clone());
        let id = OrderId::new(state.submitted.len() as i64);
        let total = order
            .details
            .iter()
            .map(|d| d.unit_price * rust_decimal::Decimal::from(d.quantity))
            .sum();

        Ok(CreatedOrder {
            id,
            number: Some(format!("PED-{:04}", id.get())),
            status: Some(OrderStatus::Pending),
            placed_at: None,
            total: Some(total),
            extra: Default::default(),
        })
    }
}
