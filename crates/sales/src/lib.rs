//! Order composition domain module.
//!
//! This crate contains the draft order and its line-item rules, the
//! pre-submission validator and the wire shapes exchanged with the order
//! service. Everything except the [`OrderGateway`] port is synchronous and
//! free of IO.

pub mod draft;
pub mod gateway;
pub mod order;
pub mod validation;

pub use draft::{DraftOrder, LineItem, order_total};
pub use gateway::{GatewayError, InMemoryOrderGateway, OrderGateway};
pub use order::{CreatedOrder, OrderDetail, OrderStatus, SubmittedOrder};
pub use validation::validate;
