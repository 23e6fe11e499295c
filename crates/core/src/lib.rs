//! `orderdesk-core` — shared building blocks for the order desk.
//!
//! This crate contains **pure** primitives (no IO): identifiers, the
//! user-facing validation taxonomy and money helpers.

pub mod entity;
pub mod error;
pub mod id;
pub mod money;

pub use entity::{Entity, find_by_id};
pub use error::{ValidationError, ValidationResult};
pub use id::{ClientId, OrderId, ProductId, SellerId};
pub use money::{format_currency, round_price};
