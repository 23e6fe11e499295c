//! `orderdesk-client`
//!
//! **Responsibility:** HTTP/JSON access to the commerce backend.
//!
//! [`ApiClient`] implements both ports the order workflow depends on:
//! [`orderdesk_catalog::CatalogSource`] and [`orderdesk_sales::OrderGateway`].

pub mod catalog;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod orders;

pub use client::{ApiClient, ApiError};
pub use config::ApiConfig;
