//! Port for fetching catalog lists from the backend.

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{Client, Product, Seller};

/// Which catalog list a fetch belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    Clients,
    Sellers,
    Products,
}

impl CatalogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogKind::Clients => "clients",
            CatalogKind::Sellers => "sellers",
            CatalogKind::Products => "products",
        }
    }
}

impl core::fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a single catalog fetch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{kind} fetch failed: {message}")]
pub struct SourceError {
    pub kind: CatalogKind,
    pub message: String,
}

impl SourceError {
    pub fn new(kind: CatalogKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Backend queries used to populate the order form.
///
/// Every list has a narrow primary query and a broad fallback query; the
/// loader only calls the fallback when the primary fails.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Clients filtered to active ones.
    async fn active_clients(&self) -> Result<Vec<Client>, SourceError>;

    /// Every client, used when the filtered query is unavailable.
    async fn all_clients(&self) -> Result<Vec<Client>, SourceError>;

    async fn active_sellers(&self) -> Result<Vec<Seller>, SourceError>;

    async fn all_sellers(&self) -> Result<Vec<Seller>, SourceError>;

    /// Products that currently have stock.
    async fn in_stock_products(&self) -> Result<Vec<Product>, SourceError>;

    async fn all_products(&self) -> Result<Vec<Product>, SourceError>;
}
