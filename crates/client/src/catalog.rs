//! [`CatalogSource`] over the backend's list endpoints.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use orderdesk_catalog::{CatalogKind, CatalogSource, Client, Product, Seller, SourceError};

use crate::client::ApiClient;
use crate::endpoints;

impl ApiClient {
    async fn fetch<T: DeserializeOwned>(&self, kind: CatalogKind, path: &str) -> Result<Vec<T>, SourceError> {
        self.get_list(path)
            .await
            .map_err(|e| SourceError::new(kind, e.to_string()))
    }
}

#[async_trait]
impl CatalogSource for ApiClient {
    async fn active_clients(&self) -> Result<Vec<Client>, SourceError> {
        self.fetch(CatalogKind::Clients, endpoints::ACTIVE_CLIENTS).await
    }

    async fn all_clients(&self) -> Result<Vec<Client>, SourceError> {
        self.fetch(CatalogKind::Clients, endpoints::CLIENTS).await
    }

    async fn active_sellers(&self) -> Result<Vec<Seller>, SourceError> {
        self.fetch(CatalogKind::Sellers, endpoints::ACTIVE_SELLERS).await
    }

    async fn all_sellers(&self) -> Result<Vec<Seller>, SourceError> {
        self.fetch(CatalogKind::Sellers, endpoints::SELLERS).await
    }

    async fn in_stock_products(&self) -> Result<Vec<Product>, SourceError> {
        self.fetch(CatalogKind::Products, endpoints::IN_STOCK_PRODUCTS).await
    }

    async fn all_products(&self) -> Result<Vec<Product>, SourceError> {
        self.fetch(CatalogKind::Products, endpoints::PRODUCTS).await
    }
}
