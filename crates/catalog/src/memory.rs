//! In-memory catalog source for tests/dev.

use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

use async_trait::async_trait;

use orderdesk_core::ProductId;

use crate::model::{Client, Product, Seller};
use crate::source::{CatalogKind, CatalogSource, SourceError};

/// Which queries of a list should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailMode {
    Primary,
    Both,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Query {
    Primary,
    Fallback,
}

/// In-memory catalog source.
///
/// Intended for tests/dev. Failures can be injected per list, and every call is
/// counted so callers can assert how often each query ran.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    clients: Vec<Client>,
    sellers: Vec<Seller>,
    products: RwLock<Vec<Product>>,
    failures: HashMap<CatalogKind, FailMode>,
    calls: Mutex<HashMap<(CatalogKind, Query), usize>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clients(mut self, clients: Vec<Client>) -> Self {
        self.clients = clients;
        self
    }

    pub fn with_sellers(mut self, sellers: Vec<Seller>) -> Self {
        self.sellers = sellers;
        self
    }

    pub fn with_products(self, products: Vec<Product>) -> Self {
        Self {
            products: RwLock::new(products),
            ..self
        }
    }

    pub fn failing(mut self, kind: CatalogKind, mode: FailMode) -> Self {
        self.failures.insert(kind, mode);
        self
    }

    /// Change the stock of a product, as another user's order would.
    pub fn set_stock(&self, product_id: ProductId, stock: i64) {
        if let Ok(mut products) = self.products.write() {
            if let Some(p) = products.iter_mut().find(|p| p.id == product_id) {
                p.stock = stock;
            }
        }
    }

    pub fn primary_calls(&self, kind: CatalogKind) -> usize {
        self.count(kind, Query::Primary)
    }

    pub fn fallback_calls(&self, kind: CatalogKind) -> usize {
        self.count(kind, Query::Fallback)
    }

    fn count(&self, kind: CatalogKind, query: Query) -> usize {
        self.calls
            .lock()
            .map(|calls| calls.get(&(kind, query)).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    fn serve<T: Clone>(&self, kind: CatalogKind, query: Query, items: &[T]) -> Result<Vec<T>, SourceError> {
        if let Ok(mut calls) = self.calls.lock() {
            *calls.entry((kind, query)).or_default() += 1;
        }

        let fails = match (self.failures.get(&kind), query) {
            (Some(FailMode::Both), _) => true,
            (Some(FailMode::Primary), Query::Primary) => true,
            _ => false,
        };
        if fails {
            return Err(SourceError::new(kind, "injected failure"));
        }
        Ok(items.to_vec())
    }

    fn products_now(&self) -> Result<Vec<Product>, SourceError> {
        self.products
            .read()
            .map(|p| p.clone())
            .map_err(|_| SourceError::new(CatalogKind::Products, "lock poisoned"))
    }
}

#[async_trait]
impl CatalogSource for InMemoryCatalog {
    async fn active_clients(&self) -> Result<Vec<Client>, SourceError> {
        self.serve(CatalogKind::Clients, Query::Primary, &self.clients)
    }

    async fn all_clients(&self) -> Result<Vec<Client>, SourceError> {
        self.serve(CatalogKind::Clients, Query::Fallback, &self.clients)
    }

    async fn active_sellers(&self) -> Result<Vec<Seller>, SourceError> {
        self.serve(CatalogKind::Sellers, Query::Primary, &self.sellers)
    }

    async fn all_sellers(&self) -> Result<Vec<Seller>, SourceError> {
        self.serve(CatalogKind::Sellers, Query::Fallback, &self.sellers)
    }

    async fn in_stock_products(&self) -> Result<Vec<Product>, SourceError> {
        let products: Vec<Product> = self
            .products_now()?
            .into_iter()
            .filter(|p| p.stock > 0)
            .collect();
        self.serve(CatalogKind::Products, Query::Primary, &products)
    }

    async fn all_products(&self) -> Result<Vec<Product>, SourceError> {
        let products = self.products_now()?;
        self.serve(CatalogKind::Products, Query::Fallback, &products)
    }
}
