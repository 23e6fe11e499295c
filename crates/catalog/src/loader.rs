//! Concurrent catalog loading with per-source fallback.
//!
//! The three lists are fetched at the same time and the loader waits for all of
//! them to settle. A list whose primary and fallback queries both fail becomes
//! empty and is recorded in the [`LoadReport`]; it never blocks the others.

use core::future::Future;

use crate::model::{CatalogSnapshot, Product};
use crate::source::{CatalogKind, CatalogSource, SourceError};

/// A catalog list that degraded to empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegradedSource {
    pub kind: CatalogKind,
    pub error: SourceError,
}

/// Outcome of a snapshot load beyond the data itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    degraded: Vec<DegradedSource>,
}

impl LoadReport {
    /// True when every source produced data (possibly via its fallback).
    pub fn is_complete(&self) -> bool {
        self.degraded.is_empty()
    }

    pub fn is_degraded(&self, kind: CatalogKind) -> bool {
        self.degraded.iter().any(|d| d.kind == kind)
    }

    pub fn degraded(&self) -> &[DegradedSource] {
        &self.degraded
    }

    fn settle<T>(&mut self, kind: CatalogKind, result: Result<Vec<T>, SourceError>) -> Vec<T> {
        match result {
            Ok(items) => items,
            Err(error) => {
                tracing::warn!(
                    source = %kind,
                    error = %error,
                    "catalog source unavailable; continuing with an empty list"
                );
                self.degraded.push(DegradedSource { kind, error });
                Vec::new()
            }
        }
    }
}

/// Load clients, sellers and products concurrently.
pub async fn load_snapshot<S>(source: &S) -> (CatalogSnapshot, LoadReport)
where
    S: CatalogSource + ?Sized,
{
    let (clients, sellers, products) = tokio::join!(
        with_fallback(
            CatalogKind::Clients,
            source.active_clients(),
            source.all_clients()
        ),
        with_fallback(
            CatalogKind::Sellers,
            source.active_sellers(),
            source.all_sellers()
        ),
        with_fallback(
            CatalogKind::Products,
            source.in_stock_products(),
            source.all_products()
        ),
    );

    let mut report = LoadReport::default();
    let clients = report.settle(CatalogKind::Clients, clients);
    let sellers = report.settle(CatalogKind::Sellers, sellers);
    let products = report.settle(CatalogKind::Products, products);

    tracing::info!(
        clients = clients.len(),
        sellers = sellers.len(),
        products = products.len(),
        degraded = report.degraded.len(),
        "catalog snapshot loaded"
    );

    (CatalogSnapshot::new(clients, sellers, products), report)
}

/// Fetch the product list alone (primary, then fallback).
///
/// Unlike [`load_snapshot`] this surfaces the failure, so a caller refreshing
/// stock can decide to keep what it already has.
pub async fn load_products<S>(source: &S) -> Result<Vec<Product>, SourceError>
where
    S: CatalogSource + ?Sized,
{
    with_fallback(
        CatalogKind::Products,
        source.in_stock_products(),
        source.all_products(),
    )
    .await
}

// The fallback future is only polled when the primary fails.
async fn with_fallback<T, P, F>(kind: CatalogKind, primary: P, fallback: F) -> Result<Vec<T>, SourceError>
where
    P: Future<Output = Result<Vec<T>, SourceError>>,
    F: Future<Output = Result<Vec<T>, SourceError>>,
{
    match primary.await {
        Ok(items) => Ok(items),
        Err(error) => {
            tracing::warn!(source = %kind, error = %error, "primary query failed; trying fallback");
            fallback.await
        }
    }
}
