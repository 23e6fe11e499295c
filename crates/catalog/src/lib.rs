//! Catalog data needed to compose an order.
//!
//! This crate owns the read-only view of clients, sellers and sellable
//! products, the [`CatalogSource`] port used to fetch them, and the loader that
//! turns three independent fetches into one [`CatalogSnapshot`].

pub mod loader;
pub mod memory;
pub mod model;
pub mod source;

pub use loader::{DegradedSource, LoadReport, load_products, load_snapshot};
pub use memory::{FailMode, InMemoryCatalog};
pub use model::{
    CatalogSnapshot, Client, ClientDetails, Product, Seller, SellerOption, UNASSIGNED_LABEL,
};
pub use source::{CatalogKind, CatalogSource, SourceError};
