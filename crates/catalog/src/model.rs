//! Catalog entities and the snapshot a workflow validates against.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use orderdesk_core::{ClientId, Entity, ProductId, SellerId, find_by_id};

/// A client (buyer) as listed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(rename = "telefono", default, deserialize_with = "null_as_default")]
    pub phone: Option<String>,
}

impl Entity for Client {
    type Id = ClientId;

    fn id(&self) -> ClientId {
        self.id
    }
}

// `null` decodes like a missing field, so one sparse row cannot fail a list.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Read-only fields shown once a client is selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl From<&Client> for ClientDetails {
    fn from(client: &Client) -> Self {
        Self {
            name: client.name.clone(),
            email: client.email.clone(),
            phone: client.phone.clone().unwrap_or_default(),
        }
    }
}

/// A seller that can optionally be assigned to an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seller {
    pub id: SellerId,
    #[serde(rename = "nombre")]
    pub name: String,
}

impl Entity for Seller {
    type Id = SellerId;

    fn id(&self) -> SellerId {
        self.id
    }
}

/// Catalog view of a product.
///
/// `stock` is advisory: it is captured when a product is added to a draft and
/// checked again right before submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "precio", with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stock: i64,
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> ProductId {
        self.id
    }
}

/// One entry of the seller selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SellerOption<'a> {
    /// `None` is the "unassigned" entry.
    pub id: Option<SellerId>,
    pub label: &'a str,
}

pub const UNASSIGNED_LABEL: &str = "unassigned";

/// Everything the order form needs, loaded once when the form opens.
///
/// Each list is loaded independently; a failed source is an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSnapshot {
    clients: Vec<Client>,
    sellers: Vec<Seller>,
    products: Vec<Product>,
}

impl CatalogSnapshot {
    pub fn new(clients: Vec<Client>, sellers: Vec<Seller>, products: Vec<Product>) -> Self {
        Self {
            clients,
            sellers,
            products,
        }
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn sellers(&self) -> &[Seller] {
        &self.sellers
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn client(&self, id: ClientId) -> Option<&Client> {
        find_by_id(&self.clients, id)
    }

    pub fn seller(&self, id: SellerId) -> Option<&Seller> {
        find_by_id(&self.sellers, id)
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        find_by_id(&self.products, id)
    }

    /// Seller selector entries: "unassigned" first, then every loaded seller.
    pub fn seller_options(&self) -> Vec<SellerOption<'_>> {
        core::iter::once(SellerOption {
            id: None,
            label: UNASSIGNED_LABEL,
        })
        .chain(self.sellers.iter().map(|s| SellerOption {
            id: Some(s.id),
            label: s.name.as_str(),
        }))
        .collect()
    }

    /// Replace the product list, keeping clients and sellers.
    pub fn with_products(self, products: Vec<Product>) -> Self {
        Self { products, ..self }
    }
}
