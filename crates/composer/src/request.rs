//! Draft orders described as JSON, for the command-line front end.

use serde::Deserialize;

use orderdesk_core::{ClientId, ProductId, SellerId};

use crate::composer::{ComposeError, OrderComposer};

/// `{ "clientId": 7, "sellerId": 2, "notes": "...", "items": [{ "productId": 3, "quantity": 2 }] }`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftRequest {
    pub client_id: ClientId,
    #[serde(default)]
    pub seller_id: Option<SellerId>,
    #[serde(default)]
    pub notes: String,
    pub items: Vec<RequestedItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestedItem {
    pub product_id: ProductId,
    pub quantity: i64,
}

impl DraftRequest {
    /// Replay the request on `composer` as a user would fill the form.
    ///
    /// Stops at the first item that cannot be added.
    pub fn apply(&self, composer: &mut OrderComposer) -> Result<(), ComposeError> {
        composer.select_client(Some(self.client_id));
        composer.select_seller(self.seller_id);
        composer.set_notes(self.notes.clone());
        for item in &self.items {
            composer.add_product(Some(item.product_id), item.quantity)?;
        }
        Ok(())
    }
}
