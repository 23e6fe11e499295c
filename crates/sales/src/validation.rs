//! Pre-submission checks for a draft order.
//!
//! Checks run in a fixed order and the first failure is the only one reported;
//! the draft is never modified.

use rust_decimal::Decimal;

use orderdesk_catalog::CatalogSnapshot;
use orderdesk_core::{ValidationError, ValidationResult};

use crate::draft::DraftOrder;
use crate::order::SubmittedOrder;

/// Validate `draft` against the loaded catalog and shape it for submission.
pub fn validate(draft: &DraftOrder, catalog: &CatalogSnapshot) -> ValidationResult<SubmittedOrder> {
    let client_id = draft.client_id().ok_or(ValidationError::MissingClient)?;

    let items = draft.line_items();
    if items.is_empty() {
        return Err(ValidationError::NoLineItems);
    }

    if items
        .iter()
        .any(|l| !l.product_id.is_valid() || l.quantity <= 0 || l.price.is_zero())
    {
        return Err(ValidationError::InvalidLineItem);
    }

    // The selection may be stale relative to the loaded lists.
    if catalog.client(client_id).is_none() {
        return Err(ValidationError::UnknownClient);
    }

    if let Some(seller_id) = draft.seller_id() {
        if catalog.seller(seller_id).is_none() {
            return Err(ValidationError::UnknownSeller);
        }
    }

    if items.iter().any(|l| catalog.product(l.product_id).is_none()) {
        return Err(ValidationError::UnavailableProducts);
    }

    // Checked against the catalog's stock, not the stock captured at add time.
    let short = items.iter().any(|l| {
        catalog
            .product(l.product_id)
            .is_some_and(|p| p.stock < l.quantity)
    });
    if short {
        return Err(ValidationError::InsufficientStock);
    }

    match draft.total() {
        Some(total) if total > Decimal::ZERO => {}
        _ => return Err(ValidationError::InvalidTotal),
    }

    Ok(SubmittedOrder::from_draft(draft, client_id))
}
