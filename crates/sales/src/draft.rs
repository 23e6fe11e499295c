//! The mutable order form: selections, notes and accumulated line items.

use rust_decimal::Decimal;

use orderdesk_catalog::Product;
use orderdesk_core::{ClientId, ProductId, SellerId, ValidationError, ValidationResult};

/// A product in the draft with the quantity requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub product_id: ProductId,
    pub name: String,
    /// Unit price as listed when the product was added (unrounded).
    pub price: Decimal,
    pub quantity: i64,
    /// Stock reported by the catalog when the product was first added.
    pub stock_at_selection: i64,
}

impl LineItem {
    fn from_product(product: &Product, quantity: i64) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
            quantity,
            stock_at_selection: product.stock,
        }
    }

    /// `price * quantity`, unrounded. `None` on decimal overflow.
    pub fn subtotal(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }
}

/// Sum of line subtotals, recomputed on every call. `None` on decimal overflow.
pub fn order_total(items: &[LineItem]) -> Option<Decimal> {
    items
        .iter()
        .try_fold(Decimal::ZERO, |acc, item| acc.checked_add(item.subtotal()?))
}

/// Form state of an order being composed.
///
/// Lives only as long as the composition workflow that owns it; it is never
/// persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftOrder {
    client_id: Option<ClientId>,
    seller_id: Option<SellerId>,
    notes: String,
    line_items: Vec<LineItem>,
}

impl DraftOrder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn client_id(&self) -> Option<ClientId> {
        self.client_id
    }

    pub fn seller_id(&self) -> Option<SellerId> {
        self.seller_id
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    pub fn line_item(&self, product_id: ProductId) -> Option<&LineItem> {
        self.line_items.iter().find(|l| l.product_id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }

    pub fn select_client(&mut self, client_id: Option<ClientId>) {
        self.client_id = client_id;
    }

    /// `None` leaves the order unassigned.
    pub fn select_seller(&mut self, seller_id: Option<SellerId>) {
        self.seller_id = seller_id;
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    /// Add `quantity` units of `product`.
    ///
    /// Adding a product already in the draft increases that line's quantity;
    /// stock is not enforced here, only on explicit quantity edits and at
    /// submission.
    pub fn add_product(&mut self, product: Option<&Product>, quantity: i64) -> ValidationResult<()> {
        let product = match product {
            Some(p) if quantity > 0 => p,
            _ => return Err(ValidationError::InvalidSelection),
        };

        match self.line_items.iter_mut().find(|l| l.product_id == product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self
                .line_items
                .push(LineItem::from_product(product, quantity)),
        }
        Ok(())
    }

    /// Remove the line for `product_id`; no-op if absent.
    pub fn remove_product(&mut self, product_id: ProductId) {
        self.line_items.retain(|l| l.product_id != product_id);
    }

    /// Set a line's quantity, capped at the stock seen when it was added.
    ///
    /// A quantity that ends up at or below zero removes the line, so a line
    /// always satisfies `1 <= quantity <= stock_at_selection` after this call.
    pub fn set_quantity(&mut self, product_id: ProductId, new_quantity: i64) {
        let Some(index) = self
            .line_items
            .iter()
            .position(|l| l.product_id == product_id)
        else {
            return;
        };

        let capped = new_quantity.min(self.line_items[index].stock_at_selection);
        if capped <= 0 {
            self.line_items.remove(index);
        } else {
            self.line_items[index].quantity = capped;
        }
    }

    /// Current grand total. `None` on decimal overflow.
    pub fn total(&self) -> Option<Decimal> {
        order_total(&self.line_items)
    }

    /// Drop every selection and line item.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, price: &str, stock: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("product-{id}"),
            price: price.parse().unwrap(),
            stock,
        }
    }

    #[test]
    fn add_product_appends_line_with_stock_snapshot() {
        let mut draft = DraftOrder::new();
        draft.add_product(Some(&product(3, "19.995", 4)), 2).unwrap();

        let line = draft.line_item(ProductId::new(3)).unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(line.stock_at_selection, 4);
        assert_eq!(line.name, "product-3");
    }

    #[test]
    fn add_product_requires_selection_and_positive_quantity() {
        let mut draft = DraftOrder::new();
        assert_eq!(
            draft.add_product(None, 1),
            Err(ValidationError::InvalidSelection)
        );
        assert_eq!(
            draft.add_product(Some(&product(1, "1", 5)), 0),
            Err(ValidationError::InvalidSelection)
        );
        assert_eq!(
            draft.add_product(Some(&product(1, "1", 5)), -2),
            Err(ValidationError::InvalidSelection)
        );
        assert!(draft.is_empty());
    }

    #[test]
    fn adding_same_product_merges_without_clamping() {
        let mut draft = DraftOrder::new();
        let p = product(5, "2.50", 3);
        draft.add_product(Some(&p), 2).unwrap();
        draft.add_product(Some(&p), 2).unwrap();

        assert_eq!(draft.line_items().len(), 1);
        // Add-time merges may exceed the captured stock.
        assert_eq!(draft.line_item(p.id).unwrap().quantity, 4);
    }

    #[test]
    fn remove_product_is_idempotent() {
        let mut draft = DraftOrder::new();
        draft.add_product(Some(&product(1, "1", 5)), 1).unwrap();
        draft.add_product(Some(&product(2, "1", 5)), 1).unwrap();

        draft.remove_product(ProductId::new(1));
        let once = draft.clone();
        draft.remove_product(ProductId::new(1));

        assert_eq!(draft, once);
        assert_eq!(draft.line_items().len(), 1);
    }

    #[test]
    fn set_quantity_caps_at_stock_at_selection() {
        let mut draft = DraftOrder::new();
        draft.add_product(Some(&product(1, "1", 5)), 1).unwrap();

        draft.set_quantity(ProductId::new(1), 9);
        assert_eq!(draft.line_item(ProductId::new(1)).unwrap().quantity, 5);

        draft.set_quantity(ProductId::new(1), 3);
        assert_eq!(draft.line_item(ProductId::new(1)).unwrap().quantity, 3);
    }

    #[test]
    fn set_quantity_to_zero_removes_line() {
        let mut draft = DraftOrder::new();
        draft.add_product(Some(&product(1, "1", 5)), 2).unwrap();
        draft.set_quantity(ProductId::new(1), 0);
        assert!(draft.is_empty());
    }

    #[test]
    fn set_quantity_removes_line_when_no_stock_was_seen() {
        let mut draft = DraftOrder::new();
        draft.add_product(Some(&product(1, "1", 0)), 2).unwrap();
        draft.set_quantity(ProductId::new(1), 1);
        assert!(draft.is_empty());
    }

    #[test]
    fn set_quantity_on_unknown_product_is_noop() {
        let mut draft = DraftOrder::new();
        draft.add_product(Some(&product(1, "1", 5)), 2).unwrap();
        let before = draft.clone();
        draft.set_quantity(ProductId::new(99), 4);
        assert_eq!(draft, before);
    }

    #[test]
    fn total_tracks_every_mutation() {
        let mut draft = DraftOrder::new();
        assert_eq!(draft.total(), Some(Decimal::ZERO));

        draft.add_product(Some(&product(1, "10.25", 10)), 2).unwrap();
        draft.add_product(Some(&product(2, "0.333", 10)), 3).unwrap();
        assert_eq!(draft.total(), Some("21.499".parse().unwrap()));

        draft.set_quantity(ProductId::new(1), 1);
        assert_eq!(draft.total(), Some("11.249".parse().unwrap()));

        draft.remove_product(ProductId::new(2));
        assert_eq!(draft.total(), Some("10.25".parse().unwrap()));
    }

    #[test]
    fn total_reports_overflow_as_none() {
        let mut draft = DraftOrder::new();
        let huge = Product {
            id: ProductId::new(1),
            name: "huge".into(),
            price: Decimal::MAX,
            stock: 10,
        };
        draft.add_product(Some(&huge), 2).unwrap();
        assert_eq!(draft.total(), None);
    }

    #[test]
    fn clear_resets_everything() {
        let mut draft = DraftOrder::new();
        draft.select_client(Some(ClientId::new(1)));
        draft.select_seller(Some(SellerId::new(2)));
        draft.set_notes("deliver friday");
        draft.add_product(Some(&product(1, "1", 5)), 2).unwrap();

        draft.clear();
        assert_eq!(draft, DraftOrder::new());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Add { id: i64, qty: i64 },
            Set { id: i64, qty: i64 },
            Remove { id: i64 },
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                (1i64..6, 1i64..20).prop_map(|(id, qty)| Op::Add { id, qty }),
                (1i64..6, -5i64..30).prop_map(|(id, qty)| Op::Set { id, qty }),
                (1i64..6).prop_map(|id| Op::Remove { id }),
            ]
        }

        fn catalog() -> Vec<Product> {
            (1..6)
                .map(|id| Product {
                    id: ProductId::new(id),
                    name: format!("p{id}"),
                    price: Decimal::new(id * 125, 2),
                    stock: id * 2,
                })
                .collect()
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: after any set_quantity, the line is within [1, stock_at_selection] or gone.
            #[test]
            fn clamp_law_holds(ops in prop::collection::vec(op(), 1..40), id in 1i64..6, qty in -10i64..50) {
                let products = catalog();
                let mut draft = DraftOrder::new();
                for op in ops {
                    match op {
                        Op::Add { id, qty } => {
                            let p = products.iter().find(|p| p.id.get() == id);
                            draft.add_product(p, qty).unwrap();
                        }
                        Op::Set { id, qty } => draft.set_quantity(ProductId::new(id), qty),
                        Op::Remove { id } => draft.remove_product(ProductId::new(id)),
                    }
                }

                let before = draft.line_item(ProductId::new(id)).cloned();
                draft.set_quantity(ProductId::new(id), qty);
                let after = draft.line_item(ProductId::new(id));

                match (before, after) {
                    (None, after) => prop_assert!(after.is_none()),
                    (Some(before), Some(line)) => {
                        prop_assert!(line.quantity >= 1);
                        prop_assert!(line.quantity <= line.stock_at_selection);
                        prop_assert_eq!(line.quantity, qty.min(before.stock_at_selection));
                    }
                    (Some(before), None) => {
                        prop_assert!(qty.min(before.stock_at_selection) <= 0);
                    }
                }
            }

            /// Property: adding a product twice yields one line with the summed quantity.
            #[test]
            fn merge_on_add(q1 in 1i64..1000, q2 in 1i64..1000) {
                let products = catalog();
                let mut draft = DraftOrder::new();
                draft.add_product(Some(&products[0]), q1).unwrap();
                draft.add_product(Some(&products[0]), q2).unwrap();

                prop_assert_eq!(draft.line_items().len(), 1);
                prop_assert_eq!(draft.line_items()[0].quantity, q1 + q2);
            }

            /// Property: total equals the sum of price * quantity after any mutation sequence.
            #[test]
            fn total_is_sum_of_lines(ops in prop::collection::vec(op(), 0..40)) {
                let products = catalog();
                let mut draft = DraftOrder::new();
                for op in ops {
                    match op {
                        Op::Add { id, qty } => {
                            let p = products.iter().find(|p| p.id.get() == id);
                            draft.add_product(p, qty).unwrap();
                        }
                        Op::Set { id, qty } => draft.set_quantity(ProductId::new(id), qty),
                        Op::Remove { id } => draft.remove_product(ProductId::new(id)),
                    }

                    let expected: Decimal = draft
                        .line_items()
                        .iter()
                        .map(|l| l.price * Decimal::from(l.quantity))
                        .sum();
                    prop_assert_eq!(draft.total(), Some(expected));
                }
            }
        }
    }
}
