//! The order composition workflow.

use std::fmt;
use std::sync::Arc;

use rust_decimal::Decimal;
use thiserror::Error;

use orderdesk_catalog::{
    CatalogSnapshot, CatalogSource, ClientDetails, LoadReport, SellerOption, load_products,
    load_snapshot,
};
use orderdesk_core::{ClientId, ProductId, SellerId, ValidationError, format_currency};
use orderdesk_sales::{CreatedOrder, DraftOrder, OrderGateway, validate};

use crate::config::StockPolicy;
use crate::notifier::Notifier;
use crate::submission::{SubmissionFailure, submit_order};

const ERROR_TITLE: &str = "Error";

/// Why an action on the workflow did not go through.
///
/// Either way the draft is left as it was.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ComposeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Submission(#[from] SubmissionFailure),
}

/// Collaborators injected into a workflow.
#[derive(Clone)]
pub struct Services {
    pub catalog: Arc<dyn CatalogSource>,
    pub orders: Arc<dyn OrderGateway>,
    pub notifier: Arc<dyn Notifier>,
}

/// One row of the summary view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSummary {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: i64,
    pub unit_price: String,
    pub subtotal: String,
}

/// Formatted lines and grand total of the current draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    pub lines: Vec<LineSummary>,
    pub total: String,
}

impl fmt::Display for OrderSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(
                f,
                "{:>4} x {:<30} {:>12} {:>14}",
                line.quantity, line.name, line.unit_price, line.subtotal
            )?;
        }
        write!(f, "Total: {}", self.total)
    }
}

fn money(amount: Option<Decimal>) -> String {
    amount.map(format_currency).unwrap_or_else(|| "n/a".to_string())
}

/// One open composition workflow: a catalog snapshot and the draft built on it.
pub struct OrderComposer {
    services: Services,
    policy: StockPolicy,
    catalog: CatalogSnapshot,
    report: LoadReport,
    draft: DraftOrder,
}

impl fmt::Debug for OrderComposer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderComposer")
            .field("policy", &self.policy)
            .field("report", &self.report)
            .field("draft", &self.draft)
            .finish_non_exhaustive()
    }
}

impl OrderComposer {
    /// Load the catalog and start with an empty draft.
    ///
    /// Never fails: sources that cannot be reached show up as empty lists and
    /// in [`OrderComposer::load_report`].
    pub async fn open(services: Services, policy: StockPolicy) -> Self {
        let (catalog, report) = load_snapshot(services.catalog.as_ref()).await;
        tracing::info!(?policy, complete = report.is_complete(), "order composer opened");

        Self {
            services,
            policy,
            catalog,
            report,
            draft: DraftOrder::new(),
        }
    }

    pub fn catalog(&self) -> &CatalogSnapshot {
        &self.catalog
    }

    pub fn load_report(&self) -> &LoadReport {
        &self.report
    }

    pub fn draft(&self) -> &DraftOrder {
        &self.draft
    }

    pub fn policy(&self) -> StockPolicy {
        self.policy
    }

    /// Select (or clear) the client and return what the form shows for it.
    pub fn select_client(&mut self, client_id: Option<ClientId>) -> ClientDetails {
        self.draft.select_client(client_id);
        client_id
            .and_then(|id| self.catalog.client(id))
            .map(ClientDetails::from)
            .unwrap_or_default()
    }

    pub fn select_seller(&mut self, seller_id: Option<SellerId>) {
        self.draft.select_seller(seller_id);
    }

    pub fn seller_options(&self) -> Vec<SellerOption<'_>> {
        self.catalog.seller_options()
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.draft.set_notes(notes);
    }

    /// Add `quantity` of the product picked in the selector.
    pub fn add_product(
        &mut self,
        product_id: Option<ProductId>,
        quantity: i64,
    ) -> Result<(), ComposeError> {
        let product = product_id.and_then(|id| self.catalog.product(id));
        if let Err(err) = self.draft.add_product(product, quantity) {
            tracing::debug!(code = err.code(), ?product_id, quantity, "product not added");
            self.services.notifier.error(ERROR_TITLE, &err.to_string());
            return Err(err.into());
        }
        Ok(())
    }

    pub fn remove_product(&mut self, product_id: ProductId) {
        self.draft.remove_product(product_id);
    }

    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) {
        self.draft.set_quantity(product_id, quantity);
    }

    pub fn total(&self) -> Option<Decimal> {
        self.draft.total()
    }

    pub fn summary(&self) -> OrderSummary {
        let lines = self
            .draft
            .line_items()
            .iter()
            .map(|line| LineSummary {
                product_id: line.product_id,
                name: line.name.clone(),
                quantity: line.quantity,
                unit_price: format_currency(line.price),
                subtotal: money(line.subtotal()),
            })
            .collect();

        OrderSummary {
            lines,
            total: money(self.total()),
        }
    }

    /// Re-fetch products and swap them into the snapshot.
    ///
    /// Returns `false` and keeps the current products if the refresh fails.
    pub async fn refresh_products(&mut self) -> bool {
        match load_products(self.services.catalog.as_ref()).await {
            Ok(products) => {
                tracing::debug!(products = products.len(), "products refreshed");
                self.catalog = std::mem::take(&mut self.catalog).with_products(products);
                true
            }
            Err(error) => {
                tracing::warn!(%error, "product refresh failed; validating against the loaded catalog");
                false
            }
        }
    }

    /// Validate the draft and hand it to the order service.
    ///
    /// On success the draft is reset. On any failure it is kept so the user can
    /// correct it or retry.
    pub async fn submit(&mut self) -> Result<CreatedOrder, ComposeError> {
        if self.policy == StockPolicy::RefreshBeforeSubmit {
            self.refresh_products().await;
        }

        let order = match validate(&self.draft, &self.catalog) {
            Ok(order) => order,
            Err(err) => {
                tracing::info!(code = err.code(), message = %err, "order rejected by validation");
                self.services.notifier.error(ERROR_TITLE, &err.to_string());
                return Err(err.into());
            }
        };

        match submit_order(self.services.orders.clone(), order).await {
            Ok(created) => {
                self.services.notifier.success(
                    "order created",
                    &format!("order {} created", created.display_number()),
                );
                self.draft.clear();
                Ok(created)
            }
            Err(failure) => {
                self.services
                    .notifier
                    .error(ERROR_TITLE, &failure.to_string());
                Err(failure.into())
            }
        }
    }

    /// Close the workflow and discard the draft.
    pub fn close(self) {
        tracing::debug!(lines = self.draft.line_items().len(), "order composer closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderdesk_catalog::{
        CatalogKind, Client, FailMode, InMemoryCatalog, Product, Seller, UNASSIGNED_LABEL,
    };
    use orderdesk_core::OrderId;
    use orderdesk_sales::{GatewayError, InMemoryOrderGateway, OrderDetail, SubmittedOrder};

    use crate::notifier::{AlertLevel, RecordingNotifier};

    fn product(id: i64, name: &str, price: &str, stock: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.into(),
            price: price.parse().unwrap(),
            stock,
        }
    }

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::new()
            .with_clients(vec![Client {
                id: ClientId::new(7),
                name: "Ana".into(),
                email: "ana@example.com".into(),
                phone: Some("5555-0101".into()),
            }])
            .with_sellers(vec![Seller {
                id: SellerId::new(2),
                name: "Luis".into(),
            }])
            .with_products(vec![
                product(3, "Cafe 1kg", "19.995", 5),
                product(4, "Te verde", "12", 10),
            ])
    }

    struct Harness {
        catalog: Arc<InMemoryCatalog>,
        orders: Arc<InMemoryOrderGateway>,
        notifier: Arc<RecordingNotifier>,
    }

    impl Harness {
        fn new(catalog: InMemoryCatalog) -> Self {
            Self {
                catalog: Arc::new(catalog),
                orders: Arc::new(InMemoryOrderGateway::new()),
                notifier: Arc::new(RecordingNotifier::new()),
            }
        }

        async fn open(&self, policy: StockPolicy) -> OrderComposer {
            let services = Services {
                catalog: self.catalog.clone(),
                orders: self.orders.clone(),
                notifier: self.notifier.clone(),
            };
            OrderComposer::open(services, policy).await
        }

        fn last_alert(&self) -> (AlertLevel, String) {
            let alert = self.notifier.last().expect("an alert was sent");
            (alert.level, alert.message)
        }
    }

    #[tokio::test]
    async fn submits_rounded_payload_and_resets_draft() {
        let h = Harness::new(catalog());
        let mut composer = h.open(StockPolicy::Snapshot).await;

        composer.select_client(Some(ClientId::new(7)));
        composer.add_product(Some(ProductId::new(3)), 2).unwrap();

        let created = composer.submit().await.unwrap();
        assert_eq!(created.id, OrderId::new(1));

        assert_eq!(
            h.orders.submitted(),
            vec![SubmittedOrder {
                client_id: ClientId::new(7),
                seller_id: None,
                notes: String::new(),
                details: vec![OrderDetail {
                    product_id: ProductId::new(3),
                    quantity: 2,
                    unit_price: "20.00".parse().unwrap(),
                }],
            }]
        );
        assert!(composer.draft().is_empty());
        assert_eq!(composer.draft().client_id(), None);
        assert_eq!(
            h.last_alert(),
            (AlertLevel::Success, "order PED-0001 created".to_string())
        );
    }

    #[tokio::test]
    async fn reports_first_failing_check_only() {
        let h = Harness::new(catalog());
        let mut composer = h.open(StockPolicy::Snapshot).await;

        let err = composer.submit().await.unwrap_err();
        assert_eq!(err, ComposeError::Validation(ValidationError::MissingClient));
        assert_eq!(
            h.last_alert(),
            (AlertLevel::Error, "must select a client".to_string())
        );
        assert_eq!(h.notifier.all().len(), 1);
        assert!(h.orders.submitted().is_empty());
    }

    #[tokio::test]
    async fn select_client_shows_details() {
        let h = Harness::new(catalog());
        let mut composer = h.open(StockPolicy::Snapshot).await;

        let details = composer.select_client(Some(ClientId::new(7)));
        assert_eq!(details.name, "Ana");
        assert_eq!(details.phone, "5555-0101");

        assert_eq!(composer.select_client(None), ClientDetails::default());
        assert_eq!(composer.draft().client_id(), None);
    }

    #[tokio::test]
    async fn add_product_errors_are_alerted_and_leave_draft_alone() {
        let h = Harness::new(catalog());
        let mut composer = h.open(StockPolicy::Snapshot).await;
        composer.add_product(Some(ProductId::new(4)), 1).unwrap();
        let before = composer.draft().clone();

        for (id, qty) in [(None, 1), (Some(ProductId::new(3)), 0), (Some(ProductId::new(99)), 1)] {
            let err = composer.add_product(id, qty).unwrap_err();
            assert_eq!(err, ComposeError::Validation(ValidationError::InvalidSelection));
        }

        assert_eq!(composer.draft(), &before);
        assert_eq!(
            h.last_alert(),
            (
                AlertLevel::Error,
                "select a product and enter a valid quantity".to_string()
            )
        );
    }

    #[tokio::test]
    async fn opens_with_sellers_unavailable() {
        let h = Harness::new(catalog().failing(CatalogKind::Sellers, FailMode::Both));
        let mut composer = h.open(StockPolicy::Snapshot).await;

        assert!(composer.catalog().sellers().is_empty());
        assert!(composer.load_report().is_degraded(CatalogKind::Sellers));
        let options = composer.seller_options();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].id, None);
        assert_eq!(options[0].label, UNASSIGNED_LABEL);

        composer.select_client(Some(ClientId::new(7)));
        composer.add_product(Some(ProductId::new(4)), 1).unwrap();
        assert!(composer.submit().await.is_ok());
    }

    #[tokio::test]
    async fn stale_line_is_rejected_on_stock() {
        let h = Harness::new(
            InMemoryCatalog::new()
                .with_clients(catalog_clients())
                .with_products(vec![product(3, "Cafe 1kg", "19.995", 1)]),
        );
        let mut composer = h.open(StockPolicy::Snapshot).await;
        composer.select_client(Some(ClientId::new(7)));
        // Adding does not clamp, so the line can exceed catalog stock.
        composer.add_product(Some(ProductId::new(3)), 2).unwrap();

        let err = composer.submit().await.unwrap_err();
        assert_eq!(
            err,
            ComposeError::Validation(ValidationError::InsufficientStock)
        );
        assert_eq!(
            h.last_alert().1,
            "insufficient stock for some products".to_string()
        );
        assert_eq!(composer.draft().line_items()[0].quantity, 2);
    }

    fn catalog_clients() -> Vec<Client> {
        vec![Client {
            id: ClientId::new(7),
            name: "Ana".into(),
            email: String::new(),
            phone: None,
        }]
    }

    #[tokio::test]
    async fn snapshot_policy_ignores_later_stock_changes() {
        let h = Harness::new(catalog());
        let mut composer = h.open(StockPolicy::Snapshot).await;
        composer.select_client(Some(ClientId::new(7)));
        composer.add_product(Some(ProductId::new(3)), 4).unwrap();

        h.catalog.set_stock(ProductId::new(3), 1);

        assert!(composer.submit().await.is_ok());
        assert_eq!(h.catalog.primary_calls(CatalogKind::Products), 1);
    }

    #[tokio::test]
    async fn refresh_policy_sees_current_stock() {
        let h = Harness::new(catalog());
        let mut composer = h.open(StockPolicy::RefreshBeforeSubmit).await;
        composer.select_client(Some(ClientId::new(7)));
        composer.add_product(Some(ProductId::new(3)), 4).unwrap();

        h.catalog.set_stock(ProductId::new(3), 1);

        let err = composer.submit().await.unwrap_err();
        assert_eq!(
            err,
            ComposeError::Validation(ValidationError::InsufficientStock)
        );
        assert_eq!(composer.catalog().product(ProductId::new(3)).unwrap().stock, 1);
        assert!(h.orders.submitted().is_empty());
    }

    #[tokio::test]
    async fn failed_refresh_keeps_loaded_products() {
        let h = Harness::new(catalog());
        let mut composer = h.open(StockPolicy::Snapshot).await;
        let before = composer.catalog().products().to_vec();

        let failing: Arc<dyn CatalogSource> =
            Arc::new(catalog().failing(CatalogKind::Products, FailMode::Both));
        composer.services.catalog = failing;

        assert!(!composer.refresh_products().await);
        assert_eq!(composer.catalog().products(), before.as_slice());
    }

    #[tokio::test]
    async fn submission_failure_keeps_draft_for_retry() {
        let h = Harness::new(catalog());
        let mut composer = h.open(StockPolicy::Snapshot).await;
        composer.select_client(Some(ClientId::new(7)));
        composer.select_seller(Some(SellerId::new(2)));
        composer.set_notes("entregar por la tarde");
        composer.add_product(Some(ProductId::new(4)), 3).unwrap();
        let before = composer.draft().clone();

        h.orders.fail_with(Some(GatewayError::Api {
            status: 500,
            message: "NullPointerException at PedidoService".into(),
        }));
        let err = composer.submit().await.unwrap_err();

        assert!(matches!(err, ComposeError::Submission(_)));
        assert_eq!(err.to_string(), "could not create order");
        assert_eq!(
            h.last_alert(),
            (AlertLevel::Error, "could not create order".to_string())
        );
        assert_eq!(composer.draft(), &before);

        h.orders.fail_with(None);
        let created = composer.submit().await.unwrap();
        assert_eq!(created.id, OrderId::new(1));
        assert_eq!(h.orders.submitted()[0].seller_id, Some(SellerId::new(2)));
        assert_eq!(h.orders.submitted()[0].notes, "entregar por la tarde");
    }

    #[tokio::test]
    async fn summary_formats_lines_and_total() {
        let h = Harness::new(catalog());
        let mut composer = h.open(StockPolicy::Snapshot).await;
        composer.add_product(Some(ProductId::new(4)), 2).unwrap();
        composer.add_product(Some(ProductId::new(3)), 1).unwrap();

        let summary = composer.summary();
        assert_eq!(summary.lines.len(), 2);
        assert_eq!(summary.lines[0].unit_price, "Q12.00");
        assert_eq!(summary.lines[0].subtotal, "Q24.00");
        assert_eq!(summary.lines[1].subtotal, "Q20.00");
        assert_eq!(summary.total, "Q44.00");
        assert!(summary.to_string().ends_with("Total: Q44.00"));
    }

    #[tokio::test]
    async fn quantity_edits_go_through_the_draft() {
        let h = Harness::new(catalog());
        let mut composer = h.open(StockPolicy::Snapshot).await;
        composer.add_product(Some(ProductId::new(3)), 1).unwrap();

        composer.set_quantity(ProductId::new(3), 50);
        assert_eq!(composer.draft().line_items()[0].quantity, 5);

        composer.remove_product(ProductId::new(3));
        composer.remove_product(ProductId::new(3));
        assert!(composer.draft().is_empty());
        assert_eq!(composer.total(), Some(Decimal::ZERO));

        composer.close();
    }
}
