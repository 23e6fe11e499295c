use std::sync::Arc;

use anyhow::Context;

use orderdesk_client::ApiClient;
use orderdesk_composer::{DeskConfig, DraftRequest, OrderComposer, Services, TracingNotifier};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = DeskConfig::from_env()?;
    orderdesk_observability::init_with(config.log_format);

    if config.api_url_defaulted() {
        tracing::warn!(
            api_url = config.api.base_url(),
            "ORDERDESK_API_URL not set; using default backend"
        );
    }

    let path = std::env::args()
        .nth(1)
        .context("usage: orderdesk <draft.json>")?;
    let raw = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let request: DraftRequest =
        serde_json::from_str(&raw).with_context(|| format!("parsing {path}"))?;

    let client = Arc::new(ApiClient::new(config.api.clone()));
    let services = Services {
        catalog: client.clone(),
        orders: client,
        notifier: Arc::new(TracingNotifier),
    };

    let mut composer = OrderComposer::open(services, config.stock_policy).await;
    request.apply(&mut composer)?;
    println!("{}", composer.summary());

    let created = composer.submit().await?;
    match created.status {
        Some(status) => println!("order {} created ({})", created.display_number(), status.label()),
        None => println!("order {} created", created.display_number()),
    }

    composer.close();
    Ok(())
}
