//! Process configuration read from the environment.

use core::str::FromStr;

use thiserror::Error;

use orderdesk_client::ApiConfig;
use orderdesk_observability::LogFormat;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// How stock is checked at submission time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StockPolicy {
    /// Validate against the catalog loaded when the workflow opened.
    #[default]
    Snapshot,
    /// Re-fetch products right before validating. A failed refresh keeps the
    /// previous snapshot.
    RefreshBeforeSubmit,
}

impl FromStr for StockPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "snapshot" => Ok(StockPolicy::Snapshot),
            "refresh" | "refresh-before-submit" => Ok(StockPolicy::RefreshBeforeSubmit),
            other => Err(format!("unknown stock policy: {other}")),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeskConfig {
    pub api: ApiConfig,
    pub stock_policy: StockPolicy,
    pub log_format: LogFormat,
    api_url_defaulted: bool,
}

impl DeskConfig {
    /// Read `ORDERDESK_API_URL`, `ORDERDESK_API_TOKEN`,
    /// `ORDERDESK_STOCK_POLICY` and `ORDERDESK_LOG_FORMAT`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let (url, api_url_defaulted) = match get("ORDERDESK_API_URL") {
            Some(url) => (url, false),
            None => (DEFAULT_API_URL.to_string(), true),
        };
        let mut api = ApiConfig::new(url);
        if let Some(token) = get("ORDERDESK_API_TOKEN") {
            api = api.with_token(token);
        }

        let stock_policy = match get("ORDERDESK_STOCK_POLICY") {
            Some(raw) => raw.parse().map_err(|reason| ConfigError::Invalid {
                key: "ORDERDESK_STOCK_POLICY",
                reason,
            })?,
            None => StockPolicy::default(),
        };

        let log_format = match get("ORDERDESK_LOG_FORMAT") {
            Some(raw) => raw.parse().map_err(|reason| ConfigError::Invalid {
                key: "ORDERDESK_LOG_FORMAT",
                reason,
            })?,
            None => LogFormat::default(),
        };

        Ok(Self {
            api,
            stock_policy,
            log_format,
            api_url_defaulted,
        })
    }

    /// True when no backend URL was configured.
    pub fn api_url_defaulted(&self) -> bool {
        self.api_url_defaulted
    }
}
