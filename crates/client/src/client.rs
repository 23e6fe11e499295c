//! Thin JSON-over-HTTP client.

use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ApiConfig;

/// Failure talking to the backend.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("decode error: {0}")]
    Decode(String),
}

/// Client for the commerce backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
}

/// List endpoints answer either with a bare array or `{ "data": [...] }`.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum ListResponse<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.config.url(path);
        tracing::debug!(%method, %url, "backend request");

        let mut req = self.http.request(method, url);
        if let Some(token) = self.config.token() {
            req = req.bearer_auth(token);
        }
        req
    }

    /// GET a list; an empty body is an empty list.
    pub async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let resp = self
            .request(Method::GET, path)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let body = Self::success_body(path, resp).await?;
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }

        match serde_json::from_str::<ListResponse<T>>(&body) {
            Ok(ListResponse::Bare(items)) | Ok(ListResponse::Wrapped { data: items }) => Ok(items),
            Err(e) => Err(ApiError::Decode(e.to_string())),
        }
    }

    /// POST a JSON body and decode the JSON answer.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self
            .request(Method::POST, path)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let body = Self::success_body(path, resp).await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn success_body(path: &str, resp: Response) -> Result<String, ApiError> {
        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if status.is_success() {
            return Ok(text);
        }

        let message = error_message(status.as_u16(), &text);
        tracing::warn!(path, status = status.as_u16(), %message, "backend rejected request");
        Err(ApiError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// Best human-readable message from an error response body.
///
/// JSON bodies are searched for `message`, `error`, `detail`, then an `errors`
/// array; otherwise the raw text is used.
pub fn error_message(status: u16, body: &str) -> String {
    let fallback = || format!("HTTP error! status: {status}");
    let body = body.trim();
    if body.is_empty() {
        return fallback();
    }

    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return body.to_string();
    };

    match &value {
        Value::Object(map) => {
            for key in ["message", "error", "detail"] {
                if let Some(Value::String(s)) = map.get(key) {
                    if !s.is_empty() {
                        return s.clone();
                    }
                }
            }
            if let Some(Value::Array(errors)) = map.get("errors") {
                return errors
                    .iter()
                    .map(|e| match e {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
            }
            fallback()
        }
        Value::String(s) => s.clone(),
        _ => body.to_string(),
    }
}
