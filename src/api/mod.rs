//! HTTP client for the query answering backend.
//!
//! The backend is an opaque collaborator: search, caching and answer
//! generation all live behind a JSON API rooted at a configurable base
//! URL with routes under `/api/v1`. This module owns the wire types,
//! a blocking client for the four endpoints, and the mapping from
//! backend error payloads to user-facing messages.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Base URL used when no `--backend` flag or config entry is set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Per-request timeout. New queries can take 30-60 seconds server-side.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of search results requested per query.
pub const DEFAULT_MAX_RESULTS: u8 = 5;

const API_PREFIX: &str = "/api/v1";

#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend answered with an error status.
    #[error("{message}")]
    Backend {
        status: StatusCode,
        message: String,
    },
    /// The request never completed, or the body could not be decoded.
    #[error("network error - please check if the backend server is running")]
    Network(#[source] reqwest::Error),
    /// The HTTP client itself could not be constructed.
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),
}

/// Request body for `POST /query`.
#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest {
    pub query: String,
    pub max_results: u8,
    pub search_engine: String,
    pub use_cache: bool,
}

impl QueryRequest {
    /// A request with the backend's documented defaults.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            max_results: DEFAULT_MAX_RESULTS,
            search_engine: "bing".to_string(),
            use_cache: true,
        }
    }
}

/// One supporting source returned alongside an answer.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SearchResult {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    pub content: String,
    #[serde(default)]
    pub relevance_score: Option<f64>,
}

/// Response body for `POST /query`.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    pub query: String,
    pub answer: String,
    pub sources: Vec<SearchResult>,
    #[serde(default)]
    pub cached: bool,
    pub timestamp: String,
    #[serde(default)]
    pub processing_time: Option<f64>,
}

/// Response body for `GET /health`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub version: String,
}

/// Response body for `GET /cache/stats`.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheStats {
    pub total_cached_queries: u64,
    pub faiss_index_size: u64,
    pub cache_enabled: bool,
}

/// Response body for `POST /initialize`.
#[derive(Debug, Clone, Deserialize)]
pub struct InitializeResponse {
    pub message: String,
}

/// Blocking client for the backend API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client for the backend at `base_url`.
    ///
    /// A trailing slash on the base URL is tolerated; `timeout` applies
    /// to each request individually.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Client)?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Submit a query and return the generated answer with its sources.
    pub fn query(&self, request: &QueryRequest) -> Result<QueryResponse, ApiError> {
        let response = self
            .http
            .post(self.endpoint("/query"))
            .json(request)
            .send()
            .map_err(ApiError::Network)?;
        parse_response(response)
    }

    /// Check backend health.
    pub fn health(&self) -> Result<HealthResponse, ApiError> {
        let response = self
            .http
            .get(self.endpoint("/health"))
            .send()
            .map_err(ApiError::Network)?;
        parse_response(response)
    }

    /// Fetch answer cache statistics.
    pub fn cache_stats(&self) -> Result<CacheStats, ApiError> {
        let response = self
            .http
            .get(self.endpoint("/cache/stats"))
            .send()
            .map_err(ApiError::Network)?;
        parse_response(response)
    }

    /// Warm up the backend AI service.
    pub fn initialize(&self) -> Result<InitializeResponse, ApiError> {
        let response = self
            .http
            .post(self.endpoint("/initialize"))
            .send()
            .map_err(ApiError::Network)?;
        parse_response(response)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{API_PREFIX}{path}", self.base_url)
    }
}

fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if status.is_success() {
        return response.json::<T>().map_err(ApiError::Network);
    }
    let body = response.text().unwrap_or_default();
    Err(ApiError::Backend {
        status,
        message: error_message(status, &body),
    })
}

/// Extract a human-readable message from an error payload.
///
/// The backend wraps failures as `{"detail": ...}` where `detail` is
/// either a plain string or an object carrying an `error` field. Anything
/// else falls back to the status code.
fn error_message(status: StatusCode, body: &str) -> String {
    let payload: Option<Value> = serde_json::from_str(body).ok();
    if let Some(detail) = payload.as_ref().and_then(|v| v.get("detail")) {
        match detail {
            Value::String(message) => return message.clone(),
            Value::Object(fields) => {
                if let Some(message) = fields.get("error").and_then(Value::as_str) {
                    return message.to_string();
                }
            }
            _ => {}
        }
    }
    if let Some(message) = payload
        .as_ref()
        .and_then(|v| v.get("message"))
        .and_then(Value::as_str)
    {
        return message.to_string();
    }
    format!("server error: {}", status.as_u16())
}
