//! The TrackSim API client.
//!
//! # Design
//! `TrackSim` holds the API key, the base URL, and a shared `Transport`,
//! and carries no other state between calls. Every operation applies the
//! same default headers, issues exactly one request through the transport,
//! and decodes the response body. Driver operations live on
//! `DriverManager`, a borrowed view obtained from `drivers()`.

use std::sync::Arc;

use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::drivers::DriverManager;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
use crate::types::Company;

/// Production endpoint for the TrackSim REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.tracksim.app/v1";

/// Client for the TrackSim company-management API.
///
/// Cloning is cheap and clones share the same transport; each call is an
/// independent request with no ordering or mutual exclusion relative to
/// any other call.
#[derive(Clone)]
pub struct TrackSim {
    api_key: String,
    base_url: String,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for TrackSim {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackSim")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl TrackSim {
    /// Create a client for the production API.
    ///
    /// Fails with `InvalidArgument` if `api_key` is empty; the check runs
    /// before any transport is configured. No network call is made here.
    pub fn new(api_key: &str) -> Result<Self, ApiError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client against a custom endpoint (self-hosted or test
    /// server). A trailing `/` on `base_url` is stripped.
    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self, ApiError> {
        require_api_key(api_key)?;
        Ok(Self::build(api_key, base_url, Arc::new(UreqTransport::new())))
    }

    /// Create a client with an injected transport. This is the seam unit
    /// tests use to capture requests without network access.
    pub fn with_transport(
        api_key: &str,
        base_url: &str,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, ApiError> {
        require_api_key(api_key)?;
        Ok(Self::build(api_key, base_url, transport))
    }

    fn build(api_key: &str, base_url: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    /// Get information about your company.
    ///
    /// Issues `GET /me` and returns the decoded profile.
    pub fn company(&self) -> Result<Company, ApiError> {
        let response = self.execute(HttpMethod::Get, "/me", None)?;
        decode(response)
    }

    /// Manage your company's drivers.
    ///
    /// Returns a fresh manager each call, borrowing this client's
    /// transport configuration.
    pub fn drivers(&self) -> DriverManager<'_> {
        DriverManager::new(self)
    }

    /// Issue one request with the default headers applied.
    pub(crate) fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<String>,
    ) -> Result<HttpResponse, ApiError> {
        let request = HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers: vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                (
                    "Authorization".to_string(),
                    format!("Api-Key {}", self.api_key),
                ),
            ],
            body,
        };
        debug!("{} {}", request.method.as_str(), request.path);
        let response = self.transport.execute(request)?;
        debug!("<- {}", response.status);
        Ok(response)
    }
}

fn require_api_key(api_key: &str) -> Result<(), ApiError> {
    if api_key.is_empty() {
        return Err(ApiError::InvalidArgument(
            "API key should be a non-empty string".to_string(),
        ));
    }
    Ok(())
}

/// Serialize a request body to JSON.
pub(crate) fn encode<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|e| ApiError::Serialization(e.to_string()))
}

/// Decode a response body, treating the whole 2xx range as success.
pub(crate) fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if (200..300).contains(&response.status) {
        return Ok(());
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}
