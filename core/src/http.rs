//! HTTP transport seam for the TrackSim client.
//!
//! # Design
//! Requests and responses are plain data so every outgoing request can be
//! inspected by a test double without touching the network. The `Transport`
//! trait is the only place I/O happens; `UreqTransport` is the default
//! implementation used by `TrackSim::new`. The agent disables ureq's
//! status-as-error behavior so non-2xx responses come back as data, which
//! `DriverManager::remove` relies on.
//!
//! All fields use owned types (`String`, `Vec`) so values can be captured
//! and replayed by mocks without lifetime concerns.

use crate::error::ApiError;

/// HTTP method for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }
}

/// An HTTP request described as plain data.
///
/// Built internally by `TrackSim` with the base URL and default headers
/// already applied, then handed to a `Transport` for execution.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// Produced by a `Transport`. A non-2xx status is NOT an error at this
/// layer; interpretation happens per operation.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Executes `HttpRequest`s. Implementations must return non-2xx responses
/// as `Ok`; `Err` is reserved for transport-level failures (connect, IO,
/// protocol).
pub trait Transport: Send + Sync {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Default blocking transport backed by ureq.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let transport_err = |e: ureq::Error| ApiError::Transport(e.to_string());

        let mut response = match (&request.method, request.body.as_deref()) {
            (HttpMethod::Get, _) => {
                let mut r = self.agent.get(&request.path);
                for (name, value) in &request.headers {
                    r = r.header(name.as_str(), value.as_str());
                }
                r.call()
            }
            (HttpMethod::Post, body) => {
                let mut r = self.agent.post(&request.path);
                for (name, value) in &request.headers {
                    r = r.header(name.as_str(), value.as_str());
                }
                r.send(body.unwrap_or_default().as_bytes())
            }
            (HttpMethod::Patch, body) => {
                let mut r = self.agent.patch(&request.path);
                for (name, value) in &request.headers {
                    r = r.header(name.as_str(), value.as_str());
                }
                r.send(body.unwrap_or_default().as_bytes())
            }
            (HttpMethod::Delete, Some(body)) => {
                // DELETE normally has no body, but the drivers resource is
                // addressed through one.
                let mut r = self.agent.delete(&request.path).force_send_body();
                for (name, value) in &request.headers {
                    r = r.header(name.as_str(), value.as_str());
                }
                r.send(body.as_bytes())
            }
            (HttpMethod::Delete, None) => {
                let mut r = self.agent.delete(&request.path);
                for (name, value) in &request.headers {
                    r = r.header(name.as_str(), value.as_str());
                }
                r.call()
            }
        }
        .map_err(transport_err)?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(transport_err)?;

        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Request-capturing transport used by the client and driver unit tests.

    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use super::{HttpRequest, HttpResponse, Transport};
    use crate::error::ApiError;

    pub(crate) struct MockTransport {
        requests: Mutex<Vec<HttpRequest>>,
        responses: Mutex<VecDeque<HttpResponse>>,
    }

    impl MockTransport {
        pub(crate) fn new() -> Arc<Self> {
            Arc::new(Self {
                requests: Mutex::new(Vec::new()),
                responses: Mutex::new(VecDeque::new()),
            })
        }

        /// Queue a response for the next executed request.
        pub(crate) fn enqueue(&self, status: u16, body: &str) {
            self.responses.lock().unwrap().push_back(HttpResponse {
                status,
                headers: Vec::new(),
                body: body.to_string(),
            });
        }

        pub(crate) fn captured(&self) -> Vec<HttpRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl Transport for MockTransport {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| ApiError::Transport("no queued response".to_string()))
        }
    }
}
