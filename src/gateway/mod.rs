//! The HTTP boundary: the executor capability the transactions send through,
//! plus request construction and response mapping.

pub mod client;
pub mod request;
pub mod response;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::Method;
use thiserror::Error;
use url::Url;

pub use client::ReqwestExecutor;
pub use request::build_request;
pub use response::map_response;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Invalid response from gateway: {0}")]
    InvalidResponse(String),
    #[error("Circuit breaker open: {0}")]
    CircuitBreakerOpen(String),
    #[error("Connection failed: {0}")]
    Connection(String),
}

/// A fully built request, ready to be put on the wire.
#[derive(Debug, Clone)]
pub struct GatewayRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: String,
}

/// Raw outcome of a request that reached the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayResponse {
    pub status: u16,
    pub body: String,
}

impl GatewayResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a request and returns whatever the gateway answered. Only failures
/// to get an answer at all are errors here; status handling is left to
/// [`map_response`].
#[async_trait]
pub trait HttpExecutor: Send + Sync {
    async fn send(&self, request: GatewayRequest) -> Result<GatewayResponse, TransportError>;
}
