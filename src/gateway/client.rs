use async_trait::async_trait;
use failsafe::futures::CircuitBreaker as FuturesCircuitBreaker;
use failsafe::{backoff, failure_policy, Config, Error as FailsafeError, StateMachine};
use reqwest::Client;
use std::time::Duration;

use super::{GatewayRequest, GatewayResponse, HttpExecutor, TransportError};

type Breaker = StateMachine<failure_policy::ConsecutiveFailures<backoff::EqualJittered>, ()>;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default executor backed by `reqwest`.
#[derive(Clone)]
pub struct ReqwestExecutor {
    client: Client,
    circuit_breaker: Option<Breaker>,
}

impl Default for ReqwestExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl ReqwestExecutor {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();

        ReqwestExecutor {
            client,
            circuit_breaker: None,
        }
    }

    /// Uses a caller-configured client (proxies, TLS roots, timeouts).
    pub fn with_client(client: Client) -> Self {
        ReqwestExecutor {
            client,
            circuit_breaker: None,
        }
    }

    /// Stops sending after `failure_threshold` consecutive transport failures
    /// until the reset timeout has passed. Rejected calls fail immediately.
    pub fn with_circuit_breaker(mut self, failure_threshold: u32, reset_timeout_secs: u64) -> Self {
        let backoff = backoff::equal_jittered(
            Duration::from_secs(reset_timeout_secs),
            Duration::from_secs(reset_timeout_secs.saturating_mul(2)),
        );
        let policy = failure_policy::consecutive_failures(failure_threshold, backoff);
        self.circuit_breaker = Some(Config::new().failure_policy(policy).build());
        self
    }

    /// Returns the current state of the circuit breaker
    pub fn circuit_state(&self) -> String {
        match &self.circuit_breaker {
            Some(breaker) if !breaker.is_call_permitted() => "open".to_string(),
            _ => "closed".to_string(),
        }
    }

    async fn dispatch(client: Client, request: GatewayRequest) -> Result<GatewayResponse, TransportError> {
        let response = client
            .request(request.method, request.url)
            .headers(request.headers)
            .body(request.body)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(GatewayResponse { status, body })
    }
}

/// Separates "never reached the gateway" from other request failures.
fn classify(e: reqwest::Error) -> TransportError {
    if e.is_connect() {
        TransportError::Connection(e.to_string())
    } else {
        TransportError::RequestError(e)
    }
}

#[async_trait]
impl HttpExecutor for ReqwestExecutor {
    async fn send(&self, request: GatewayRequest) -> Result<GatewayResponse, TransportError> {
        let client = self.client.clone();

        let Some(breaker) = &self.circuit_breaker else {
            return Self::dispatch(client, request).await;
        };

        match breaker.call(Self::dispatch(client, request)).await {
            Ok(response) => Ok(response),
            Err(FailsafeError::Rejected) => Err(TransportError::CircuitBreakerOpen(
                "gateway circuit breaker is open".to_string(),
            )),
            Err(FailsafeError::Inner(e)) => Err(e),
        }
    }
}
