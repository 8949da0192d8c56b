use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::Method;
use serde_json::Value;
use url::Url;

use super::GatewayRequest;
use crate::attributes::AttributeStore;
use crate::config::Config;
use crate::error::{PaymentError, Result};
use crate::transaction::TransactionSchema;

/// `{api_base}/merchants/{accountNumber}/{route}`
pub fn endpoint(config: &Config, schema: &TransactionSchema) -> Result<Url> {
    let raw = format!(
        "{}/merchants/{}/{}",
        config.api_base().trim_end_matches('/'),
        config.account_number(),
        schema.route.trim_start_matches('/'),
    );

    Url::parse(&raw).map_err(|e| PaymentError::Config(format!("invalid endpoint {}: {}", raw, e)))
}

pub fn basic_auth(config: &Config) -> String {
    let credentials = format!("{}:{}", config.client_id(), config.client_secret());
    format!("Basic {}", STANDARD.encode(credentials))
}

pub fn headers(config: &Config) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    let mut auth = HeaderValue::from_str(&basic_auth(config))
        .map_err(|_| PaymentError::Config("credentials contain invalid header characters".to_string()))?;
    auth.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth);

    let agent = HeaderValue::from_str(&crate::user_agent())
        .map_err(|_| PaymentError::Config("invalid user agent".to_string()))?;
    headers.insert(USER_AGENT, agent);

    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    Ok(headers)
}

/// Builds the POST for a validated transaction.
pub fn build_request(
    schema: &TransactionSchema,
    config: &Config,
    attributes: &AttributeStore,
) -> Result<GatewayRequest> {
    let body = Value::Object(attributes.to_wire()).to_string();

    Ok(GatewayRequest {
        method: Method::POST,
        url: endpoint(config, schema)?,
        headers: headers(config)?,
        body,
    })
}
