use serde_json::Value;
use std::fmt;
use thiserror::Error;

use crate::gateway::TransportError;

pub type Result<T> = std::result::Result<T, PaymentError>;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    #[error("Gateway error: {0}")]
    Gateway(GatewayError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl PaymentError {
    /// True for a locally detected missing field and for a gateway rejection
    /// of the payload content. Callers fix both by supplying the field.
    pub fn is_missing_parameter(&self) -> bool {
        match self {
            PaymentError::MissingParameter(_) => true,
            PaymentError::Gateway(err) => err.is_validation(),
            _ => false,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, PaymentError::Transport(_))
    }

    /// The gateway response code, when the gateway produced one.
    pub fn gateway_code(&self) -> Option<&str> {
        match self {
            PaymentError::Gateway(err) => Some(err.code.as_str()),
            _ => None,
        }
    }
}

/// Field-level detail from a gateway rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub messages: Vec<String>,
}

/// A structured rejection returned by the gateway itself.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayError {
    pub status: u16,
    pub code: String,
    pub message: Option<String>,
    pub errors: Vec<FieldError>,
    pub body: Value,
}

pub const VALIDATION_CODES: &[&str] = &["4000", "4010"];

impl GatewayError {
    pub fn is_validation(&self) -> bool {
        self.status == 400 || self.status == 422 || VALIDATION_CODES.contains(&self.code.as_str())
    }
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "status {} code {}", self.status, self.code)?;
        if let Some(message) = &self.message {
            write!(f, ": {}", message)?;
        }
        for err in &self.errors {
            write!(f, "; {} ({})", err.field, err.messages.join(", "))?;
        }
        Ok(())
    }
}
