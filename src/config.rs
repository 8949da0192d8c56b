use dotenvy::dotenv;
use serde::Deserialize;
use std::env;
use std::fmt;

use crate::error::{PaymentError, Result};

pub const DEFAULT_API_BASE: &str = "https://api.hubtel.com/v1/merchantaccount";

/// Merchant account number. The gateway issues numeric ones but accepts them
/// as path segments, so both spellings are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "AccountNumberRepr")]
pub struct AccountNumber(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum AccountNumberRepr {
    Number(u64),
    Text(String),
}

impl From<AccountNumberRepr> for AccountNumber {
    fn from(repr: AccountNumberRepr) -> Self {
        match repr {
            AccountNumberRepr::Number(n) => AccountNumber(n.to_string()),
            AccountNumberRepr::Text(s) => AccountNumber(s),
        }
    }
}

impl AccountNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for AccountNumber {
    fn from(n: u64) -> Self {
        AccountNumber(n.to_string())
    }
}

impl From<&str> for AccountNumber {
    fn from(s: &str) -> Self {
        AccountNumber(s.to_string())
    }
}

impl From<String> for AccountNumber {
    fn from(s: String) -> Self {
        AccountNumber(s)
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Deserialize, Clone, PartialEq, Eq)]
pub struct Config {
    account_number: AccountNumber,
    client_id: String,
    client_secret: String,
    #[serde(default = "default_api_base")]
    api_base: String,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

impl Config {
    pub fn new(
        account_number: impl Into<AccountNumber>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Config {
            account_number: account_number.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            api_base: default_api_base(),
        }
    }

    /// Points requests at another host, e.g. a sandbox or a local mock.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn from_env() -> Result<Self> {
        dotenv().ok(); // Load .env file if present

        let config = Config {
            account_number: AccountNumber(required_var("HUBTEL_ACCOUNT_NUMBER")?),
            client_id: required_var("HUBTEL_CLIENT_ID")?,
            client_secret: required_var("HUBTEL_CLIENT_SECRET")?,
            api_base: env::var("HUBTEL_API_BASE").unwrap_or_else(|_| default_api_base()),
        };
        config.validate()?;
        Ok(config)
    }

    /// Every credential must be non-empty before a request goes out.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("account number", self.account_number.as_str()),
            ("client id", self.client_id.as_str()),
            ("client secret", self.client_secret.as_str()),
            ("api base", self.api_base.as_str()),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(PaymentError::Config(format!("{} must not be empty", name)));
            }
        }
        Ok(())
    }

    pub fn account_number(&self) -> &AccountNumber {
        &self.account_number
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }
}

fn required_var(name: &str) -> Result<String> {
    env::var(name).map_err(|_| PaymentError::Config(format!("{} is required", name)))
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("account_number", &self.account_number)
            .field("client_id", &self.client_id)
            .field("client_secret", &"****")
            .field("api_base", &self.api_base)
            .finish()
    }
}
