//! Transaction builder shared by every gateway operation.
//!
//! A [`Transaction`] is a bag of canonical attributes plus the schema of its
//! kind. It is filled through typed setters, name-based [`Transaction::call`]
//! or mass assignment, and sent with [`Transaction::run`].

mod accessors;
mod dispatch;
mod receive_money;

use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, OnceLock};
use tracing::debug;

use crate::attributes::{Attribute, AttributeStore};
use crate::config::Config;
use crate::error::Result;
use crate::gateway::{build_request, map_response, HttpExecutor, ReqwestExecutor};
use crate::mass_assign;
use crate::validation;

pub use receive_money::{channels, MobileMoneyReceive, ReceiveMoney};

/// Declarative description of one gateway operation.
#[derive(Debug, Clone, Copy)]
pub struct TransactionSchema {
    pub name: &'static str,
    /// Path below `/merchants/{accountNumber}/`.
    pub route: &'static str,
    /// Checked in order before sending.
    pub required: &'static [Attribute],
    /// `(channel, attribute)`: the attribute is required when the channel matches.
    pub channel_requirements: &'static [(&'static str, Attribute)],
}

pub trait TransactionKind: Send + Sync + 'static {
    const SCHEMA: TransactionSchema;
}

static DEFAULT_EXECUTOR: OnceLock<Arc<dyn HttpExecutor>> = OnceLock::new();

fn default_executor() -> Arc<dyn HttpExecutor> {
    DEFAULT_EXECUTOR
        .get_or_init(|| Arc::new(ReqwestExecutor::new()))
        .clone()
}

#[derive(Clone)]
pub struct Transaction<K: TransactionKind> {
    attributes: AttributeStore,
    config: Option<Arc<Config>>,
    executor: Option<Arc<dyn HttpExecutor>>,
    kind: PhantomData<K>,
}

impl<K: TransactionKind> Default for Transaction<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: TransactionKind> Transaction<K> {
    pub fn new() -> Self {
        Transaction {
            attributes: AttributeStore::new(),
            config: None,
            executor: None,
            kind: PhantomData,
        }
    }

    /// A new builder populated by mass assignment.
    pub fn from_map(input: &Value) -> Self {
        Self::new().make(input)
    }

    pub fn schema(&self) -> &'static TransactionSchema {
        &K::SCHEMA
    }

    /// Mass-assigns `input` onto this builder.
    pub fn make(mut self, input: &Value) -> Self {
        mass_assign::apply(&mut self.attributes, input);
        self
    }

    /// Applies a `customer` group (`name`, `email`, `phone`/`msisdn`/`number`).
    pub fn set_customer(mut self, customer: &Value) -> Self {
        mass_assign::apply_customer(&mut self.attributes, customer);
        self
    }

    /// Applies a `callback` group, or one URL for both callbacks.
    pub fn set_callback(mut self, callback: &Value) -> Self {
        mass_assign::apply_callback(&mut self.attributes, callback);
        self
    }

    /// Uses one URL for both the success and the failure callback.
    pub fn callback(self, url: impl Into<String>) -> Self {
        self.set_callback(&Value::String(url.into()))
    }

    pub fn with(mut self, attr: Attribute, value: impl Into<Value>) -> Self {
        self.attributes.set(attr, value);
        self
    }

    pub fn get(&self, attr: Attribute) -> Option<&Value> {
        self.attributes.get(attr)
    }

    pub fn attributes(&self) -> &AttributeStore {
        &self.attributes
    }

    pub fn inject_config(mut self, config: Arc<Config>) -> Self {
        self.config = Some(config);
        self
    }

    pub fn config(&self) -> Option<&Config> {
        self.config.as_deref()
    }

    /// Replaces the HTTP executor used by [`Transaction::run`].
    pub fn with_executor(mut self, executor: Arc<dyn HttpExecutor>) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Validates, sends and maps the gateway's answer.
    ///
    /// Nothing goes on the wire unless every required attribute is present.
    /// Without an injected config the environment is read. Calling this again
    /// sends the same request again.
    #[tracing::instrument(skip(self), fields(transaction = K::SCHEMA.name))]
    pub async fn run(&self) -> Result<Value> {
        validation::validate(&self.attributes, &K::SCHEMA)?;

        let config = match &self.config {
            Some(config) => Arc::clone(config),
            None => Arc::new(Config::from_env()?),
        };
        config.validate()?;

        let request = build_request(&K::SCHEMA, &config, &self.attributes)?;
        let executor = self.executor.clone().unwrap_or_else(default_executor);

        debug!(method = %request.method, url = %request.url, "sending transaction");
        let response = executor.send(request).await?;
        debug!(status = response.status, "gateway responded");

        map_response(response)
    }
}

impl<K: TransactionKind> fmt::Debug for Transaction<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transaction")
            .field("kind", &K::SCHEMA.name)
            .field("attributes", &self.attributes)
            .field("config", &self.config)
            .field("custom_executor", &self.executor.is_some())
            .finish()
    }
}
