use serde_json::Value;
use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::gateway::HttpExecutor;
use crate::transaction::{ReceiveMoney, Transaction, TransactionKind};

/// Entry point holding the merchant credentials shared by every transaction
/// it hands out.
#[derive(Clone)]
pub struct Pay {
    config: Arc<Config>,
    executor: Option<Arc<dyn HttpExecutor>>,
}

impl Pay {
    pub fn new(config: Config) -> Self {
        Pay {
            config: Arc::new(config),
            executor: None,
        }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::new(Config::from_env()?))
    }

    pub fn with_executor(mut self, executor: Arc<dyn HttpExecutor>) -> Self {
        self.executor = Some(executor);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn receive_money(&self) -> ReceiveMoney {
        self.prepare(ReceiveMoney::new())
    }

    pub fn receive_money_from(&self, input: &Value) -> ReceiveMoney {
        self.prepare(ReceiveMoney::from_map(input))
    }

    fn prepare<K: TransactionKind>(&self, transaction: Transaction<K>) -> Transaction<K> {
        let transaction = transaction.inject_config(Arc::clone(&self.config));
        match &self.executor {
            Some(executor) => transaction.with_executor(Arc::clone(executor)),
            None => transaction,
        }
    }
}
