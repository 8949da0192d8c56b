//! Name-based dispatch: `call("from", ..)`, `get_by_method("getAmount")` and
//! the `start` entry point, for callers that drive the builder from data.

use serde_json::Value;

use super::{Transaction, TransactionKind};
use crate::attributes::Attribute;
use crate::error::{PaymentError, Result};
use crate::mass_assign;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Setter {
    Attribute(Attribute),
    Callback,
    Customer,
}

/// Setter method names beyond the canonical attribute names.
const SETTER_ALIASES: &[(&str, Setter)] = &[
    ("from", Setter::Attribute(Attribute::CustomerMsisdn)),
    ("reference", Setter::Attribute(Attribute::ClientReference)),
    ("callbackOnSuccess", Setter::Attribute(Attribute::PrimaryCallbackUrl)),
    ("callbackOnFail", Setter::Attribute(Attribute::SecondaryCallbackUrl)),
    ("callback", Setter::Callback),
    ("setCallback", Setter::Callback),
    ("customer", Setter::Customer),
    ("setCustomer", Setter::Customer),
];

fn resolve_setter(method: &str) -> Option<Setter> {
    Attribute::from_name(method).map(Setter::Attribute).or_else(|| {
        SETTER_ALIASES
            .iter()
            .find(|(name, _)| *name == method)
            .map(|(_, setter)| *setter)
    })
}

/// `get<Name>` for every canonical name, plus `isFeesOnCustomer`.
fn resolve_getter(method: &str) -> Option<Attribute> {
    if method == "isFeesOnCustomer" {
        return Some(Attribute::FeesOnCustomer);
    }

    let rest = method.strip_prefix("get")?;
    let mut chars = rest.chars();
    let first = chars.next()?;
    if !first.is_ascii_uppercase() {
        return None;
    }

    let name = format!("{}{}", first.to_ascii_lowercase(), chars.as_str());
    Attribute::from_name(&name)
}

impl<K: TransactionKind> Transaction<K> {
    /// Starts a new builder with its first call.
    pub fn start(method: &str, value: impl Into<Value>) -> Result<Self> {
        Self::new().call(method, value)
    }

    /// Applies the setter named `method`. Unknown names are an error.
    pub fn call(mut self, method: &str, value: impl Into<Value>) -> Result<Self> {
        let setter = resolve_setter(method)
            .ok_or_else(|| PaymentError::InvalidOperation(format!("{}::{}", K::SCHEMA.name, method)))?;

        let value = value.into();
        match setter {
            Setter::Attribute(attr) => {
                self.attributes.set(attr, value);
            }
            Setter::Callback => mass_assign::apply_callback(&mut self.attributes, &value),
            Setter::Customer => mass_assign::apply_customer(&mut self.attributes, &value),
        }

        Ok(self)
    }

    /// Reads through the getter named `method`.
    pub fn get_by_method(&self, method: &str) -> Result<Option<Value>> {
        let attr = resolve_getter(method)
            .ok_or_else(|| PaymentError::InvalidOperation(format!("{}::{}", K::SCHEMA.name, method)))?;

        if attr == Attribute::FeesOnCustomer && method.starts_with("is") {
            return Ok(Some(Value::Bool(self.is_fees_on_customer())));
        }

        Ok(self.get(attr).cloned())
    }
}
