//! Canonical transaction attributes and the polymorphic store behind every
//! transaction.

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Attribute {
    Amount,
    Description,
    CustomerMsisdn,
    CustomerName,
    CustomerEmail,
    Channel,
    ClientReference,
    PrimaryCallbackUrl,
    SecondaryCallbackUrl,
    Token,
    FeesOnCustomer,
}

impl Attribute {
    pub const ALL: [Attribute; 11] = [
        Attribute::Amount,
        Attribute::Description,
        Attribute::CustomerMsisdn,
        Attribute::CustomerName,
        Attribute::CustomerEmail,
        Attribute::Channel,
        Attribute::ClientReference,
        Attribute::PrimaryCallbackUrl,
        Attribute::SecondaryCallbackUrl,
        Attribute::Token,
        Attribute::FeesOnCustomer,
    ];

    /// The canonical key.
    pub fn name(self) -> &'static str {
        match self {
            Attribute::Amount => "amount",
            Attribute::Description => "description",
            Attribute::CustomerMsisdn => "customerMsisdn",
            Attribute::CustomerName => "customerName",
            Attribute::CustomerEmail => "customerEmail",
            Attribute::Channel => "channel",
            Attribute::ClientReference => "clientReference",
            Attribute::PrimaryCallbackUrl => "primaryCallbackURL",
            Attribute::SecondaryCallbackUrl => "secondaryCallbackURL",
            Attribute::Token => "token",
            Attribute::FeesOnCustomer => "feesOnCustomer",
        }
    }

    /// Key used in the JSON body sent to the gateway.
    pub fn wire_name(self) -> &'static str {
        match self {
            Attribute::Amount => "Amount",
            Attribute::Description => "Description",
            Attribute::CustomerMsisdn => "CustomerMsisdn",
            Attribute::CustomerName => "CustomerName",
            Attribute::CustomerEmail => "CustomerEmail",
            Attribute::Channel => "Channel",
            Attribute::ClientReference => "ClientReference",
            Attribute::PrimaryCallbackUrl => "PrimaryCallbackUrl",
            Attribute::SecondaryCallbackUrl => "SecondaryCallbackUrl",
            Attribute::Token => "Token",
            Attribute::FeesOnCustomer => "FeesOnCustomer",
        }
    }

    pub fn from_name(name: &str) -> Option<Attribute> {
        Attribute::ALL.into_iter().find(|attr| attr.name() == name)
    }

    pub fn kind(self) -> AttributeKind {
        match self {
            Attribute::Amount => AttributeKind::Decimal,
            Attribute::FeesOnCustomer => AttributeKind::Flag,
            Attribute::ClientReference => AttributeKind::Json,
            _ => AttributeKind::Text,
        }
    }

    /// Coerces loosely typed scalars to the attribute's kind: numbers and
    /// booleans become text for text attributes, `"true"`/`"false"` become
    /// booleans for flags. Anything else is kept as given.
    pub fn normalize(self, value: Value) -> Value {
        match (self.kind(), value) {
            (AttributeKind::Text, Value::Number(n)) => Value::String(n.to_string()),
            (AttributeKind::Text, Value::Bool(b)) => Value::String(b.to_string()),
            (AttributeKind::Flag, Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                _ => Value::String(s),
            },
            (_, value) => value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    Text,
    Decimal,
    Flag,
    Json,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeStore {
    values: BTreeMap<Attribute, Value>,
}

impl AttributeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads an attribute. The secondary callback falls back to the primary
    /// one while it is unset or null.
    pub fn get(&self, attr: Attribute) -> Option<&Value> {
        match self.values.get(&attr) {
            None | Some(Value::Null) if attr == Attribute::SecondaryCallbackUrl => {
                self.values.get(&Attribute::PrimaryCallbackUrl)
            }
            value => value,
        }
    }

    /// Stores `value` after [`Attribute::normalize`].
    pub fn set(&mut self, attr: Attribute, value: impl Into<Value>) -> &mut Self {
        self.values.insert(attr, attr.normalize(value.into()));
        self
    }

    /// True only for explicitly stored, non-null attributes, fallbacks excluded.
    pub fn is_set(&self, attr: Attribute) -> bool {
        matches!(self.values.get(&attr), Some(value) if !value.is_null())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// JSON body for the gateway: every present, non-null attribute under its
    /// wire name, fallbacks applied.
    pub fn to_wire(&self) -> Map<String, Value> {
        Attribute::ALL
            .into_iter()
            .filter_map(|attr| match self.get(attr) {
                Some(Value::Null) | None => None,
                Some(value) => Some((attr.wire_name().to_string(), value.clone())),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn canonical_names_round_trip() {
        for attr in Attribute::ALL {
            assert_eq!(Attribute::from_name(attr.name()), Some(attr));
        }
        assert_eq!(Attribute::from_name("Amount"), None);
        assert_eq!(Attribute::from_name("some_bad_method"), None);
    }

    #[test]
    fn set_then_get_returns_value() {
        let mut store = AttributeStore::new();
        store
            .set(Attribute::Amount, 10.89)
            .set(Attribute::ClientReference, json!({ "userId": 14028 }));

        assert_eq!(store.get(Attribute::Amount), Some(&json!(10.89)));
        assert_eq!(store.get(Attribute::ClientReference), Some(&json!({ "userId": 14028 })));
        assert_eq!(store.get(Attribute::Token), None);
    }

    #[test]
    fn secondary_callback_falls_back_to_primary() {
        let mut store = AttributeStore::new();
        store.set(Attribute::PrimaryCallbackUrl, "https://example.com/ok");

        assert_eq!(
            store.get(Attribute::SecondaryCallbackUrl),
            Some(&json!("https://example.com/ok"))
        );
        assert!(!store.is_set(Attribute::SecondaryCallbackUrl));

        store.set(Attribute::SecondaryCallbackUrl, "https://example.com/fail");
        assert_eq!(
            store.get(Attribute::SecondaryCallbackUrl),
            Some(&json!("https://example.com/fail"))
        );
    }

    #[test]
    fn null_secondary_callback_still_falls_back() {
        let mut store = AttributeStore::new();
        store
            .set(Attribute::PrimaryCallbackUrl, "https://example.com/ok")
            .set(Attribute::SecondaryCallbackUrl, Value::Null);

        assert!(!store.is_set(Attribute::SecondaryCallbackUrl));
        assert_eq!(
            store.get(Attribute::SecondaryCallbackUrl),
            Some(&json!("https://example.com/ok"))
        );
        assert_eq!(
            store.to_wire().get("SecondaryCallbackUrl"),
            Some(&json!("https://example.com/ok"))
        );
    }

    #[test]
    fn set_normalizes_scalars_to_the_attribute_kind() {
        let mut store = AttributeStore::new();
        store
            .set(Attribute::CustomerMsisdn, 233553577261u64)
            .set(Attribute::Token, true)
            .set(Attribute::FeesOnCustomer, " TRUE ")
            .set(Attribute::Amount, "10.89")
            .set(Attribute::ClientReference, 14028);

        assert_eq!(store.get(Attribute::CustomerMsisdn), Some(&json!("233553577261")));
        assert_eq!(store.get(Attribute::Token), Some(&json!("true")));
        assert_eq!(store.get(Attribute::FeesOnCustomer), Some(&json!(true)));
        assert_eq!(store.get(Attribute::Amount), Some(&json!("10.89")));
        assert_eq!(store.get(Attribute::ClientReference), Some(&json!(14028)));

        store.set(Attribute::FeesOnCustomer, "false");
        assert_eq!(store.get(Attribute::FeesOnCustomer), Some(&json!(false)));

        store.set(Attribute::FeesOnCustomer, "maybe");
        assert_eq!(store.get(Attribute::FeesOnCustomer), Some(&json!("maybe")));
    }

    #[test]
    fn primary_does_not_fall_back_to_secondary() {
        let mut store = AttributeStore::new();
        store.set(Attribute::SecondaryCallbackUrl, "https://example.com/fail");
        assert_eq!(store.get(Attribute::PrimaryCallbackUrl), None);
    }

    #[test]
    fn wire_body_uses_wire_names_and_skips_nulls() {
        let mut store = AttributeStore::new();
        store
            .set(Attribute::CustomerMsisdn, "+233553577261")
            .set(Attribute::PrimaryCallbackUrl, "https://example.com/ok")
            .set(Attribute::FeesOnCustomer, true)
            .set(Attribute::Token, Value::Null);

        let wire = Value::Object(store.to_wire());
        assert_eq!(
            wire,
            json!({
                "CustomerMsisdn": "+233553577261",
                "PrimaryCallbackUrl": "https://example.com/ok",
                "SecondaryCallbackUrl": "https://example.com/ok",
                "FeesOnCustomer": true,
            })
        );
    }
}
