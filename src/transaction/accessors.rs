//! Typed setters and getters, generated per attribute. Every setter funnels
//! into [`Transaction::with`], so aliases and canonical names stay identical.

use serde_json::{Number, Value};

use super::{Transaction, TransactionKind};
use crate::attributes::Attribute;

macro_rules! accessor {
    (text $attr:ident: $($setter:ident),+ ; $getter:ident) => {
        $(
            pub fn $setter(self, value: impl Into<String>) -> Self {
                self.with(Attribute::$attr, Value::String(value.into()))
            }
        )+

        pub fn $getter(&self) -> Option<&str> {
            self.get(Attribute::$attr).and_then(Value::as_str)
        }
    };
    (decimal $attr:ident: $($setter:ident),+ ; $getter:ident) => {
        $(
            /// Non-finite values are stored as null and fail validation.
            pub fn $setter(self, value: f64) -> Self {
                let value = Number::from_f64(value).map_or(Value::Null, Value::Number);
                self.with(Attribute::$attr, value)
            }
        )+

        pub fn $getter(&self) -> Option<f64> {
            self.get(Attribute::$attr).and_then(|value| match value {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse().ok(),
                _ => None,
            })
        }
    };
    (flag $attr:ident: $($setter:ident),+ ; $getter:ident) => {
        $(
            pub fn $setter(self, value: bool) -> Self {
                self.with(Attribute::$attr, Value::Bool(value))
            }
        )+

        pub fn $getter(&self) -> bool {
            self.get(Attribute::$attr)
                .and_then(Value::as_bool)
                .unwrap_or(false)
        }
    };
    (json $attr:ident: $($setter:ident),+ ; $getter:ident) => {
        $(
            pub fn $setter(self, value: impl Into<Value>) -> Self {
                self.with(Attribute::$attr, value.into())
            }
        )+

        pub fn $getter(&self) -> Option<&Value> {
            self.get(Attribute::$attr)
        }
    };
}

impl<K: TransactionKind> Transaction<K> {
    accessor!(decimal Amount: amount; get_amount);
    accessor!(text Description: description; get_description);
    accessor!(text CustomerMsisdn: customer_msisdn, from; get_customer_msisdn);
    accessor!(text CustomerName: customer_name; get_customer_name);
    accessor!(text CustomerEmail: customer_email; get_customer_email);
    accessor!(text Channel: channel; get_channel);
    accessor!(json ClientReference: client_reference, reference; get_client_reference);
    accessor!(text PrimaryCallbackUrl: primary_callback_url, callback_on_success; get_primary_callback_url);
    accessor!(text SecondaryCallbackUrl: secondary_callback_url, callback_on_fail; get_secondary_callback_url);
    accessor!(text Token: token; get_token);
    accessor!(flag FeesOnCustomer: fees_on_customer; is_fees_on_customer);
}
