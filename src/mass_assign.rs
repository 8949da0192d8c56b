//! Mass assignment: folds a nested, loosely spelled input map onto the
//! canonical attribute keys.

use serde_json::{Map, Value};

use crate::attributes::{Attribute, AttributeStore};

/// Top-level alias spellings. Canonical names are accepted separately.
pub const TOP_LEVEL_ALIASES: &[(&str, Attribute)] = &[
    ("msisdn", Attribute::CustomerMsisdn),
    ("number", Attribute::CustomerMsisdn),
    ("phone", Attribute::CustomerMsisdn),
    ("from", Attribute::CustomerMsisdn),
    ("email", Attribute::CustomerEmail),
    ("reference", Attribute::ClientReference),
    ("callbackOnSuccess", Attribute::PrimaryCallbackUrl),
    ("primaryCallbackUrl", Attribute::PrimaryCallbackUrl),
    ("callbackOnFail", Attribute::SecondaryCallbackUrl),
    ("secondaryCallbackUrl", Attribute::SecondaryCallbackUrl),
];

/// Keys accepted inside a `customer` group.
pub const CUSTOMER_KEYS: &[(&str, Attribute)] = &[
    ("name", Attribute::CustomerName),
    ("email", Attribute::CustomerEmail),
    ("phone", Attribute::CustomerMsisdn),
    ("msisdn", Attribute::CustomerMsisdn),
    ("number", Attribute::CustomerMsisdn),
];

/// Keys accepted inside a `callback` group.
pub const CALLBACK_KEYS: &[(&str, Attribute)] = &[
    ("success", Attribute::PrimaryCallbackUrl),
    ("callbackOnSuccess", Attribute::PrimaryCallbackUrl),
    ("error", Attribute::SecondaryCallbackUrl),
    ("callbackOnFail", Attribute::SecondaryCallbackUrl),
];

const CUSTOMER_GROUP: &str = "customer";
const CALLBACK_GROUP: &str = "callback";

/// Applies `input` to `store`. Non-object input and unknown keys are ignored.
///
/// Per attribute the first match wins: the nested group, then a top-level
/// alias, then the canonical key.
pub fn apply(store: &mut AttributeStore, input: &Value) {
    let Some(input) = input.as_object() else {
        return;
    };

    for attr in Attribute::ALL {
        if let Some(value) = resolve(input, attr) {
            store.set(attr, value.clone());
        }
    }
}

/// Applies the content of a `customer` group.
pub fn apply_customer(store: &mut AttributeStore, customer: &Value) {
    if let Some(group) = customer.as_object() {
        apply_group(store, group, CUSTOMER_KEYS);
    }
}

/// Applies a `callback` group, or a bare URL used for both callbacks.
pub fn apply_callback(store: &mut AttributeStore, callback: &Value) {
    match callback {
        Value::Object(group) => apply_group(store, group, CALLBACK_KEYS),
        Value::String(url) => {
            store
                .set(Attribute::PrimaryCallbackUrl, url.as_str())
                .set(Attribute::SecondaryCallbackUrl, url.as_str());
        }
        _ => {}
    }
}

fn apply_group(store: &mut AttributeStore, group: &Map<String, Value>, keys: &[(&str, Attribute)]) {
    for attr in Attribute::ALL {
        if let Some(value) = lookup(group, keys, attr) {
            store.set(attr, value.clone());
        }
    }
}

fn resolve(input: &Map<String, Value>, attr: Attribute) -> Option<&Value> {
    grouped(input, attr)
        .or_else(|| lookup(input, TOP_LEVEL_ALIASES, attr))
        .or_else(|| supplied(input, attr.name()))
}

fn grouped(input: &Map<String, Value>, attr: Attribute) -> Option<&Value> {
    if let Some(Value::Object(customer)) = input.get(CUSTOMER_GROUP) {
        if let Some(value) = lookup(customer, CUSTOMER_KEYS, attr) {
            return Some(value);
        }
    }

    match input.get(CALLBACK_GROUP) {
        Some(Value::Object(callback)) => lookup(callback, CALLBACK_KEYS, attr),
        Some(url @ Value::String(_))
            if matches!(attr, Attribute::PrimaryCallbackUrl | Attribute::SecondaryCallbackUrl) =>
        {
            Some(url)
        }
        _ => None,
    }
}

/// A key holding `null` counts as not supplied, so lower-priority keys and
/// the secondary-callback fallback still apply.
fn supplied<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|value| !value.is_null())
}

fn lookup<'a>(
    map: &'a Map<String, Value>,
    keys: &[(&str, Attribute)],
    attr: Attribute,
) -> Option<&'a Value> {
    keys.iter()
        .filter(|(_, target)| *target == attr)
        .find_map(|(key, _)| supplied(map, key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn applied(input: Value) -> AttributeStore {
        let mut store = AttributeStore::new();
        apply(&mut store, &input);
        store
    }

    #[test]
    fn nested_groups_resolve_to_canonical_keys() {
        let store = applied(json!({
            "customer": {
                "name": "Ariama Victor",
                "email": "contact@ovac4u.com",
                "phone": "+233553577261",
            },
            "callback": {
                "success": "https://example.com/ok",
                "error": "https://example.com/fail",
            },
            "amount": 10.89,
        }));

        assert_eq!(store.get(Attribute::CustomerName), Some(&json!("Ariama Victor")));
        assert_eq!(store.get(Attribute::CustomerEmail), Some(&json!("contact@ovac4u.com")));
        assert_eq!(store.get(Attribute::CustomerMsisdn), Some(&json!("+233553577261")));
        assert_eq!(store.get(Attribute::PrimaryCallbackUrl), Some(&json!("https://example.com/ok")));
        assert_eq!(store.get(Attribute::SecondaryCallbackUrl), Some(&json!("https://example.com/fail")));
        assert_eq!(store.get(Attribute::Amount), Some(&json!(10.89)));
    }

    #[test]
    fn group_beats_alias_beats_canonical() {
        let store = applied(json!({
            "customer": { "number": "group" },
            "msisdn": "alias",
            "customerMsisdn": "canonical",
        }));
        assert_eq!(store.get(Attribute::CustomerMsisdn), Some(&json!("group")));

        let store = applied(json!({ "msisdn": "alias", "customerMsisdn": "canonical" }));
        assert_eq!(store.get(Attribute::CustomerMsisdn), Some(&json!("alias")));

        let store = applied(json!({ "customerMsisdn": "canonical" }));
        assert_eq!(store.get(Attribute::CustomerMsisdn), Some(&json!("canonical")));
    }

    #[test]
    fn bare_callback_string_sets_both() {
        let store = applied(json!({ "callback": "https://example.com/cb" }));
        assert_eq!(store.get(Attribute::PrimaryCallbackUrl), Some(&json!("https://example.com/cb")));
        assert!(store.is_set(Attribute::SecondaryCallbackUrl));
        assert_eq!(store.get(Attribute::SecondaryCallbackUrl), Some(&json!("https://example.com/cb")));
    }

    #[test]
    fn expressive_callback_aliases() {
        let store = applied(json!({
            "callbackOnSuccess": "https://example.com/ok",
            "callbackOnFail": "https://example.com/fail",
        }));
        assert_eq!(store.get(Attribute::PrimaryCallbackUrl), Some(&json!("https://example.com/ok")));
        assert_eq!(store.get(Attribute::SecondaryCallbackUrl), Some(&json!("https://example.com/fail")));
    }

    #[test]
    fn unknown_keys_and_non_objects_are_ignored() {
        let store = applied(json!({ "nonsense": 1, "customer": "not a map" }));
        assert!(store.is_empty());

        let store = applied(json!(["amount", 10]));
        assert!(store.is_empty());
    }

    #[test]
    fn applying_twice_matches_applying_once() {
        let input = json!({
            "customer": { "msisdn": "+233553577261" },
            "callback": "https://example.com/cb",
            "reference": { "userId": 14028 },
            "feesOnCustomer": true,
        });

        let once = applied(input.clone());
        let mut twice = once.clone();
        apply(&mut twice, &input);

        assert_eq!(once, twice);
    }

    #[test]
    fn null_values_do_not_shadow_other_sources() {
        let store = applied(json!({
            "callback": { "success": "https://example.com/ok", "error": null },
        }));
        assert!(!store.is_set(Attribute::SecondaryCallbackUrl));
        assert_eq!(store.get(Attribute::SecondaryCallbackUrl), Some(&json!("https://example.com/ok")));
        assert_eq!(
            store.to_wire().get("SecondaryCallbackUrl"),
            Some(&json!("https://example.com/ok"))
        );

        let store = applied(json!({ "customer": { "phone": null }, "msisdn": "+233553577261" }));
        assert_eq!(store.get(Attribute::CustomerMsisdn), Some(&json!("+233553577261")));

        let store = applied(json!({ "customer": { "phone": null, "number": "+233553577261" } }));
        assert_eq!(store.get(Attribute::CustomerMsisdn), Some(&json!("+233553577261")));

        let store = applied(json!({ "msisdn": null, "customerMsisdn": "+233553577261" }));
        assert_eq!(store.get(Attribute::CustomerMsisdn), Some(&json!("+233553577261")));

        let store = applied(json!({ "token": null }));
        assert!(store.is_empty());
    }

    #[test]
    fn loosely_typed_scalars_are_normalized() {
        let store = applied(json!({ "msisdn": 233553577261u64, "feesOnCustomer": "true" }));
        assert_eq!(store.get(Attribute::CustomerMsisdn), Some(&json!("233553577261")));
        assert_eq!(store.get(Attribute::FeesOnCustomer), Some(&json!(true)));
    }

    #[test]
    fn customer_group_alone() {
        let mut store = AttributeStore::new();
        apply_customer(&mut store, &json!({ "number": "+233553577261" }));
        assert_eq!(store.get(Attribute::CustomerMsisdn), Some(&json!("+233553577261")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn callback_group_alone() {
        let mut store = AttributeStore::new();
        apply_callback(&mut store, &json!({ "callbackOnFail": "https://example.com/fail" }));
        assert_eq!(store.get(Attribute::SecondaryCallbackUrl), Some(&json!("https://example.com/fail")));
        assert_eq!(store.get(Attribute::PrimaryCallbackUrl), None);
    }
}
