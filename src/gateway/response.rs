use serde_json::{Map, Value};

use super::{GatewayResponse, TransportError};
use crate::error::{FieldError, GatewayError, PaymentError, Result};

const CODE_KEYS: &[&str] = &["ResponseCode", "responseCode", "code"];
const MESSAGE_KEYS: &[&str] = &["Message", "message"];
const ERRORS_KEYS: &[&str] = &["Errors", "errors"];

/// Classifies a gateway answer.
///
/// 2xx bodies are returned unmodified. Non-2xx answers carrying a response
/// code become [`PaymentError::Gateway`]; anything else is a transport error.
pub fn map_response(response: GatewayResponse) -> Result<Value> {
    if response.is_success() {
        if response.body.trim().is_empty() {
            return Ok(Value::Object(Map::new()));
        }
        return serde_json::from_str(&response.body).map_err(|e| {
            TransportError::InvalidResponse(format!("undecodable success body: {}", e)).into()
        });
    }

    let body: Value = serde_json::from_str(&response.body).map_err(|_| {
        TransportError::InvalidResponse(format!("status {} with unparseable body", response.status))
    })?;

    let Some(code) = first_of(&body, CODE_KEYS).and_then(code_text) else {
        return Err(TransportError::InvalidResponse(format!(
            "status {} without a response code",
            response.status
        ))
        .into());
    };

    let message = first_of(&body, MESSAGE_KEYS)
        .and_then(Value::as_str)
        .map(str::to_string);
    let errors = first_of(&body, ERRORS_KEYS)
        .map(field_errors)
        .unwrap_or_default();

    Err(PaymentError::Gateway(GatewayError {
        status: response.status,
        code,
        message,
        errors,
        body,
    }))
}

fn first_of<'a>(body: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    let map = body.as_object()?;
    keys.iter().find_map(|key| map.get(*key))
}

fn code_text(code: &Value) -> Option<String> {
    match code {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn field_errors(errors: &Value) -> Vec<FieldError> {
    let Some(items) = errors.as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let field = first_of(item, &["Field", "field"])?.as_str()?.to_string();
            let messages: Vec<String> = first_of(item, &["Messages", "messages"])
                .and_then(Value::as_array)
                .map(|m| m.iter().filter_map(Value::as_str).map(str::to_string).collect())
                .unwrap_or_default();
            Some(FieldError { field, messages })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_body_passes_through() {
        let payload = map_response(GatewayResponse::new(200, r#"{"X-Foo":"Bar"}"#)).expect("success");
        assert_eq!(payload, json!({ "X-Foo": "Bar" }));
    }

    #[test]
    fn empty_success_body_is_empty_object() {
        let payload = map_response(GatewayResponse::new(204, "")).expect("success");
        assert_eq!(payload, json!({}));
    }

    #[test]
    fn undecodable_success_body_is_transport_error() {
        let err = map_response(GatewayResponse::new(200, "<html>")).unwrap_err();
        assert!(err.is_transport());
    }

    #[test]
    fn coded_rejection_is_gateway_error() {
        let err = map_response(GatewayResponse::new(400, r#"{"ResponseCode":"4010"}"#)).unwrap_err();
        assert!(err.is_missing_parameter());
        assert_eq!(err.gateway_code(), Some("4010"));
    }

    #[test]
    fn rejection_details_are_captured() {
        let body = json!({
            "ResponseCode": "4010",
            "Message": "Validation errors",
            "Errors": [
                { "Field": "CustomerMsisdn", "Messages": ["The CustomerMsisdn field is required."] },
                { "Messages": ["dropped without a field"] },
            ],
        });
        let err = map_response(GatewayResponse::new(400, body.to_string())).unwrap_err();

        let PaymentError::Gateway(gateway) = err else {
            panic!("expected gateway error");
        };
        assert_eq!(gateway.message.as_deref(), Some("Validation errors"));
        assert_eq!(gateway.errors.len(), 1);
        assert_eq!(gateway.errors[0].field, "CustomerMsisdn");
        assert_eq!(gateway.body, body);
    }

    #[test]
    fn numeric_code_is_accepted() {
        let err = map_response(GatewayResponse::new(401, r#"{"code":4101}"#)).unwrap_err();
        assert_eq!(err.gateway_code(), Some("4101"));
        assert!(!err.is_missing_parameter());
    }

    #[test]
    fn uncoded_or_unparseable_failures_are_transport_errors() {
        let err = map_response(GatewayResponse::new(502, "Bad Gateway")).unwrap_err();
        assert!(err.is_transport());

        let err = map_response(GatewayResponse::new(500, r#"{"error":"boom"}"#)).unwrap_err();
        assert!(err.is_transport());
    }
}
