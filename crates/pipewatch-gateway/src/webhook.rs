//! Webhook payload parsing.
//!
//! Notifications arrive as JSON with `{data: {id}}` at minimum; the id may
//! be a string or a number depending on the notification type, so it is
//! normalized to a string here.

use serde_json::Value;

/// Extract the payment id from a notification payload, if present.
pub fn payment_id(payload: &Value) -> Option<String> {
    match payload.get("data")?.get("id")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_string_and_numeric_ids() {
        assert_eq!(payment_id(&json!({"data": {"id": "123"}})), Some("123".to_string()));
        assert_eq!(payment_id(&json!({"data": {"id": 123}})), Some("123".to_string()));
    }

    #[test]
    fn missing_or_malformed_data_yields_none() {
        assert_eq!(payment_id(&json!({})), None);
        assert_eq!(payment_id(&json!({"data": {}})), None);
        assert_eq!(payment_id(&json!({"data": {"id": null}})), None);
        assert_eq!(payment_id(&json!({"action": "payment.updated"})), None);
    }
}
