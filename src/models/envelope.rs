use serde::{Deserialize, Serialize};
use serde_json::Value;

fn assume_success() -> bool {
    true
}

/// Wrapper used by the infrastructure, identity and tenant endpoints:
/// `{success, message, data, errorCode, timestamp}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    #[serde(default = "assume_success")]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Error body returned by the VM endpoints. The enveloped endpoints reuse
/// the `message` field, so one shape covers both.
///
/// Servers disagree on the type of everything except `message` (epoch
/// timestamps, string statuses, list-shaped details), so those fields stay
/// untyped and never make the body unreadable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    pub timestamp: Option<Value>,
    pub status: Option<Value>,
    pub error: Option<Value>,
    pub message: Option<Value>,
    pub path: Option<Value>,
    pub details: Option<Value>,
    pub error_code: Option<Value>,
}

impl ApiErrorBody {
    /// Read an error response body. Anything that is not a JSON object yields `None`.
    pub fn parse(body: &[u8]) -> Option<Self> {
        serde_json::from_slice(body).ok()
    }

    /// The server-supplied message, if it is a string carrying any text.
    pub fn server_message(&self) -> Option<&str> {
        self.message
            .as_ref()
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_without_data() {
        let env: Envelope<Vec<String>> =
            serde_json::from_value(json!({"success": true, "message": "deleted"})).unwrap();
        assert!(env.success);
        assert!(env.data.is_none());
    }

    #[test]
    fn test_error_body_blank_message_is_ignored() {
        let body: ApiErrorBody = serde_json::from_value(json!({"status": 500, "message": "  "})).unwrap();
        assert_eq!(body.server_message(), None);
    }

    #[test]
    fn test_error_body_tolerates_loose_field_types() {
        let raw = br#"{"timestamp":1704067200000,"status":"500","details":["name: must match"],"message":"quota exceeded"}"#;
        let body = ApiErrorBody::parse(raw).unwrap();
        assert_eq!(body.server_message(), Some("quota exceeded"));
    }

    #[test]
    fn test_error_body_non_string_message_is_ignored() {
        let body = ApiErrorBody::parse(br#"{"message":{"code":7}}"#).unwrap();
        assert_eq!(body.server_message(), None);
        assert!(ApiErrorBody::parse(b"<html>bad gateway</html>").is_none());
    }
}
