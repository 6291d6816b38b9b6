//! Uniform response envelope.
//!
//! Every outcome, success or failure, is wrapped in the same three-field
//! shape: payload, error flag, message. Unmatched routes and internal
//! failures use it too.

use serde::{Deserialize, Serialize};

/// The `{data, error, message}` response shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
    pub error: bool,
    pub message: String,
}

impl<T> Envelope<T> {
    /// Successful outcome carrying a payload.
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            data: Some(data),
            error: false,
            message: message.into(),
        }
    }

    /// Successful outcome with no payload (e.g. delete).
    pub fn ok_empty(message: impl Into<String>) -> Self {
        Self {
            data: None,
            error: false,
            message: message.into(),
        }
    }

    /// Failed outcome; the payload is always null.
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            data: None,
            error: true,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn ok_wraps_the_payload() {
        let envelope = Envelope::ok(json!({ "id": "avatar_1" }), "created");
        let value = serde_json::to_value(&envelope).expect("serialise");
        assert_eq!(value["data"]["id"], json!("avatar_1"));
        assert_eq!(value["error"], json!(false));
        assert_eq!(value["message"], json!("created"));
    }

    #[rstest]
    fn fail_always_carries_a_null_payload() {
        let envelope = Envelope::<serde_json::Value>::fail("Avatar not found");
        let value = serde_json::to_value(&envelope).expect("serialise");
        assert_eq!(value["data"], serde_json::Value::Null);
        assert_eq!(value["error"], json!(true));
    }
}
