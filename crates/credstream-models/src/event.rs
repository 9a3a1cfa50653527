//! Inbound subscription events.
//!
//! A [`SubscriptionEvent`] is what the transport hands to a stream handler
//! for every message received on a subscribed topic. The body is decoded once
//! on arrival; a body that is not valid JSON is kept as "no body" so the
//! handler can report it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::credential::{json_kind, CredentialPayload};
use crate::error::PayloadError;

/// A message delivered on a subscribed topic.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SubscriptionEvent {
    /// Topic the message arrived on.
    pub topic: String,
    /// Decoded JSON body, `None` if the raw payload was not JSON.
    pub message: Option<Value>,
    /// Time (UTC) at which the message was received.
    pub received_at: DateTime<Utc>,
}

impl SubscriptionEvent {
    /// Wrap an already-decoded JSON body.
    pub fn new(topic: impl Into<String>, message: Value) -> Self {
        Self {
            topic: topic.into(),
            message: Some(message),
            received_at: Utc::now(),
        }
    }

    /// Decode a raw transport payload.
    ///
    /// Bytes that are not valid JSON yield an event with no body.
    pub fn from_bytes(topic: impl Into<String>, payload: &[u8]) -> Self {
        Self {
            topic: topic.into(),
            message: serde_json::from_slice(payload).ok(),
            received_at: Utc::now(),
        }
    }

    /// Extract the credential payload carried by this event.
    pub fn credential_payload(&self) -> Result<CredentialPayload, PayloadError> {
        match &self.message {
            None => Err(PayloadError::MissingBody),
            Some(Value::Object(map)) => CredentialPayload::try_from(map.clone()),
            Some(other) => Err(PayloadError::NotAnObject {
                kind: json_kind(other).to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::AccessType;
    use serde_json::json;

    const TOPIC: &str = "greengrass.influxdb.token.response";

    #[test]
    fn from_bytes_decodes_json() {
        let event = SubscriptionEvent::from_bytes(TOPIC, br#"{"InfluxDBTokenAccessType":"RO"}"#);
        assert_eq!(event.topic, TOPIC);
        assert_eq!(event.message, Some(json!({"InfluxDBTokenAccessType": "RO"})));
    }

    #[test]
    fn from_bytes_keeps_non_json_as_missing_body() {
        let event = SubscriptionEvent::from_bytes(TOPIC, b"\x00\x01not json");
        assert!(event.message.is_none());
        assert_eq!(event.credential_payload().unwrap_err(), PayloadError::MissingBody);
    }

    #[test]
    fn extracts_payload_from_object() {
        let event = SubscriptionEvent::new(TOPIC, json!({"InfluxDBTokenAccessType": "RW", "token": "xyz"}));
        let payload = event.credential_payload().unwrap();
        assert_eq!(payload.access_type(), &AccessType::ReadWrite);
    }

    #[test]
    fn non_object_body_is_rejected() {
        let event = SubscriptionEvent::new(TOPIC, json!(["RO"]));
        assert_eq!(
            event.credential_payload().unwrap_err(),
            PayloadError::NotAnObject {
                kind: "array".into()
            }
        );
    }

    #[test]
    fn empty_object_is_rejected() {
        let event = SubscriptionEvent::new(TOPIC, json!({}));
        assert_eq!(event.credential_payload().unwrap_err(), PayloadError::Empty);
    }
}
