//! Cross-frame message envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::BridgeError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// JSON body exchanged with the parent frame: `{"eventType": .., "eventData": ..}`.
pub struct MessageEnvelope {
    /// Event or command name.
    #[serde(rename = "eventType")]
    pub event_type: String,
    /// Payload; `null` when the sender omitted it.
    #[serde(rename = "eventData", default)]
    pub event_data: Value,
}

impl MessageEnvelope {
    /// Creates an envelope with the given payload.
    pub fn new(event_type: impl Into<String>, event_data: impl Into<Value>) -> Self {
        Self {
            event_type: event_type.into(),
            event_data: event_data.into(),
        }
    }

    /// Parses an envelope from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::MalformedEnvelope`] when `raw` is not a JSON object carrying
    /// `eventType`. Other JSON values, such as a bare string, are malformed too.
    pub fn parse(raw: &str) -> Result<Self, BridgeError> {
        serde_json::from_str(raw).map_err(|err| BridgeError::MalformedEnvelope(err.to_string()))
    }

    /// Encodes the envelope as JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Serialize`] when encoding fails.
    pub fn to_json(&self) -> Result<String, BridgeError> {
        serde_json::to_string(self).map_err(|err| BridgeError::Serialize(err.to_string()))
    }
}

/// Encodes an outbound envelope without first converting `data` into a [`Value`].
pub(crate) fn encode_outbound<T: Serialize + ?Sized>(
    event_type: &str,
    data: &T,
) -> Result<String, BridgeError> {
    #[derive(Serialize)]
    struct Outbound<'a, T: Serialize + ?Sized> {
        #[serde(rename = "eventType")]
        event_type: &'a str,
        #[serde(rename = "eventData")]
        event_data: &'a T,
    }

    serde_json::to_string(&Outbound {
        event_type,
        event_data: data,
    })
    .map_err(|err| BridgeError::Serialize(err.to_string()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_camel_case_wire_fields() {
        let envelope = MessageEnvelope::parse(r#"{"eventType":"foo","eventData":"bar"}"#)
            .expect("parse envelope");
        assert_eq!(envelope, MessageEnvelope::new("foo", "bar"));
    }

    #[test]
    fn missing_event_data_decodes_as_null() {
        let envelope = MessageEnvelope::parse(r#"{"eventType":"iframe_ready"}"#).expect("parse");
        assert_eq!(envelope.event_data, Value::Null);
    }

    #[test]
    fn missing_event_type_is_malformed() {
        let err = MessageEnvelope::parse(r#"{"eventData":"bar"}"#).expect_err("should fail");
        assert!(matches!(err, BridgeError::MalformedEnvelope(_)));
    }

    #[test]
    fn invalid_json_is_malformed() {
        let err = MessageEnvelope::parse("{not json").expect_err("should fail");
        assert!(matches!(err, BridgeError::MalformedEnvelope(_)));
    }

    #[test]
    fn json_values_other_than_objects_are_malformed() {
        for raw in ["\"hello\"", "42", "null", "[]"] {
            let err = MessageEnvelope::parse(raw).expect_err("should fail");
            assert!(matches!(err, BridgeError::MalformedEnvelope(_)), "{raw}");
        }
    }

    #[test]
    fn non_string_payload_is_kept() {
        let envelope =
            MessageEnvelope::parse(r##"{"eventType":"theme_changed","eventData":{"bg":"#fff"}}"##)
                .expect("parse");
        assert_eq!(envelope.event_data, json!({"bg": "#fff"}));
    }

    #[test]
    fn ack_envelope_wire_text() {
        let raw = MessageEnvelope::new("iframe_ready", "")
            .to_json()
            .expect("encode");
        assert_eq!(raw, r#"{"eventType":"iframe_ready","eventData":""}"#);
    }

    #[test]
    fn outbound_encoding_matches_envelope_encoding() {
        let data = json!({"text": "Pay", "is_visible": true});
        let direct = encode_outbound("web_app_setup_main_button", &data).expect("encode");
        let via_envelope = MessageEnvelope::new("web_app_setup_main_button", data)
            .to_json()
            .expect("encode");
        assert_eq!(direct, via_envelope);
    }
}
