//! Construction-time client configuration.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{button::MainButtonOptions, error::BridgeError};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Options supplied once when the client is created.
pub struct ClientOptions {
    /// Initial main-button configuration.
    #[serde(default)]
    pub main_button: MainButtonOptions,
    /// Secondary-button configuration. Stored as given and not interpreted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back_button: Option<Value>,
    /// Traces outbound commands to the diagnostic log.
    #[serde(default)]
    pub debug: bool,
}

impl ClientOptions {
    /// Creates options with the given initial main-button configuration.
    pub fn new(main_button: MainButtonOptions) -> Self {
        Self {
            main_button,
            ..Self::default()
        }
    }

    /// Attaches a secondary-button configuration.
    pub fn with_back_button(mut self, back_button: Value) -> Self {
        self.back_button = Some(back_button);
        self
    }

    /// Enables or disables outbound command tracing.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Parses options from JSON text such as `{"mainButton": {"text": "Go"}, "debug": true}`.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidOptions`] when `raw` does not decode.
    pub fn from_json(raw: &str) -> Result<Self, BridgeError> {
        serde_json::from_str(raw).map_err(|err| BridgeError::InvalidOptions(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_camel_case_options() {
        let options = ClientOptions::from_json(
            r#"{"mainButton":{"text":"Go","is_visible":true},"backButton":{"is_visible":false},"debug":true}"#,
        )
        .expect("parse options");

        assert_eq!(
            options,
            ClientOptions::new(MainButtonOptions::default().with_text("Go").with_visible(true))
                .with_back_button(json!({"is_visible": false}))
                .with_debug(true)
        );
    }

    #[test]
    fn omitted_fields_use_defaults() {
        let options = ClientOptions::from_json("{}").expect("parse options");
        assert_eq!(options, ClientOptions::default());
        assert!(!options.debug);
    }

    #[test]
    fn rejects_wrongly_typed_fields() {
        let err = ClientOptions::from_json(r#"{"debug":"yes"}"#).expect_err("should fail");
        assert!(matches!(err, BridgeError::InvalidOptions(_)));
    }
}
