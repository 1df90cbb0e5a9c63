//! Target-independent rules behind the JavaScript facade.
//!
//! JS callers never see a thrown error from the facade: absent or undecodable options fall back
//! to defaults with a warning, and `postEvent` outcomes are reported through the caller's
//! callback.

use leptos::logging;
use serde_json::Value;
use webapp_bridge::{BridgeClient, BridgeError, ClientOptions, MainButtonOptions};

/// Decodes `createWebApp` options. Absent, `null`, or invalid input yields the defaults.
pub fn client_options_from(value: Option<Value>) -> ClientOptions {
    match value {
        None | Some(Value::Null) => ClientOptions::default(),
        Some(value) => serde_json::from_value(value).unwrap_or_else(|err| {
            logging::warn!("{}", BridgeError::InvalidOptions(err.to_string()));
            ClientOptions::default()
        }),
    }
}

/// Decodes a `postMainButtonOptions` patch. Absent, `null`, or invalid input is an empty patch.
pub fn main_button_patch_from(value: Option<Value>) -> MainButtonOptions {
    match value {
        None | Some(Value::Null) => MainButtonOptions::default(),
        Some(value) => serde_json::from_value(value).unwrap_or_else(|err| {
            logging::warn!("{}", BridgeError::InvalidOptions(err.to_string()));
            MainButtonOptions::default()
        }),
    }
}

/// Applies a main-button patch, logging a failed send.
pub fn post_main_button_patch(client: &BridgeClient, value: Option<Value>) {
    let patch = main_button_patch_from(value);
    if let Err(err) = client.post_main_button_options(&patch) {
        logging::warn!("main button update failed: {err}");
    }
}

/// Sends `name` with `payload` and reports the outcome to `callback`.
///
/// `callback` receives `None` on success and the error otherwise, including a payload that
/// failed to decode. Without a callback, failures are logged.
pub fn post_event_reporting<F>(
    client: &BridgeClient,
    name: &str,
    payload: Result<Value, BridgeError>,
    callback: Option<F>,
) where
    F: FnOnce(Option<BridgeError>),
{
    let result = payload.and_then(|payload| client.post_event(name, &payload));
    match callback {
        Some(callback) => callback(result.err()),
        None => {
            if let Err(err) = result {
                logging::warn!("bridge command `{name}` failed: {err}");
            }
        }
    }
}

/// Dispatches a decoded detail to local listeners; an undecodable detail is logged and dropped.
pub fn dispatch_reporting(client: &BridgeClient, name: &str, detail: Result<Value, BridgeError>) {
    match detail {
        Ok(detail) => client.dispatch_event(name, detail),
        Err(err) => logging::warn!("dropping `{name}` dispatch: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use pretty_assertions::assert_eq;
    use serde_json::json;
    use webapp_bridge::{RecordedPost, RecordingTransport};

    use super::*;

    fn client_over(transport: &RecordingTransport) -> BridgeClient {
        BridgeClient::new(ClientOptions::default(), transport.clone())
    }

    fn capture() -> (
        Rc<RefCell<Vec<Option<BridgeError>>>>,
        impl FnOnce(Option<BridgeError>),
    ) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |outcome| sink.borrow_mut().push(outcome))
    }

    #[test]
    fn native_proxy_failure_reaches_callback_as_error() {
        let transport = RecordingTransport::with_native_proxy();
        let client = client_over(&transport);
        transport.fail_native_with(Some("proxy threw"));
        let (seen, callback) = capture();

        post_event_reporting(&client, "web_app_ready", Ok(json!("")), Some(callback));

        assert_eq!(
            *seen.borrow(),
            vec![Some(BridgeError::Transport("proxy threw".to_string()))]
        );
    }

    #[test]
    fn successful_send_calls_back_without_error() {
        let transport = RecordingTransport::with_native_proxy();
        let client = client_over(&transport);
        transport.clear_posts();
        let (seen, callback) = capture();

        post_event_reporting(&client, "web_app_ready", Ok(json!("")), Some(callback));

        assert_eq!(*seen.borrow(), vec![None]);
        assert_eq!(
            transport.posts(),
            vec![RecordedPost::Native {
                name: "web_app_ready".to_string(),
                data: "\"\"".to_string(),
            }]
        );
    }

    #[test]
    fn undecodable_payload_reaches_callback_without_sending() {
        let transport = RecordingTransport::with_native_proxy();
        let client = client_over(&transport);
        transport.clear_posts();
        let (seen, callback) = capture();
        let payload = Err(BridgeError::Serialize("cyclic object".to_string()));

        post_event_reporting(&client, "web_app_ready", payload, Some(callback));

        assert_eq!(
            *seen.borrow(),
            vec![Some(BridgeError::Serialize("cyclic object".to_string()))]
        );
        assert!(transport.posts().is_empty());
    }

    #[test]
    fn failure_without_callback_is_swallowed() {
        let transport = RecordingTransport::with_native_proxy();
        let client = client_over(&transport);
        transport.fail_native_with(Some("proxy threw"));

        post_event_reporting::<fn(Option<BridgeError>)>(&client, "x", Ok(json!("")), None);
    }

    #[test]
    fn absent_or_invalid_options_fall_back_to_defaults() {
        assert_eq!(client_options_from(None), ClientOptions::default());
        assert_eq!(client_options_from(Some(Value::Null)), ClientOptions::default());
        assert_eq!(
            client_options_from(Some(json!({ "mainButton": "not an object" }))),
            ClientOptions::default()
        );
        assert_eq!(
            client_options_from(Some(json!({ "mainButton": { "text": "Pay" } }))),
            ClientOptions::new(MainButtonOptions::default().with_text("Pay"))
        );
    }

    #[test]
    fn absent_or_invalid_patch_leaves_button_state_unchanged() {
        let transport = RecordingTransport::with_native_proxy();
        let client = BridgeClient::new(
            ClientOptions::new(MainButtonOptions::default().with_text("Pay")),
            transport.clone(),
        );

        post_main_button_patch(&client, None);
        post_main_button_patch(&client, Some(Value::Null));
        post_main_button_patch(&client, Some(json!({ "is_visible": "yes" })));

        assert_eq!(
            client.main_button_options(),
            MainButtonOptions::default().with_text("Pay")
        );
    }

    #[test]
    fn undecodable_dispatch_detail_is_dropped() {
        let transport = RecordingTransport::new();
        let client = client_over(&transport);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        client.add_event_listener("custom", move |event| {
            sink.borrow_mut().push(event.detail.clone())
        });

        dispatch_reporting(&client, "custom", Err(BridgeError::Serialize("bad".to_string())));
        dispatch_reporting(&client, "custom", Ok(json!({ "n": 1 })));

        assert_eq!(*seen.borrow(), vec![json!({ "n": 1 })]);
    }
}
