//! JavaScript facade over the page's bridge client.
//!
//! Keeps the callback-shaped API JS callers expect: `postEvent` reports through
//! `callback()` / `callback(error)` instead of returning a result, and no method throws.

use std::cell::RefCell;

use js_sys::Function;
use leptos::logging;
use serde::Serialize;
use serde_json::Value;
use serde_wasm_bindgen::{from_value, Serializer};
use wasm_bindgen::prelude::*;
use webapp_bridge::{BridgeClient, BridgeError, ListenerId};

use crate::{facade, web_app};

thread_local! {
    static WEB_APP_HANDLE: RefCell<Option<JsValue>> = RefCell::new(None);
}

#[wasm_bindgen(js_name = WebApp)]
/// Handle to the page's bridge client.
pub struct JsWebApp {
    client: BridgeClient,
}

/// Returns the page's `WebApp` handle, creating it from `options` on first call.
///
/// Every call returns the same JS object. Later `options` are ignored.
#[wasm_bindgen(js_name = createWebApp)]
pub fn create_web_app(options: JsValue) -> JsValue {
    if let Some(handle) = WEB_APP_HANDLE.with(|slot| slot.borrow().clone()) {
        return handle;
    }
    let options = facade::client_options_from(decode_optional(options, "createWebApp options"));
    let handle = JsValue::from(JsWebApp {
        client: web_app(options),
    });
    WEB_APP_HANDLE.with(|slot| slot.replace(Some(handle.clone())));
    handle
}

fn to_js_error(err: &BridgeError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

fn to_js_value(value: &Value) -> JsValue {
    value
        .serialize(&Serializer::json_compatible())
        .unwrap_or(JsValue::UNDEFINED)
}

fn from_js_value(value: JsValue, absent: Value) -> Result<Value, BridgeError> {
    if value.is_undefined() {
        return Ok(absent);
    }
    from_value(value).map_err(|err| BridgeError::Serialize(err.to_string()))
}

fn decode_optional(value: JsValue, what: &str) -> Option<Value> {
    if value.is_undefined() || value.is_null() {
        return None;
    }
    match from_value(value) {
        Ok(value) => Some(value),
        Err(err) => {
            logging::warn!("ignoring undecodable {what}: {err}");
            None
        }
    }
}

fn report(callback: &Function, outcome: Result<JsValue, JsValue>) {
    if let Err(err) = outcome {
        logging::warn!("bridge callback {:?} threw: {err:?}", callback.name());
    }
}

#[wasm_bindgen(js_class = WebApp)]
impl JsWebApp {
    /// Merges a partial main-button configuration and re-sends the full state.
    #[wasm_bindgen(js_name = postMainButtonOptions)]
    pub fn post_main_button_options(&self, options: JsValue) {
        facade::post_main_button_patch(
            &self.client,
            decode_optional(options, "main button options"),
        );
    }

    /// Subscribes a no-argument callback to main-button presses.
    #[wasm_bindgen(js_name = onMainButtonPress)]
    pub fn on_main_button_press(&self, callback: Function) -> f64 {
        let id = self
            .client
            .on_main_button_press(move || report(&callback, callback.call0(&JsValue::NULL)));
        id.0 as f64
    }

    /// Subscribes a no-argument callback to back-button presses.
    #[wasm_bindgen(js_name = onBackButtonPress)]
    pub fn on_back_button_press(&self, callback: Function) -> f64 {
        let id = self
            .client
            .on_back_button_press(move || report(&callback, callback.call0(&JsValue::NULL)));
        id.0 as f64
    }

    /// Asks the host to close the app.
    pub fn close(&self) {
        self.client.close();
    }

    /// Sends a command; `callback` is invoked with no arguments on success or with an `Error`.
    #[wasm_bindgen(js_name = postEvent)]
    pub fn post_event(&self, name: &str, callback: Option<Function>, data: JsValue) {
        let payload = from_js_value(data, Value::String(String::new()));
        facade::post_event_reporting(
            &self.client,
            name,
            payload,
            callback.map(|callback| {
                move |outcome: Option<BridgeError>| {
                    let result = match outcome {
                        None => callback.call0(&JsValue::NULL),
                        Some(err) => callback.call1(&JsValue::NULL, &to_js_error(&err)),
                    };
                    report(&callback, result);
                }
            }),
        );
    }

    /// Subscribes `callback(detail)` to events named `name`. Returns an id for removal.
    #[wasm_bindgen(js_name = addEventListener)]
    pub fn add_event_listener(&self, name: &str, callback: Function) -> f64 {
        let id = self.client.add_event_listener(name, move |event| {
            report(
                &callback,
                callback.call1(&JsValue::NULL, &to_js_value(&event.detail)),
            );
        });
        id.0 as f64
    }

    /// Removes a subscription created by `addEventListener` or the press helpers.
    #[wasm_bindgen(js_name = removeEventListener)]
    pub fn remove_event_listener(&self, name: &str, id: f64) -> bool {
        self.client
            .remove_event_listener(name, ListenerId(id as u64))
    }

    /// Dispatches an event to local listeners.
    #[wasm_bindgen(js_name = dispatchEvent)]
    pub fn dispatch_event(&self, name: &str, detail: JsValue) {
        facade::dispatch_reporting(&self.client, name, from_js_value(detail, Value::Null));
    }
}
