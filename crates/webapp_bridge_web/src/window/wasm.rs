use js_sys::{Function, Object, Reflect};
use leptos::logging;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{MessageEvent, Window};
use webapp_bridge::{EventReceiver, InboundMessage, MessageSource, ParentMessageHandler};

use super::{
    NATIVE_POST_METHOD, NATIVE_PROXY_GLOBAL, RECEIVER_FUNCTION_GLOBAL, RECEIVER_METHOD,
    RECEIVER_OBJECT_GLOBAL,
};

fn window() -> Result<Window, String> {
    web_sys::window().ok_or_else(|| "window is unavailable in this context".to_string())
}

fn parent_of(window: &Window) -> Option<Window> {
    window.parent().ok().flatten()
}

fn js_error_to_string(err: JsValue) -> String {
    if let Some(text) = err.as_string() {
        return text;
    }
    if let Ok(message) = Reflect::get(&err, &JsValue::from_str("message")) {
        if let Some(text) = message.as_string() {
            return text;
        }
    }
    format!("{err:?}")
}

fn native_proxy(window: &Window) -> Option<JsValue> {
    Reflect::get(window, &JsValue::from_str(NATIVE_PROXY_GLOBAL))
        .ok()
        .filter(|proxy| !proxy.is_undefined() && !proxy.is_null())
}

pub fn is_embedded() -> bool {
    let Ok(window) = window() else {
        return false;
    };
    parent_of(&window).is_some_and(|parent| !Object::is(&parent, &window))
}

pub fn has_native_proxy() -> bool {
    window().ok().and_then(|window| native_proxy(&window)).is_some()
}

pub fn post_native(name: &str, data_json: &str) -> Result<(), String> {
    let window = window()?;
    let proxy = native_proxy(&window)
        .ok_or_else(|| format!("{NATIVE_PROXY_GLOBAL} is not available"))?;
    let post = Reflect::get(&proxy, &JsValue::from_str(NATIVE_POST_METHOD))
        .map_err(js_error_to_string)?
        .dyn_into::<Function>()
        .map_err(|_| format!("{NATIVE_PROXY_GLOBAL}.{NATIVE_POST_METHOD} is not a function"))?;
    post.call2(&proxy, &JsValue::from_str(name), &JsValue::from_str(data_json))
        .map(|_| ())
        .map_err(js_error_to_string)
}

pub fn post_to_parent(message_json: &str) -> Result<(), String> {
    let window = window()?;
    let parent = window
        .parent()
        .map_err(js_error_to_string)?
        .ok_or_else(|| "parent frame is unavailable".to_string())?;
    parent
        .post_message(&JsValue::from_str(message_json), "*")
        .map_err(js_error_to_string)
}

pub fn install_receiver(receiver: EventReceiver) -> Result<(), String> {
    let window = window()?;
    let receive = Closure::<dyn Fn(JsValue)>::wrap(Box::new(move |name: JsValue| {
        match name.as_string() {
            Some(name) => receiver.receive_event(&name),
            None => logging::warn!("ignoring non-string host event name: {name:?}"),
        }
    }))
    .into_js_value();

    // Both globals must resolve to the same function instance.
    let proxy = Object::new();
    Reflect::set(&proxy, &JsValue::from_str(RECEIVER_METHOD), &receive)
        .map_err(js_error_to_string)?;
    Reflect::set(&window, &JsValue::from_str(RECEIVER_OBJECT_GLOBAL), &proxy)
        .map_err(js_error_to_string)?;
    Reflect::set(&window, &JsValue::from_str(RECEIVER_FUNCTION_GLOBAL), &receive)
        .map_err(js_error_to_string)?;
    Ok(())
}

pub fn listen_parent_messages(handler: ParentMessageHandler) -> Result<(), String> {
    let window = window()?;
    let parent = parent_of(&window);
    let on_message = Closure::<dyn FnMut(MessageEvent)>::wrap(Box::new(move |event: MessageEvent| {
        let from_parent = match (event.source(), parent.as_ref()) {
            (Some(source), Some(parent)) => Object::is(&source, parent),
            _ => false,
        };
        handler.handle(InboundMessage {
            source: if from_parent {
                MessageSource::Parent
            } else {
                MessageSource::Other
            },
            data: event.data().as_string(),
        });
    }));
    window
        .add_event_listener_with_callback("message", on_message.as_ref().unchecked_ref())
        .map_err(js_error_to_string)?;
    on_message.forget();
    Ok(())
}
