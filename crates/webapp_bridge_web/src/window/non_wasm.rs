use webapp_bridge::{EventReceiver, ParentMessageHandler};

fn unsupported() -> String {
    "Browser window APIs are only available when compiled for wasm32".to_string()
}

pub fn is_embedded() -> bool {
    false
}

pub fn has_native_proxy() -> bool {
    false
}

pub fn post_native(_name: &str, _data_json: &str) -> Result<(), String> {
    Err(unsupported())
}

pub fn post_to_parent(_message_json: &str) -> Result<(), String> {
    Err(unsupported())
}

pub fn install_receiver(_receiver: EventReceiver) -> Result<(), String> {
    Ok(())
}

pub fn listen_parent_messages(_handler: ParentMessageHandler) -> Result<(), String> {
    Ok(())
}
