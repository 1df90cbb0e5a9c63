//! Page-window transport.
//!
//! Routes [`HostTransport`] calls to the `wasm32` browser implementation or to a non-wasm shim
//! that behaves like a top-level page with no host.

use webapp_bridge::{EventReceiver, HostTransport, ParentMessageHandler};

#[cfg(not(target_arch = "wasm32"))]
mod non_wasm;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(not(target_arch = "wasm32"))]
use non_wasm as imp;
#[cfg(target_arch = "wasm32")]
use wasm as imp;

/// Global object the host injects to receive commands directly.
pub const NATIVE_PROXY_GLOBAL: &str = "TelegramWebviewProxy";
/// Command method on [`NATIVE_PROXY_GLOBAL`].
pub const NATIVE_POST_METHOD: &str = "postEvent";
/// Global object published for the host to deliver events.
pub const RECEIVER_OBJECT_GLOBAL: &str = "TelegramGameProxy";
/// Event method on [`RECEIVER_OBJECT_GLOBAL`].
pub const RECEIVER_METHOD: &str = "receiveEvent";
/// Bare global function bound to the same receiver as [`RECEIVER_OBJECT_GLOBAL`].
pub const RECEIVER_FUNCTION_GLOBAL: &str = "TelegramGameProxy_receiveEvent";

#[derive(Debug, Clone, Copy, Default)]
/// [`HostTransport`] backed by the current page's `window`.
pub struct WindowTransport;

impl HostTransport for WindowTransport {
    fn is_embedded(&self) -> bool {
        imp::is_embedded()
    }

    fn has_native_proxy(&self) -> bool {
        imp::has_native_proxy()
    }

    fn post_native(&self, name: &str, data_json: &str) -> Result<(), String> {
        imp::post_native(name, data_json)
    }

    fn post_to_parent(&self, message_json: &str) -> Result<(), String> {
        imp::post_to_parent(message_json)
    }

    fn install_receiver(&self, receiver: EventReceiver) -> Result<(), String> {
        imp::install_receiver(receiver)
    }

    fn listen_parent_messages(&self, handler: ParentMessageHandler) -> Result<(), String> {
        imp::listen_parent_messages(handler)
    }
}
