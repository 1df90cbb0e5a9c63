//! Browser (`wasm32`) wiring for [`webapp_bridge`].
//!
//! [`WindowTransport`] implements the host transport over the page `window`: the injected
//! native proxy, the published receiver globals, and `postMessage` to the parent frame. On
//! other targets it falls back to a shim that behaves like a page with no host. The
//! `#[wasm_bindgen]` facade in `js_api` exposes the client to JavaScript callers; the rules it
//! follows live in [`facade`] so they hold on every target.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod facade;
#[cfg(target_arch = "wasm32")]
pub mod js_api;
mod window;

use webapp_bridge::{create_bridge_client, BridgeClient, ClientOptions};

pub use window::{
    WindowTransport, NATIVE_POST_METHOD, NATIVE_PROXY_GLOBAL, RECEIVER_FUNCTION_GLOBAL,
    RECEIVER_METHOD, RECEIVER_OBJECT_GLOBAL,
};

/// Returns the page's bridge client over [`WindowTransport`], creating it on first call.
///
/// Later calls return the first client and ignore `options`.
pub fn web_app(options: ClientOptions) -> BridgeClient {
    create_bridge_client(options, || WindowTransport)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use webapp_bridge::MainButtonOptions;

    use super::*;

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn web_app_is_created_once_per_page() {
        let first = web_app(ClientOptions::new(
            MainButtonOptions::default().with_text("Checkout"),
        ));
        let second = web_app(ClientOptions::new(
            MainButtonOptions::default().with_text("Ignored"),
        ));

        assert!(BridgeClient::ptr_eq(&first, &second));
        assert_eq!(
            second.main_button_options(),
            MainButtonOptions::default().with_text("Checkout")
        );
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn web_app_reports_unavailable_parent_without_panicking() {
        let client = web_app(ClientOptions::default());
        assert!(client.post_command("web_app_ready").is_err());
        client.close();
    }
}
