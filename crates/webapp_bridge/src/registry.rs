//! Per-context client registry.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::{client::BridgeClient, options::ClientOptions, transport::HostTransport};

/// Context key used by [`create_bridge_client`].
pub const DEFAULT_CONTEXT: &str = "default";

#[derive(Debug, Clone, Default)]
/// Holds at most one [`BridgeClient`] per context key. Entries are never replaced or removed.
pub struct ClientRegistry {
    clients: Rc<RefCell<HashMap<String, BridgeClient>>>,
}

impl ClientRegistry {
    /// Returns the client for `context`, constructing it from `options` and `transport` only
    /// when the context has none yet.
    pub fn get_or_create<T, F>(
        &self,
        context: &str,
        options: ClientOptions,
        transport: F,
    ) -> BridgeClient
    where
        T: HostTransport + 'static,
        F: FnOnce() -> T,
    {
        if let Some(existing) = self.get(context) {
            return existing;
        }
        // Construction runs the host handshake, which may call back into listeners; the map
        // borrow is not held across it.
        let client = BridgeClient::new(options, transport());
        self.clients
            .borrow_mut()
            .entry(context.to_string())
            .or_insert(client)
            .clone()
    }

    /// Returns the client registered for `context`.
    pub fn get(&self, context: &str) -> Option<BridgeClient> {
        self.clients.borrow().get(context).cloned()
    }

    /// Number of registered contexts.
    pub fn len(&self) -> usize {
        self.clients.borrow().len()
    }

    /// Returns `true` when no client has been created.
    pub fn is_empty(&self) -> bool {
        self.clients.borrow().is_empty()
    }
}

thread_local! {
    static GLOBAL_REGISTRY: ClientRegistry = ClientRegistry::default();
}

/// Returns the process-local registry.
pub fn client_registry() -> ClientRegistry {
    GLOBAL_REGISTRY.with(|registry| registry.clone())
}

/// Returns the page's client, creating it on first call.
///
/// Later calls return the first client regardless of `options`; `transport` is only invoked
/// when a client is constructed.
pub fn create_bridge_client<T, F>(options: ClientOptions, transport: F) -> BridgeClient
where
    T: HostTransport + 'static,
    F: FnOnce() -> T,
{
    client_registry().get_or_create(DEFAULT_CONTEXT, options, transport)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{button::MainButtonOptions, transport::RecordingTransport};

    #[test]
    fn second_request_returns_first_client() {
        let registry = ClientRegistry::default();
        let first_transport = RecordingTransport::with_native_proxy();
        let second_transport = RecordingTransport::with_native_proxy();

        let first = registry.get_or_create(
            "page",
            ClientOptions::new(MainButtonOptions::default().with_text("First")),
            || first_transport.clone(),
        );
        let second = registry.get_or_create(
            "page",
            ClientOptions::new(MainButtonOptions::default().with_text("Second")).with_debug(true),
            || second_transport.clone(),
        );

        assert!(BridgeClient::ptr_eq(&first, &second));
        assert_eq!(second.main_button_options().text.as_deref(), Some("First"));
        assert!(!second.is_debug());
        assert!(second_transport.posts().is_empty());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn contexts_are_independent() {
        let registry = ClientRegistry::default();
        let a = registry.get_or_create("a", ClientOptions::default(), RecordingTransport::new);
        let b = registry.get_or_create("b", ClientOptions::default(), RecordingTransport::new);

        assert!(!BridgeClient::ptr_eq(&a, &b));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn global_factory_is_a_singleton() {
        let first = create_bridge_client(
            ClientOptions::new(MainButtonOptions::default().with_text("One")),
            RecordingTransport::new,
        );
        let second = create_bridge_client(
            ClientOptions::new(MainButtonOptions::default().with_text("Two")),
            RecordingTransport::new,
        );

        assert!(BridgeClient::ptr_eq(&first, &second));
        assert_eq!(first.main_button_options().text.as_deref(), Some("One"));
        assert!(client_registry().get(DEFAULT_CONTEXT).is_some());
    }
}
