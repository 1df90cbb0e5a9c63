//! Host transport capability and in-memory adapters.
//!
//! [`HostTransport`] is the seam between [`crate::BridgeClient`] and the page it runs in. The
//! browser implementation lives in `webapp_bridge_web`; [`RecordingTransport`] stands in for it
//! in tests and native tooling.

use std::{cell::RefCell, rc::Rc};

use crate::envelope::MessageEnvelope;

#[derive(Clone)]
/// Inbound receiver the host invokes with an event name.
///
/// One handle backs every shape the host may call (bare function or method on a proxy object).
pub struct EventReceiver {
    inner: Rc<dyn Fn(&str)>,
}

impl EventReceiver {
    /// Wraps a receiver callback.
    pub fn new(receive: impl Fn(&str) + 'static) -> Self {
        Self {
            inner: Rc::new(receive),
        }
    }

    /// Delivers a host event by name.
    pub fn receive_event(&self, name: &str) {
        (self.inner)(name);
    }

    /// Returns `true` when both handles share the same callback.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.inner, &b.inner)
    }
}

impl std::fmt::Debug for EventReceiver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("EventReceiver")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Origin of a cross-frame message relative to the current page.
pub enum MessageSource {
    /// The message came from exactly the parent frame.
    Parent,
    /// Any other window, worker, or an unknown source.
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Cross-frame message as observed by the page.
pub struct InboundMessage {
    /// Where the message came from.
    pub source: MessageSource,
    /// Message body when it was text; `None` for non-string payloads.
    pub data: Option<String>,
}

impl InboundMessage {
    /// Text message from the parent frame.
    pub fn from_parent(data: impl Into<String>) -> Self {
        Self {
            source: MessageSource::Parent,
            data: Some(data.into()),
        }
    }

    /// Text message from a window other than the parent.
    pub fn from_other(data: impl Into<String>) -> Self {
        Self {
            source: MessageSource::Other,
            data: Some(data.into()),
        }
    }
}

#[derive(Clone)]
/// Callback installed for cross-frame messages.
pub struct ParentMessageHandler {
    inner: Rc<dyn Fn(InboundMessage)>,
}

impl ParentMessageHandler {
    /// Wraps a message callback.
    pub fn new(handle: impl Fn(InboundMessage) + 'static) -> Self {
        Self {
            inner: Rc::new(handle),
        }
    }

    /// Delivers one message.
    pub fn handle(&self, message: InboundMessage) {
        (self.inner)(message);
    }
}

impl std::fmt::Debug for ParentMessageHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ParentMessageHandler")
    }
}

/// Page-level capabilities the client needs from its host environment.
pub trait HostTransport {
    /// Returns `true` when the page runs inside a parent frame distinct from itself.
    fn is_embedded(&self) -> bool;

    /// Returns `true` when the host injected a native proxy. Checked before every send.
    fn has_native_proxy(&self) -> bool;

    /// Sends a command through the native proxy with its JSON-encoded payload.
    fn post_native(&self, name: &str, data_json: &str) -> Result<(), String>;

    /// Posts JSON text to the parent frame.
    fn post_to_parent(&self, message_json: &str) -> Result<(), String>;

    /// Publishes `receiver` as the page's inbound host-event entry points.
    fn install_receiver(&self, receiver: EventReceiver) -> Result<(), String>;

    /// Subscribes `handler` to the page's cross-frame messages for the page lifetime.
    fn listen_parent_messages(&self, handler: ParentMessageHandler) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Transport for contexts without a host: not embedded, no proxy, sends succeed silently.
pub struct NoopTransport;

impl HostTransport for NoopTransport {
    fn is_embedded(&self) -> bool {
        false
    }

    fn has_native_proxy(&self) -> bool {
        false
    }

    fn post_native(&self, _name: &str, _data_json: &str) -> Result<(), String> {
        Ok(())
    }

    fn post_to_parent(&self, _message_json: &str) -> Result<(), String> {
        Ok(())
    }

    fn install_receiver(&self, _receiver: EventReceiver) -> Result<(), String> {
        Ok(())
    }

    fn listen_parent_messages(&self, _handler: ParentMessageHandler) -> Result<(), String> {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Outbound send captured by [`RecordingTransport`].
pub enum RecordedPost {
    /// Command delivered through the native proxy.
    Native {
        /// Command name.
        name: String,
        /// JSON-encoded payload.
        data: String,
    },
    /// JSON text posted to the parent frame.
    Parent(String),
}

impl RecordedPost {
    /// Command name of the post; parent posts are decoded as envelopes.
    pub fn command_name(&self) -> Option<String> {
        match self {
            Self::Native { name, .. } => Some(name.clone()),
            Self::Parent(raw) => MessageEnvelope::parse(raw).ok().map(|env| env.event_type),
        }
    }
}

#[derive(Debug, Default)]
struct RecordingState {
    embedded: bool,
    native_proxy: bool,
    native_failure: Option<String>,
    parent_failure: Option<String>,
    install_failure: Option<String>,
    posts: Vec<RecordedPost>,
    receiver: Option<EventReceiver>,
    handler: Option<ParentMessageHandler>,
}

#[derive(Debug, Clone, Default)]
/// In-memory transport that records sends and lets callers play the host side.
///
/// Clones share state, so a test can hand one clone to the client and inspect another.
pub struct RecordingTransport {
    inner: Rc<RefCell<RecordingState>>,
}

impl RecordingTransport {
    /// Top-level page without a native proxy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Page embedded in a parent frame.
    pub fn embedded() -> Self {
        let transport = Self::default();
        transport.inner.borrow_mut().embedded = true;
        transport
    }

    /// Page with an injected native proxy.
    pub fn with_native_proxy() -> Self {
        let transport = Self::default();
        transport.inner.borrow_mut().native_proxy = true;
        transport
    }

    /// Adds or removes the native proxy.
    pub fn set_native_proxy(&self, present: bool) {
        self.inner.borrow_mut().native_proxy = present;
    }

    /// Makes subsequent native sends fail with `message`; `None` restores success.
    pub fn fail_native_with(&self, message: Option<&str>) {
        self.inner.borrow_mut().native_failure = message.map(str::to_string);
    }

    /// Makes subsequent parent posts fail with `message`; `None` restores success.
    pub fn fail_parent_with(&self, message: Option<&str>) {
        self.inner.borrow_mut().parent_failure = message.map(str::to_string);
    }

    /// Makes receiver and listener installation fail with `message`.
    pub fn fail_install_with(&self, message: Option<&str>) {
        self.inner.borrow_mut().install_failure = message.map(str::to_string);
    }

    /// Every successful send, in order.
    pub fn posts(&self) -> Vec<RecordedPost> {
        self.inner.borrow().posts.clone()
    }

    /// Names of every successful send, in order.
    pub fn command_names(&self) -> Vec<String> {
        self.inner
            .borrow()
            .posts
            .iter()
            .filter_map(RecordedPost::command_name)
            .collect()
    }

    /// Envelopes posted to the parent frame, in order. Undecodable posts are skipped.
    pub fn parent_envelopes(&self) -> Vec<MessageEnvelope> {
        self.inner
            .borrow()
            .posts
            .iter()
            .filter_map(|post| match post {
                RecordedPost::Parent(raw) => MessageEnvelope::parse(raw).ok(),
                RecordedPost::Native { .. } => None,
            })
            .collect()
    }

    /// Forgets recorded sends.
    pub fn clear_posts(&self) {
        self.inner.borrow_mut().posts.clear();
    }

    /// Returns the installed receiver, if any.
    pub fn receiver(&self) -> Option<EventReceiver> {
        self.inner.borrow().receiver.clone()
    }

    /// Returns `true` once a cross-frame handler has been installed.
    pub fn is_listening(&self) -> bool {
        self.inner.borrow().handler.is_some()
    }

    /// Plays the host invoking the receiver. Returns `false` when none is installed.
    pub fn receive_event(&self, name: &str) -> bool {
        let receiver = self.inner.borrow().receiver.clone();
        match receiver {
            Some(receiver) => {
                receiver.receive_event(name);
                true
            }
            None => false,
        }
    }

    /// Plays a cross-frame message arriving. Returns `false` when no handler is installed.
    pub fn deliver_message(&self, message: InboundMessage) -> bool {
        let handler = self.inner.borrow().handler.clone();
        match handler {
            Some(handler) => {
                handler.handle(message);
                true
            }
            None => false,
        }
    }
}

impl HostTransport for RecordingTransport {
    fn is_embedded(&self) -> bool {
        self.inner.borrow().embedded
    }

    fn has_native_proxy(&self) -> bool {
        self.inner.borrow().native_proxy
    }

    fn post_native(&self, name: &str, data_json: &str) -> Result<(), String> {
        let mut state = self.inner.borrow_mut();
        if let Some(message) = state.native_failure.clone() {
            return Err(message);
        }
        state.posts.push(RecordedPost::Native {
            name: name.to_string(),
            data: data_json.to_string(),
        });
        Ok(())
    }

    fn post_to_parent(&self, message_json: &str) -> Result<(), String> {
        let mut state = self.inner.borrow_mut();
        if let Some(message) = state.parent_failure.clone() {
            return Err(message);
        }
        state
            .posts
            .push(RecordedPost::Parent(message_json.to_string()));
        Ok(())
    }

    fn install_receiver(&self, receiver: EventReceiver) -> Result<(), String> {
        let mut state = self.inner.borrow_mut();
        if let Some(message) = state.install_failure.clone() {
            return Err(message);
        }
        state.receiver = Some(receiver);
        Ok(())
    }

    fn listen_parent_messages(&self, handler: ParentMessageHandler) -> Result<(), String> {
        let mut state = self.inner.borrow_mut();
        if let Some(message) = state.install_failure.clone() {
            return Err(message);
        }
        state.handler = Some(handler);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn clones_share_recorded_posts() {
        let transport = RecordingTransport::with_native_proxy();
        let handle = transport.clone();

        handle.post_native("web_app_ready", "\"\"").expect("native post");
        handle
            .post_to_parent(r#"{"eventType":"web_app_close","eventData":""}"#)
            .expect("parent post");

        assert_eq!(
            transport.command_names(),
            vec!["web_app_ready".to_string(), "web_app_close".to_string()]
        );
        assert_eq!(
            transport.parent_envelopes(),
            vec![MessageEnvelope::new("web_app_close", "")]
        );
    }

    #[test]
    fn injected_failures_are_returned_and_not_recorded() {
        let transport = RecordingTransport::new();
        transport.fail_native_with(Some("proxy gone"));
        transport.fail_parent_with(Some("detached"));

        assert_eq!(transport.post_native("x", "\"\""), Err("proxy gone".to_string()));
        assert_eq!(transport.post_to_parent("{}"), Err("detached".to_string()));
        assert!(transport.posts().is_empty());
    }

    #[test]
    fn plays_host_side_only_after_installation() {
        let transport = RecordingTransport::embedded();
        assert!(!transport.receive_event("main_button_pressed"));
        assert!(!transport.deliver_message(InboundMessage::from_parent("{}")));

        let received = Rc::new(Cell::new(0));
        let counter = received.clone();
        transport
            .install_receiver(EventReceiver::new(move |_| counter.set(counter.get() + 1)))
            .expect("install receiver");
        transport
            .listen_parent_messages(ParentMessageHandler::new(|_| {}))
            .expect("listen");

        assert!(transport.receive_event("main_button_pressed"));
        assert!(transport.deliver_message(InboundMessage::from_parent("{}")));
        assert!(transport.is_listening());
        assert_eq!(received.get(), 1);
    }

    #[test]
    fn noop_transport_accepts_everything() {
        let transport = NoopTransport;
        assert!(!transport.is_embedded());
        assert!(!transport.has_native_proxy());
        assert_eq!(transport.post_to_parent("{}"), Ok(()));
        assert_eq!(transport.install_receiver(EventReceiver::new(|_| {})), Ok(()));
    }
}
