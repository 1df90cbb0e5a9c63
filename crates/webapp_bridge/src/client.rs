//! Bridge client: inbound event translation and outbound command routing.

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use leptos::logging;
use serde::Serialize;
use serde_json::Value;

use crate::{
    button::MainButtonOptions,
    emitter::{BridgeEvent, EventEmitter, ListenerId},
    envelope::{encode_outbound, MessageEnvelope},
    error::BridgeError,
    events::{
        BACK_BUTTON_PRESSED, BACK_BUTTON_PRESSED_EVENT, IFRAME_READY, MAIN_BUTTON_PRESSED,
        MAIN_BUTTON_PRESSED_EVENT, SETUP_MAIN_BUTTON, STARTUP_COMMANDS, TRANSLATED_EVENTS,
        WEB_APP_CLOSE,
    },
    options::ClientOptions,
    transport::{EventReceiver, HostTransport, InboundMessage, MessageSource, ParentMessageHandler},
};

struct ClientInner {
    transport: Rc<dyn HostTransport>,
    emitter: EventEmitter,
    receiver: EventReceiver,
    main_button: RefCell<MainButtonOptions>,
    back_button: Option<Value>,
    debug: bool,
}

#[derive(Clone)]
/// Event-emitting facade over a [`HostTransport`].
///
/// Clones are handles to the same client. Construction performs the whole host handshake
/// synchronously: receivers are installed, the initial main-button state and the startup
/// commands are sent, and button-press notifications are wired to
/// [`BridgeClient::on_main_button_press`] / [`BridgeClient::on_back_button_press`].
pub struct BridgeClient {
    inner: Rc<ClientInner>,
}

impl std::fmt::Debug for BridgeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeClient")
            .field("main_button", &*self.inner.main_button.borrow())
            .field("back_button", &self.inner.back_button)
            .field("debug", &self.inner.debug)
            .field("emitter", &self.inner.emitter)
            .finish()
    }
}

impl BridgeClient {
    /// Creates a client over `transport` and runs the host handshake.
    pub fn new(options: ClientOptions, transport: impl HostTransport + 'static) -> Self {
        Self::with_transport(options, Rc::new(transport))
    }

    /// Same as [`BridgeClient::new`] for an already shared transport.
    pub fn with_transport(options: ClientOptions, transport: Rc<dyn HostTransport>) -> Self {
        let ClientOptions {
            main_button,
            back_button,
            debug,
        } = options;

        let emitter = EventEmitter::default();
        let receiver = {
            let emitter = emitter.clone();
            EventReceiver::new(move |name| emitter.dispatch(name, Value::Null))
        };

        let client = Self {
            inner: Rc::new(ClientInner {
                transport,
                emitter,
                receiver,
                main_button: RefCell::new(main_button),
                back_button,
                debug,
            }),
        };
        client.init();
        client
    }

    fn init(&self) {
        if let Err(err) = self
            .inner
            .transport
            .install_receiver(self.inner.receiver.clone())
        {
            logging::warn!("bridge receiver install failed: {err}");
        }

        if self.inner.transport.is_embedded() {
            self.listen_parent_frame();
        }

        if let Err(err) = self.update_main_button() {
            logging::warn!("initial main button setup failed: {err}");
        }

        // No translation listeners exist yet; this only announces the names to the receiver.
        for name in [MAIN_BUTTON_PRESSED, BACK_BUTTON_PRESSED] {
            self.inner.receiver.receive_event(name);
        }

        for command in STARTUP_COMMANDS {
            if let Err(err) = self.post_command(command) {
                logging::warn!("startup command `{command}` failed: {err}");
            }
        }

        for (inbound, translated) in TRANSLATED_EVENTS {
            let weak = Rc::downgrade(&self.inner);
            self.inner.emitter.add_listener(inbound, move |_| {
                if let Some(inner) = weak.upgrade() {
                    inner.emitter.dispatch(translated, Value::Null);
                }
            });
        }
    }

    fn listen_parent_frame(&self) {
        let weak: Weak<ClientInner> = Rc::downgrade(&self.inner);
        let handler = ParentMessageHandler::new(move |message| {
            if let Some(inner) = weak.upgrade() {
                BridgeClient { inner }.handle_parent_message(message);
            }
        });
        if let Err(err) = self.inner.transport.listen_parent_messages(handler) {
            logging::warn!("parent frame listener install failed: {err}");
        }
    }

    fn handle_parent_message(&self, message: InboundMessage) {
        if message.source != MessageSource::Parent {
            return;
        }
        let Some(raw) = message.data else {
            logging::error!(
                "{}",
                BridgeError::MalformedEnvelope("message body is not text".to_string())
            );
            return;
        };
        let envelope = match MessageEnvelope::parse(&raw) {
            Ok(envelope) => envelope,
            Err(err) => {
                logging::error!("{err}");
                return;
            }
        };

        self.inner
            .emitter
            .dispatch(&envelope.event_type, envelope.event_data);

        let ack = MessageEnvelope::new(IFRAME_READY, "")
            .to_json()
            .and_then(|raw| {
                self.inner
                    .transport
                    .post_to_parent(&raw)
                    .map_err(BridgeError::Transport)
            });
        if let Err(err) = ack {
            logging::warn!("{IFRAME_READY} acknowledgment failed: {err}");
        }
    }

    fn update_main_button(&self) -> Result<(), BridgeError> {
        let config = self.main_button_options();
        self.post_event(SETUP_MAIN_BUTTON, &config)
    }

    /// Sends a named command with a JSON-serializable payload.
    ///
    /// The native proxy is used whenever the host currently exposes one; otherwise the command
    /// is posted to the parent frame as a [`MessageEnvelope`].
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Serialize`] when `data` cannot be encoded and
    /// [`BridgeError::Transport`] when the host rejects the send.
    pub fn post_event<T: Serialize + ?Sized>(
        &self,
        name: &str,
        data: &T,
    ) -> Result<(), BridgeError> {
        if self.inner.debug {
            logging::log!("bridge command `{name}`");
        }
        let transport = &self.inner.transport;
        if transport.has_native_proxy() {
            let data_json = serde_json::to_string(data)
                .map_err(|err| BridgeError::Serialize(err.to_string()))?;
            transport
                .post_native(name, &data_json)
                .map_err(BridgeError::Transport)
        } else {
            let message = encode_outbound(name, data)?;
            transport
                .post_to_parent(&message)
                .map_err(BridgeError::Transport)
        }
    }

    /// Sends a command with the default empty-string payload.
    ///
    /// # Errors
    ///
    /// See [`BridgeClient::post_event`].
    pub fn post_command(&self, name: &str) -> Result<(), BridgeError> {
        self.post_event(name, "")
    }

    /// Merges `patch` into the held main-button state and re-sends the full configuration.
    ///
    /// The merge is applied even when the send fails.
    ///
    /// # Errors
    ///
    /// See [`BridgeClient::post_event`].
    pub fn post_main_button_options(&self, patch: &MainButtonOptions) -> Result<(), BridgeError> {
        self.inner.main_button.borrow_mut().merge(patch);
        self.update_main_button()
    }

    /// Invokes `callback` every time the host reports a main-button press.
    pub fn on_main_button_press(&self, callback: impl Fn() + 'static) -> ListenerId {
        self.add_event_listener(MAIN_BUTTON_PRESSED_EVENT, move |_| callback())
    }

    /// Invokes `callback` every time the host reports a back-button press.
    pub fn on_back_button_press(&self, callback: impl Fn() + 'static) -> ListenerId {
        self.add_event_listener(BACK_BUTTON_PRESSED_EVENT, move |_| callback())
    }

    /// Asks the host to close the app. Failures are logged.
    pub fn close(&self) {
        if let Err(err) = self.post_command(WEB_APP_CLOSE) {
            logging::warn!("{WEB_APP_CLOSE} failed: {err}");
        }
    }

    /// Subscribes to events named `name`.
    pub fn add_event_listener(
        &self,
        name: impl Into<String>,
        listener: impl Fn(&BridgeEvent) + 'static,
    ) -> ListenerId {
        self.inner.emitter.add_listener(name, listener)
    }

    /// Removes a subscription. Returns `false` when it was not registered.
    pub fn remove_event_listener(&self, name: &str, id: ListenerId) -> bool {
        self.inner.emitter.remove_listener(name, id)
    }

    /// Dispatches an event to local listeners.
    pub fn dispatch_event(&self, name: &str, detail: Value) {
        self.inner.emitter.dispatch(name, detail);
    }

    /// Receiver handle published to the host.
    pub fn receiver(&self) -> EventReceiver {
        self.inner.receiver.clone()
    }

    /// Current merged main-button state.
    pub fn main_button_options(&self) -> MainButtonOptions {
        self.inner.main_button.borrow().clone()
    }

    /// Secondary-button option as supplied at construction.
    pub fn back_button(&self) -> Option<&Value> {
        self.inner.back_button.as_ref()
    }

    /// Whether outbound command tracing is enabled.
    pub fn is_debug(&self) -> bool {
        self.inner.debug
    }

    /// Returns `true` when both handles refer to the same client.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.inner, &b.inner)
    }
}
