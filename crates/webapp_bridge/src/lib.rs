//! Typed event bridge between an embedded web app and its host.
//!
//! The host is either a native webview that injects a proxy object into the page or a parent
//! frame reached through cross-frame messaging. This crate owns the target-independent core:
//! the wire envelope, main-button options, the event emitter, the [`HostTransport`] capability
//! trait, and [`BridgeClient`], which translates between host events and application callbacks.
//! Browser wiring lives in `webapp_bridge_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod button;
pub mod client;
pub mod emitter;
pub mod envelope;
pub mod error;
pub mod events;
pub mod options;
pub mod registry;
pub mod transport;

pub use button::MainButtonOptions;
pub use client::BridgeClient;
pub use emitter::{BridgeEvent, EventEmitter, ListenerId};
pub use envelope::MessageEnvelope;
pub use error::BridgeError;
pub use options::ClientOptions;
pub use registry::{client_registry, create_bridge_client, ClientRegistry, DEFAULT_CONTEXT};
pub use transport::{
    EventReceiver, HostTransport, InboundMessage, MessageSource, NoopTransport,
    ParentMessageHandler, RecordedPost, RecordingTransport,
};
