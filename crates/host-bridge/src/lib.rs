//! Host-facing side of a recorder: the `{type, data}` message envelope, an
//! event bus for outbound messages and a task that drives a [`Recorder`]
//! from an inbound channel.
//!
//! [`Recorder`]: playscribe_capture::Recorder

pub mod bus;
pub mod errors;
pub mod host;
pub mod message;

pub use bus::{EventBus, InMemoryBus, Outbox};
pub use errors::BridgeError;
pub use host::{HostInput, RecorderHost};
pub use message::{trace_from_json, HostMessage, ReadyStatus};
