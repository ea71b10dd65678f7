//! OSC mixer client.
//!
//! This is the layer callers use. It composes:
//! - [`Engine`]: owns the UDP endpoint, runs the background receive loop
//!   and feeds the [`ResponseRouter`]
//! - [`AddressResolver`]: per-[`DeviceKind`] address templates for entities
//! - [`Client`]: the request/response facade on top of both
//!
//! Responses are delivered in arrival order with no correlation to the
//! request that caused them. Keep one request outstanding per client.

pub mod address;
pub mod client;
pub mod engine;
pub mod error;
pub mod kind;
pub mod router;

pub use address::{AddressResolver, AddressTemplate, Entity};
pub use client::{Client, ClientConfig, DeviceInfo, XINFO, XREMOTE};
pub use engine::{
    Engine, EngineConfig, EngineState, DEFAULT_POLL_INTERVAL, DEFAULT_QUEUE_CAPACITY,
    MIN_DATAGRAM_SIZE,
};
pub use error::{ClientError, Result};
pub use kind::DeviceKind;
pub use router::ResponseRouter;

pub use mixosc_wire::{Argument, Message};
