//! UDP transport for mixer control.
//!
//! Binds an ephemeral local socket and talks to one resolved remote
//! endpoint. This is the lowest layer of mixosc; the engine in
//! `mixosc-client` owns a [`UdpEndpoint`] and runs its receive loop on top
//! of it.

pub mod error;
pub mod udp;

pub use error::{Result, TransportError};
pub use udp::{is_timeout, UdpEndpoint, MAX_DATAGRAM_SIZE};
