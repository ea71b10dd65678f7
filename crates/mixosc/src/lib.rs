//! OSC remote control for X-Air and X32 digital mixers.
//!
//! mixosc speaks the mixers' OSC dialect over UDP: a byte-exact message
//! codec, the value curves the consoles use on the wire, per-model address
//! tables and a request/response client.
//!
//! # Crate Structure
//!
//! - [`wire`]: OSC message encoding and permissive decoding
//! - [`units`]: Fader taper, linear/log curves, parameter and enum tables
//! - [`transport`]: UDP endpoint
//! - [`client`]: Engine, response router, address resolver and client (behind `client` feature)

/// Re-export wire codec types.
pub mod wire {
    pub use mixosc_wire::*;
}

/// Re-export value codec types.
pub mod units {
    pub use mixosc_units::*;
}

/// Re-export transport types.
pub mod transport {
    pub use mixosc_transport::*;
}

/// Re-export client types (requires `client` feature).
#[cfg(feature = "client")]
pub mod client {
    pub use mixosc_client::*;
}
