//! OSC message wire codec.
//!
//! Every datagram a mixer speaks is a single OSC message:
//! - An address pattern, NUL-terminated and padded to 4 bytes
//! - A type-tag string starting with `,`, NUL-terminated and padded to 4 bytes
//! - The arguments, each big-endian and 4-byte aligned
//!
//! Encoding is strict. Decoding is permissive: a malformed argument stops
//! argument parsing but the address and earlier arguments are kept.
//! Nothing in this crate performs I/O or logs.

pub mod codec;
pub mod error;
pub mod message;
pub mod tag;

pub use codec::{
    decode_message, decode_message_partial, encode_message, padded_len, Decoded, ALIGNMENT,
    MAX_BLOB_LEN,
};
pub use error::{Result, WireError};
pub use message::{Argument, Message};
