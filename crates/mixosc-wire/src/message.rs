use std::fmt;

use bytes::{Bytes, BytesMut};

use crate::codec::{encode_message, padded_len};
use crate::error::{Result, WireError};
use crate::tag;

/// A single typed OSC argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    Int(i32),
    Float(f32),
    String(String),
    Blob(Bytes),
}

impl Argument {
    /// The wire type-tag character for this argument.
    pub fn tag(&self) -> u8 {
        match self {
            Argument::Int(_) => tag::INT,
            Argument::Float(_) => tag::FLOAT,
            Argument::String(_) => tag::STRING,
            Argument::Blob(_) => tag::BLOB,
        }
    }

    /// The integer value, or a type mismatch.
    pub fn as_int(&self) -> Result<i32> {
        match self {
            Argument::Int(v) => Ok(*v),
            other => Err(other.mismatch(tag::INT)),
        }
    }

    /// The float value, or a type mismatch. Integers are not widened.
    pub fn as_float(&self) -> Result<f32> {
        match self {
            Argument::Float(v) => Ok(*v),
            other => Err(other.mismatch(tag::FLOAT)),
        }
    }

    /// The string value, or a type mismatch.
    pub fn as_str(&self) -> Result<&str> {
        match self {
            Argument::String(v) => Ok(v),
            other => Err(other.mismatch(tag::STRING)),
        }
    }

    /// The blob bytes, or a type mismatch.
    pub fn as_blob(&self) -> Result<&Bytes> {
        match self {
            Argument::Blob(v) => Ok(v),
            other => Err(other.mismatch(tag::BLOB)),
        }
    }

    /// Encoded payload size in bytes, padding included.
    pub fn wire_size(&self) -> usize {
        match self {
            Argument::Int(_) | Argument::Float(_) => 4,
            Argument::String(s) => padded_len(s.len() + 1),
            Argument::Blob(b) => 4 + padded_len(b.len()),
        }
    }

    fn mismatch(&self, expected: u8) -> WireError {
        WireError::TypeMismatch {
            expected: expected as char,
            found: self.tag() as char,
        }
    }
}

impl From<i32> for Argument {
    fn from(v: i32) -> Self {
        Argument::Int(v)
    }
}

impl From<f32> for Argument {
    fn from(v: f32) -> Self {
        Argument::Float(v)
    }
}

impl From<&str> for Argument {
    fn from(v: &str) -> Self {
        Argument::String(v.to_string())
    }
}

impl From<String> for Argument {
    fn from(v: String) -> Self {
        Argument::String(v)
    }
}

impl From<Bytes> for Argument {
    fn from(v: Bytes) -> Self {
        Argument::Blob(v)
    }
}

impl From<Vec<u8>> for Argument {
    fn from(v: Vec<u8>) -> Self {
        Argument::Blob(Bytes::from(v))
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Int(v) => write!(f, "{v}"),
            Argument::Float(v) => write!(f, "{v}"),
            Argument::String(v) => write!(f, "{v:?}"),
            Argument::Blob(v) => write!(f, "<blob {} bytes>", v.len()),
        }
    }
}

/// An OSC message: an address pattern and its positional arguments.
///
/// Messages are immutable once built. They are produced by
/// [`decode_message`](crate::decode_message) or by callers preparing a send.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    address: String,
    args: Vec<Argument>,
}

impl Message {
    /// Create a message with arguments.
    pub fn new(address: impl Into<String>, args: impl Into<Vec<Argument>>) -> Self {
        Self {
            address: address.into(),
            args: args.into(),
        }
    }

    /// Create an argument-less message (a query on most mixers).
    pub fn bare(address: impl Into<String>) -> Self {
        Self::new(address, Vec::new())
    }

    /// The address pattern.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// The arguments, in wire order.
    pub fn args(&self) -> &[Argument] {
        &self.args
    }

    /// The type-tag string, including the leading `,`.
    pub fn type_tags(&self) -> String {
        let mut tags = String::with_capacity(self.args.len() + 1);
        tags.push(tag::PREFIX as char);
        tags.extend(self.args.iter().map(|a| a.tag() as char));
        tags
    }

    /// Argument at `index`, or [`WireError::MissingArgument`].
    pub fn arg(&self, index: usize) -> Result<&Argument> {
        self.args.get(index).ok_or(WireError::MissingArgument {
            index,
            len: self.args.len(),
        })
    }

    pub fn int_at(&self, index: usize) -> Result<i32> {
        self.arg(index)?.as_int()
    }

    pub fn float_at(&self, index: usize) -> Result<f32> {
        self.arg(index)?.as_float()
    }

    pub fn str_at(&self, index: usize) -> Result<&str> {
        self.arg(index)?.as_str()
    }

    pub fn blob_at(&self, index: usize) -> Result<&Bytes> {
        self.arg(index)?.as_blob()
    }

    /// The total encoded size of this message.
    pub fn wire_size(&self) -> usize {
        padded_len(self.address.len() + 1)
            + padded_len(self.args.len() + 2)
            + self.args.iter().map(Argument::wire_size).sum::<usize>()
    }

    /// Encode into a fresh buffer.
    pub fn to_bytes(&self) -> Result<Bytes> {
        let mut buf = BytesMut::with_capacity(self.wire_size());
        encode_message(self, &mut buf)?;
        Ok(buf.freeze())
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address)?;
        if self.args.is_empty() {
            return Ok(());
        }
        write!(f, " {}", self.type_tags())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_tags() {
        let msg = Message::new(
            "/ch/01/config/name",
            vec![Argument::from("Kick"), Argument::from(3), Argument::from(0.5f32)],
        );
        assert_eq!(msg.type_tags(), ",sif");
        assert_eq!(Message::bare("/xinfo").type_tags(), ",");
    }

    #[test]
    fn test_typed_access() {
        let msg = Message::new("/lr/mix/fader", vec![Argument::Float(0.75)]);
        assert_eq!(msg.float_at(0).unwrap(), 0.75);
        assert_eq!(
            msg.int_at(0),
            Err(WireError::TypeMismatch {
                expected: 'i',
                found: 'f'
            })
        );
        assert_eq!(
            msg.str_at(1),
            Err(WireError::MissingArgument { index: 1, len: 1 })
        );
    }

    #[test]
    fn test_no_silent_coercion() {
        assert!(Argument::Int(1).as_float().is_err());
        assert!(Argument::Float(1.0).as_int().is_err());
        assert!(Argument::from("1").as_int().is_err());
        assert!(Argument::from(vec![1u8]).as_str().is_err());
    }

    #[test]
    fn test_wire_size_matches_encoding() {
        let msg = Message::new(
            "/ch/01/mix/fader",
            vec![
                Argument::Float(0.75),
                Argument::from("abc"),
                Argument::from(vec![1u8, 2, 3, 4, 5]),
            ],
        );
        assert_eq!(msg.wire_size(), msg.to_bytes().unwrap().len());
        assert_eq!(Message::bare("/lr").wire_size(), 8);
    }

    #[test]
    fn test_display() {
        let msg = Message::new(
            "/ch/01/config/name",
            vec![Argument::from("Kick"), Argument::Int(2)],
        );
        assert_eq!(msg.to_string(), "/ch/01/config/name ,si \"Kick\" 2");
        assert_eq!(Message::bare("/xinfo").to_string(), "/xinfo");
    }
}
