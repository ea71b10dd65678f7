use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{Result, WireError};
use crate::message::{Argument, Message};
use crate::tag;

/// Every OSC field is padded to this many bytes.
pub const ALIGNMENT: usize = 4;

/// Blob lengths at or above this are rejected on decode (device ceiling).
pub const MAX_BLOB_LEN: usize = 10_000;

/// Round `len` up to the next 4-byte boundary.
pub fn padded_len(len: usize) -> usize {
    (len + ALIGNMENT - 1) & !(ALIGNMENT - 1)
}

/// Result of a permissive decode.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    /// The address and every argument parsed before any failure.
    pub message: Message,
    /// The argument error that stopped parsing, if any.
    pub halted: Option<WireError>,
}

/// Encode a message into the OSC wire format.
///
/// Wire format:
/// ```text
/// ┌───────────────────┬─────────────────────┬──────────────────────────┐
/// │ Address           │ Type tags           │ Arguments                │
/// │ "/path" NUL pad4  │ ",ifsb" NUL pad4    │ i/f: 4B BE               │
/// │                   │                     │ s:   bytes NUL pad4      │
/// │                   │                     │ b:   len (4B BE) + pad4  │
/// └───────────────────┴─────────────────────┴──────────────────────────┘
/// ```
pub fn encode_message(msg: &Message, dst: &mut BytesMut) -> Result<()> {
    let address = msg.address().as_bytes();
    if address.contains(&0) {
        return Err(WireError::InteriorNul("address"));
    }

    dst.reserve(msg.wire_size());
    put_padded_str(dst, address);

    let mut tags = Vec::with_capacity(msg.args().len() + 1);
    tags.push(tag::PREFIX);
    tags.extend(msg.args().iter().map(Argument::tag));
    put_padded_str(dst, &tags);

    for arg in msg.args() {
        match arg {
            Argument::Int(v) => dst.put_i32(*v),
            Argument::Float(v) => dst.put_f32(*v),
            Argument::String(s) => {
                if s.as_bytes().contains(&0) {
                    return Err(WireError::InteriorNul("string argument"));
                }
                put_padded_str(dst, s.as_bytes());
            }
            Argument::Blob(b) => {
                let len =
                    i32::try_from(b.len()).map_err(|_| WireError::BlobTooLarge { len: b.len() })?;
                dst.put_i32(len);
                dst.put_slice(b);
                dst.put_bytes(0, padded_len(b.len()) - b.len());
            }
        }
    }
    Ok(())
}

/// Decode a datagram, discarding any per-argument failure.
///
/// See [`decode_message_partial`] for the validation order.
pub fn decode_message(src: &[u8]) -> Result<Message> {
    decode_message_partial(src).map(|decoded| decoded.message)
}

/// Decode a datagram, reporting the argument error that halted parsing.
///
/// Only a missing or malformed address is fatal. A datagram without a
/// type-tag string, or whose tag string does not start with `,`, decodes
/// to an address-only message. A bad argument stops argument parsing; the
/// arguments before it are still returned. Unknown tags are skipped by
/// advancing 4 bytes.
pub fn decode_message_partial(src: &[u8]) -> Result<Decoded> {
    if src.len() < ALIGNMENT {
        return Err(WireError::TooShort { len: src.len() });
    }
    if src[0] != b'/' {
        return Err(WireError::MissingLeadingSlash);
    }

    let addr_end = find_nul(src, 0).ok_or(WireError::UnterminatedAddress)?;
    let address = String::from_utf8_lossy(&src[..addr_end]).into_owned();
    let mut pos = padded_len(addr_end + 1);

    let bare = |address: String| Decoded {
        message: Message::bare(address),
        halted: None,
    };

    let Some(tags_end) = find_nul(src, pos) else {
        return Ok(bare(address));
    };
    let tags = &src[pos..tags_end];
    if tags.first() != Some(&tag::PREFIX) {
        return Ok(bare(address));
    }
    pos += padded_len(tags_end - pos + 1);

    let mut args = Vec::with_capacity(tags.len() - 1);
    let mut halted = None;
    for &t in &tags[1..] {
        match read_argument(src, &mut pos, t) {
            Ok(Some(arg)) => args.push(arg),
            Ok(None) => {}
            Err(err) => {
                halted = Some(err);
                break;
            }
        }
    }

    Ok(Decoded {
        message: Message::new(address, args),
        halted,
    })
}

fn read_argument(src: &[u8], pos: &mut usize, t: u8) -> Result<Option<Argument>> {
    let arg = match t {
        tag::INT => Argument::Int(i32::from_be_bytes(take4(src, pos, t)?)),
        tag::FLOAT => Argument::Float(f32::from_be_bytes(take4(src, pos, t)?)),
        tag::STRING => {
            let end = find_nul(src, *pos).ok_or(WireError::UnterminatedString)?;
            let s = String::from_utf8_lossy(&src[*pos..end]).into_owned();
            *pos += padded_len(end - *pos + 1);
            Argument::String(s)
        }
        tag::BLOB => {
            let len = i32::from_be_bytes(take4(src, pos, t)?);
            if len < 0 || len as usize >= MAX_BLOB_LEN {
                return Err(WireError::InvalidBlobLength(len));
            }
            let len = len as usize;
            let remaining = remaining(src, *pos);
            if remaining < len {
                return Err(WireError::Truncated {
                    tag: t as char,
                    needed: len,
                    remaining,
                });
            }
            let data = Bytes::copy_from_slice(&src[*pos..*pos + len]);
            *pos += padded_len(len);
            Argument::Blob(data)
        }
        _ => {
            take4(src, pos, t)?;
            return Ok(None);
        }
    };
    Ok(Some(arg))
}

fn take4(src: &[u8], pos: &mut usize, t: u8) -> Result<[u8; 4]> {
    let remaining = remaining(src, *pos);
    if remaining < 4 {
        return Err(WireError::Truncated {
            tag: t as char,
            needed: 4,
            remaining,
        });
    }
    let mut out = [0u8; 4];
    out.copy_from_slice(&src[*pos..*pos + 4]);
    *pos += 4;
    Ok(out)
}

fn remaining(src: &[u8], pos: usize) -> usize {
    src.len().saturating_sub(pos)
}

/// Index of the first NUL at or after `from`.
fn find_nul(src: &[u8], from: usize) -> Option<usize> {
    src.get(from..)?
        .iter()
        .position(|&b| b == 0)
        .map(|i| from + i)
}

fn put_padded_str(dst: &mut BytesMut, bytes: &[u8]) {
    dst.put_slice(bytes);
    dst.put_bytes(0, padded_len(bytes.len() + 1) - bytes.len());
}
