/// Errors that can occur during OSC encoding, decoding, or argument access.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WireError {
    /// The datagram is shorter than the smallest valid message.
    #[error("datagram too short ({len} bytes, min 4)")]
    TooShort { len: usize },

    /// The datagram does not start with an address pattern.
    #[error("address pattern must start with '/'")]
    MissingLeadingSlash,

    /// No NUL terminator was found after the address pattern.
    #[error("address pattern is not NUL-terminated")]
    UnterminatedAddress,

    /// A string argument has no NUL terminator.
    #[error("string argument is not NUL-terminated")]
    UnterminatedString,

    /// Fewer bytes remain than the type tag requires.
    #[error("truncated '{tag}' argument ({needed} bytes needed, {remaining} remaining)")]
    Truncated {
        tag: char,
        needed: usize,
        remaining: usize,
    },

    /// A blob declares a negative length or one at or above the device ceiling.
    #[error("invalid blob length {0}")]
    InvalidBlobLength(i32),

    /// A blob is too large to carry a 32-bit length prefix.
    #[error("blob too large to encode ({len} bytes)")]
    BlobTooLarge { len: usize },

    /// An address or string contains a NUL byte and cannot be encoded.
    #[error("interior NUL byte in {0}")]
    InteriorNul(&'static str),

    /// An argument does not carry the type the caller asked for.
    #[error("expected '{expected}' argument, found '{found}'")]
    TypeMismatch { expected: char, found: char },

    /// The message has fewer arguments than the caller asked for.
    #[error("argument {index} missing (message has {len})")]
    MissingArgument { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, WireError>;
