//! OSC type-tag characters understood by mixers.

/// 32-bit big-endian signed integer.
pub const INT: u8 = b'i';

/// 32-bit big-endian IEEE-754 float.
pub const FLOAT: u8 = b'f';

/// NUL-terminated, 4-byte padded string.
pub const STRING: u8 = b's';

/// Length-prefixed, 4-byte padded byte blob.
pub const BLOB: u8 = b'b';

/// Leading character of every type-tag string.
pub const PREFIX: u8 = b',';

/// Returns a human-readable name for a type tag.
pub fn tag_name(tag: u8) -> &'static str {
    match tag {
        INT => "int32",
        FLOAT => "float32",
        STRING => "string",
        BLOB => "blob",
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_names() {
        assert_eq!(tag_name(INT), "int32");
        assert_eq!(tag_name(FLOAT), "float32");
        assert_eq!(tag_name(STRING), "string");
        assert_eq!(tag_name(BLOB), "blob");
        assert_eq!(tag_name(b'T'), "unknown");
        assert_eq!(tag_name(PREFIX), "unknown");
    }
}
