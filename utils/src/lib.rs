//! Shared helpers used across the signet primitives.

use prost::{encode_length_delimiter, length_delimiter_len};

/// Converts bytes to a lowercase hexadecimal string.
pub fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| format!("{byte:02x}")).collect()
}

/// Converts a hexadecimal string to bytes.
pub fn from_hex(hex: &str) -> Option<Vec<u8>> {
    if hex.len() % 2 != 0 {
        return None;
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).ok())
        .collect()
}

/// Converts a hexadecimal string to bytes, stripping whitespace and/or a `0x` prefix.
/// Commonly used in testing to encode external test vectors without modification.
pub fn from_hex_formatted(hex: &str) -> Option<Vec<u8>> {
    let hex = hex.replace(['\t', '\n', '\r', ' '], "");
    let stripped = hex.strip_prefix("0x").unwrap_or(&hex);
    from_hex(stripped)
}

/// Concatenate a namespace and a message, prepended by a varint encoding of the
/// namespace length.
///
/// This produces a unique byte sequence (i.e. no collisions) for each
/// `(namespace, msg)` pair.
pub fn union_unique(namespace: &[u8], msg: &[u8]) -> Vec<u8> {
    let ld_len = length_delimiter_len(namespace.len());
    let mut payload = Vec::with_capacity(ld_len + namespace.len() + msg.len());
    encode_length_delimiter(namespace.len(), &mut payload).unwrap();
    payload.extend_from_slice(namespace);
    payload.extend_from_slice(msg);
    payload
}
