//! # Hex Codec
//!
//! Lowercase hex encoding and decoding for digests, public keys, and
//! signatures. One implementation, used by every type in this crate that
//! crosses the wire as hex — duplicated helpers are how two code paths
//! drift apart.

use aegis_core::CryptoError;

/// Encode bytes as a lowercase hex string.
pub fn encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Decode a hex string into bytes.
///
/// Accepts upper- or lowercase input and surrounding whitespace; the
/// decoded bytes are the same either way.
pub fn decode(hex: &str) -> Result<Vec<u8>, CryptoError> {
    let hex = hex.trim().to_lowercase();
    if hex.len() % 2 != 0 {
        return Err(CryptoError::DigestError(format!(
            "hex string must have even length, got {}",
            hex.len()
        )));
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| {
                CryptoError::DigestError(format!("invalid hex at position {i}: {e}"))
            })
        })
        .collect()
}

/// Decode a hex string into a fixed-size array.
///
/// Returns `DigestError` when the decoded length differs from `N`.
pub fn decode_array<const N: usize>(hex: &str) -> Result<[u8; N], CryptoError> {
    let bytes = decode(hex)?;
    let len = bytes.len();
    bytes.try_into().map_err(|_| {
        CryptoError::DigestError(format!("expected {N} bytes, got {len}"))
    })
}
