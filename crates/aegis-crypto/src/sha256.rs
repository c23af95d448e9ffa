//! # SHA-256 Digest Computation
//!
//! Computes SHA-256 digests exclusively from `CanonicalBytes`, so every
//! digest in the system flows through the canonical encoding pipeline.
//!
//! ## Security Invariant
//!
//! The signature `sha256_digest(data: &CanonicalBytes)` makes it a compile
//! error to hash raw bytes. The audit chain and credential proofs both
//! depend on byte-identical recomputation; pinning the input type removes
//! the split-path failure mode entirely.

use aegis_core::CanonicalBytes;
use sha2::{Digest, Sha256};

use crate::hex;

/// Compute the SHA-256 digest of canonical bytes.
pub fn sha256_digest(data: &CanonicalBytes) -> [u8; 32] {
    let hash = Sha256::digest(data.as_bytes());
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hash);
    bytes
}

/// Compute the SHA-256 digest of canonical bytes as a lowercase hex
/// string (64 characters).
///
/// This is the rendering stored in audit entry `hash` / `previousHash`
/// fields.
pub fn sha256_hex(data: &CanonicalBytes) -> String {
    hex::encode(&sha256_digest(data))
}
