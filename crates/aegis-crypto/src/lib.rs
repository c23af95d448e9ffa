//! # aegis-crypto — Cryptographic Provider
//!
//! The one place where digest and signature policy is pinned:
//!
//! - **SHA-256** digest computation from
//!   [`CanonicalBytes`](aegis_core::CanonicalBytes) — the only accepted
//!   input type.
//! - **Ed25519** key generation, signing, and verification for credential
//!   proofs.
//! - **Hex codec** shared by digests, keys, and signatures.
//!
//! The audit and credential crates consume this contract byte-in/byte-out;
//! swapping the digest or signature scheme is a change to this crate alone.
//!
//! ## Crate Policy
//!
//! - Depends only on `aegis-core` internally.
//! - No mocking of cryptographic operations in tests — all tests use real
//!   canonical bytes, real SHA-256, real Ed25519.
//! - Private key material never implements `Serialize`.

pub mod ed25519;
pub mod hex;
pub mod sha256;

pub use ed25519::{verify, Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};
pub use sha256::{sha256_digest, sha256_hex};
