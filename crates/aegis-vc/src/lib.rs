//! # aegis-vc — Verifiable Credentials
//!
//! Signed, checkable assertions about subject devices:
//!
//! - **Credential** (`credential.rs`): the W3C-shaped envelope with a
//!   typed claims map, canonical signing input, Ed25519 signing, and
//!   verification.
//! - **Proof** (`proof.rs`): the rigid proof object created once inside
//!   `sign` and never mutated.
//!
//! ## Security Invariant
//!
//! The signing input is produced exclusively by
//! [`CanonicalEncoder`](aegis_core::CanonicalEncoder) — fixed field
//! order, claims sorted by key, every field length-prefixed. Verification
//! recomputes the identical bytes; any content drift after signing fails
//! verification.
//!
//! ## Crate Policy
//!
//! - Depends on `aegis-core` and `aegis-crypto` internally.
//! - The envelope is rigid; only the claims map is caller-extensible.
//! - A signed credential is immutable — mutators return
//!   [`VcError::AlreadySigned`].

pub mod credential;
pub mod proof;

pub use credential::{
    CredentialSubject, VcError, VerifiableCredential, BASE_CREDENTIAL_TYPE,
    CONTEXT_CREDENTIALS_V1,
};
pub use proof::{Proof, ProofPurpose, ProofType, KEY_REFERENCE_SUFFIX};
