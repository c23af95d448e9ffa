//! # Proof — Signed Assertion Attached to a Credential
//!
//! The proof object is rigid: five fields, created once inside
//! `VerifiableCredential::sign`, never mutated afterwards. Its wire names
//! (`type`, `created`, `proofPurpose`, `verificationMethod`,
//! `signatureValue`) are a contract relied on by downstream verifiers.

use serde::{Deserialize, Serialize};

use aegis_core::Timestamp;

/// Suffix appended to the issuer identifier to name the signing key.
pub const KEY_REFERENCE_SUFFIX: &str = "#keys-1";

/// The signature scheme tag carried in a proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProofType {
    /// Ed25519 digital signature over the canonical signing input.
    Ed25519Signature2020,
}

impl std::fmt::Display for ProofType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ed25519Signature2020 => f.write_str("Ed25519Signature2020"),
        }
    }
}

/// The purpose of a proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProofPurpose {
    /// The issuer asserts the credential claims are true.
    AssertionMethod,
}

impl std::fmt::Display for ProofPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AssertionMethod => f.write_str("assertionMethod"),
        }
    }
}

/// A cryptographic proof on a verifiable credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proof {
    /// The signature scheme.
    #[serde(rename = "type")]
    pub proof_type: ProofType,

    /// When the proof was created (UTC, seconds precision).
    pub created: Timestamp,

    /// Why the proof exists — always an issuer assertion here.
    #[serde(rename = "proofPurpose")]
    pub proof_purpose: ProofPurpose,

    /// The issuer identifier plus [`KEY_REFERENCE_SUFFIX`], naming the
    /// key a verifier should resolve.
    #[serde(rename = "verificationMethod")]
    pub verification_method: String,

    /// Hex-encoded Ed25519 signature bytes (128 chars).
    #[serde(rename = "signatureValue")]
    pub signature_value: String,
}

impl Proof {
    /// Build an assertion proof stamped with the current time.
    pub(crate) fn assertion(verification_method: String, signature_value: String) -> Self {
        Self {
            proof_type: ProofType::Ed25519Signature2020,
            created: Timestamp::now(),
            proof_purpose: ProofPurpose::AssertionMethod,
            verification_method,
            signature_value,
        }
    }
}
