//! # aegis-core — Foundational Types for the Aegis Trust Core
//!
//! This crate is the bedrock of the workspace. It defines the primitives
//! that make deterministic-serialization-then-sign/hash enforceable at
//! compile time. Every other crate depends on `aegis-core`; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **`CanonicalBytes` newtype.** ALL digest and signature input flows
//!    through `CanonicalEncoder`. No raw `serde_json::to_vec()` in any
//!    hashing path. Ever. A non-deterministic byte projection silently
//!    breaks the hash chain or the proof with no runtime help — so the
//!    wrong path simply does not typecheck.
//!
//! 2. **Closed `AttributeValue` union.** Metadata and claim values are
//!    string | integer | boolean | nested map, with one defined canonical
//!    projection. Floats are unrepresentable.
//!
//! 3. **UTC-only timestamps.** `Timestamp` enforces the `Z` suffix at
//!    seconds precision; audit entries use epoch milliseconds from a
//!    single clock function.
//!
//! 4. **Newtype identifiers.** `NodeId`, `ActorId`, `Did` — opaque,
//!    unvalidated, but never interchangeable.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `aegis-*` crates (leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug` and `Clone`.

pub mod canonical;
pub mod error;
pub mod identity;
pub mod temporal;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use canonical::{CanonicalBytes, CanonicalEncoder};
pub use error::{CryptoError, TimestampError};
pub use identity::{ActorId, Did, NodeId};
pub use temporal::{epoch_millis_now, Timestamp};
pub use value::AttributeValue;
