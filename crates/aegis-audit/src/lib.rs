//! # aegis-audit — Hash-Chained Audit Trail
//!
//! An append-only, tamper-evident record of every security-relevant event
//! on a ledger node:
//!
//! - **Events** (`event.rs`): the closed vocabulary of recordable events
//!   across transaction, block, device, identity, private-data, consensus,
//!   security, and system categories.
//! - **Entries** (`entry.rs`): immutable chained records whose self-hash
//!   commits to every field, plus the chain verification walk.
//! - **Log** (`log.rs`): the per-node append-only sequence with integrity
//!   verification, filtered queries, stats, and export.
//! - **Sink** (`sink.rs`): best-effort observability emission; failures
//!   never touch the chain.
//!
//! Tamper-evident, not tamper-proof: edits are detectable after the fact
//! by [`AuditLog::verify_integrity`], not prevented by storage.
//!
//! ## Security Invariant
//!
//! Entry hashes are computed from `CanonicalBytes` via
//! `aegis-crypto::sha256_hex` — field order fixed, metadata sorted, every
//! field length-prefixed. There is no other hashing path.

pub mod entry;
pub mod event;
pub mod log;
pub mod sink;

pub use entry::{verify_chain, AuditEntry};
pub use event::{AuditEventType, EventCategory};
pub use log::{AuditExport, AuditLog, AuditStats};
pub use sink::{AuditSink, SinkError, TracingSink};
