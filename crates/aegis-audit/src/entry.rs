//! # Audit Entry — One Link in the Hash Chain
//!
//! `AuditEntry` is a single immutable record: the event, its attribution,
//! and the two digests that chain it to its predecessor. Every field that
//! contributes to an entry's hash is listed explicitly in
//! [`AuditEntry::compute_hash`] so nothing is accidentally omitted.
//!
//! ## Security Invariant
//!
//! `hash` is a pure function of the other fields. Hash input flows through
//! [`CanonicalEncoder`] — field order fixed, metadata sorted by key, every
//! field length-prefixed — then SHA-256. Altering any stored field,
//! including a single metadata value, changes the recomputed hash and is
//! caught by [`verify_chain`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use aegis_core::{epoch_millis_now, ActorId, AttributeValue, CanonicalEncoder, NodeId};
use aegis_crypto::sha256_hex;

use crate::event::AuditEventType;

/// A single entry in the audit hash chain.
///
/// Immutable once published: correcting a mistake means appending a
/// compensating entry, never editing history.
///
/// Serde renames pin the wire field names exactly: `timestamp`,
/// `eventType`, `actor`, `details`, `metadata`, `previousHash`, `nodeId`,
/// `hash`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Wall-clock time of the append, Unix epoch milliseconds.
    pub timestamp: i64,

    /// What happened.
    #[serde(rename = "eventType")]
    pub event_type: AuditEventType,

    /// Who it is attributed to — an address, device id, or DID.
    pub actor: ActorId,

    /// Free-text description.
    pub details: String,

    /// Structured context, sorted by key before hashing.
    pub metadata: BTreeMap<String, AttributeValue>,

    /// The `hash` of the preceding entry, or [`AuditEntry::GENESIS_HASH`]
    /// for the first entry.
    #[serde(rename = "previousHash")]
    pub previous_hash: String,

    /// The node that produced this entry.
    #[serde(rename = "nodeId")]
    pub node_id: NodeId,

    /// SHA-256 hex digest over all other fields.
    pub hash: String,
}

impl AuditEntry {
    /// The sentinel `previousHash` of the first entry in every chain.
    pub const GENESIS_HASH: &'static str = "0";

    /// Build an entry chained to `previous_hash`, stamping the current
    /// time and computing its self-hash.
    pub(crate) fn chained(
        event_type: AuditEventType,
        actor: ActorId,
        details: String,
        metadata: BTreeMap<String, AttributeValue>,
        previous_hash: String,
        node_id: NodeId,
    ) -> Self {
        let mut entry = Self {
            timestamp: epoch_millis_now(),
            event_type,
            actor,
            details,
            metadata,
            previous_hash,
            node_id,
            hash: String::new(),
        };
        entry.hash = entry.compute_hash();
        entry
    }

    /// Recompute the self-hash from the stored fields.
    ///
    /// Canonical field order: timestamp, event type wire name, actor,
    /// details, metadata (sorted pairs), previous hash, node id. The
    /// `hash` field itself is excluded.
    pub fn compute_hash(&self) -> String {
        let canonical = CanonicalEncoder::new()
            .integer(self.timestamp)
            .text(self.event_type.as_str())
            .text(self.actor.as_str())
            .text(&self.details)
            .attributes(&self.metadata)
            .text(&self.previous_hash)
            .text(self.node_id.as_str())
            .finish();
        sha256_hex(&canonical)
    }
}

/// Verify the integrity of a hash chain.
///
/// Returns `true` when both rules hold for every entry:
///
/// 1. **Prev-hash linkage** — each entry's `previous_hash` equals the
///    `hash` of the preceding entry (or the genesis sentinel for the
///    first entry).
/// 2. **Hash correctness** — each entry's stored `hash` matches the value
///    recomputed from its own fields.
///
/// Returns `false` at the first mismatch. An empty chain is valid. The
/// failing position is logged at `debug` level as a diagnostic aid; the
/// public contract stays boolean.
pub fn verify_chain<'a, I>(entries: I) -> bool
where
    I: IntoIterator<Item = &'a AuditEntry>,
{
    let mut expected_prev = AuditEntry::GENESIS_HASH.to_string();

    for (index, entry) in entries.into_iter().enumerate() {
        if entry.previous_hash != expected_prev {
            tracing::debug!(index, "audit chain linkage mismatch");
            return false;
        }
        if entry.hash != entry.compute_hash() {
            tracing::debug!(index, "audit entry hash mismatch");
            return false;
        }
        expected_prev.clone_from(&entry.hash);
    }

    true
}
