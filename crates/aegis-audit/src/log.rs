//! # Audit Log — Append-Only Chained Sequence
//!
//! One `AuditLog` exists per node process, constructed at startup with the
//! node's identifier and shared by `Arc` with every collaborator that
//! emits events. Mutation is append-only: no entry is ever removed,
//! reordered, or edited.
//!
//! ## Concurrency
//!
//! The chain tail (entry vector + cached last hash) lives behind one
//! `RwLock`. `append` is the only writer and holds the write guard for
//! exactly the read-modify-write of the tail: read `last_hash`, build the
//! entry, publish it, advance `last_hash`. Two concurrent appends can
//! never observe the same `last_hash` and fork the chain.
//!
//! Sink emission happens after the guard is released — it can neither
//! block nor fail the chain update. Readers take the read guard, see only
//! fully published `Arc` entries, and run concurrently with each other.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;

use aegis_core::{ActorId, AttributeValue, NodeId};

use crate::entry::{verify_chain, AuditEntry};
use crate::event::AuditEventType;
use crate::sink::{AuditSink, TracingSink};

/// The guarded chain tail.
struct ChainState {
    /// All entries in append order.
    entries: Vec<Arc<AuditEntry>>,
    /// The `hash` of the last entry, or the genesis sentinel.
    last_hash: String,
}

/// Append-only, hash-chained audit trail for one ledger node.
pub struct AuditLog {
    node_id: NodeId,
    state: RwLock<ChainState>,
    sink: Box<dyn AuditSink>,
}

/// Snapshot of log counters, suitable for a status endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct AuditStats {
    /// Number of entries in the chain.
    #[serde(rename = "totalEntries")]
    pub total_entries: usize,

    /// The producing node.
    #[serde(rename = "nodeId")]
    pub node_id: NodeId,

    /// The chain tail hash, or the genesis sentinel for an empty log.
    #[serde(rename = "lastHash")]
    pub last_hash: String,

    /// Entry count per event type, keyed by wire name.
    #[serde(rename = "entriesByType")]
    pub entries_by_type: BTreeMap<String, usize>,
}

impl AuditLog {
    /// Create an empty log for the given node, emitting to the default
    /// [`TracingSink`].
    pub fn new(node_id: NodeId) -> Self {
        Self::with_sink(node_id, Box::new(TracingSink))
    }

    /// Create an empty log that emits every appended entry to `sink`.
    pub fn with_sink(node_id: NodeId, sink: Box<dyn AuditSink>) -> Self {
        Self {
            node_id,
            state: RwLock::new(ChainState {
                entries: Vec::new(),
                last_hash: AuditEntry::GENESIS_HASH.to_string(),
            }),
            sink,
        }
    }

    /// The node this log belongs to.
    pub fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    /// Append a new entry chained to the current tail and return it.
    ///
    /// The chain update is one atomic critical section. Sink emission runs
    /// afterwards, best-effort: a sink failure is logged at `warn` and
    /// swallowed — it never fails the append and the chain is already
    /// consistent by the time the sink runs.
    pub fn append(
        &self,
        event_type: AuditEventType,
        actor: ActorId,
        details: impl Into<String>,
        metadata: BTreeMap<String, AttributeValue>,
    ) -> Arc<AuditEntry> {
        let entry = {
            let mut state = self.write_state();
            let entry = Arc::new(AuditEntry::chained(
                event_type,
                actor,
                details.into(),
                metadata,
                state.last_hash.clone(),
                self.node_id.clone(),
            ));
            state.entries.push(Arc::clone(&entry));
            state.last_hash.clone_from(&entry.hash);
            entry
        };

        if let Err(e) = self.sink.emit(&entry) {
            tracing::warn!(error = %e, hash = %entry.hash, "audit sink emission failed");
        }

        entry
    }

    /// Walk the chain from the genesis sentinel, recomputing every
    /// self-hash and checking every link. `false` at the first mismatch.
    pub fn verify_integrity(&self) -> bool {
        let state = self.read_state();
        verify_chain(state.entries.iter().map(Arc::as_ref))
    }

    /// All entries, in chain order.
    pub fn entries(&self) -> Vec<Arc<AuditEntry>> {
        self.read_state().entries.clone()
    }

    /// Entries of one event type, in chain order.
    pub fn entries_by_type(&self, event_type: AuditEventType) -> Vec<Arc<AuditEntry>> {
        self.filtered(|e| e.event_type == event_type)
    }

    /// Entries attributed to one actor, in chain order.
    pub fn entries_by_actor(&self, actor: &ActorId) -> Vec<Arc<AuditEntry>> {
        self.filtered(|e| &e.actor == actor)
    }

    /// Entries whose timestamp falls within `[start, end]` (both bounds
    /// inclusive, epoch milliseconds), in chain order.
    pub fn entries_by_time_range(&self, start: i64, end: i64) -> Vec<Arc<AuditEntry>> {
        self.filtered(|e| e.timestamp >= start && e.timestamp <= end)
    }

    /// Counters: total entries, node, tail hash, count per event type.
    pub fn stats(&self) -> AuditStats {
        let state = self.read_state();
        let mut entries_by_type = BTreeMap::new();
        for entry in &state.entries {
            *entries_by_type
                .entry(entry.event_type.as_str().to_string())
                .or_insert(0) += 1;
        }
        AuditStats {
            total_entries: state.entries.len(),
            node_id: self.node_id.clone(),
            last_hash: state.last_hash.clone(),
            entries_by_type,
        }
    }

    /// A lazy iterator over owned entry records in chain order.
    ///
    /// The iterator holds a snapshot taken at call time: entries appended
    /// afterwards are not included. Call `export()` again to restart from
    /// a fresh snapshot. Each record serializes with the exact wire field
    /// names (`timestamp`, `eventType`, `actor`, `details`, `metadata`,
    /// `previousHash`, `nodeId`, `hash`).
    pub fn export(&self) -> AuditExport {
        AuditExport {
            entries: self.read_state().entries.clone().into_iter(),
        }
    }

    /// Number of entries in the chain.
    pub fn len(&self) -> usize {
        self.read_state().entries.len()
    }

    /// True when nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.read_state().entries.is_empty()
    }

    /// The chain tail hash, or the genesis sentinel for an empty log.
    pub fn last_hash(&self) -> String {
        self.read_state().last_hash.clone()
    }

    fn filtered<F>(&self, predicate: F) -> Vec<Arc<AuditEntry>>
    where
        F: Fn(&AuditEntry) -> bool,
    {
        let state = self.read_state();
        let mut matches = Vec::new();
        for entry in &state.entries {
            if predicate(entry) {
                matches.push(Arc::clone(entry));
            }
        }
        matches
    }

    // The critical section never panics, so a poisoned lock (a panic on
    // some other thread between guard acquisition and release) still
    // guards consistent state; recover the guard instead of propagating.
    fn read_state(&self) -> RwLockReadGuard<'_, ChainState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, ChainState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for AuditLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.read_state();
        f.debug_struct("AuditLog")
            .field("node_id", &self.node_id)
            .field("entries", &state.entries.len())
            .field("last_hash", &state.last_hash)
            .finish()
    }
}

/// Snapshot iterator returned by [`AuditLog::export`].
pub struct AuditExport {
    entries: std::vec::IntoIter<Arc<AuditEntry>>,
}

impl Iterator for AuditExport {
    type Item = AuditEntry;

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next().map(|e| (*e).clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl ExactSizeIterator for AuditExport {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{SinkError, TracingSink};
    use aegis_core::value::attributes;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn sample_log() -> AuditLog {
        let log = AuditLog::new(NodeId::new("n1"));
        log.append(
            AuditEventType::TransactionSubmitted,
            ActorId::new("addr1"),
            "tx1",
            BTreeMap::new(),
        );
        log.append(
            AuditEventType::BlockCreated,
            ActorId::new("n1"),
            "block1",
            BTreeMap::new(),
        );
        log.append(
            AuditEventType::DeviceProvisioned,
            ActorId::new("dev1"),
            "sensor",
            attributes([("model", "X1".into())]),
        );
        log
    }

    #[test]
    fn test_append_links_chain() {
        let log = sample_log();
        let entries = log.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].previous_hash, AuditEntry::GENESIS_HASH);
        assert_eq!(entries[1].previous_hash, entries[0].hash);
        assert_eq!(entries[2].previous_hash, entries[1].hash);
        assert_eq!(log.last_hash(), entries[2].hash);
    }

    #[test]
    fn test_empty_log_state() {
        let log = AuditLog::new(NodeId::new("n1"));
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
        assert_eq!(log.last_hash(), AuditEntry::GENESIS_HASH);
        assert!(log.verify_integrity());
    }

    #[test]
    fn test_verify_integrity_on_appended_log() {
        assert!(sample_log().verify_integrity());
    }

    #[test]
    fn test_append_returns_published_entry() {
        let log = AuditLog::new(NodeId::new("n1"));
        let entry = log.append(
            AuditEventType::NodeStarted,
            ActorId::new("n1"),
            "boot",
            BTreeMap::new(),
        );
        assert_eq!(entry.hash, log.last_hash());
        assert_eq!(log.entries()[0], entry);
    }

    #[test]
    fn test_entries_by_type() {
        let log = sample_log();
        let blocks = log.entries_by_type(AuditEventType::BlockCreated);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].details, "block1");
        assert!(log.entries_by_type(AuditEventType::NodeStopped).is_empty());
    }

    #[test]
    fn test_entries_by_actor() {
        let log = sample_log();
        let by_actor = log.entries_by_actor(&ActorId::new("dev1"));
        assert_eq!(by_actor.len(), 1);
        assert_eq!(by_actor[0].event_type, AuditEventType::DeviceProvisioned);
    }

    #[test]
    fn test_entries_by_time_range_inclusive() {
        let log = sample_log();
        let entries = log.entries();
        let (start, end) = (entries[0].timestamp, entries[2].timestamp);
        // Bounds are inclusive: the full range returns everything.
        assert_eq!(log.entries_by_time_range(start, end).len(), 3);
        // A degenerate range still matches entries stamped at exactly
        // that millisecond.
        let at_first = log.entries_by_time_range(start, start);
        assert!(at_first.iter().any(|e| e.hash == entries[0].hash));
        // A disjoint range matches nothing.
        assert!(log.entries_by_time_range(end + 1, end + 100).is_empty());
    }

    #[test]
    fn test_stats_counts_per_event_type() {
        let log = sample_log();
        let stats = log.stats();
        assert_eq!(stats.total_entries, 3);
        assert_eq!(stats.node_id, NodeId::new("n1"));
        assert_eq!(stats.last_hash, log.last_hash());
        assert_eq!(stats.entries_by_type.len(), 3);
        assert_eq!(stats.entries_by_type["TRANSACTION_SUBMITTED"], 1);
        assert_eq!(stats.entries_by_type["BLOCK_CREATED"], 1);
        assert_eq!(stats.entries_by_type["DEVICE_PROVISIONED"], 1);
    }

    #[test]
    fn test_stats_wire_names() {
        let stats = sample_log().stats();
        let val = serde_json::to_value(&stats).unwrap();
        assert!(val.get("totalEntries").is_some());
        assert!(val.get("nodeId").is_some());
        assert!(val.get("lastHash").is_some());
        assert!(val.get("entriesByType").is_some());
    }

    #[test]
    fn test_export_chain_order_and_restart() {
        let log = sample_log();
        let first_pass: Vec<AuditEntry> = log.export().collect();
        assert_eq!(first_pass.len(), 3);
        assert_eq!(first_pass[0].details, "tx1");
        assert_eq!(first_pass[2].details, "sensor");

        // export() restarts from a fresh snapshot.
        let second_pass: Vec<AuditEntry> = log.export().collect();
        assert_eq!(first_pass, second_pass);
    }

    #[test]
    fn test_export_snapshot_excludes_later_appends() {
        let log = sample_log();
        let export = log.export();
        log.append(
            AuditEventType::NodeStopped,
            ActorId::new("n1"),
            "shutdown",
            BTreeMap::new(),
        );
        assert_eq!(export.count(), 3);
        assert_eq!(log.export().count(), 4);
    }

    #[test]
    fn test_export_is_exact_size() {
        let export = sample_log().export();
        assert_eq!(export.len(), 3);
    }

    #[test]
    fn test_tampered_entry_detected() {
        let log = sample_log();
        let mut entries: Vec<AuditEntry> =
            log.entries().iter().map(|e| (**e).clone()).collect();
        assert!(verify_chain(&entries));

        entries[1].details = "forged block".to_string();
        assert!(!verify_chain(&entries));
    }

    #[test]
    fn test_with_sink_emits() {
        // TracingSink always succeeds; the append must return normally.
        let log = AuditLog::with_sink(NodeId::new("n1"), Box::new(TracingSink));
        log.append(
            AuditEventType::NodeStarted,
            ActorId::new("n1"),
            "boot",
            BTreeMap::new(),
        );
        assert_eq!(log.len(), 1);
        assert!(log.verify_integrity());
    }

    struct FailingSink {
        calls: AtomicUsize,
    }

    impl AuditSink for FailingSink {
        fn emit(&self, _entry: &AuditEntry) -> Result<(), SinkError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(SinkError("collector unreachable".to_string()))
        }
    }

    #[test]
    fn test_sink_failure_never_fails_append() {
        let log = AuditLog::with_sink(
            NodeId::new("n1"),
            Box::new(FailingSink {
                calls: AtomicUsize::new(0),
            }),
        );
        for i in 0..5 {
            log.append(
                AuditEventType::TransactionSubmitted,
                ActorId::new("addr1"),
                format!("tx{i}"),
                BTreeMap::new(),
            );
        }
        // Every append succeeded and the chain stayed intact despite the
        // sink failing each time.
        assert_eq!(log.len(), 5);
        assert!(log.verify_integrity());
    }

    #[test]
    fn test_concurrent_appends_never_fork_chain() {
        let log = Arc::new(AuditLog::new(NodeId::new("n1")));
        let mut handles = Vec::new();
        for t in 0..8 {
            let log = Arc::clone(&log);
            handles.push(std::thread::spawn(move || {
                for i in 0..50 {
                    log.append(
                        AuditEventType::TransactionSubmitted,
                        ActorId::new(format!("actor-{t}")),
                        format!("tx-{t}-{i}"),
                        BTreeMap::new(),
                    );
                }
            }));
        }
        for handle in handles {
            handle.join().expect("appender thread panicked");
        }

        assert_eq!(log.len(), 400);
        assert!(log.verify_integrity());

        // Every hash appears exactly once as a previous_hash successor —
        // no two entries chained to the same parent.
        let entries = log.entries();
        let mut parents: Vec<&str> = entries.iter().map(|e| e.previous_hash.as_str()).collect();
        parents.sort_unstable();
        parents.dedup();
        assert_eq!(parents.len(), entries.len());
    }

    #[test]
    fn test_readers_run_during_appends() {
        let log = Arc::new(AuditLog::new(NodeId::new("n1")));
        let writer = {
            let log = Arc::clone(&log);
            std::thread::spawn(move || {
                for i in 0..200 {
                    log.append(
                        AuditEventType::PrivateDataStored,
                        ActorId::new("dev1"),
                        format!("blob-{i}"),
                        BTreeMap::new(),
                    );
                }
            })
        };
        // Readers observe a consistent prefix of the chain at all times.
        for _ in 0..50 {
            assert!(log.verify_integrity());
            let stats = log.stats();
            assert_eq!(stats.entries_by_type.values().sum::<usize>(), stats.total_entries);
        }
        writer.join().expect("writer thread panicked");
        assert_eq!(log.len(), 200);
        assert!(log.verify_integrity());
    }

    #[test]
    fn test_debug_does_not_dump_entries() {
        let log = sample_log();
        let debug = format!("{log:?}");
        assert!(debug.contains("AuditLog"));
        assert!(debug.contains("node_id"));
        assert!(!debug.contains("tx1"));
    }
}
