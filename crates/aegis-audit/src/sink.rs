//! # Observability Sink
//!
//! The seam between the audit chain and external observability. The log
//! emits every appended entry to its sink best-effort: a sink failure is
//! logged and swallowed, never propagated — the chain is the source of
//! truth, telemetry is a shadow of it.

use thiserror::Error;

use crate::entry::AuditEntry;

/// Error raised by a sink implementation.
///
/// Surfaces only in `warn` logs; `AuditLog::append` never returns it.
#[derive(Error, Debug)]
#[error("audit sink emission failed: {0}")]
pub struct SinkError(pub String);

/// Destination for best-effort emission of appended entries.
///
/// Implementations must be cheap and non-blocking: `emit` runs on the
/// appending thread, after the chain update has already been published.
pub trait AuditSink: Send + Sync {
    /// Emit one freshly appended entry.
    fn emit(&self, entry: &AuditEntry) -> Result<(), SinkError>;
}

/// Default sink: a structured `tracing` event per entry.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl AuditSink for TracingSink {
    fn emit(&self, entry: &AuditEntry) -> Result<(), SinkError> {
        tracing::info!(
            event_type = entry.event_type.as_str(),
            actor = %entry.actor,
            node_id = %entry.node_id,
            hash = %entry.hash,
            details = %entry.details,
            "audit entry appended"
        );
        Ok(())
    }
}
