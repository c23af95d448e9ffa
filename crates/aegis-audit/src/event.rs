//! # Audit Event Vocabulary
//!
//! The closed enumeration of security-relevant events a node records.
//! Adding a variant forces every consumer `match` to handle it; free-form
//! event strings cannot exist in this system.
//!
//! Wire names are SCREAMING_SNAKE_CASE and are part of the export
//! contract; `as_str()` returns the same rendering used in canonical
//! byte production.

use serde::{Deserialize, Serialize};

/// The category an audit event belongs to, used for stats grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    /// Transaction lifecycle.
    Transaction,
    /// Block lifecycle.
    Block,
    /// Device lifecycle.
    Device,
    /// Identity and credential operations.
    Identity,
    /// Private data storage and access.
    PrivateData,
    /// Consensus decisions.
    Consensus,
    /// Access failures and policy violations.
    Security,
    /// Node-level system events.
    System,
}

impl EventCategory {
    /// The canonical category name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transaction => "transaction",
            Self::Block => "block",
            Self::Device => "device",
            Self::Identity => "identity",
            Self::PrivateData => "private_data",
            Self::Consensus => "consensus",
            Self::Security => "security",
            Self::System => "system",
        }
    }
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A security-relevant event type recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditEventType {
    // Transaction lifecycle
    /// A transaction entered the node's pending set.
    TransactionSubmitted,
    /// A transaction passed validation.
    TransactionValidated,
    /// A transaction was committed in a block.
    TransactionCommitted,
    /// A transaction was rejected.
    TransactionRejected,

    // Block lifecycle
    /// A block was produced by this node.
    BlockCreated,
    /// A block passed validation.
    BlockValidated,
    /// A block was appended to the ledger.
    BlockAppended,

    // Device lifecycle
    /// A device was provisioned into the network.
    DeviceProvisioned,
    /// A device was activated.
    DeviceActivated,
    /// A device was decommissioned.
    DeviceDecommissioned,

    // Identity / credential operations
    /// An identity was registered.
    IdentityRegistered,
    /// A verifiable credential was issued.
    CredentialIssued,
    /// A verifiable credential was verified.
    CredentialVerified,
    /// A verifiable credential was revoked.
    CredentialRevoked,

    // Private data
    /// Private data was stored.
    PrivateDataStored,
    /// Private data was accessed.
    PrivateDataAccessed,

    // Consensus
    /// A consensus round started.
    ConsensusRoundStarted,
    /// Consensus was reached on a proposal.
    ConsensusReached,

    // Security
    /// An access request was denied.
    AccessDenied,
    /// An authentication attempt failed.
    AuthenticationFailed,
    /// A policy rule was violated.
    PolicyViolation,

    // System
    /// The node started.
    NodeStarted,
    /// The node stopped.
    NodeStopped,
    /// Node configuration changed.
    ConfigChanged,
}

impl AuditEventType {
    /// The wire name, e.g. `TRANSACTION_SUBMITTED`.
    ///
    /// This exact string is fed into canonical byte production and carried
    /// in exports; it must match the serde rendering.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TransactionSubmitted => "TRANSACTION_SUBMITTED",
            Self::TransactionValidated => "TRANSACTION_VALIDATED",
            Self::TransactionCommitted => "TRANSACTION_COMMITTED",
            Self::TransactionRejected => "TRANSACTION_REJECTED",
            Self::BlockCreated => "BLOCK_CREATED",
            Self::BlockValidated => "BLOCK_VALIDATED",
            Self::BlockAppended => "BLOCK_APPENDED",
            Self::DeviceProvisioned => "DEVICE_PROVISIONED",
            Self::DeviceActivated => "DEVICE_ACTIVATED",
            Self::DeviceDecommissioned => "DEVICE_DECOMMISSIONED",
            Self::IdentityRegistered => "IDENTITY_REGISTERED",
            Self::CredentialIssued => "CREDENTIAL_ISSUED",
            Self::CredentialVerified => "CREDENTIAL_VERIFIED",
            Self::CredentialRevoked => "CREDENTIAL_REVOKED",
            Self::PrivateDataStored => "PRIVATE_DATA_STORED",
            Self::PrivateDataAccessed => "PRIVATE_DATA_ACCESSED",
            Self::ConsensusRoundStarted => "CONSENSUS_ROUND_STARTED",
            Self::ConsensusReached => "CONSENSUS_REACHED",
            Self::AccessDenied => "ACCESS_DENIED",
            Self::AuthenticationFailed => "AUTHENTICATION_FAILED",
            Self::PolicyViolation => "POLICY_VIOLATION",
            Self::NodeStarted => "NODE_STARTED",
            Self::NodeStopped => "NODE_STOPPED",
            Self::ConfigChanged => "CONFIG_CHANGED",
        }
    }

    /// The category this event belongs to.
    pub fn category(&self) -> EventCategory {
        match self {
            Self::TransactionSubmitted
            | Self::TransactionValidated
            | Self::TransactionCommitted
            | Self::TransactionRejected => EventCategory::Transaction,
            Self::BlockCreated | Self::BlockValidated | Self::BlockAppended => {
                EventCategory::Block
            }
            Self::DeviceProvisioned | Self::DeviceActivated | Self::DeviceDecommissioned => {
                EventCategory::Device
            }
            Self::IdentityRegistered
            | Self::CredentialIssued
            | Self::CredentialVerified
            | Self::CredentialRevoked => EventCategory::Identity,
            Self::PrivateDataStored | Self::PrivateDataAccessed => EventCategory::PrivateData,
            Self::ConsensusRoundStarted | Self::ConsensusReached => EventCategory::Consensus,
            Self::AccessDenied | Self::AuthenticationFailed | Self::PolicyViolation => {
                EventCategory::Security
            }
            Self::NodeStarted | Self::NodeStopped | Self::ConfigChanged => EventCategory::System,
        }
    }
}

impl std::fmt::Display for AuditEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
