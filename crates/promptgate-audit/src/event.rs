//! Audit event and log types.
//!
//! `AuditEvent` wraps one `DecisionRecord` with its chain position and the
//! SHA-256 hashes that make tampering detectable. `AuditLog` is the sealed
//! export of a whole session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use promptgate_contracts::dispatch::DecisionRecord;

/// A single entry in the SHA-256 hash chain for one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Position in the chain, starting at 0.
    pub sequence: u64,

    /// The service session (one process lifetime) this event belongs to.
    pub session_id: String,

    pub record: DecisionRecord,

    /// `this_hash` of the previous event, or `GENESIS_HASH` for the first.
    pub prev_hash: String,

    /// SHA-256 (hex) over (session_id, sequence, prev_hash, record).
    pub this_hash: String,
}

impl AuditEvent {
    /// The `prev_hash` of the first event in every chain: 64 hex zeros.
    pub const GENESIS_HASH: &'static str =
        "0000000000000000000000000000000000000000000000000000000000000000";
}

/// A sealed audit log for one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLog {
    pub session_id: String,

    /// All events in chain order.
    pub events: Vec<AuditEvent>,

    pub finalized_at: DateTime<Utc>,

    /// `this_hash` of the last event; empty when no events were written.
    pub terminal_hash: String,
}

impl AuditLog {
    /// Number of allowed decisions in the log.
    pub fn allowed_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| e.record.outcome.is_allowed())
            .count()
    }

    /// Number of denied decisions in the log.
    pub fn denied_count(&self) -> usize {
        self.events.len() - self.allowed_count()
    }
}
