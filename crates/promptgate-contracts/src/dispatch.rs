//! Dispatch results and audit records.
//!
//! `DispatchResult` is what the dispatcher returns to the front end after a
//! request. `DecisionRecord` is what gets written to the audit log, one per
//! verification decision.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    agent::{AgentSnapshot, DispatchId},
    verify::{Denial, VerificationOutcome},
};

/// The outcome of a single dispatch request.
///
/// - `Dispatched` → verification passed and the downstream action ran
/// - `Denied` → a verification gate failed; nothing was dispatched
#[derive(Debug, Clone)]
pub enum DispatchResult {
    Dispatched {
        dispatch_id: DispatchId,
        agent: AgentSnapshot,
        /// Whatever the dispatch target produced (model output, or nothing
        /// for attestation-only deployments).
        output: Option<serde_json::Value>,
        timestamp: DateTime<Utc>,
    },

    Denied {
        /// The agent id as the caller supplied it (possibly empty).
        agent_id: String,
        denial: Denial,
    },
}

/// An immutable record of one verification decision.
///
/// Every decision, allowed or denied, produces exactly one record. Hashes
/// only appear inside `outcome`, and only where the outcome type allows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    /// The agent id as supplied by the caller.
    pub agent_id: String,
    /// Present only for allowed decisions.
    pub dispatch_id: Option<DispatchId>,
    pub outcome: VerificationOutcome,
    /// Wall-clock time the record was created (UTC).
    pub timestamp: DateTime<Utc>,
}
