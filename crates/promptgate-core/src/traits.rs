//! Core trait definitions for the promptgate pipeline.
//!
//! - `AgentLookup`: read-only view of the agent registry
//! - `Verifier`: trusted gate (decides allow / deny)
//! - `AuditWriter`: trusted sink (records every decision)
//! - `DispatchTarget`: downstream action, only reached after an allow
//!
//! The dispatcher wires them together. A `DispatchTarget` is never called
//! unless the verifier returned `VerificationOutcome::Allowed` and the
//! decision was audited.

use promptgate_contracts::{
    agent::{AgentRecord, AgentSnapshot},
    dispatch::DecisionRecord,
    error::GateResult,
    verify::{VerificationOutcome, VerificationRequest},
};

/// Read-only access to the registered agents.
///
/// Implementations must be total over all string inputs: an unknown id is
/// `None`, never a panic.
pub trait AgentLookup: Send + Sync {
    fn lookup(&self, agent_id: &str) -> Option<&AgentRecord>;
}

/// The verifier: the only component that decides whether a request may pass.
///
/// Implementations must be pure and deterministic. They perform no I/O and
/// no logging of their own beyond diagnostics; auditing is the caller's job.
pub trait Verifier: Send + Sync {
    /// Decide `request` against the agents visible through `agents`.
    fn verify(&self, agents: &dyn AgentLookup, request: &VerificationRequest)
        -> VerificationOutcome;
}

/// The audit writer: the immutable decision record.
///
/// Every decision, regardless of outcome, produces exactly one
/// `DecisionRecord`. A failed write is fatal for the request: nothing is
/// dispatched and `GateError::AuditWriteFailed` is returned.
pub trait AuditWriter: Send + Sync {
    /// Append one decision record to the audit log.
    fn write(&self, record: &DecisionRecord) -> GateResult<()>;

    /// Seal the log for `session_id`. Called once at shutdown.
    fn finalize(&self, session_id: &str) -> GateResult<()>;
}

/// The action gated behind a successful verification.
///
/// Implementations may call out to a language-model API, or do nothing and
/// let the response act as an attestation.
pub trait DispatchTarget: Send + Sync {
    /// Run the downstream action for a verified agent.
    ///
    /// Returns the output to include in the response, if any.
    fn dispatch(
        &self,
        agent: &AgentSnapshot,
        record: &AgentRecord,
        payload: Option<&serde_json::Value>,
    ) -> GateResult<Option<serde_json::Value>>;
}
