//! The promptgate dispatcher: the fail-closed verify → audit → dispatch runner.
//!
//! Pipeline for every request:
//!
//!   Verify → Audit → [DispatchTarget::dispatch]
//!
//! `DispatchTarget::dispatch()` is NEVER called unless the verifier returned
//! `Allowed` AND the decision was written to the audit log. The code path to
//! `dispatch()` is only reachable after both succeed.

use chrono::Utc;
use tracing::{debug, info, warn};

use promptgate_contracts::{
    agent::DispatchId,
    dispatch::{DecisionRecord, DispatchResult},
    error::{GateError, GateResult},
    verify::{Denial, DenialReason, VerificationOutcome, VerificationRequest},
};

use crate::traits::{AgentLookup, AuditWriter, DispatchTarget, Verifier};

/// Security-event log target. Operators route this target separately.
pub const SECURITY_TARGET: &str = "promptgate::security";

/// Drives verification, auditing, and dispatch for incoming requests.
///
/// The dispatcher holds no registry of its own. Callers pass the registry
/// snapshot they want the request decided against, so a reload between two
/// requests never mixes two registries inside one decision.
pub struct Dispatcher {
    verifier: Box<dyn Verifier>,
    audit: Box<dyn AuditWriter>,
    target: Box<dyn DispatchTarget>,
}

impl Dispatcher {
    pub fn new(
        verifier: Box<dyn Verifier>,
        audit: Box<dyn AuditWriter>,
        target: Box<dyn DispatchTarget>,
    ) -> Self {
        Self { verifier, audit, target }
    }

    /// Decide and, if allowed, dispatch one request.
    ///
    /// # Pipeline
    ///
    /// 1. `verifier.verify()` against `agents`
    /// 2. Write a `DecisionRecord` for the outcome, allowed or not
    /// 3. Denied → return `DispatchResult::Denied`
    /// 4. Allowed → `target.dispatch()` and return `DispatchResult::Dispatched`
    ///
    /// # Errors
    ///
    /// Returns `Err` for audit write failures and dispatch target failures.
    /// Denials are NOT errors; they are a valid `DispatchResult` variant.
    pub fn dispatch(
        &self,
        agents: &dyn AgentLookup,
        request: &VerificationRequest,
    ) -> GateResult<DispatchResult> {
        debug!(agent_id = %request.agent_id, "dispatch request received");

        // ── Step 1: Verification ─────────────────────────────────────────────
        let outcome = self.verifier.verify(agents, request);

        let agent = match &outcome {
            VerificationOutcome::Denied { denial } => {
                log_denial(&request.agent_id, denial);

                // ── Step 2 (denied): audit, then stop ────────────────────────
                self.audit.write(&DecisionRecord {
                    agent_id: request.agent_id.clone(),
                    dispatch_id: None,
                    outcome: outcome.clone(),
                    timestamp: Utc::now(),
                })?;

                return Ok(DispatchResult::Denied {
                    agent_id: request.agent_id.clone(),
                    denial: denial.clone(),
                });
            }
            VerificationOutcome::Allowed { agent } => agent.clone(),
        };

        // ── Step 2 (allowed): audit before anything leaves the process ───────
        let dispatch_id = DispatchId::new();
        let timestamp = Utc::now();
        self.audit.write(&DecisionRecord {
            agent_id: request.agent_id.clone(),
            dispatch_id: Some(dispatch_id),
            outcome,
            timestamp,
        })?;

        // ── Step 3: Downstream action ────────────────────────────────────────
        //
        // The record is re-read from the same snapshot the verifier used.
        let record = agents
            .lookup(agent.agent_id.as_str())
            .ok_or_else(|| GateError::DispatchFailed {
                reason: format!("agent '{}' vanished from registry snapshot", agent.agent_id),
            })?;

        let output = self
            .target
            .dispatch(&agent, record, request.request_payload.as_ref())?;

        info!(
            agent_id = %agent.agent_id,
            dispatch_id = %dispatch_id,
            version = %agent.version,
            "prompt verified and dispatched"
        );

        Ok(DispatchResult::Dispatched {
            dispatch_id,
            agent,
            output,
            timestamp,
        })
    }

    /// Seal the audit log for `session_id`.
    pub fn shutdown(&self, session_id: &str) -> GateResult<()> {
        self.audit.finalize(session_id)
    }
}

/// Emit the security log line for a denial. Hashes are never logged.
///
/// A malformed hash is a caller error but still goes to the security target.
fn log_denial(agent_id: &str, denial: &Denial) {
    let reason = denial.reason();
    match reason {
        DenialReason::MissingAgentId | DenialReason::MissingHash => {
            debug!(kind = %reason, agent_id = %agent_id, "request rejected by validation");
        }
        DenialReason::MalformedHash | DenialReason::UnknownAgent | DenialReason::HashMismatch => {
            warn!(
                target: SECURITY_TARGET,
                kind = %reason,
                agent_id = %agent_id,
                "dispatch denied"
            );
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
