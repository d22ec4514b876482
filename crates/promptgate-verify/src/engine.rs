//! Hash verifier implementation.
//!
//! `HashVerifier` is stateless. It holds no registry; the caller passes the
//! snapshot to decide against on every call, which keeps the verifier pure
//! and lets a registry reload happen between any two calls.

use subtle::ConstantTimeEq;
use tracing::debug;

use promptgate_contracts::{
    agent::{AgentId, AgentRecord},
    hash::is_sha256_hex,
    verify::{Denial, VerificationOutcome, VerificationRequest},
};
use promptgate_core::traits::{AgentLookup, Verifier};

/// The fail-closed prompt hash verifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashVerifier;

impl HashVerifier {
    pub fn new() -> Self {
        Self
    }

    /// Run the four gates. Returns the matched record, or the first failure.
    fn decide<'a>(
        agents: &'a dyn AgentLookup,
        request: &VerificationRequest,
    ) -> Result<&'a AgentRecord, Denial> {
        // ── Gate 1: presence ─────────────────────────────────────────────────
        if request.agent_id.is_empty() {
            return Err(Denial::MissingAgentId);
        }
        if request.prompt_hash.is_empty() {
            return Err(Denial::MissingHash);
        }

        // ── Gate 2: format (registry untouched) ─────────────────────────────
        if !is_sha256_hex(&request.prompt_hash) {
            return Err(Denial::MalformedHash);
        }

        // ── Gate 3: existence ────────────────────────────────────────────────
        let record = agents
            .lookup(&request.agent_id)
            .ok_or(Denial::UnknownAgent)?;

        // ── Gate 4: exact equality ───────────────────────────────────────────
        //
        // Both sides are validated 64-byte ASCII strings at this point.
        if !hashes_equal(&record.hash, &request.prompt_hash) {
            return Err(Denial::HashMismatch {
                expected_hash: record.hash.clone(),
                received_hash: request.prompt_hash.clone(),
            });
        }

        Ok(record)
    }
}

impl Verifier for HashVerifier {
    fn verify(
        &self,
        agents: &dyn AgentLookup,
        request: &VerificationRequest,
    ) -> VerificationOutcome {
        let outcome = match Self::decide(agents, request) {
            Ok(record) => VerificationOutcome::Allowed {
                agent: record.snapshot(&AgentId::new(request.agent_id.as_str())),
            },
            Err(denial) => VerificationOutcome::Denied { denial },
        };

        debug!(
            agent_id = %request.agent_id,
            allowed = outcome.is_allowed(),
            reason = ?outcome.denial_reason(),
            "verification complete"
        );
        outcome
    }
}

/// Byte-for-byte equality in constant time. Length mismatch is inequality.
fn hashes_equal(stored: &str, received: &str) -> bool {
    stored.len() == received.len() && bool::from(stored.as_bytes().ct_eq(received.as_bytes()))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
