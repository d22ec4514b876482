//! Verification request and outcome types.
//!
//! The verifier consumes a `VerificationRequest` and produces exactly one
//! `VerificationOutcome`. Denials are ordinary values, not errors: they are
//! terminal, surfaced to the caller, and never retried.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::agent::AgentSnapshot;

/// The fields a caller supplies to ask for a dispatch.
///
/// Empty strings are treated exactly like absent fields by the verifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerificationRequest {
    #[serde(default)]
    pub agent_id: String,
    #[serde(default)]
    pub prompt_hash: String,
    /// Opaque user input forwarded to the dispatch target. Never inspected
    /// by the verifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_payload: Option<serde_json::Value>,
}

impl VerificationRequest {
    pub fn new(agent_id: impl Into<String>, prompt_hash: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            prompt_hash: prompt_hash.into(),
            request_payload: None,
        }
    }

    /// Attach a payload for the downstream dispatch step.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.request_payload = Some(payload);
        self
    }
}

/// Reason tag for a denial.
///
/// The first three are caller mistakes (transport 400); the last two are
/// security-relevant conditions (transport 403).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    MissingAgentId,
    MissingHash,
    MalformedHash,
    UnknownAgent,
    HashMismatch,
}

impl DenialReason {
    /// Stable snake_case tag used in response bodies and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            DenialReason::MissingAgentId => "missing_agent_id",
            DenialReason::MissingHash => "missing_hash",
            DenialReason::MalformedHash => "malformed_hash",
            DenialReason::UnknownAgent => "unknown_agent",
            DenialReason::HashMismatch => "hash_mismatch",
        }
    }

    /// True for reasons caused by a malformed or incomplete request.
    pub fn is_validation(self) -> bool {
        matches!(
            self,
            DenialReason::MissingAgentId | DenialReason::MissingHash | DenialReason::MalformedHash
        )
    }

    /// True for reasons that must raise the response's security flag.
    pub fn is_security(self) -> bool {
        !self.is_validation()
    }
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A denial with exactly the detail its reason permits.
///
/// Only `HashMismatch` carries hash data. `UnknownAgent` has no fields at
/// all, so an unknown agent can never leak what a correct hash looks like.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Denial {
    MissingAgentId,
    MissingHash,
    MalformedHash,
    UnknownAgent,
    HashMismatch {
        expected_hash: String,
        received_hash: String,
    },
}

impl Denial {
    pub fn reason(&self) -> DenialReason {
        match self {
            Denial::MissingAgentId => DenialReason::MissingAgentId,
            Denial::MissingHash => DenialReason::MissingHash,
            Denial::MalformedHash => DenialReason::MalformedHash,
            Denial::UnknownAgent => DenialReason::UnknownAgent,
            Denial::HashMismatch { .. } => DenialReason::HashMismatch,
        }
    }
}

/// The single result of verifying one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum VerificationOutcome {
    /// The agent is registered and the supplied hash matches exactly.
    Allowed { agent: AgentSnapshot },

    /// The request failed one of the verification gates.
    Denied { denial: Denial },
}

impl VerificationOutcome {
    pub fn is_allowed(&self) -> bool {
        matches!(self, VerificationOutcome::Allowed { .. })
    }

    /// The denial reason, or `None` for an allowed outcome.
    pub fn denial_reason(&self) -> Option<DenialReason> {
        match self {
            VerificationOutcome::Allowed { .. } => None,
            VerificationOutcome::Denied { denial } => Some(denial.reason()),
        }
    }
}

impl From<Denial> for VerificationOutcome {
    fn from(denial: Denial) -> Self {
        VerificationOutcome::Denied { denial }
    }
}
