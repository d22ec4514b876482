//! The attestation-only dispatch target.

use serde_json::Value;
use tracing::debug;

use promptgate_contracts::{
    agent::{AgentRecord, AgentSnapshot},
    error::GateResult,
};
use promptgate_core::traits::DispatchTarget;

/// Confirms the prompt and produces no model output.
///
/// The response for an allowed request then carries only the attestation
/// (agent, governance metadata, dispatch id).
#[derive(Debug, Default, Clone, Copy)]
pub struct AttestationTarget;

impl DispatchTarget for AttestationTarget {
    fn dispatch(
        &self,
        agent: &AgentSnapshot,
        _record: &AgentRecord,
        _payload: Option<&Value>,
    ) -> GateResult<Option<Value>> {
        debug!(agent_id = %agent.agent_id, "attestation issued");
        Ok(None)
    }
}
