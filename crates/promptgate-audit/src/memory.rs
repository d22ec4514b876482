//! In-memory implementation of `AuditWriter`.
//!
//! One writer is shared by every request-handling thread; clones share the
//! same chain. Nothing is persisted, so the log lives as long as the
//! process. Export it with `export_log()` before shutdown if it must be kept.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use tracing::{debug, info};

use promptgate_contracts::{
    dispatch::DecisionRecord,
    error::{GateError, GateResult},
};
use promptgate_core::traits::AuditWriter;

use crate::{
    chain::{hash_event, verify_chain},
    event::{AuditEvent, AuditLog},
};

/// The chain for one session. `events[i].sequence == i` and each event's
/// `prev_hash` is the `this_hash` of the one before it.
pub(crate) struct SessionChain {
    pub(crate) events: Vec<AuditEvent>,
}

impl SessionChain {
    fn head(&self) -> &str {
        self.events
            .last()
            .map_or(AuditEvent::GENESIS_HASH, |e| e.this_hash.as_str())
    }

    fn append(
        &mut self,
        session_id: &str,
        record: &DecisionRecord,
    ) -> Result<&AuditEvent, serde_json::Error> {
        let sequence = self.events.len() as u64;
        let prev_hash = self.head().to_string();
        let this_hash = hash_event(session_id, sequence, record, &prev_hash)?;

        self.events.push(AuditEvent {
            sequence,
            session_id: session_id.to_string(),
            record: record.clone(),
            prev_hash,
            this_hash,
        });
        Ok(&self.events[self.events.len() - 1])
    }
}

/// Append-only decision log, hash-chained with SHA-256.
#[derive(Clone)]
pub struct InMemoryAuditWriter {
    session_id: String,
    pub(crate) state: Arc<Mutex<SessionChain>>,
}

impl InMemoryAuditWriter {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            state: Arc::new(Mutex::new(SessionChain { events: Vec::new() })),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    fn lock(&self) -> GateResult<MutexGuard<'_, SessionChain>> {
        self.state.lock().map_err(|e| GateError::AuditWriteFailed {
            reason: format!("audit state lock poisoned: {e}"),
        })
    }

    /// Snapshot the chain as a sealed `AuditLog`.
    ///
    /// `terminal_hash` is empty when nothing has been written.
    pub fn export_log(&self) -> GateResult<AuditLog> {
        let chain = self.lock()?;
        Ok(AuditLog {
            session_id: self.session_id.clone(),
            events: chain.events.clone(),
            finalized_at: Utc::now(),
            terminal_hash: chain
                .events
                .last()
                .map(|e| e.this_hash.clone())
                .unwrap_or_default(),
        })
    }

    /// True when the in-memory chain is intact. A poisoned lock counts as
    /// broken.
    pub fn verify_integrity(&self) -> bool {
        self.lock().is_ok_and(|chain| verify_chain(&chain.events))
    }
}

impl AuditWriter for InMemoryAuditWriter {
    fn write(&self, record: &DecisionRecord) -> GateResult<()> {
        let mut chain = self.lock()?;
        let event = chain
            .append(&self.session_id, record)
            .map_err(|e| GateError::AuditWriteFailed {
                reason: format!("decision record not serializable: {e}"),
            })?;
        debug!(
            sequence = event.sequence,
            agent_id = %event.record.agent_id,
            allowed = event.record.outcome.is_allowed(),
            "decision audited"
        );
        Ok(())
    }

    /// Nothing to flush in memory; records the session's head hash.
    fn finalize(&self, session_id: &str) -> GateResult<()> {
        let chain = self.lock()?;
        info!(
            session_id = %session_id,
            decisions = chain.events.len(),
            head = %chain.head(),
            "audit session sealed"
        );
        Ok(())
    }
}
