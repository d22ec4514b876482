//! Hash-chain primitives: hashing and chain integrity verification.
//!
//! Hash input layout (bytes, in order):
//!   1. session_id as UTF-8 bytes
//!   2. sequence as 8-byte little-endian
//!   3. prev_hash as UTF-8 bytes (64 ASCII hex chars)
//!   4. compact JSON of the decision record

use sha2::{Digest, Sha256};

use promptgate_contracts::dispatch::DecisionRecord;

use crate::event::AuditEvent;

/// Compute the SHA-256 hash for a single audit event.
///
/// Commits to the event's position (`sequence`), its session, its link to
/// the previous event, and the full decision record. Returns a lowercase
/// 64-character hex string.
pub fn hash_event(
    session_id: &str,
    sequence: u64,
    record: &DecisionRecord,
    prev_hash: &str,
) -> Result<String, serde_json::Error> {
    let record_json = serde_json::to_vec(record)?;

    let mut hasher = Sha256::new();
    hasher.update(session_id.as_bytes());
    hasher.update(sequence.to_le_bytes());
    hasher.update(prev_hash.as_bytes());
    hasher.update(&record_json);

    Ok(hex::encode(hasher.finalize()))
}

/// Verify the integrity of a hash chain.
///
/// Valid when every event links to its predecessor (or `GENESIS_HASH` for
/// the first) and every stored `this_hash` matches the recomputed hash. An
/// empty chain is valid.
pub fn verify_chain(events: &[AuditEvent]) -> bool {
    let mut expected_prev = AuditEvent::GENESIS_HASH.to_string();

    for (position, event) in events.iter().enumerate() {
        if event.sequence != position as u64 || event.prev_hash != expected_prev {
            return false;
        }

        match hash_event(&event.session_id, event.sequence, &event.record, &event.prev_hash) {
            Ok(recomputed) if recomputed == event.this_hash => {}
            _ => return false,
        }

        expected_prev = event.this_hash.clone();
    }

    true
}
