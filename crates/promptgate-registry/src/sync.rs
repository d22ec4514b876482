//! Lockfile synchronization check.
//!
//! Deployments carry more than one copy of the lockfile (the versioned
//! source of truth and the copy bundled with the service). `compare`
//! reports every way two registries disagree.

use serde::Serialize;

use crate::registry::Registry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HashDrift {
    pub agent_id: String,
    pub left: String,
    pub right: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub only_in_left: Vec<String>,
    pub only_in_right: Vec<String>,
    pub hash_drift: Vec<HashDrift>,
    pub version_matches: bool,
}

impl SyncReport {
    pub fn in_sync(&self) -> bool {
        self.only_in_left.is_empty()
            && self.only_in_right.is_empty()
            && self.hash_drift.is_empty()
            && self.version_matches
    }
}

/// Compare two registries agent by agent. All lists are sorted by agent id.
pub fn compare(left: &Registry, right: &Registry) -> SyncReport {
    let mut only_in_left = Vec::new();
    let mut hash_drift = Vec::new();

    for (agent_id, record) in left.records() {
        match right.lookup(agent_id) {
            None => only_in_left.push(agent_id.to_string()),
            Some(other) if other.hash != record.hash => hash_drift.push(HashDrift {
                agent_id: agent_id.to_string(),
                left: record.hash.clone(),
                right: other.hash.clone(),
            }),
            Some(_) => {}
        }
    }

    let only_in_right = right
        .agent_ids()
        .into_iter()
        .filter(|id| !left.contains(id))
        .map(str::to_string)
        .collect();

    SyncReport {
        only_in_left,
        only_in_right,
        hash_drift,
        version_matches: left.version() == right.version(),
    }
}
