//! Prompt-file integrity checks.
//!
//! Recomputes the SHA-256 of every governed prompt file and compares it with
//! the hash the registry holds for that agent. This is the operator-side
//! counterpart of request verification: it proves the lockfile still
//! describes the prompt files that are actually deployed.

use std::path::Path;

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::registry::Registry;

/// Lowercase hex SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Lowercase hex SHA-256 of the file at `path`.
pub fn sha256_file(path: &Path) -> std::io::Result<String> {
    Ok(sha256_hex(&std::fs::read(path)?))
}

/// Result of checking one agent's prompt file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum IntegrityStatus {
    /// File hash equals the registered hash.
    Verified,
    /// File exists but its content no longer matches.
    Mismatch { expected: String, actual: String },
    /// File could not be read.
    Missing { reason: String },
    /// The record names no file, so nothing can be checked.
    NoFile,
}

impl IntegrityStatus {
    pub fn is_verified(&self) -> bool {
        matches!(self, IntegrityStatus::Verified)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentIntegrity {
    pub agent_id: String,
    pub file: Option<String>,
    #[serde(flatten)]
    pub status: IntegrityStatus,
}

/// Full result of an integrity run over a registry.
#[derive(Debug, Clone, Serialize)]
pub struct IntegrityReport {
    /// One entry per agent, in agent-id order.
    pub entries: Vec<AgentIntegrity>,
    /// Agents whose record lacks `file`, `type`, or `version`.
    pub incomplete_metadata: Vec<String>,
    pub declared_total: Option<usize>,
    pub actual_total: usize,
}

impl IntegrityReport {
    pub fn verified_count(&self) -> usize {
        self.entries.iter().filter(|e| e.status.is_verified()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.entries.len() - self.verified_count()
    }

    /// False only when the lockfile declares a total that disagrees with
    /// the number of registered prompts.
    pub fn total_matches_declared(&self) -> bool {
        self.declared_total.map_or(true, |n| n == self.actual_total)
    }

    /// Every file verified and the declared total (if any) is honest.
    pub fn passed(&self) -> bool {
        self.failed_count() == 0 && self.total_matches_declared()
    }
}

/// Check every agent's prompt file, resolved relative to `root`.
pub fn check_files(registry: &Registry, root: &Path) -> IntegrityReport {
    let mut entries = Vec::with_capacity(registry.count());
    let mut incomplete_metadata = Vec::new();

    for (agent_id, record) in registry.records() {
        if record.file.is_none() || record.kind.is_empty() || record.version.is_empty() {
            incomplete_metadata.push(agent_id.to_string());
        }

        let status = match &record.file {
            None => IntegrityStatus::NoFile,
            Some(file) => match sha256_file(&root.join(file)) {
                Ok(actual) if actual == record.hash => IntegrityStatus::Verified,
                Ok(actual) => IntegrityStatus::Mismatch {
                    expected: record.hash.clone(),
                    actual,
                },
                Err(e) => IntegrityStatus::Missing {
                    reason: e.to_string(),
                },
            },
        };

        if status.is_verified() {
            debug!(%agent_id, "prompt file verified");
        } else {
            warn!(%agent_id, file = ?record.file, ?status, "prompt file failed integrity check");
        }

        entries.push(AgentIntegrity {
            agent_id: agent_id.to_string(),
            file: record.file.clone(),
            status,
        });
    }

    IntegrityReport {
        entries,
        incomplete_metadata,
        declared_total: registry.declared_total(),
        actual_total: registry.count(),
    }
}
