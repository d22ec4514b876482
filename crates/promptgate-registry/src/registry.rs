//! The in-memory agent registry.
//!
//! A `Registry` is built once from a lockfile and never mutated. There are
//! no insert, update, or delete operations: a new lockfile means a new
//! `Registry`, swapped in whole through [`crate::RegistryHandle`].

use std::collections::HashMap;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use promptgate_contracts::{
    agent::AgentRecord,
    error::LoadError,
    hash::hash_format_problem,
};
use promptgate_core::traits::AgentLookup;

use crate::document::{lockfile_schema, IntegrityBlock, LockDocument, LockfileVersion};

/// Aggregate facts about a registry, for health and manifest reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryManifest {
    pub version: Option<String>,
    pub lockfile_version: Option<String>,
    pub algorithm: Option<String>,
    pub immutable: bool,
    pub prompts_count: usize,
    /// `integrity.total_prompts` as declared by the lockfile, if any.
    pub declared_total: Option<usize>,
}

/// An immutable, validated agent registry.
///
/// Every stored hash is guaranteed to be 64 lowercase hex characters, so
/// the verifier only ever has to validate client-supplied hashes.
#[derive(Debug, Clone)]
pub struct Registry {
    version: Option<String>,
    lockfile_version: Option<LockfileVersion>,
    algorithm: Option<String>,
    integrity: IntegrityBlock,
    prompts: HashMap<String, AgentRecord>,
}

impl Registry {
    /// Parse `s` as a lockfile and build a `Registry`.
    pub fn from_json_str(s: &str) -> Result<Self, LoadError> {
        let value: Value = serde_json::from_str(s).map_err(|e| LoadError::Parse {
            reason: e.to_string(),
        })?;
        Self::from_value(&value)
    }

    /// Read the file at `path` and parse it as a lockfile.
    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        let contents = std::fs::read_to_string(path).map_err(|e| LoadError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let registry = Self::from_json_str(&contents)?;
        info!(
            path = %path.display(),
            prompts = registry.count(),
            version = registry.version().unwrap_or("unversioned"),
            "registry loaded"
        );
        Ok(registry)
    }

    /// Validate and build a registry from an already-parsed JSON document.
    ///
    /// # Phases
    ///
    /// 1. **Structural**: the document is checked against the lockfile JSON
    ///    Schema. All violations are collected into one `LoadError::Structure`.
    /// 2. **Semantic**: every stored hash must be canonical. The first bad
    ///    hash (in agent-id order) fails the load.
    pub fn from_value(value: &Value) -> Result<Self, LoadError> {
        // ── Phase 1: structural validation ───────────────────────────────────
        let validator = jsonschema::validator_for(&lockfile_schema()).map_err(|e| {
            LoadError::Structure {
                failures: vec![format!("lockfile schema failed to compile: {e}")],
            }
        })?;

        let failures: Vec<String> = validator
            .iter_errors(value)
            .map(|error| format!("at '{}': {}", error.instance_path, error))
            .collect();
        if !failures.is_empty() {
            warn!(failure_count = failures.len(), "registry failed structural validation");
            return Err(LoadError::Structure { failures });
        }

        let document: LockDocument =
            serde_json::from_value(value.clone()).map_err(|e| LoadError::Structure {
                failures: vec![e.to_string()],
            })?;

        // ── Phase 2: stored hash format ──────────────────────────────────────
        let mut ids: Vec<&String> = document.prompts.keys().collect();
        ids.sort();
        for id in ids {
            if let Some(reason) = hash_format_problem(&document.prompts[id].hash) {
                warn!(agent_id = %id, %reason, "registry contains malformed stored hash");
                return Err(LoadError::InvalidStoredHash {
                    agent_id: id.clone(),
                    reason,
                });
            }
        }

        debug!(prompts = document.prompts.len(), "registry validated");

        Ok(Self {
            version: document.version,
            lockfile_version: document.lockfile_version,
            algorithm: document.algorithm,
            integrity: document.integrity,
            prompts: document.prompts,
        })
    }

    /// Look up an agent by id. Exact, case-sensitive key match.
    pub fn lookup(&self, agent_id: &str) -> Option<&AgentRecord> {
        self.prompts.get(agent_id)
    }

    pub fn contains(&self, agent_id: &str) -> bool {
        self.prompts.contains_key(agent_id)
    }

    /// Number of registered agents.
    pub fn count(&self) -> usize {
        self.prompts.len()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn lockfile_version(&self) -> Option<&LockfileVersion> {
        self.lockfile_version.as_ref()
    }

    pub fn algorithm(&self) -> Option<&str> {
        self.algorithm.as_deref()
    }

    pub fn is_immutable(&self) -> bool {
        self.integrity.immutable
    }

    /// `integrity.total_prompts` as declared by the lockfile.
    pub fn declared_total(&self) -> Option<usize> {
        self.integrity.total_prompts
    }

    /// All agent ids, sorted.
    pub fn agent_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.prompts.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// All `(agent_id, record)` pairs, sorted by id.
    pub fn records(&self) -> Vec<(&str, &AgentRecord)> {
        let mut records: Vec<(&str, &AgentRecord)> = self
            .prompts
            .iter()
            .map(|(id, rec)| (id.as_str(), rec))
            .collect();
        records.sort_unstable_by_key(|(id, _)| *id);
        records
    }

    pub fn manifest(&self) -> RegistryManifest {
        RegistryManifest {
            version: self.version.clone(),
            lockfile_version: self.lockfile_version.as_ref().map(ToString::to_string),
            algorithm: self.algorithm.clone(),
            immutable: self.is_immutable(),
            prompts_count: self.count(),
            declared_total: self.declared_total(),
        }
    }
}

impl AgentLookup for Registry {
    fn lookup(&self, agent_id: &str) -> Option<&AgentRecord> {
        Registry::lookup(self, agent_id)
    }
}
