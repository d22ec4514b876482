//! Agent identity and registry record types.
//!
//! An agent is a named prompt configuration. The registry maps an `AgentId`
//! to an `AgentRecord`; successful verification hands the caller an
//! `AgentSnapshot`, the subset of the record that is safe to echo back.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable, human-readable identifier for a registered agent.
///
/// Example: AgentId("domain-01-content")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentId(pub String);

impl AgentId {
    /// Construct an agent id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier handed out for every allowed dispatch.
///
/// Opaque to clients. Rendered as a hyphenated lowercase UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DispatchId(pub uuid::Uuid);

impl DispatchId {
    /// Create a new, unique dispatch ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for DispatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DispatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// The canonical, immutable metadata registered for one agent.
///
/// Only `hash` takes part in the verification decision. Everything else is
/// passed through to the caller or to the downstream dispatch step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRecord {
    /// Canonical SHA-256 of the prompt content, 64 lowercase hex characters.
    /// Format is enforced when the registry is loaded.
    pub hash: String,

    /// Classification tag (e.g. "domain", "archetype").
    #[serde(rename = "type", default)]
    pub kind: String,

    /// Semantic version string. Never parsed.
    #[serde(default)]
    pub version: String,

    /// Path of the governed prompt file, relative to the repository root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// System prompt text used by model-backed dispatch targets.
    #[serde(
        default,
        alias = "systemPrompt",
        skip_serializing_if = "Option::is_none"
    )]
    pub system_prompt: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

impl AgentRecord {
    /// Build the caller-facing snapshot of this record.
    pub fn snapshot(&self, agent_id: &AgentId) -> AgentSnapshot {
        AgentSnapshot {
            agent_id: agent_id.clone(),
            kind: self.kind.clone(),
            version: self.version.clone(),
            hash: self.hash.clone(),
            file: self.file.clone(),
        }
    }
}

/// The resolved agent metadata carried by an `Allowed` outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub agent_id: AgentId,
    #[serde(rename = "type")]
    pub kind: String,
    pub version: String,
    pub hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}
