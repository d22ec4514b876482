//! Lockfile document types and the structural schema they must satisfy.
//!
//! A lockfile is deserialized from JSON. Loading runs in two phases: the raw
//! JSON is first checked against [`lockfile_schema`] so every structural
//! problem is reported in one pass, then it is deserialized into
//! [`LockDocument`] and each stored hash is checked for canonical format.
//!
//! Example:
//! ```json
//! {
//!   "version": "1.0.0",
//!   "lockfileVersion": 1,
//!   "algorithm": "sha256",
//!   "prompts": {
//!     "domain-01-content": {
//!       "hash": "5b469f18967048af5534d4b1193e91ae23f684a489de1d7ae38ac6b660e2f413",
//!       "type": "domain",
//!       "version": "1.0.0",
//!       "file": "prompts/domain/01-content.md"
//!     }
//!   },
//!   "integrity": { "immutable": true, "total_prompts": 1 }
//! }
//! ```

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use promptgate_contracts::agent::AgentRecord;

/// `lockfileVersion` appears as both a number and a string in the wild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LockfileVersion {
    Number(u64),
    Text(String),
}

impl fmt::Display for LockfileVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockfileVersion::Number(n) => write!(f, "{n}"),
            LockfileVersion::Text(s) => f.write_str(s),
        }
    }
}

/// The `integrity` block of a lockfile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityBlock {
    /// Declares that the registry is never edited in place.
    #[serde(default)]
    pub immutable: bool,

    /// Number of prompts the lockfile author expected to register.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_prompts: Option<usize>,
}

/// The top-level structure deserialized from a lockfile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockDocument {
    #[serde(default)]
    pub version: Option<String>,

    #[serde(default, rename = "lockfileVersion", alias = "lockfile_version")]
    pub lockfile_version: Option<LockfileVersion>,

    #[serde(default)]
    pub algorithm: Option<String>,

    /// Agent id → record. Duplicate keys in the source resolve last-write-wins.
    pub prompts: HashMap<String, AgentRecord>,

    #[serde(default)]
    pub integrity: IntegrityBlock,
}

/// JSON Schema describing the lockfile shape.
///
/// Hash *format* is deliberately not expressed here; it is checked per
/// record afterwards so the error can name the agent.
pub fn lockfile_schema() -> Value {
    json!({
        "type": "object",
        "required": ["prompts"],
        "properties": {
            "version": { "type": "string" },
            "lockfileVersion": { "type": ["string", "integer"] },
            "lockfile_version": { "type": ["string", "integer"] },
            "algorithm": { "type": "string" },
            "prompts": {
                "type": "object",
                "propertyNames": { "minLength": 1 },
                "additionalProperties": {
                    "type": "object",
                    "required": ["hash"],
                    "properties": {
                        "hash": { "type": "string" },
                        "type": { "type": "string" },
                        "version": { "type": "string" },
                        "file": { "type": ["string", "null"] },
                        "systemPrompt": { "type": ["string", "null"] },
                        "system_prompt": { "type": ["string", "null"] },
                        "model": { "type": ["string", "null"] },
                        "temperature": { "type": ["number", "null"] }
                    }
                }
            },
            "integrity": {
                "type": "object",
                "properties": {
                    "immutable": { "type": "boolean" },
                    "total_prompts": { "type": "integer", "minimum": 0 }
                }
            }
        }
    })
}
