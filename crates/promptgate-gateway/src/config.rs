//! Gateway configuration.
//!
//! Loaded from TOML. Every field has a default matching the stock
//! deployment, so an empty document is a valid configuration.
//!
//! Example:
//! ```toml
//! service = "prompt-dispatcher"
//! service_version = "1.1.0"
//! registry_path = "versions/prompt-lock.json"
//!
//! [disclosure]
//! mode = "differentiated"   # or "opaque"
//! echo_file = false
//!
//! [cors]
//! allow_origin = "*"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use promptgate_contracts::error::{GateError, GateResult};

/// How much a 403 response reveals about why verification failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisclosureMode {
    /// `unknown_agent` and `hash_mismatch` are reported separately, and a
    /// mismatch for a known agent includes both hashes.
    #[default]
    Differentiated,
    /// Both render as `verification_failed` with no hash detail.
    Opaque,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisclosureConfig {
    pub mode: DisclosureMode,
    /// Include the agent's `file` in success responses.
    pub echo_file: bool,
}

impl Default for DisclosureConfig {
    fn default() -> Self {
        Self {
            mode: DisclosureMode::Differentiated,
            echo_file: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allow_origin: String,
    pub allow_methods: String,
    pub allow_headers: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allow_origin: "*".to_string(),
            allow_methods: "GET, POST, OPTIONS".to_string(),
            allow_headers: "Content-Type".to_string(),
        }
    }
}

/// The top-level gateway configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Name reported by the health endpoint.
    pub service: String,
    /// Service version reported by the health endpoint.
    pub service_version: String,
    /// Lockfile to load at startup, if not given on the command line.
    pub registry_path: Option<PathBuf>,
    pub disclosure: DisclosureConfig,
    pub cors: CorsConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            service: "prompt-dispatcher".to_string(),
            service_version: "1.1.0".to_string(),
            registry_path: None,
            disclosure: DisclosureConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Parse `s` as TOML gateway configuration.
    ///
    /// Returns `GateError::ConfigError` if the TOML is malformed or names
    /// unknown enum values.
    pub fn from_toml_str(s: &str) -> GateResult<Self> {
        toml::from_str(s).map_err(|e| GateError::ConfigError {
            reason: format!("failed to parse gateway TOML: {e}"),
        })
    }

    /// Read and parse the TOML file at `path`.
    pub fn from_file(path: &Path) -> GateResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| GateError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }
}
