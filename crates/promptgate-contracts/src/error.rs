//! Error types for the promptgate runtime.
//!
//! Verification denials are not errors; see `verify::Denial`. The types here
//! cover the conditions that stop the service from answering at all: a
//! registry that cannot be loaded, bad configuration, a failed audit write,
//! or a failed downstream dispatch.

use thiserror::Error;

/// Failure to construct a registry from its source document.
///
/// Always fatal at startup: a service that cannot load its registry must not
/// start in a degraded state.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The source file could not be read.
    #[error("cannot read registry '{path}': {reason}")]
    Unreadable { path: String, reason: String },

    /// The source is not valid JSON.
    #[error("registry is not valid JSON: {reason}")]
    Parse { reason: String },

    /// The JSON does not have the lockfile shape (missing `prompts` map,
    /// non-object entries, wrongly typed fields).
    #[error("registry structure is invalid: {}", failures.join("; "))]
    Structure { failures: Vec<String> },

    /// A stored hash is not 64 lowercase hex characters.
    #[error("stored hash for agent '{agent_id}' is malformed: {reason}")]
    InvalidStoredHash { agent_id: String, reason: String },
}

/// The unified error type for the promptgate runtime.
#[derive(Debug, Error)]
pub enum GateError {
    #[error(transparent)]
    Load(#[from] LoadError),

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// The audit writer could not persist a decision record.
    ///
    /// Fatal for the request: a decision that cannot be audited is not acted on.
    #[error("audit write failed: {reason}")]
    AuditWriteFailed { reason: String },

    /// The downstream action behind a successful verification failed.
    #[error("dispatch failed: {reason}")]
    DispatchFailed { reason: String },

    /// The request could not be turned into a `VerificationRequest`.
    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },
}

/// Convenience alias used throughout the promptgate crates.
pub type GateResult<T> = Result<T, GateError>;
