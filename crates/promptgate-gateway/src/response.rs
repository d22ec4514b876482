//! Mapping dispatch results onto transport responses.
//!
//! A response is a status code, a header list, and a JSON body. Success and
//! denial bodies share no result fields: a success never carries `error` or
//! `details`, and a denial never carries `success`, `dispatch_id`, `agent`
//! or `governance`. The same holds for every non-2xx body.

use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};

use promptgate_contracts::{
    agent::AgentSnapshot,
    dispatch::DispatchResult,
    verify::{Denial, VerificationRequest},
};
use promptgate_registry::Registry;

use crate::config::{CorsConfig, DisclosureConfig, DisclosureMode};
use crate::request::validation_messages;

/// Message on a successful attestation-only dispatch.
pub const ATTESTED_MESSAGE: &str = "Prompt integrity verified. Ready for dispatch.";
/// Message when the dispatch target produced output.
pub const DISPATCHED_MESSAGE: &str = "Prompt verified and dispatched.";

pub const VALIDATION_FAILED: &str = "Invalid request";
pub const UNSUPPORTED_MEDIA_TYPE: &str = "Content-Type must be application/json";
pub const DISPATCH_FAILED: &str = "dispatch_failed";
pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";
pub const NOT_FOUND: &str = "not_found";

/// What the front end sends back for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Value,
}

impl GatewayResponse {
    /// A JSON response carrying the content type and CORS headers.
    pub fn json(status: u16, body: Value, cors: &CorsConfig) -> Self {
        let headers = vec![
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Access-Control-Allow-Origin".to_string(), cors.allow_origin.clone()),
            ("Access-Control-Allow-Methods".to_string(), cors.allow_methods.clone()),
            ("Access-Control-Allow-Headers".to_string(), cors.allow_headers.clone()),
        ];
        Self { status, headers, body }
    }

    /// `{ error }` with the given status.
    pub fn error(status: u16, message: &str, cors: &CorsConfig) -> Self {
        Self::json(status, error_body(message), cors)
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Pretty-printed body text.
    pub fn body_text(&self) -> String {
        format!("{:#}", self.body)
    }
}

fn error_body(message: &str) -> Value {
    json!({ "error": message })
}

/// Status and body for a dispatch result decided against `registry`.
pub fn render_result(
    result: &DispatchResult,
    request: &VerificationRequest,
    registry: &Registry,
    disclosure: &DisclosureConfig,
) -> (u16, Value) {
    match result {
        DispatchResult::Dispatched {
            dispatch_id,
            agent,
            output,
            timestamp,
        } => (
            200,
            success_body(
                &dispatch_id.to_string(),
                agent,
                output.as_ref(),
                timestamp,
                registry,
                disclosure.echo_file,
            ),
        ),
        DispatchResult::Denied { agent_id, denial } => {
            render_denial(agent_id, denial, request, disclosure.mode)
        }
    }
}

fn success_body(
    dispatch_id: &str,
    agent: &AgentSnapshot,
    output: Option<&Value>,
    timestamp: &DateTime<Utc>,
    registry: &Registry,
    echo_file: bool,
) -> Value {
    let mut agent_obj = Map::new();
    agent_obj.insert("agent_id".into(), json!(agent.agent_id.as_str()));
    agent_obj.insert("type".into(), json!(agent.kind));
    agent_obj.insert("version".into(), json!(agent.version));
    agent_obj.insert("hash".into(), json!(agent.hash));
    if echo_file {
        if let Some(file) = &agent.file {
            agent_obj.insert("file".into(), json!(file));
        }
    }

    let mut body = Map::new();
    body.insert("success".into(), json!(true));
    body.insert("verified".into(), json!(true));
    body.insert(
        "message".into(),
        json!(if output.is_some() { DISPATCHED_MESSAGE } else { ATTESTED_MESSAGE }),
    );
    body.insert("dispatch_id".into(), json!(dispatch_id));
    body.insert("agent".into(), Value::Object(agent_obj));
    body.insert(
        "governance".into(),
        json!({
            "lock_version": registry.version(),
            "lockfile_version": registry.lockfile_version().map(|v| v.to_string()),
            "algorithm": registry.algorithm(),
        }),
    );
    if let Some(output) = output {
        body.insert("output".into(), output.clone());
    }
    body.insert("timestamp".into(), json!(timestamp.to_rfc3339()));
    Value::Object(body)
}

/// Status and body for a denial.
///
/// Validation reasons are 400 with the list of field problems. Security
/// reasons are 403 with `security_flag` and a `details` object shaped by
/// the disclosure mode.
pub fn render_denial(
    agent_id: &str,
    denial: &Denial,
    request: &VerificationRequest,
    mode: DisclosureMode,
) -> (u16, Value) {
    let reason = denial.reason();
    if reason.is_validation() {
        let mut messages = validation_messages(request);
        if messages.is_empty() {
            // Only reachable with a verifier stricter than the field checks.
            messages.push(reason.as_str());
        }
        return (
            400,
            json!({
                "error": VALIDATION_FAILED,
                "reason": reason.as_str(),
                "details": messages,
            }),
        );
    }

    let details = match (mode, denial) {
        (DisclosureMode::Opaque, _) => json!({ "reason": "verification_failed" }),
        (
            DisclosureMode::Differentiated,
            Denial::HashMismatch {
                expected_hash,
                received_hash,
            },
        ) => json!({
            "reason": reason.as_str(),
            "expected_hash": expected_hash,
            "received_hash": received_hash,
        }),
        (DisclosureMode::Differentiated, _) => json!({ "reason": reason.as_str() }),
    };

    (
        403,
        json!({
            "error": format!("Hash verification failed for agent: {agent_id}"),
            "security_flag": true,
            "details": details,
        }),
    )
}
