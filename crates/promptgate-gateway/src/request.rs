//! Request body extraction and field validation.

use serde_json::Value;

use promptgate_contracts::{
    error::{GateError, GateResult},
    hash::is_sha256_hex,
    verify::VerificationRequest,
};

pub const INVALID_JSON: &str = "Invalid JSON body";
pub const INVALID_STRUCTURE: &str = "Invalid request body structure";

pub const AGENT_ID_REQUIRED: &str = "agent_id is required";
pub const PROMPT_HASH_REQUIRED: &str = "prompt_hash is required";
pub const PROMPT_HASH_MALFORMED: &str =
    "prompt_hash must be a valid SHA-256 hash (64 lowercase hex characters)";

/// True when `content_type` names JSON. Parameters such as `charset` are
/// ignored.
pub fn is_json_content_type(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|ct| ct.split(';').next())
        .is_some_and(|media| media.trim().eq_ignore_ascii_case("application/json"))
}

/// Turn a raw request body into a `VerificationRequest`.
///
/// Empty or unparseable bodies and non-object JSON are rejected with
/// `GateError::InvalidRequest`. A field holding anything other than a
/// string is treated as absent, so `{"agent_id": 42}` reaches the verifier
/// as a request with no agent id.
pub fn extract_request(body: &[u8]) -> GateResult<VerificationRequest> {
    let value: Value = serde_json::from_slice(body).map_err(|_| GateError::InvalidRequest {
        reason: INVALID_JSON.to_string(),
    })?;

    let Value::Object(mut fields) = value else {
        return Err(GateError::InvalidRequest {
            reason: INVALID_STRUCTURE.to_string(),
        });
    };

    let string_field =
        |v: Option<&Value>| v.and_then(Value::as_str).unwrap_or_default().to_string();

    let agent_id = string_field(fields.get("agent_id"));
    let prompt_hash = string_field(fields.get("prompt_hash"));
    let payload = fields
        .remove("request_payload")
        .or_else(|| fields.remove("user_input"))
        .filter(|v| !v.is_null());

    let request = VerificationRequest::new(agent_id, prompt_hash);
    Ok(match payload {
        Some(p) => request.with_payload(p),
        None => request,
    })
}

/// Every field problem in `request`, in gate order.
///
/// The verifier stops at the first failing gate; this lists them all so a
/// caller can fix the request in one round trip. Never touches a registry.
pub fn validation_messages(request: &VerificationRequest) -> Vec<&'static str> {
    let mut messages = Vec::new();
    if request.agent_id.is_empty() {
        messages.push(AGENT_ID_REQUIRED);
    }
    if request.prompt_hash.is_empty() {
        messages.push(PROMPT_HASH_REQUIRED);
    } else if !is_sha256_hex(&request.prompt_hash) {
        messages.push(PROMPT_HASH_MALFORMED);
    }
    messages
}
