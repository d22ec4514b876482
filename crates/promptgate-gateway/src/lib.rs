//! # promptgate-gateway
//!
//! The transport-neutral front end for promptgate.
//!
//! [`Gateway::handle`] takes a method, a path and a raw body and returns a
//! [`GatewayResponse`]: status code, headers (content type and CORS) and a
//! JSON body. Any HTTP server can sit in front of it.
//!
//! ## Routes
//!
//! | Method    | Path                  | Result                          |
//! |-----------|-----------------------|---------------------------------|
//! | `GET`     | `/health`             | health report                   |
//! | `POST`    | `/`, `/dispatch`      | verify, audit, dispatch         |
//! | `OPTIONS` | any                   | 200 with CORS headers           |
//! | `POST`    | dispatch, non-JSON    | 415                             |
//! | other     | `/health`, dispatch   | 405 `Method not allowed`        |
//! | any       | anything else         | 404 `not_found`                 |
//!
//! ## Usage
//!
//! ```rust,ignore
//! use promptgate_gateway::{AttestationTarget, Gateway, GatewayConfig};
//! use promptgate_registry::{Registry, RegistryHandle};
//!
//! let registry = RegistryHandle::new(Registry::from_file(path)?);
//! let gateway = Gateway::new(GatewayConfig::default(), registry, Box::new(audit), Box::new(AttestationTarget));
//! let response = gateway.handle("POST", "/dispatch", Some("application/json"), body);
//! ```

pub mod attestation;
pub mod config;
pub mod gateway;
pub mod health;
pub mod request;
pub mod response;

pub use attestation::AttestationTarget;
pub use config::{DisclosureMode, GatewayConfig};
pub use gateway::Gateway;
pub use health::HealthReport;
pub use response::GatewayResponse;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use serde_json::{json, Value};

    use promptgate_audit::InMemoryAuditWriter;
    use promptgate_contracts::{
        agent::{AgentRecord, AgentSnapshot},
        dispatch::DecisionRecord,
        error::{GateError, GateResult},
        verify::DenialReason,
    };
    use promptgate_core::traits::{AuditWriter, DispatchTarget};
    use promptgate_registry::{Registry, RegistryHandle};

    use crate::request::{
        extract_request, validation_messages, AGENT_ID_REQUIRED, PROMPT_HASH_MALFORMED,
        PROMPT_HASH_REQUIRED,
    };
    use crate::response::ATTESTED_MESSAGE;
    use crate::{AttestationTarget, DisclosureMode, Gateway, GatewayConfig, GatewayResponse};

    const DOMAIN_HASH: &str = "5b469f18967048af5534d4b1193e91ae23f684a489de1d7ae38ac6b660e2f413";
    const WRONG_HASH: &str = "0000000000000000000000000000000000000000000000000000000000000000";
    const JSON: Option<&str> = Some("application/json");
    const ROTATED_HASH: &str = "a3f5c8e2d1b4f7a6c9e0d3b2a5f8c1e4d7b0a3f6c9e2d5b8a1f4c7e0d3b6a9f2";

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn lockfile(hash: &str) -> Value {
        json!({
            "version": "1.0.0",
            "lockfileVersion": 1,
            "algorithm": "sha256",
            "prompts": {
                "domain-01-content": {
                    "hash": hash,
                    "type": "domain",
                    "version": "1.0.0",
                    "file": "prompts/domain/01-content.md"
                }
            },
            "integrity": { "immutable": true, "total_prompts": 1 }
        })
    }

    fn registry(hash: &str) -> Registry {
        Registry::from_value(&lockfile(hash)).expect("fixture lockfile must load")
    }

    fn gateway_with(config: GatewayConfig) -> (Gateway, InMemoryAuditWriter) {
        let audit = InMemoryAuditWriter::new("gateway-test");
        let gateway = Gateway::new(
            config,
            RegistryHandle::new(registry(DOMAIN_HASH)),
            Box::new(audit.clone()),
            Box::new(AttestationTarget),
        );
        (gateway, audit)
    }

    fn gateway() -> (Gateway, InMemoryAuditWriter) {
        gateway_with(GatewayConfig::default())
    }

    fn post(gateway: &Gateway, body: Value) -> GatewayResponse {
        gateway.handle("POST", "/dispatch", JSON, body.to_string().as_bytes())
    }

    fn assert_standard_headers(response: &GatewayResponse) {
        assert_eq!(response.header("content-type"), Some("application/json"));
        assert_eq!(response.header("Access-Control-Allow-Origin"), Some("*"));
        assert!(response.header("Access-Control-Allow-Methods").is_some());
        assert!(response.header("Access-Control-Allow-Headers").is_some());
    }

    const SUCCESS_ONLY: [&str; 6] = [
        "success",
        "verified",
        "dispatch_id",
        "agent",
        "governance",
        "message",
    ];
    const DENIAL_ONLY: [&str; 3] = ["error", "details", "security_flag"];

    fn assert_no_keys(body: &Value, keys: &[&str]) {
        for key in keys {
            assert!(body.get(key).is_none(), "unexpected key '{key}' in {body}");
        }
    }

    struct FailingAudit;

    impl AuditWriter for FailingAudit {
        fn write(&self, _record: &DecisionRecord) -> GateResult<()> {
            Err(GateError::AuditWriteFailed {
                reason: "disk full".to_string(),
            })
        }

        fn finalize(&self, _session_id: &str) -> GateResult<()> {
            Ok(())
        }
    }

    /// Counts calls and echoes the payload back as output.
    #[derive(Clone, Default)]
    struct EchoTarget {
        calls: Arc<AtomicUsize>,
    }

    impl DispatchTarget for EchoTarget {
        fn dispatch(
            &self,
            _agent: &AgentSnapshot,
            record: &AgentRecord,
            payload: Option<&Value>,
        ) -> GateResult<Option<Value>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Some(json!({ "version": record.version, "echo": payload })))
        }
    }

    struct BrokenTarget;

    impl DispatchTarget for BrokenTarget {
        fn dispatch(
            &self,
            _agent: &AgentSnapshot,
            _record: &AgentRecord,
            _payload: Option<&Value>,
        ) -> GateResult<Option<Value>> {
            Err(GateError::DispatchFailed {
                reason: "upstream timeout".to_string(),
            })
        }
    }

    // ── Routing ───────────────────────────────────────────────────────────────

    #[test]
    fn health_reports_registry_state() {
        let (gateway, _) = gateway();
        let response = gateway.handle("GET", "/health", None, b"");

        assert_eq!(response.status, 200);
        assert_standard_headers(&response);
        assert_eq!(response.body["status"], "healthy");
        assert_eq!(response.body["service"], "prompt-dispatcher");
        assert_eq!(response.body["version"], "1.1.0");
        assert_eq!(response.body["lock_file_version"], "1.0.0");
        assert_eq!(response.body["prompts_count"], 1);
        assert_eq!(response.body["immutable"], true);
        assert!(response.body["timestamp"].is_string());
    }

    #[test]
    fn options_is_a_cors_preflight_on_any_path() {
        let (gateway, audit) = gateway();
        for path in ["/", "/dispatch", "/health", "/anything"] {
            let response = gateway.handle("OPTIONS", path, None, b"");
            assert_eq!(response.status, 200, "OPTIONS {path}");
            assert_standard_headers(&response);
        }
        assert!(audit.export_log().unwrap().events.is_empty());
    }

    #[test]
    fn wrong_method_on_known_route_is_405() {
        let (gateway, _) = gateway();
        for (method, path) in [
            ("GET", "/dispatch"),
            ("PUT", "/"),
            ("DELETE", "/dispatch"),
            ("POST", "/health"),
        ] {
            let response = gateway.handle(method, path, JSON, b"");
            assert_eq!(response.status, 405, "{method} {path}");
            assert_eq!(response.body["error"], "Method not allowed");
            assert_standard_headers(&response);
        }
    }

    #[test]
    fn unknown_path_is_404() {
        let (gateway, _) = gateway();
        let response = gateway.handle("POST", "/admin", JSON, b"{}");
        assert_eq!(response.status, 404);
        assert_eq!(response.body["error"], "not_found");
        assert!(response.body.get("success").is_none());
        assert_standard_headers(&response);
    }

    #[test]
    fn root_and_query_string_route_to_dispatch() {
        let (gateway, _) = gateway();
        let body = json!({ "agent_id": "domain-01-content", "prompt_hash": DOMAIN_HASH });
        let body = body.to_string();
        assert_eq!(gateway.handle("POST", "/", JSON, body.as_bytes()).status, 200);
        assert_eq!(
            gateway
                .handle("post", "/dispatch?trace=1", JSON, body.as_bytes())
                .status,
            200
        );
    }

    // ── Content type ──────────────────────────────────────────────────────────

    #[test]
    fn dispatch_without_json_content_type_is_415() {
        let (gateway, audit) = gateway();
        let body = json!({ "agent_id": "domain-01-content", "prompt_hash": DOMAIN_HASH });
        let body = body.to_string();

        for content_type in [None, Some("text/plain"), Some("application/jsonp"), Some("")] {
            let response = gateway.handle("POST", "/dispatch", content_type, body.as_bytes());
            assert_eq!(response.status, 415, "content type {content_type:?}");
            assert!(response.body["error"]
                .as_str()
                .is_some_and(|e| e.contains("application/json")));
            assert_standard_headers(&response);
        }
        // Refused before the body is read, so nothing is decided or audited.
        assert!(audit.export_log().unwrap().events.is_empty());
    }

    #[test]
    fn json_content_type_parameters_and_case_are_accepted() {
        let (gateway, _) = gateway();
        let body = json!({ "agent_id": "domain-01-content", "prompt_hash": DOMAIN_HASH });
        let body = body.to_string();

        for content_type in ["application/json; charset=utf-8", "Application/JSON"] {
            let response = gateway.handle("POST", "/", Some(content_type), body.as_bytes());
            assert_eq!(response.status, 200, "content type {content_type}");
        }
    }

    #[test]
    fn content_type_does_not_affect_health_or_preflight() {
        let (gateway, _) = gateway();
        assert_eq!(gateway.handle("GET", "/health", Some("text/plain"), b"").status, 200);
        assert_eq!(gateway.handle("OPTIONS", "/dispatch", None, b"").status, 200);
    }

    // ── Body extraction ───────────────────────────────────────────────────────

    #[test]
    fn empty_and_malformed_bodies_are_invalid_json() {
        let (gateway, audit) = gateway();
        for body in ["", "{", "not json", "{\"agent_id\": }"] {
            let response = gateway.handle("POST", "/dispatch", JSON, body.as_bytes());
            assert_eq!(response.status, 400);
            assert_eq!(response.body["error"], "Invalid JSON body");
            assert_standard_headers(&response);
        }
        // Rejected before verification, so nothing is audited.
        assert!(audit.export_log().unwrap().events.is_empty());
    }

    #[test]
    fn non_object_bodies_are_invalid_structure() {
        let (gateway, _) = gateway();
        for body in ["[]", "\"domain-01-content\"", "42", "null", "true"] {
            let response = gateway.handle("POST", "/dispatch", JSON, body.as_bytes());
            assert_eq!(response.status, 400, "body {body}");
            assert_eq!(response.body["error"], "Invalid request body structure");
        }
    }

    #[test]
    fn non_string_fields_are_treated_as_absent() {
        let request = extract_request(br#"{"agent_id": 42, "prompt_hash": ["x"]}"#).unwrap();
        assert_eq!(request.agent_id, "");
        assert_eq!(request.prompt_hash, "");
        assert_eq!(
            validation_messages(&request),
            vec![AGENT_ID_REQUIRED, PROMPT_HASH_REQUIRED]
        );
    }

    #[test]
    fn payload_is_taken_from_request_payload_or_user_input() {
        let a = extract_request(br#"{"agent_id":"a","prompt_hash":"b","request_payload":{"q":1}}"#)
            .unwrap();
        assert_eq!(a.request_payload, Some(json!({ "q": 1 })));

        let b =
            extract_request(br#"{"agent_id":"a","prompt_hash":"b","user_input":"hi"}"#).unwrap();
        assert_eq!(b.request_payload, Some(json!("hi")));

        let c =
            extract_request(br#"{"agent_id":"a","prompt_hash":"b","user_input":null}"#).unwrap();
        assert_eq!(c.request_payload, None);
    }

    // ── Validation (400) ──────────────────────────────────────────────────────

    #[test]
    fn empty_object_fails_closed_with_both_messages() {
        let (gateway, audit) = gateway();
        let response = post(&gateway, json!({}));

        assert_eq!(response.status, 400);
        assert!(response.body["error"]
            .as_str()
            .is_some_and(|e| e.contains("Invalid request")));
        assert_eq!(response.body["reason"], "missing_agent_id");
        assert_eq!(
            response.body["details"],
            json!([AGENT_ID_REQUIRED, PROMPT_HASH_REQUIRED])
        );
        assert_no_keys(&response.body, &SUCCESS_ONLY);
        assert!(response.body.get("security_flag").is_none());

        // Validation denials are still decisions and are audited.
        assert_eq!(audit.export_log().unwrap().denied_count(), 1);
    }

    #[test]
    fn missing_hash_is_400() {
        let (gateway, _) = gateway();
        let response = post(&gateway, json!({ "agent_id": "domain-01-content" }));
        assert_eq!(response.status, 400);
        assert_eq!(response.body["reason"], "missing_hash");
        assert_eq!(response.body["details"], json!([PROMPT_HASH_REQUIRED]));
    }

    #[test]
    fn malformed_hash_is_400_even_for_unknown_agent() {
        let (gateway, _) = gateway();
        let upper = DOMAIN_HASH.to_uppercase();
        for hash in ["not-a-valid-hash", upper.as_str(), &DOMAIN_HASH[..63]] {
            let response = post(&gateway, json!({ "agent_id": "nobody", "prompt_hash": hash }));
            assert_eq!(response.status, 400, "hash {hash}");
            assert_eq!(response.body["reason"], "malformed_hash");
            assert_eq!(response.body["details"], json!([PROMPT_HASH_MALFORMED]));
        }
    }

    // ── Security denials (403) ────────────────────────────────────────────────

    #[test]
    fn unknown_agent_is_403_without_hash_detail() {
        let (gateway, _) = gateway();
        let response = post(
            &gateway,
            json!({ "agent_id": "fake-agent-999", "prompt_hash": DOMAIN_HASH }),
        );

        assert_eq!(response.status, 403);
        assert_standard_headers(&response);
        assert_eq!(response.body["error"], "Hash verification failed for agent: fake-agent-999");
        assert_eq!(response.body["security_flag"], true);
        assert_eq!(response.body["details"], json!({ "reason": "unknown_agent" }));
        assert!(
            !response.body_text().contains(DOMAIN_HASH),
            "unknown-agent response must not contain any registered hash"
        );
        assert_no_keys(&response.body, &SUCCESS_ONLY);
    }

    #[test]
    fn mismatch_is_403_with_both_hashes() {
        let (gateway, _) = gateway();
        let response = post(
            &gateway,
            json!({ "agent_id": "domain-01-content", "prompt_hash": WRONG_HASH }),
        );

        assert_eq!(response.status, 403);
        assert_eq!(response.body["security_flag"], true);
        assert_eq!(
            response.body["details"],
            json!({
                "reason": "hash_mismatch",
                "expected_hash": DOMAIN_HASH,
                "received_hash": WRONG_HASH,
            })
        );
        assert_no_keys(&response.body, &SUCCESS_ONLY);
    }

    #[test]
    fn opaque_mode_hides_reason_and_hashes() {
        let mut config = GatewayConfig::default();
        config.disclosure.mode = DisclosureMode::Opaque;
        let (gateway, _) = gateway_with(config);

        let unknown = post(&gateway, json!({ "agent_id": "ghost", "prompt_hash": DOMAIN_HASH }));
        let mismatch = post(
            &gateway,
            json!({ "agent_id": "domain-01-content", "prompt_hash": WRONG_HASH }),
        );

        for response in [&unknown, &mismatch] {
            assert_eq!(response.status, 403);
            assert_eq!(response.body["details"], json!({ "reason": "verification_failed" }));
            assert!(!response.body_text().contains(DOMAIN_HASH));
        }
        // Validation failures are unaffected by the disclosure mode.
        assert_eq!(post(&gateway, json!({})).status, 400);
    }

    // ── Success (200) ─────────────────────────────────────────────────────────

    #[test]
    fn matching_hash_is_200_with_attestation_body() {
        let (gateway, audit) = gateway();
        let response = post(
            &gateway,
            json!({ "agent_id": "domain-01-content", "prompt_hash": DOMAIN_HASH }),
        );

        assert_eq!(response.status, 200);
        assert_standard_headers(&response);
        let body = &response.body;
        assert_eq!(body["success"], true);
        assert_eq!(body["verified"], true);
        assert_eq!(body["message"], ATTESTED_MESSAGE);
        assert!(body["dispatch_id"].as_str().is_some_and(|id| id.len() == 36));
        assert_eq!(
            body["agent"],
            json!({
                "agent_id": "domain-01-content",
                "type": "domain",
                "version": "1.0.0",
                "hash": DOMAIN_HASH,
            })
        );
        assert_eq!(
            body["governance"],
            json!({ "lock_version": "1.0.0", "lockfile_version": "1", "algorithm": "sha256" })
        );
        assert!(body.get("output").is_none());
        assert!(body["timestamp"].is_string());
        assert_no_keys(body, &DENIAL_ONLY);

        let log = audit.export_log().unwrap();
        assert_eq!(log.allowed_count(), 1);
        assert_eq!(
            log.events[0].record.dispatch_id.map(|d| d.to_string()).as_deref(),
            body["dispatch_id"].as_str()
        );
    }

    #[test]
    fn echo_file_adds_file_to_agent() {
        let mut config = GatewayConfig::default();
        config.disclosure.echo_file = true;
        let (gateway, _) = gateway_with(config);
        let response = post(
            &gateway,
            json!({ "agent_id": "domain-01-content", "prompt_hash": DOMAIN_HASH }),
        );
        assert_eq!(response.body["agent"]["file"], "prompts/domain/01-content.md");
    }

    #[test]
    fn target_output_is_returned_and_payload_forwarded() {
        let target = EchoTarget::default();
        let gateway = Gateway::new(
            GatewayConfig::default(),
            RegistryHandle::new(registry(DOMAIN_HASH)),
            Box::new(InMemoryAuditWriter::new("echo")),
            Box::new(target.clone()),
        );

        let ok = post(
            &gateway,
            json!({
                "agent_id": "domain-01-content",
                "prompt_hash": DOMAIN_HASH,
                "user_input": "hello"
            }),
        );
        assert_eq!(ok.status, 200);
        assert_eq!(ok.body["output"], json!({ "version": "1.0.0", "echo": "hello" }));
        assert_ne!(ok.body["message"], ATTESTED_MESSAGE);

        let denied = post(
            &gateway,
            json!({
                "agent_id": "domain-01-content",
                "prompt_hash": WRONG_HASH,
                "user_input": "hello"
            }),
        );
        assert_eq!(denied.status, 403);
        assert_eq!(
            target.calls.load(Ordering::SeqCst),
            1,
            "denied request must not reach the target"
        );
    }

    #[test]
    fn no_failure_body_carries_a_success_flag() {
        let mut opaque = GatewayConfig::default();
        opaque.disclosure.mode = DisclosureMode::Opaque;
        let (differentiated, _) = gateway();
        let (opaque, _) = gateway_with(opaque);

        let mismatch = json!({ "agent_id": "domain-01-content", "prompt_hash": WRONG_HASH });
        let unknown = json!({ "agent_id": "ghost", "prompt_hash": DOMAIN_HASH });

        let responses = [
            post(&differentiated, mismatch.clone()),
            post(&differentiated, unknown.clone()),
            post(&opaque, mismatch),
            post(&opaque, unknown),
            post(&differentiated, json!({})),
            post(&differentiated, json!({ "agent_id": "a", "prompt_hash": "xyz" })),
            differentiated.handle("POST", "/dispatch", JSON, b"{"),
            differentiated.handle("POST", "/dispatch", JSON, b"[]"),
            differentiated.handle("POST", "/dispatch", None, b"{}"),
            differentiated.handle("GET", "/dispatch", None, b""),
            differentiated.handle("GET", "/nowhere", None, b""),
        ];

        for response in &responses {
            assert!(response.status >= 400);
            assert!(
                response.body.get("success").is_none(),
                "failure body carries success: {}",
                response.body
            );
            assert!(response.body["error"].is_string());
        }
    }

    // ── Failures (500) ────────────────────────────────────────────────────────

    #[test]
    fn audit_failure_is_500_and_nothing_is_dispatched() {
        let target = EchoTarget::default();
        let gateway = Gateway::new(
            GatewayConfig::default(),
            RegistryHandle::new(registry(DOMAIN_HASH)),
            Box::new(FailingAudit),
            Box::new(target.clone()),
        );
        let response = post(
            &gateway,
            json!({ "agent_id": "domain-01-content", "prompt_hash": DOMAIN_HASH }),
        );
        assert_eq!(response.status, 500);
        assert_eq!(response.body["error"], "dispatch_failed");
        assert_eq!(target.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn target_failure_is_500() {
        let gateway = Gateway::new(
            GatewayConfig::default(),
            RegistryHandle::new(registry(DOMAIN_HASH)),
            Box::new(InMemoryAuditWriter::new("broken")),
            Box::new(BrokenTarget),
        );
        let response = post(
            &gateway,
            json!({ "agent_id": "domain-01-content", "prompt_hash": DOMAIN_HASH }),
        );
        assert_eq!(response.status, 500);
        assert_eq!(response.body["error"], "dispatch_failed");
        assert_no_keys(&response.body, &SUCCESS_ONLY);
    }

    // ── Registry reload ───────────────────────────────────────────────────────

    #[test]
    fn swapped_registry_applies_to_later_requests() {
        let (gateway, _) = gateway();
        let old = json!({ "agent_id": "domain-01-content", "prompt_hash": DOMAIN_HASH });
        let new = json!({ "agent_id": "domain-01-content", "prompt_hash": ROTATED_HASH });

        assert_eq!(post(&gateway, old.clone()).status, 200);
        gateway.registry().swap(registry(ROTATED_HASH));
        assert_eq!(post(&gateway, old).status, 403);
        assert_eq!(post(&gateway, new).status, 200);
    }

    #[test]
    fn rejected_reload_keeps_serving_previous_registry() {
        let (gateway, _) = gateway();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", lockfile("NOT-A-HASH")).unwrap();

        assert!(gateway.registry().reload_from_file(file.path()).is_err());
        let response = post(
            &gateway,
            json!({ "agent_id": "domain-01-content", "prompt_hash": DOMAIN_HASH }),
        );
        assert_eq!(response.status, 200);
    }

    // ── Audit ─────────────────────────────────────────────────────────────────

    #[test]
    fn every_decision_is_audited_in_order() {
        let (gateway, audit) = gateway();
        post(&gateway, json!({ "agent_id": "domain-01-content", "prompt_hash": DOMAIN_HASH }));
        post(&gateway, json!({ "agent_id": "ghost", "prompt_hash": DOMAIN_HASH }));
        post(&gateway, json!({ "agent_id": "domain-01-content", "prompt_hash": WRONG_HASH }));
        gateway.handle("GET", "/health", None, b"");

        let log = audit.export_log().unwrap();
        let reasons: Vec<_> = log.events.iter().map(|e| e.record.outcome.denial_reason()).collect();
        assert_eq!(
            reasons,
            vec![None, Some(DenialReason::UnknownAgent), Some(DenialReason::HashMismatch)]
        );
        assert!(audit.verify_integrity());
        assert!(gateway.shutdown("gateway-test").is_ok());
    }

    // ── Config ────────────────────────────────────────────────────────────────

    #[test]
    fn empty_config_is_the_default() {
        let config = GatewayConfig::from_toml_str("").unwrap();
        assert_eq!(config, GatewayConfig::default());
        assert_eq!(config.disclosure.mode, DisclosureMode::Differentiated);
        assert!(!config.disclosure.echo_file);
        assert_eq!(config.cors.allow_origin, "*");
    }

    #[test]
    fn config_file_overrides_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
service = "edge-gate"
registry_path = "versions/prompt-lock.json"

[disclosure]
mode = "opaque"
echo_file = true

[cors]
allow_origin = "https://portfolio.example"
"#
        )
        .unwrap();

        let config = GatewayConfig::from_file(file.path()).unwrap();
        assert_eq!(config.service, "edge-gate");
        assert_eq!(config.service_version, "1.1.0");
        assert_eq!(
            config.registry_path.as_deref(),
            Some(std::path::Path::new("versions/prompt-lock.json"))
        );
        assert_eq!(config.disclosure.mode, DisclosureMode::Opaque);
        assert!(config.disclosure.echo_file);
        assert_eq!(config.cors.allow_origin, "https://portfolio.example");
        assert_eq!(config.cors.allow_methods, "GET, POST, OPTIONS");

        let (gateway, _) = gateway_with(config);
        let response = gateway.handle("GET", "/health", None, b"");
        assert_eq!(response.body["service"], "edge-gate");
        assert_eq!(
            response.header("Access-Control-Allow-Origin"),
            Some("https://portfolio.example")
        );
    }

    #[test]
    fn unknown_disclosure_mode_is_config_error() {
        let err = GatewayConfig::from_toml_str("[disclosure]\nmode = \"verbose\"\n").unwrap_err();
        assert!(matches!(err, GateError::ConfigError { .. }), "got {err:?}");
    }

    #[test]
    fn missing_config_file_is_config_error() {
        let err = GatewayConfig::from_file(std::path::Path::new("/nonexistent/gateway.toml"))
            .unwrap_err();
        assert!(matches!(err, GateError::ConfigError { .. }));
    }
}
