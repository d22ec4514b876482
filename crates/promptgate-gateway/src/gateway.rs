//! Routing and the request → response path.

use tracing::{error, warn};

use promptgate_contracts::error::{GateError, GateResult};
use promptgate_core::{
    dispatcher::SECURITY_TARGET,
    traits::{AuditWriter, DispatchTarget},
    Dispatcher,
};
use promptgate_registry::RegistryHandle;
use promptgate_verify::HashVerifier;

use crate::config::GatewayConfig;
use crate::health::HealthReport;
use crate::request::{extract_request, is_json_content_type};
use crate::response::{
    render_result, GatewayResponse, DISPATCH_FAILED, METHOD_NOT_ALLOWED, NOT_FOUND,
    UNSUPPORTED_MEDIA_TYPE,
};

enum Route {
    Health,
    Dispatch,
    Unknown,
}

fn route(path: &str) -> Route {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    match path {
        "/health" => Route::Health,
        "" | "/" | "/dispatch" => Route::Dispatch,
        _ => Route::Unknown,
    }
}

/// The transport-neutral front end.
///
/// Each request is decided against one registry snapshot, and the
/// governance block of a success response describes that same snapshot.
pub struct Gateway {
    config: GatewayConfig,
    registry: RegistryHandle,
    dispatcher: Dispatcher,
}

impl Gateway {
    pub fn new(
        config: GatewayConfig,
        registry: RegistryHandle,
        audit: Box<dyn AuditWriter>,
        target: Box<dyn DispatchTarget>,
    ) -> Self {
        let dispatcher = Dispatcher::new(Box::new(HashVerifier), audit, target);
        Self {
            config,
            registry,
            dispatcher,
        }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// The registry handle; reloading through it affects later requests.
    pub fn registry(&self) -> &RegistryHandle {
        &self.registry
    }

    /// Answer one request.
    ///
    /// `content_type` is the request's `Content-Type` header, if any. A
    /// dispatch without a JSON content type is refused with 415 before the
    /// body is read.
    pub fn handle(
        &self,
        method: &str,
        path: &str,
        content_type: Option<&str>,
        body: &[u8],
    ) -> GatewayResponse {
        let cors = &self.config.cors;

        if method.eq_ignore_ascii_case("OPTIONS") {
            return GatewayResponse::json(200, serde_json::Value::Null, cors);
        }

        match (route(path), method.to_ascii_uppercase().as_str()) {
            (Route::Health, "GET") => self.health(),
            (Route::Dispatch, "POST") if !is_json_content_type(content_type) => {
                GatewayResponse::error(415, UNSUPPORTED_MEDIA_TYPE, cors)
            }
            (Route::Dispatch, "POST") => self.dispatch(body),
            (Route::Health | Route::Dispatch, _) => {
                GatewayResponse::error(405, METHOD_NOT_ALLOWED, cors)
            }
            (Route::Unknown, _) => GatewayResponse::error(404, NOT_FOUND, cors),
        }
    }

    pub fn health(&self) -> GatewayResponse {
        let report = HealthReport::new(&self.config, &self.registry.snapshot());
        match serde_json::to_value(&report) {
            Ok(body) => GatewayResponse::json(200, body, &self.config.cors),
            Err(e) => {
                error!(error = %e, "health report serialization failed");
                GatewayResponse::error(500, DISPATCH_FAILED, &self.config.cors)
            }
        }
    }

    fn dispatch(&self, body: &[u8]) -> GatewayResponse {
        let cors = &self.config.cors;

        let request = match extract_request(body) {
            Ok(request) => request,
            Err(GateError::InvalidRequest { reason }) => {
                return GatewayResponse::error(400, &reason, cors);
            }
            Err(e) => {
                error!(error = %e, "request extraction failed");
                return GatewayResponse::error(500, DISPATCH_FAILED, cors);
            }
        };

        let snapshot = self.registry.snapshot();
        match self.dispatcher.dispatch(&*snapshot, &request) {
            Ok(result) => {
                let (status, body) =
                    render_result(&result, &request, &snapshot, &self.config.disclosure);
                GatewayResponse::json(status, body, cors)
            }
            Err(e) => {
                match &e {
                    GateError::AuditWriteFailed { .. } => warn!(
                        target: SECURITY_TARGET,
                        kind = "audit_failure",
                        agent_id = %request.agent_id,
                        error = %e,
                        "decision not audited; refusing"
                    ),
                    _ => error!(agent_id = %request.agent_id, error = %e, "dispatch failed"),
                }
                GatewayResponse::error(500, DISPATCH_FAILED, cors)
            }
        }
    }

    /// Seal the audit session.
    pub fn shutdown(&self, session_id: &str) -> GateResult<()> {
        self.dispatcher.shutdown(session_id)
    }
}
