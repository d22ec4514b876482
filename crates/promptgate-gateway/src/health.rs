//! Health report.

use chrono::Utc;
use serde::Serialize;

use promptgate_registry::Registry;

use crate::config::GatewayConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub service: String,
    pub version: String,
    /// The registry's own `version` field.
    pub lock_file_version: Option<String>,
    pub prompts_count: usize,
    pub immutable: bool,
    pub timestamp: String,
}

impl HealthReport {
    pub fn new(config: &GatewayConfig, registry: &Registry) -> Self {
        Self {
            status: "healthy",
            service: config.service.clone(),
            version: config.service_version.clone(),
            lock_file_version: registry.version().map(str::to_string),
            prompts_count: registry.count(),
            immutable: registry.is_immutable(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}
