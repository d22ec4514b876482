//! Shared, swappable registry reference.
//!
//! Readers take an `Arc<Registry>` snapshot and decide against it; a reload
//! builds a complete new `Registry` first and then replaces the reference
//! in one step. An in-flight request keeps its snapshot alive until it is
//! done, so it never observes a half-updated registry.

use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{info, warn};

use promptgate_contracts::error::LoadError;

use crate::registry::Registry;

/// Single-writer / many-reader holder of the current registry.
#[derive(Debug, Clone)]
pub struct RegistryHandle {
    current: Arc<RwLock<Arc<Registry>>>,
}

impl RegistryHandle {
    pub fn new(registry: Registry) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(registry))),
        }
    }

    /// The registry in effect right now.
    pub fn snapshot(&self) -> Arc<Registry> {
        // The guarded value is a single Arc; a poisoned lock cannot hold a
        // partially written registry.
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Replace the registry, returning the one it supersedes.
    pub fn swap(&self, registry: Registry) -> Arc<Registry> {
        let next = Arc::new(registry);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let previous = std::mem::replace(&mut *guard, next);
        info!(
            prompts = guard.count(),
            version = guard.version().unwrap_or("unversioned"),
            "registry swapped"
        );
        previous
    }

    /// Load `path` and swap it in. On failure the current registry stays.
    pub fn reload_from_file(&self, path: &Path) -> Result<Arc<Registry>, LoadError> {
        match Registry::from_file(path) {
            Ok(registry) => {
                self.swap(registry);
                Ok(self.snapshot())
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "registry reload rejected; keeping current"
                );
                Err(e)
            }
        }
    }
}
