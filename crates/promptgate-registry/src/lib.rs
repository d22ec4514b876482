//! # promptgate-registry
//!
//! The immutable agent registry for promptgate, loaded from a prompt
//! lockfile.
//!
//! ## Overview
//!
//! [`Registry`] maps agent ids to their canonical records and implements
//! [`AgentLookup`](promptgate_core::traits::AgentLookup). Loading is
//! fail-closed: a lockfile with the wrong shape, or with any stored hash
//! that is not 64 lowercase hex characters, is rejected at construction.
//!
//! [`RegistryHandle`] holds the registry a running service decides against
//! and replaces it whole on reload.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use promptgate_registry::{Registry, RegistryHandle};
//!
//! let registry = Registry::from_file(Path::new("versions/prompt-lock.json"))?;
//! let handle = RegistryHandle::new(registry);
//! let snapshot = handle.snapshot();
//! ```

pub mod document;
pub mod handle;
pub mod integrity;
pub mod registry;
pub mod sync;

pub use document::{LockDocument, LockfileVersion};
pub use handle::RegistryHandle;
pub use registry::{Registry, RegistryManifest};

// ── Tests ─────────────────────────────────────────────────────────────────────
