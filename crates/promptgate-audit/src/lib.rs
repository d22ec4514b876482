//! # promptgate-audit
//!
//! Append-only, SHA-256 hash-chained audit trail of verification decisions.
//!
//! Every decision the dispatcher makes, allowed or denied, is wrapped in an
//! `AuditEvent` that links to the previous event by hash. Altering any event
//! breaks the chain and is detected by `verify_chain`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use promptgate_audit::InMemoryAuditWriter;
//! use promptgate_core::traits::AuditWriter;
//!
//! let writer = InMemoryAuditWriter::new("session-001");
//! writer.write(&decision)?;
//! assert!(writer.verify_integrity());
//! let log = writer.export_log()?;
//! ```

pub mod chain;
pub mod event;
pub mod memory;

pub use chain::{hash_event, verify_chain};
pub use event::{AuditEvent, AuditLog};
pub use memory::InMemoryAuditWriter;

// ── Tests ─────────────────────────────────────────────────────────────────────
