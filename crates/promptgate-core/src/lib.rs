//! # promptgate-core
//!
//! The fail-closed dispatch pipeline for promptgate.
//!
//! This crate provides:
//! - The four seams (`AgentLookup`, `Verifier`, `AuditWriter`, `DispatchTarget`)
//! - The `Dispatcher` that wires them together in the correct trust order
//!
//! ## Usage
//!
//! ```rust,ignore
//! use promptgate_core::{Dispatcher, traits::{AgentLookup, AuditWriter, DispatchTarget, Verifier}};
//! ```

pub mod dispatcher;
pub mod traits;

pub use dispatcher::Dispatcher;
