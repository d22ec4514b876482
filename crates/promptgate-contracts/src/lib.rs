//! # promptgate-contracts
//!
//! Shared types, error taxonomy, and wire contracts for the promptgate
//! dispatcher.
//!
//! All crates in the workspace import from here. No decision logic lives in
//! this crate, only data definitions, the canonical hash format, and error
//! types.

pub mod agent;
pub mod dispatch;
pub mod error;
pub mod hash;
pub mod verify;
