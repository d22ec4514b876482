//! # promptgate-verify
//!
//! The prompt hash verifier for promptgate.
//!
//! This crate provides [`engine::HashVerifier`], which implements the
//! [`promptgate_core::traits::Verifier`] trait. A request passes four hard
//! gates in a fixed order, and the first gate that fails decides the denial:
//!
//! 1. **Presence**: `agent_id`, then `prompt_hash`, must be non-empty.
//! 2. **Format**: `prompt_hash` must match `^[a-f0-9]{64}$`. The registry is
//!    not consulted, so format errors reveal nothing about which agents exist.
//! 3. **Existence**: the agent must be registered. The denial carries no
//!    hash data.
//! 4. **Equality**: the stored hash must equal `prompt_hash` exactly,
//!    compared in constant time.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use promptgate_verify::engine::HashVerifier;
//! use promptgate_core::traits::Verifier;
//!
//! let verifier = HashVerifier::new();
//! let outcome = verifier.verify(&registry, &request);
//! ```

pub mod engine;

pub use engine::HashVerifier;
