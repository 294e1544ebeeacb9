//! Common types module for the system chaincode provider layer.
//!
//! This module defines the contracts the provider layer consumes from the
//! hosting peer: ledgers and their query executors, per-channel application
//! configuration and policy managers, and the chaincode classification rules.
//! Implementations of these contracts live outside this workspace (or in the
//! in-memory test wiring of `scc-provider`).

/// Chaincode classification contract.
pub mod classification;
/// Ledger and query executor contracts.
pub mod ledger;
/// Peer-side accessors resolving per-channel state.
pub mod peer;
/// Self-registration trait for provider implementations.
pub mod registry;

// Re-export all types for convenient access
pub use classification::*;
pub use ledger::*;
pub use peer::*;
pub use registry::*;
