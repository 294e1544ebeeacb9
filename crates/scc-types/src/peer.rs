//! Peer-side accessors resolving per-channel state.
//!
//! The hosting peer owns every channel's ledger, application configuration
//! and policy manager. The provider layer only borrows these through the
//! narrow traits below and re-resolves them on every call, so channels that
//! are joined or reconfigured while the node runs are always seen as they
//! currently are.

use crate::Ledger;
use std::sync::Arc;

/// Application section of a channel's configuration.
pub trait ApplicationConfig: Send + Sync {
	/// Returns the MSP identifiers of the application organizations.
	fn organizations(&self) -> Vec<String>;

	/// Returns the policy reference guarding `resource`, if one is configured.
	fn acl_policy(&self, resource: &str) -> Option<String>;
}

/// Evaluates access and endorsement policies for one channel.
pub trait PolicyManager: Send + Sync {
	/// The channel this manager belongs to.
	fn channel_id(&self) -> &str;

	/// Returns true if a policy exists at `path`.
	fn has_policy(&self, path: &str) -> bool;
}

/// Resolves ledgers and policy managers by channel.
///
/// Implementations must be safe for concurrent reads and each call must
/// observe a single consistent view of the channel.
pub trait PeerAccessor: Send + Sync {
	/// Returns the ledger for `channel_id`, or `None` if the peer has not
	/// joined that channel.
	fn ledger(&self, channel_id: &str) -> Option<Arc<dyn Ledger>>;

	/// Returns the policy manager for `channel_id`, or `None` if there is none.
	fn policy_manager(&self, channel_id: &str) -> Option<Arc<dyn PolicyManager>>;
}

/// Resolves channel configuration.
pub trait PeerSupport: Send + Sync {
	/// Returns the application configuration for `channel_id`, or `None`
	/// when the channel has no application section (the system channel,
	/// for instance).
	fn application_config(&self, channel_id: &str) -> Option<Arc<dyn ApplicationConfig>>;
}
