//! In-memory peer wiring.
//!
//! `MemoryPeer` keeps per-channel ledgers, policy managers and application
//! configuration in a map and serves them through [`PeerAccessor`] and
//! [`PeerSupport`]. It holds references only; the ledgers themselves are
//! supplied by the caller.

use scc_types::{ApplicationConfig, Ledger, PeerAccessor, PeerSupport, PolicyManager};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct ChannelEntry {
	ledger: Option<Arc<dyn Ledger>>,
	policy_manager: Option<Arc<dyn PolicyManager>>,
	application_config: Option<Arc<dyn ApplicationConfig>>,
}

/// Map-backed peer serving channel state to providers.
#[derive(Default)]
pub struct MemoryPeer {
	channels: RwLock<HashMap<String, ChannelEntry>>,
}

impl MemoryPeer {
	/// Creates a peer that has joined no channels.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers the ledger and policy manager of `channel_id`, replacing
	/// any previous ones. Application configuration is left untouched.
	pub fn join_channel(
		&self,
		channel_id: &str,
		ledger: Arc<dyn Ledger>,
		policy_manager: Option<Arc<dyn PolicyManager>>,
	) {
		let mut channels = self.write();
		let entry = channels.entry(channel_id.to_string()).or_default();
		entry.ledger = Some(ledger);
		entry.policy_manager = policy_manager;
	}

	/// Sets or clears the application configuration of `channel_id`.
	pub fn set_application_config(
		&self,
		channel_id: &str,
		config: Option<Arc<dyn ApplicationConfig>>,
	) {
		let mut channels = self.write();
		let entry = channels.entry(channel_id.to_string()).or_default();
		entry.application_config = config;
	}

	/// Removes every reference held for `channel_id`.
	///
	/// Returns true if the channel was known.
	pub fn leave_channel(&self, channel_id: &str) -> bool {
		self.write().remove(channel_id).is_some()
	}

	/// Returns the known channel identifiers, sorted.
	pub fn channels(&self) -> Vec<String> {
		let mut ids: Vec<String> = self.read().keys().cloned().collect();
		ids.sort();
		ids
	}

	// The map is never left half-updated, so a poisoned lock is still usable.
	fn read(&self) -> RwLockReadGuard<'_, HashMap<String, ChannelEntry>> {
		self.channels.read().unwrap_or_else(PoisonError::into_inner)
	}

	fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, ChannelEntry>> {
		self.channels.write().unwrap_or_else(PoisonError::into_inner)
	}
}

impl PeerAccessor for MemoryPeer {
	fn ledger(&self, channel_id: &str) -> Option<Arc<dyn Ledger>> {
		self.read().get(channel_id).and_then(|e| e.ledger.clone())
	}

	fn policy_manager(&self, channel_id: &str) -> Option<Arc<dyn PolicyManager>> {
		self.read()
			.get(channel_id)
			.and_then(|e| e.policy_manager.clone())
	}
}

impl PeerSupport for MemoryPeer {
	fn application_config(&self, channel_id: &str) -> Option<Arc<dyn ApplicationConfig>> {
		self.read()
			.get(channel_id)
			.and_then(|e| e.application_config.clone())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::{StubApplicationConfig, StubLedger, StubPolicyManager};

	#[test]
	fn test_join_and_leave() {
		let peer = MemoryPeer::new();
		assert!(peer.ledger("ch1").is_none());

		peer.join_channel(
			"ch1",
			Arc::new(StubLedger::new()),
			Some(Arc::new(StubPolicyManager::new("ch1", &[]))),
		);
		peer.join_channel("ch0", Arc::new(StubLedger::new()), None);

		assert!(peer.ledger("ch1").is_some());
		assert_eq!(peer.policy_manager("ch1").unwrap().channel_id(), "ch1");
		assert!(peer.policy_manager("ch0").is_none());
		assert_eq!(peer.channels(), vec!["ch0".to_string(), "ch1".to_string()]);

		assert!(peer.leave_channel("ch1"));
		assert!(!peer.leave_channel("ch1"));
		assert!(peer.ledger("ch1").is_none());
		assert!(peer.policy_manager("ch1").is_none());
	}

	#[test]
	fn test_application_config_independent_of_ledger() {
		let peer = MemoryPeer::new();
		peer.set_application_config(
			"ch1",
			Some(Arc::new(
				StubApplicationConfig::new(&["Org1MSP"])
					.with_acl("lscc/getid", "/Channel/Application/Readers"),
			)),
		);

		assert!(peer.ledger("ch1").is_none());
		let app = peer.application_config("ch1").unwrap();
		assert_eq!(
			app.acl_policy("lscc/getid").as_deref(),
			Some("/Channel/Application/Readers")
		);

		// Joining keeps the configuration in place.
		peer.join_channel("ch1", Arc::new(StubLedger::new()), None);
		assert!(peer.application_config("ch1").is_some());

		peer.set_application_config("ch1", None);
		assert!(peer.application_config("ch1").is_none());
		assert!(peer.ledger("ch1").is_some());
	}
}
