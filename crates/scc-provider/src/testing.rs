//! Test doubles for the peer-side collaborators.
//!
//! These stand in for real ledgers and channel configuration when exercising
//! providers and registries in tests.

use async_trait::async_trait;
use scc_types::{ApplicationConfig, Ledger, LedgerError, PolicyManager, QueryExecutor};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Ledger stub serving a fixed key-value snapshot.
///
/// Counts opened and released executors, and can be told to fail when
/// opening a new one.
#[derive(Default)]
pub struct StubLedger {
	state: HashMap<(String, String), Vec<u8>>,
	fail_with: Option<String>,
	closed: bool,
	opened: Arc<AtomicUsize>,
	released: Arc<AtomicUsize>,
}

impl StubLedger {
	/// Creates an empty ledger stub.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a value readable through executors of this ledger.
	pub fn with_state(mut self, namespace: &str, key: &str, value: &[u8]) -> Self {
		self.state
			.insert((namespace.to_string(), key.to_string()), value.to_vec());
		self
	}

	/// Makes `new_query_executor` fail with a backend error.
	pub fn failing(mut self, message: &str) -> Self {
		self.fail_with = Some(message.to_string());
		self
	}

	/// Makes `new_query_executor` fail as if the ledger had been closed.
	pub fn closed(mut self) -> Self {
		self.closed = true;
		self
	}

	/// Number of executors opened so far.
	pub fn opened(&self) -> usize {
		self.opened.load(Ordering::SeqCst)
	}

	/// Number of executors released so far.
	pub fn released(&self) -> usize {
		self.released.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl Ledger for StubLedger {
	async fn new_query_executor(&self) -> Result<Box<dyn QueryExecutor>, LedgerError> {
		if self.closed {
			return Err(LedgerError::Closed);
		}
		if let Some(message) = &self.fail_with {
			return Err(LedgerError::Backend(message.clone()));
		}
		self.opened.fetch_add(1, Ordering::SeqCst);
		Ok(Box::new(StubQueryExecutor {
			state: self.state.clone(),
			released: Arc::clone(&self.released),
		}))
	}
}

struct StubQueryExecutor {
	state: HashMap<(String, String), Vec<u8>>,
	released: Arc<AtomicUsize>,
}

#[async_trait]
impl QueryExecutor for StubQueryExecutor {
	async fn get_state(&self, namespace: &str, key: &str) -> Result<Option<Vec<u8>>, LedgerError> {
		Ok(self
			.state
			.get(&(namespace.to_string(), key.to_string()))
			.cloned())
	}

	fn done(&mut self) {
		self.released.fetch_add(1, Ordering::SeqCst);
	}
}

/// Policy manager stub that knows a fixed set of policy paths.
pub struct StubPolicyManager {
	channel_id: String,
	policies: Vec<String>,
}

impl StubPolicyManager {
	/// Creates a policy manager for `channel_id` holding `policies`.
	pub fn new(channel_id: &str, policies: &[&str]) -> Self {
		Self {
			channel_id: channel_id.to_string(),
			policies: policies.iter().map(|p| p.to_string()).collect(),
		}
	}
}

impl PolicyManager for StubPolicyManager {
	fn channel_id(&self) -> &str {
		&self.channel_id
	}

	fn has_policy(&self, path: &str) -> bool {
		self.policies.iter().any(|p| p == path)
	}
}

/// Application config stub.
#[derive(Default)]
pub struct StubApplicationConfig {
	organizations: Vec<String>,
	acls: HashMap<String, String>,
}

impl StubApplicationConfig {
	/// Creates an application config listing `organizations`.
	pub fn new(organizations: &[&str]) -> Self {
		Self {
			organizations: organizations.iter().map(|o| o.to_string()).collect(),
			acls: HashMap::new(),
		}
	}

	/// Adds an ACL mapping `resource` to `policy`.
	pub fn with_acl(mut self, resource: &str, policy: &str) -> Self {
		self.acls.insert(resource.to_string(), policy.to_string());
		self
	}
}

impl ApplicationConfig for StubApplicationConfig {
	fn organizations(&self) -> Vec<String> {
		self.organizations.clone()
	}

	fn acl_policy(&self, resource: &str) -> Option<String> {
		self.acls.get(resource).cloned()
	}
}
