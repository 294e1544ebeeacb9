//! System chaincode provider module.
//!
//! This crate is the gateway through which node subsystems ask whether a
//! chaincode is a system chaincode, whether it may be reached over a given
//! invocation path, and how to obtain the query executor, application
//! configuration and policy manager of a channel. A single provider factory
//! is registered in a [`FactoryRegistry`] at startup and every later call
//! site resolves providers through it.

use async_trait::async_trait;
use scc_types::{
	ApplicationConfig, ChaincodeClassifier, ImplementationRegistry, LedgerError, PeerAccessor,
	PeerSupport, PolicyManager, ScopedQueryExecutor,
};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod peer;
}

pub mod bootstrap;
pub mod classifier;
pub mod memory;
pub mod registry;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use bootstrap::{build_factory_from_config, initialize, initialize_from_file, BootstrapError};
pub use classifier::StaticClassifier;
pub use memory::MemoryPeer;
pub use registry::{FactoryRegistry, RegistryError};

/// Errors that can occur while serving provider requests.
#[derive(Debug, Error)]
pub enum ProviderError {
	/// Error that occurs when the peer holds no ledger for the channel.
	#[error("could not retrieve ledger for channel {0}")]
	ChannelNotFound(String),
	/// Error returned by the channel ledger while opening a query executor.
	#[error("Ledger error: {0}")]
	Ledger(#[from] LedgerError),
}

/// Trait defining the questions node subsystems ask about system chaincodes.
///
/// Implementations hold no channel state of their own; every accessor is
/// resolved again through the peer on each call.
#[async_trait]
pub trait SystemChaincodeProvider: Send + Sync {
	/// Returns true if the supplied chaincode is a system chaincode.
	fn is_system_chaincode(&self, name: &str) -> bool;

	/// Returns true if the supplied chaincode is a system chaincode that must
	/// not be invoked by another chaincode.
	fn is_system_chaincode_and_not_invokable_cc2cc(&self, name: &str) -> bool;

	/// Returns true if the supplied chaincode is a system chaincode that must
	/// not be invoked by an external client.
	fn is_system_chaincode_and_not_invokable_external(&self, name: &str) -> bool;

	/// Opens a query executor over the ledger of `channel_id`.
	///
	/// Fails with [`ProviderError::ChannelNotFound`] when the peer has no
	/// ledger for the channel. The executor is released when the returned
	/// guard is dropped.
	async fn query_executor_for_channel(
		&self,
		channel_id: &str,
	) -> Result<ScopedQueryExecutor, ProviderError>;

	/// Returns the application configuration of `channel_id`, if it has one.
	fn application_config(&self, channel_id: &str) -> Option<Arc<dyn ApplicationConfig>>;

	/// Returns the policy manager of `channel_id`, if it has one.
	fn policy_manager(&self, channel_id: &str) -> Option<Arc<dyn PolicyManager>>;
}

/// Trait for constructing providers.
///
/// Factories are what gets registered in the [`FactoryRegistry`]; swapping
/// the factory swaps the provider every subsystem sees.
pub trait ProviderFactory: Send + Sync {
	/// Creates a new provider. Never fails.
	fn create(&self) -> Box<dyn SystemChaincodeProvider>;
}

/// The peer-side capabilities a provider factory is wired with.
#[derive(Clone)]
pub struct PeerWiring {
	/// Resolves ledgers and policy managers.
	pub peer: Arc<dyn PeerAccessor>,
	/// Resolves application configuration.
	pub support: Arc<dyn PeerSupport>,
}

impl PeerWiring {
	/// Creates wiring from separate accessor and support implementations.
	pub fn new(peer: Arc<dyn PeerAccessor>, support: Arc<dyn PeerSupport>) -> Self {
		Self { peer, support }
	}
}

impl<T> From<Arc<T>> for PeerWiring
where
	T: PeerAccessor + PeerSupport + 'static,
{
	fn from(peer: Arc<T>) -> Self {
		Self {
			peer: peer.clone(),
			support: peer,
		}
	}
}

impl fmt::Debug for PeerWiring {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PeerWiring").finish_non_exhaustive()
	}
}

/// Type alias for provider factory constructors.
///
/// This is the function signature that all provider implementations must
/// provide so that the bootstrap can build them by name.
pub type FactoryConstructor =
	fn(PeerWiring, Arc<dyn ChaincodeClassifier>) -> Arc<dyn ProviderFactory>;

/// Registry trait for provider implementations.
pub trait ProviderRegistry: ImplementationRegistry<Factory = FactoryConstructor> {}

/// Get all available provider implementations.
///
/// Returns a vector of (name, constructor) tuples, used by the bootstrap to
/// select the implementation named in configuration.
pub fn get_all_implementations() -> Vec<(&'static str, FactoryConstructor)> {
	use implementations::peer;

	vec![(peer::Registry::NAME, peer::Registry::factory())]
}
