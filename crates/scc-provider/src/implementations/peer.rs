//! Peer-backed system chaincode provider.
//!
//! Providers built here answer classification questions through the
//! configured classifier and resolve channel state through the peer on every
//! call, so channels joined or reconfigured at runtime are seen immediately.

use crate::{
	FactoryConstructor, PeerWiring, ProviderError, ProviderFactory, ProviderRegistry,
	SystemChaincodeProvider,
};
use async_trait::async_trait;
use scc_types::{
	ApplicationConfig, ChaincodeClassifier, ImplementationRegistry, PeerAccessor, PeerSupport,
	PolicyManager, ScopedQueryExecutor,
};
use std::sync::Arc;

/// Factory stamping its peer wiring and classifier into new providers.
pub struct PeerProviderFactory {
	peer: Arc<dyn PeerAccessor>,
	support: Arc<dyn PeerSupport>,
	classifier: Arc<dyn ChaincodeClassifier>,
}

impl PeerProviderFactory {
	/// Creates a factory from the peer wiring and a classifier.
	pub fn new(wiring: PeerWiring, classifier: Arc<dyn ChaincodeClassifier>) -> Self {
		Self {
			peer: wiring.peer,
			support: wiring.support,
			classifier,
		}
	}
}

impl ProviderFactory for PeerProviderFactory {
	fn create(&self) -> Box<dyn SystemChaincodeProvider> {
		Box::new(PeerSccProvider {
			peer: Arc::clone(&self.peer),
			support: Arc::clone(&self.support),
			classifier: Arc::clone(&self.classifier),
		})
	}
}

/// Provider delegating to the peer and the classifier.
pub struct PeerSccProvider {
	peer: Arc<dyn PeerAccessor>,
	support: Arc<dyn PeerSupport>,
	classifier: Arc<dyn ChaincodeClassifier>,
}

#[async_trait]
impl SystemChaincodeProvider for PeerSccProvider {
	fn is_system_chaincode(&self, name: &str) -> bool {
		self.classifier.is_system_chaincode(name)
	}

	fn is_system_chaincode_and_not_invokable_cc2cc(&self, name: &str) -> bool {
		self.classifier.is_system_chaincode(name)
			&& self.classifier.is_restricted_from_peer_to_peer(name)
	}

	fn is_system_chaincode_and_not_invokable_external(&self, name: &str) -> bool {
		self.classifier.is_system_chaincode(name)
			&& self.classifier.is_restricted_from_external(name)
	}

	async fn query_executor_for_channel(
		&self,
		channel_id: &str,
	) -> Result<ScopedQueryExecutor, ProviderError> {
		let ledger = self
			.peer
			.ledger(channel_id)
			.ok_or_else(|| ProviderError::ChannelNotFound(channel_id.to_string()))?;

		let executor = ledger.new_query_executor().await?;
		Ok(ScopedQueryExecutor::new(executor))
	}

	fn application_config(&self, channel_id: &str) -> Option<Arc<dyn ApplicationConfig>> {
		self.support.application_config(channel_id)
	}

	fn policy_manager(&self, channel_id: &str) -> Option<Arc<dyn PolicyManager>> {
		self.peer.policy_manager(channel_id)
	}
}

/// Constructor for the peer-backed factory.
pub fn create_factory(
	wiring: PeerWiring,
	classifier: Arc<dyn ChaincodeClassifier>,
) -> Arc<dyn ProviderFactory> {
	Arc::new(PeerProviderFactory::new(wiring, classifier))
}

/// Registry for the peer-backed provider implementation.
pub struct Registry;

impl ImplementationRegistry for Registry {
	const NAME: &'static str = "peer";
	type Factory = FactoryConstructor;

	fn factory() -> Self::Factory {
		create_factory
	}
}

impl ProviderRegistry for Registry {}
