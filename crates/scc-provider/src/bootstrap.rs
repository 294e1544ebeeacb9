//! Composition-root wiring for the provider layer.
//!
//! Selects the provider factory implementation named in configuration, builds
//! the classifier from the system chaincode table and registers the result in
//! a [`FactoryRegistry`]. Node startup calls [`initialize`] (or
//! [`initialize_from_file`]) exactly once before any subsystem resolves a
//! provider.

use crate::{
	get_all_implementations, FactoryRegistry, PeerWiring, ProviderFactory, StaticClassifier,
};
use scc_config::{Config, ConfigError};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while wiring the provider layer.
#[derive(Debug, Error)]
pub enum BootstrapError {
	/// Error that occurs when loading configuration.
	#[error("Configuration error: {0}")]
	Config(#[from] ConfigError),
	/// Error that occurs when the configured implementation does not exist.
	#[error("Unknown provider implementation '{name}'. Available: [{available}]")]
	UnknownImplementation { name: String, available: String },
}

/// Builds the provider factory described by `config`.
pub fn build_factory_from_config(
	config: &Config,
	wiring: PeerWiring,
) -> Result<Arc<dyn ProviderFactory>, BootstrapError> {
	let name = config.provider.implementation.as_str();
	let implementations = get_all_implementations();

	let Some((_, constructor)) = implementations.iter().find(|(n, _)| *n == name) else {
		let available: Vec<_> = implementations.iter().map(|(n, _)| *n).collect();
		return Err(BootstrapError::UnknownImplementation {
			name: name.to_string(),
			available: available.join(", "),
		});
	};

	let classifier = StaticClassifier::new(&config.system_chaincodes);
	tracing::debug!(
		"Loaded {} system chaincode(s) for provider implementation: {}",
		classifier.len(),
		name
	);

	Ok(constructor(wiring, Arc::new(classifier)))
}

/// Builds the factory described by `config` and registers it.
pub fn initialize(
	registry: &FactoryRegistry,
	config: &Config,
	wiring: PeerWiring,
) -> Result<(), BootstrapError> {
	let factory = build_factory_from_config(config, wiring)?;
	if registry.is_registered() {
		tracing::warn!("Replacing previously registered system chaincode provider factory");
	}
	registry.register(factory);
	tracing::info!(
		"Initialized system chaincode provider [{}]",
		config.provider.implementation
	);
	Ok(())
}

/// Loads configuration from `path`, then behaves like [`initialize`].
pub async fn initialize_from_file(
	registry: &FactoryRegistry,
	path: impl AsRef<Path>,
	wiring: PeerWiring,
) -> Result<(), BootstrapError> {
	let config = Config::from_file(path).await?;
	initialize(registry, &config, wiring)
}
