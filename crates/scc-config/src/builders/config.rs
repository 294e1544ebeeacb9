//! Configuration builder for creating test and development configurations.

use crate::{Config, ProviderConfig, SystemChaincodeConfig};

/// Builder for creating `Config` instances with a fluent API.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
	implementation: String,
	system_chaincodes: Vec<SystemChaincodeConfig>,
}

impl Default for ConfigBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigBuilder {
	/// Creates a new `ConfigBuilder` using the "peer" implementation and an
	/// empty system chaincode table.
	pub fn new() -> Self {
		Self {
			implementation: ProviderConfig::default().implementation,
			system_chaincodes: Vec::new(),
		}
	}

	/// Sets the provider factory implementation name.
	pub fn implementation(mut self, name: impl Into<String>) -> Self {
		self.implementation = name.into();
		self
	}

	/// Adds a system chaincode entry.
	pub fn system_chaincode(
		mut self,
		name: impl Into<String>,
		invokable_external: bool,
		invokable_cc2cc: bool,
	) -> Self {
		self.system_chaincodes.push(SystemChaincodeConfig {
			name: name.into(),
			invokable_external,
			invokable_cc2cc,
		});
		self
	}

	/// Builds the `Config` with the configured values.
	pub fn build(self) -> Config {
		Config {
			provider: ProviderConfig {
				implementation: self.implementation,
			},
			system_chaincodes: self.system_chaincodes,
		}
	}
}
