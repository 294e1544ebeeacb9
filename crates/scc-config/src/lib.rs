//! Configuration module for the system chaincode provider layer.
//!
//! This module provides the structures used to wire the provider at node
//! startup: which provider factory implementation to register and the table
//! of system chaincodes together with the invocation paths they may be
//! reached through. Configuration is loaded from TOML, with `${VAR}` and
//! `${VAR:-default}` references resolved from the environment before parsing.

#[cfg(feature = "testing")]
pub mod builders {
	pub mod config;
}

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the huge input dump
		let message = err.message().to_string();
		ConfigError::Parse(message)
	}
}

/// Main configuration structure for the provider layer.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
	/// Selection of the provider factory implementation.
	#[serde(default)]
	pub provider: ProviderConfig,
	/// The system chaincodes known to this node.
	#[serde(default)]
	pub system_chaincodes: Vec<SystemChaincodeConfig>,
}

/// Configuration for the provider factory.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
	/// Name of the factory implementation to register.
	/// Defaults to "peer" if not specified.
	#[serde(default = "default_implementation")]
	pub implementation: String,
}

impl Default for ProviderConfig {
	fn default() -> Self {
		Self {
			implementation: default_implementation(),
		}
	}
}

/// Returns the default provider implementation name.
fn default_implementation() -> String {
	"peer".to_string()
}

/// A single system chaincode entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SystemChaincodeConfig {
	/// Chaincode name, unique across the table.
	pub name: String,
	/// Whether external clients may invoke this chaincode.
	#[serde(default = "default_invokable")]
	pub invokable_external: bool,
	/// Whether other chaincodes may invoke this chaincode.
	#[serde(default = "default_invokable")]
	pub invokable_cc2cc: bool,
}

fn default_invokable() -> bool {
	true
}

/// Resolves environment variables in a string.
///
/// Replaces ${VAR_NAME} with the value of the environment variable VAR_NAME.
/// Supports default values with ${VAR_NAME:-default_value}.
///
/// Input strings are limited to 1MB to prevent ReDoS attacks.
pub(crate) fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
	const MAX_INPUT_SIZE: usize = 1024 * 1024; // 1MB
	if input.len() > MAX_INPUT_SIZE {
		return Err(ConfigError::Validation(format!(
			"Configuration file too large: {} bytes (max: {} bytes)",
			input.len(),
			MAX_INPUT_SIZE
		)));
	}

	let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {}", e)))?;

	let mut result = String::with_capacity(input.len());
	let mut last = 0;

	for cap in re.captures_iter(input) {
		let (Some(full_match), Some(var_name)) = (cap.get(0), cap.get(1)) else {
			continue;
		};
		let default_value = cap.get(2).map(|m| m.as_str());

		let value = match std::env::var(var_name.as_str()) {
			Ok(v) => v,
			Err(_) => match default_value {
				Some(default) => default.to_string(),
				None => {
					return Err(ConfigError::Validation(format!(
						"Environment variable '{}' not found",
						var_name.as_str()
					)));
				},
			},
		};

		result.push_str(&input[last..full_match.start()]);
		result.push_str(&value);
		last = full_match.end();
	}
	result.push_str(&input[last..]);

	Ok(result)
}

impl Config {
	/// Loads configuration from a file, resolving environment variables.
	pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let content = tokio::fs::read_to_string(path).await.map_err(|e| {
			ConfigError::Io(std::io::Error::new(
				e.kind(),
				format!("Cannot read {}: {}", path.display(), e),
			))
		})?;
		content.parse()
	}

	/// Returns the entry for `name`, if it is listed as a system chaincode.
	pub fn system_chaincode(&self, name: &str) -> Option<&SystemChaincodeConfig> {
		self.system_chaincodes.iter().find(|scc| scc.name == name)
	}

	/// Validates the configuration.
	///
	/// - Ensures the provider implementation name is not empty
	/// - Ensures every system chaincode has a non-empty name
	/// - Rejects duplicate system chaincode names
	fn validate(&self) -> Result<(), ConfigError> {
		if self.provider.implementation.trim().is_empty() {
			return Err(ConfigError::Validation(
				"Provider implementation cannot be empty".into(),
			));
		}

		let mut seen = HashSet::new();
		for scc in &self.system_chaincodes {
			if scc.name.trim().is_empty() {
				return Err(ConfigError::Validation(
					"System chaincode name cannot be empty".into(),
				));
			}
			if !seen.insert(scc.name.as_str()) {
				return Err(ConfigError::Validation(format!(
					"Duplicate system chaincode '{}'",
					scc.name
				)));
			}
		}

		Ok(())
	}
}

/// Implementation of FromStr trait for Config to enable parsing from string.
///
/// Environment variables are resolved and the configuration is validated
/// after parsing.
impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let resolved = resolve_env_vars(s)?;
		let config: Config = toml::from_str(&resolved)?;
		config.validate()?;
		Ok(config)
	}
}
