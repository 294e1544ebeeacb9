//! Process-wide provider factory registry.
//!
//! The registry is a single slot holding the provider factory the node was
//! wired with. It is constructed at the composition root, filled once during
//! startup and then read concurrently by every subsystem that needs a
//! provider. Reads are lock-free and always observe a complete registration.

use crate::{ProviderFactory, SystemChaincodeProvider};
use arc_swap::ArcSwapOption;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur when resolving the registered factory.
#[derive(Debug, Error)]
pub enum RegistryError {
	/// Error that occurs when `resolve` is called before any `register`.
	/// This is a startup ordering defect.
	#[error("no system chaincode provider factory has been registered")]
	NotRegistered,
}

struct Registration {
	factory: Arc<dyn ProviderFactory>,
}

/// Single-slot registry for the provider factory.
///
/// States are unregistered and registered; registering again overwrites the
/// slot in place (last write wins) and there is no way back to unregistered.
#[derive(Default)]
pub struct FactoryRegistry {
	slot: ArcSwapOption<Registration>,
}

impl FactoryRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Stores `factory` as the registered provider factory.
	pub fn register(&self, factory: Arc<dyn ProviderFactory>) {
		self.slot.store(Some(Arc::new(Registration { factory })));
	}

	/// Returns the registered provider factory.
	pub fn resolve(&self) -> Result<Arc<dyn ProviderFactory>, RegistryError> {
		self.slot
			.load_full()
			.map(|registration| Arc::clone(&registration.factory))
			.ok_or(RegistryError::NotRegistered)
	}

	/// Creates a provider from the registered factory.
	pub fn provider(&self) -> Result<Box<dyn SystemChaincodeProvider>, RegistryError> {
		Ok(self.resolve()?.create())
	}

	/// Returns true once a factory has been registered.
	pub fn is_registered(&self) -> bool {
		self.slot.load().is_some()
	}
}

impl fmt::Debug for FactoryRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FactoryRegistry")
			.field("registered", &self.is_registered())
			.finish()
	}
}
