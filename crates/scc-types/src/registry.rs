//! Registry trait for self-registering implementations.
//!
//! Provider factory implementations declare the name they are selected by in
//! configuration along with the constructor that builds them.

/// Base trait for implementation registries.
///
/// Each provider implementation module provides a `Registry` struct that
/// implements this trait, so that it can be listed and looked up by name
/// when the node is wired together.
pub trait ImplementationRegistry {
	/// The name used in configuration files to reference this implementation.
	///
	/// This should match the value of `provider.implementation` in TOML,
	/// for example "peer".
	const NAME: &'static str;

	/// The constructor type this implementation provides.
	type Factory;

	/// Get the constructor for this implementation.
	fn factory() -> Self::Factory;
}
