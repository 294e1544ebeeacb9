//! Chaincode classification contract.
//!
//! The classifier decides which chaincode names are node-resident system
//! chaincodes and over which invocation paths they may not be reached.

/// Pure classification rules over chaincode names.
///
/// Implementations must be deterministic for a given rule set: the same
/// name always yields the same answer for the lifetime of the classifier.
pub trait ChaincodeClassifier: Send + Sync {
	/// Returns true if `name` is a system chaincode.
	fn is_system_chaincode(&self, name: &str) -> bool;

	/// Returns true if `name` must not be invoked by another chaincode.
	fn is_restricted_from_peer_to_peer(&self, name: &str) -> bool;

	/// Returns true if `name` must not be invoked by an external client.
	fn is_restricted_from_external(&self, name: &str) -> bool;
}
