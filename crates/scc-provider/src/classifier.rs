//! Table-driven chaincode classifier.
//!
//! Classifies chaincode names against the system chaincode table from
//! configuration. Names absent from the table are ordinary chaincodes and are
//! never reported as restricted.

use scc_config::SystemChaincodeConfig;
use scc_types::ChaincodeClassifier;
use std::collections::HashMap;

/// Invocation paths a system chaincode may be reached through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Invocability {
	external: bool,
	cc2cc: bool,
}

/// Immutable classifier built from a system chaincode table.
#[derive(Debug, Clone, Default)]
pub struct StaticClassifier {
	entries: HashMap<String, Invocability>,
}

impl StaticClassifier {
	/// Builds a classifier from configured entries.
	///
	/// A later entry for the same name replaces an earlier one.
	pub fn new<'a>(entries: impl IntoIterator<Item = &'a SystemChaincodeConfig>) -> Self {
		let entries = entries
			.into_iter()
			.map(|scc| {
				(
					scc.name.clone(),
					Invocability {
						external: scc.invokable_external,
						cc2cc: scc.invokable_cc2cc,
					},
				)
			})
			.collect();
		Self { entries }
	}

	/// Number of system chaincodes known to this classifier.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns true if no system chaincodes are known.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl ChaincodeClassifier for StaticClassifier {
	fn is_system_chaincode(&self, name: &str) -> bool {
		self.entries.contains_key(name)
	}

	fn is_restricted_from_peer_to_peer(&self, name: &str) -> bool {
		self.entries.get(name).is_some_and(|inv| !inv.cc2cc)
	}

	fn is_restricted_from_external(&self, name: &str) -> bool {
		self.entries.get(name).is_some_and(|inv| !inv.external)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn entry(name: &str, external: bool, cc2cc: bool) -> SystemChaincodeConfig {
		SystemChaincodeConfig {
			name: name.to_string(),
			invokable_external: external,
			invokable_cc2cc: cc2cc,
		}
	}

	#[test]
	fn test_classification() {
		let table = vec![
			entry("cscc", true, true),
			entry("escc", false, false),
			entry("qscc", true, false),
		];
		let classifier = StaticClassifier::new(&table);

		assert_eq!(classifier.len(), 3);
		assert!(classifier.is_system_chaincode("cscc"));
		assert!(!classifier.is_restricted_from_external("cscc"));
		assert!(!classifier.is_restricted_from_peer_to_peer("cscc"));

		assert!(classifier.is_restricted_from_external("escc"));
		assert!(classifier.is_restricted_from_peer_to_peer("escc"));

		assert!(!classifier.is_restricted_from_external("qscc"));
		assert!(classifier.is_restricted_from_peer_to_peer("qscc"));

		// Answers do not change across repeated calls.
		for name in ["cscc", "escc", "qscc", "mycc"] {
			let first = (
				classifier.is_system_chaincode(name),
				classifier.is_restricted_from_external(name),
				classifier.is_restricted_from_peer_to_peer(name),
			);
			for _ in 0..3 {
				let again = (
					classifier.is_system_chaincode(name),
					classifier.is_restricted_from_external(name),
					classifier.is_restricted_from_peer_to_peer(name),
				);
				assert_eq!(again, first, "{name}");
			}
		}
	}

	#[test]
	fn test_unknown_names_are_unrestricted() {
		let classifier = StaticClassifier::new(&[entry("vscc", false, false)]);

		assert!(!classifier.is_system_chaincode("mycc"));
		assert!(!classifier.is_restricted_from_external("mycc"));
		assert!(!classifier.is_restricted_from_peer_to_peer("mycc"));
		// Names are matched exactly.
		assert!(!classifier.is_system_chaincode("VSCC"));
	}

	#[test]
	fn test_later_entry_wins() {
		let table = vec![entry("lscc", true, true), entry("lscc", false, true)];
		let classifier = StaticClassifier::new(&table);

		assert_eq!(classifier.len(), 1);
		assert!(classifier.is_restricted_from_external("lscc"));
	}

	#[test]
	fn test_empty_table() {
		let classifier = StaticClassifier::default();
		assert!(classifier.is_empty());
		assert!(!classifier.is_system_chaincode(""));
	}
}
