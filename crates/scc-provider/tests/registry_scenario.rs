//! End-to-end wiring: configuration, bootstrap, registry and provider.

use scc_provider::testing::{StubApplicationConfig, StubLedger, StubPolicyManager};
use scc_provider::{
	initialize_from_file, FactoryRegistry, MemoryPeer, ProviderError, RegistryError,
};
use std::io::Write;
use std::sync::Arc;

const CONFIG: &str = r#"
[provider]
implementation = "peer"

[[system_chaincodes]]
name = "cscc"

[[system_chaincodes]]
name = "lscc"

[[system_chaincodes]]
name = "qscc"
invokable_cc2cc = false

[[system_chaincodes]]
name = "escc"
invokable_external = false
invokable_cc2cc = false
"#;

async fn wired_registry(peer: Arc<MemoryPeer>) -> FactoryRegistry {
	let mut file = tempfile::NamedTempFile::new().unwrap();
	write!(file, "{}", CONFIG).unwrap();

	let registry = FactoryRegistry::new();
	assert!(matches!(registry.resolve(), Err(RegistryError::NotRegistered)));
	initialize_from_file(&registry, file.path(), peer.into())
		.await
		.unwrap();
	registry
}

#[tokio::test]
async fn test_channel_scenario() {
	let peer = Arc::new(MemoryPeer::new());
	let ledger = Arc::new(StubLedger::new().with_state("lscc", "mycc", b"1.0"));
	peer.join_channel(
		"ch1",
		ledger.clone(),
		Some(Arc::new(StubPolicyManager::new(
			"ch1",
			&["/Channel/Application/Endorsement"],
		))),
	);
	peer.set_application_config(
		"ch1",
		Some(Arc::new(StubApplicationConfig::new(&["Org1MSP"]))),
	);

	let registry = wired_registry(peer).await;
	let provider = registry.resolve().unwrap().create();

	let executor = provider.query_executor_for_channel("ch1").await.unwrap();
	assert_eq!(
		executor.get_state("lscc", "mycc").await.unwrap(),
		Some(b"1.0".to_vec())
	);
	executor.release();
	assert_eq!(ledger.opened(), 1);
	assert_eq!(ledger.released(), 1);

	let err = provider.query_executor_for_channel("ch2").await.unwrap_err();
	assert!(matches!(err, ProviderError::ChannelNotFound(ref c) if c == "ch2"));

	assert_eq!(provider.policy_manager("ch1").unwrap().channel_id(), "ch1");
	assert!(provider.application_config("ch1").is_some());
	assert!(provider.policy_manager("ch2").is_none());
	assert!(provider.application_config("ch2").is_none());
}

#[tokio::test]
async fn test_invocation_restrictions() {
	let registry = wired_registry(Arc::new(MemoryPeer::new())).await;
	let provider = registry.provider().unwrap();

	for name in ["cscc", "lscc", "qscc", "escc"] {
		assert!(provider.is_system_chaincode(name), "{name}");
	}
	assert!(!provider.is_system_chaincode_and_not_invokable_cc2cc("lscc"));
	assert!(!provider.is_system_chaincode_and_not_invokable_external("lscc"));
	assert!(provider.is_system_chaincode_and_not_invokable_cc2cc("qscc"));
	assert!(!provider.is_system_chaincode_and_not_invokable_external("qscc"));
	assert!(provider.is_system_chaincode_and_not_invokable_cc2cc("escc"));
	assert!(provider.is_system_chaincode_and_not_invokable_external("escc"));

	for name in ["mycc", "", "ESCC"] {
		assert!(!provider.is_system_chaincode(name));
		assert!(!provider.is_system_chaincode_and_not_invokable_cc2cc(name));
		assert!(!provider.is_system_chaincode_and_not_invokable_external(name));
	}
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests() {
	let peer = Arc::new(MemoryPeer::new());
	let ledger = Arc::new(StubLedger::new());
	peer.join_channel("ch1", ledger.clone(), None);
	let registry = Arc::new(wired_registry(peer).await);

	let tasks: Vec<_> = (0..32)
		.map(|i| {
			let registry = Arc::clone(&registry);
			tokio::spawn(async move {
				let provider = registry.provider().unwrap();
				let channel = if i % 2 == 0 { "ch1" } else { "ch2" };
				let result = provider.query_executor_for_channel(channel).await;
				(channel, result.is_ok())
			})
		})
		.collect();

	for task in tasks {
		let (channel, ok) = task.await.unwrap();
		assert_eq!(ok, channel == "ch1");
	}
	assert_eq!(ledger.opened(), 16);
	assert_eq!(ledger.released(), 16);
}
