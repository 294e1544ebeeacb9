//! Ledger and query executor contracts.
//!
//! A ledger belongs to exactly one channel and hands out query executors for
//! reading its state. Executors hold ledger resources until they are released,
//! which is why the provider layer hands them out wrapped in a
//! [`ScopedQueryExecutor`].

use async_trait::async_trait;
use std::fmt;
use std::ops::Deref;
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
	/// Error that occurs when the ledger has been closed.
	#[error("Ledger closed")]
	Closed,
	/// Error that occurs in the ledger backend.
	#[error("Backend error: {0}")]
	Backend(String),
}

/// Read handle over a single channel's ledger state.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
	/// Retrieves the value stored under `key` in `namespace`.
	///
	/// Returns `Ok(None)` when the key is absent.
	async fn get_state(&self, namespace: &str, key: &str) -> Result<Option<Vec<u8>>, LedgerError>;

	/// Releases the resources held by this executor.
	///
	/// Called exactly once by [`ScopedQueryExecutor`] when it goes out of scope.
	fn done(&mut self);
}

/// A channel ledger as exposed by the hosting peer.
#[async_trait]
pub trait Ledger: Send + Sync {
	/// Opens a new query executor over the current ledger state.
	async fn new_query_executor(&self) -> Result<Box<dyn QueryExecutor>, LedgerError>;
}

/// Owning guard over a query executor.
///
/// Dereferences to the wrapped executor and calls [`QueryExecutor::done`]
/// when dropped, so an acquired executor is always released.
pub struct ScopedQueryExecutor {
	inner: Box<dyn QueryExecutor>,
	released: bool,
}

impl ScopedQueryExecutor {
	/// Wraps an executor that has just been opened.
	pub fn new(executor: Box<dyn QueryExecutor>) -> Self {
		Self {
			inner: executor,
			released: false,
		}
	}

	/// Releases the executor before the end of the enclosing scope.
	pub fn release(mut self) {
		self.finish();
	}

	fn finish(&mut self) {
		if !self.released {
			self.released = true;
			self.inner.done();
		}
	}
}

impl Deref for ScopedQueryExecutor {
	type Target = dyn QueryExecutor;

	fn deref(&self) -> &Self::Target {
		self.inner.as_ref()
	}
}

impl Drop for ScopedQueryExecutor {
	fn drop(&mut self) {
		self.finish();
	}
}

impl fmt::Debug for ScopedQueryExecutor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ScopedQueryExecutor")
			.field("released", &self.released)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::atomic::{AtomicUsize, Ordering};
	use std::sync::Arc;

	struct CountingExecutor {
		released: Arc<AtomicUsize>,
	}

	#[async_trait]
	impl QueryExecutor for CountingExecutor {
		async fn get_state(
			&self,
			namespace: &str,
			key: &str,
		) -> Result<Option<Vec<u8>>, LedgerError> {
			Ok(Some(format!("{}/{}", namespace, key).into_bytes()))
		}

		fn done(&mut self) {
			self.released.fetch_add(1, Ordering::SeqCst);
		}
	}

	fn scoped(released: &Arc<AtomicUsize>) -> ScopedQueryExecutor {
		ScopedQueryExecutor::new(Box::new(CountingExecutor {
			released: Arc::clone(released),
		}))
	}

	#[tokio::test]
	async fn test_reads_through_guard() {
		let released = Arc::new(AtomicUsize::new(0));
		let executor = scoped(&released);

		let value = executor.get_state("lscc", "mycc").await.unwrap();
		assert_eq!(value, Some(b"lscc/mycc".to_vec()));
		assert_eq!(released.load(Ordering::SeqCst), 0);
	}

	#[test]
	fn test_drop_releases_once() {
		let released = Arc::new(AtomicUsize::new(0));
		{
			let _executor = scoped(&released);
		}
		assert_eq!(released.load(Ordering::SeqCst), 1);
	}

	#[test]
	fn test_explicit_release_is_not_repeated_on_drop() {
		let released = Arc::new(AtomicUsize::new(0));
		let executor = scoped(&released);

		executor.release();
		assert_eq!(released.load(Ordering::SeqCst), 1);
	}
}
