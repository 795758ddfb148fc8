//! Routing endpoint abstraction for the sweep engine.
//!
//! In RoutedCall mode the engine hands the swept amount to an external
//! endpoint (typically a bridge) together with an opaque payload the user
//! committed to. Concrete endpoint integrations implement
//! [`RoutingAdapter`]; the engine only ever talks to the
//! [`RoutingService`] registry, so integrations stay pluggable and
//! independently testable.

use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use sweep_types::ConfigSchema;
use thiserror::Error;
use tracing::debug;

/// Re-export implementations
pub mod implementations {
	pub mod forward;
	pub mod mock;
}

/// Errors surfaced by routing endpoints.
#[derive(Debug, Error)]
pub enum RoutingError {
	/// No adapter is registered for the requested target.
	#[error("no routing adapter registered for target {0}")]
	NoAdapter(Address),
	/// The endpoint rejected the call; carries its failure payload.
	#[error("routing endpoint rejected the call")]
	Rejected(Vec<u8>),
}

impl RoutingError {
	/// Failure payload to surface through the engine's `CallFailed` error.
	pub fn into_failure_data(self) -> Vec<u8> {
		match self {
			RoutingError::NoAdapter(target) => {
				format!("no adapter for {target}").into_bytes()
			}
			RoutingError::Rejected(data) => data,
		}
	}
}

/// Trait implemented by concrete routing endpoint integrations.
#[async_trait]
pub trait RoutingAdapter: Send + Sync {
	/// Returns the configuration schema for this adapter.
	fn config_schema(&self) -> Box<dyn ConfigSchema>;

	/// Executes a routed call against `target`, carrying `value` and the
	/// exact payload the intent committed to.
	///
	/// The adapter must either move the full value toward the committed
	/// destination (honouring any floor the payload encodes) or reject the
	/// call; there is no partial success.
	async fn execute(&self, target: Address, payload: &[u8], value: U256)
		-> Result<(), RoutingError>;
}

/// Registry dispatching routed calls to the adapter responsible for each
/// target endpoint. Built once at startup; read-only afterwards.
pub struct RoutingService {
	adapters: HashMap<Address, Arc<dyn RoutingAdapter>>,
}

impl RoutingService {
	pub fn new(adapters: HashMap<Address, Arc<dyn RoutingAdapter>>) -> Self {
		Self { adapters }
	}

	/// Returns whether any adapter serves the given target.
	pub fn serves(&self, target: Address) -> bool {
		self.adapters.contains_key(&target)
	}

	/// Dispatches a routed call to the adapter registered for `target`.
	pub async fn execute(
		&self,
		target: Address,
		payload: &[u8],
		value: U256,
	) -> Result<(), RoutingError> {
		let adapter = self
			.adapters
			.get(&target)
			.ok_or(RoutingError::NoAdapter(target))?;

		debug!(
			%target,
			payload_len = payload.len(),
			%value,
			"dispatching routed call"
		);
		adapter.execute(target, payload, value).await
	}
}
