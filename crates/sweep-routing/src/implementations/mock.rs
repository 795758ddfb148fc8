//! Scriptable in-memory routing adapter for engine tests.

use crate::{RoutingAdapter, RoutingError};
use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use std::sync::Mutex;
use sweep_types::{ConfigSchema, Schema, ValidationError};

/// A routed call observed by the mock.
#[derive(Debug, Clone)]
pub struct RecordedCall {
	pub target: Address,
	pub payload: Vec<u8>,
	pub value: U256,
}

/// Routing adapter that records every call and can be scripted to fail.
#[derive(Default)]
pub struct MockRouter {
	calls: Mutex<Vec<RecordedCall>>,
	fail_with: Mutex<Option<Vec<u8>>>,
}

impl MockRouter {
	pub fn new() -> Self {
		Self::default()
	}

	/// Makes every subsequent call fail with the given endpoint payload.
	pub fn fail_with(&self, data: Vec<u8>) {
		*self.fail_with.lock().unwrap() = Some(data);
	}

	/// Calls observed so far.
	pub fn calls(&self) -> Vec<RecordedCall> {
		self.calls.lock().unwrap().clone()
	}
}

/// The mock accepts any configuration table.
struct MockRouterSchema;

impl ConfigSchema for MockRouterSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		Schema::new(vec![], vec![]).validate(config)
	}
}

#[async_trait]
impl RoutingAdapter for MockRouter {
	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(MockRouterSchema)
	}

	async fn execute(
		&self,
		target: Address,
		payload: &[u8],
		value: U256,
	) -> Result<(), RoutingError> {
		if let Some(data) = self.fail_with.lock().unwrap().clone() {
			return Err(RoutingError::Rejected(data));
		}
		self.calls.lock().unwrap().push(RecordedCall {
			target,
			payload: payload.to_vec(),
			value,
		});
		Ok(())
	}
}
