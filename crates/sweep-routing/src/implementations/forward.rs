//! Reference routing adapter that forwards swept value over a named lane.
//!
//! This adapter stands in for a real bridge integration: it performs the
//! payload sanity checks any endpoint would, then accepts the call. The
//! lane name only shows up in logs and configuration; the engine itself is
//! agnostic to it.

use crate::{RoutingAdapter, RoutingError};
use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use sweep_types::{ConfigSchema, Field, FieldType, Schema, ValidationError};
use tracing::info;

/// Default ceiling on accepted payload size.
const DEFAULT_MAX_PAYLOAD_BYTES: usize = 8 * 1024;

/// Routing adapter forwarding calls over a configured lane.
pub struct ForwardRouter {
	lane: String,
	max_payload_bytes: usize,
}

impl ForwardRouter {
	pub fn new(lane: String, max_payload_bytes: usize) -> Self {
		Self {
			lane,
			max_payload_bytes,
		}
	}
}

/// Configuration schema for [`ForwardRouter`].
pub struct ForwardRouterSchema;

impl ConfigSchema for ForwardRouterSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let schema = Schema::new(
			// Required fields
			vec![Field::new("lane", FieldType::String).with_validator(|value| {
				if value.as_str().unwrap().is_empty() {
					return Err("lane must not be empty".to_string());
				}
				Ok(())
			})],
			// Optional fields
			vec![Field::new(
				"max_payload_bytes",
				FieldType::Integer {
					min: Some(1),
					max: None,
				},
			)],
		);

		schema.validate(config)
	}
}

#[async_trait]
impl RoutingAdapter for ForwardRouter {
	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(ForwardRouterSchema)
	}

	async fn execute(
		&self,
		target: Address,
		payload: &[u8],
		value: U256,
	) -> Result<(), RoutingError> {
		if payload.is_empty() {
			return Err(RoutingError::Rejected(
				b"forward: empty routing payload".to_vec(),
			));
		}
		if payload.len() > self.max_payload_bytes {
			return Err(RoutingError::Rejected(
				format!(
					"forward: payload of {} bytes exceeds lane limit {}",
					payload.len(),
					self.max_payload_bytes
				)
				.into_bytes(),
			));
		}

		info!(
			lane = %self.lane,
			%target,
			%value,
			payload_len = payload.len(),
			"forwarding routed call"
		);
		Ok(())
	}
}

/// Factory function to create a forward router from configuration.
///
/// Required configuration parameters:
/// - `lane`: name of the forwarding lane
///
/// Optional:
/// - `max_payload_bytes`: payload size ceiling (defaults to 8 KiB)
pub fn create_router(config: &toml::Value) -> Box<dyn RoutingAdapter> {
	ForwardRouterSchema
		.validate(config)
		.expect("invalid forward router configuration");

	let lane = config
		.get("lane")
		.and_then(|v| v.as_str())
		.expect("lane is required")
		.to_string();

	let max_payload_bytes = config
		.get("max_payload_bytes")
		.and_then(|v| v.as_integer())
		.map(|n| n as usize)
		.unwrap_or(DEFAULT_MAX_PAYLOAD_BYTES);

	Box::new(ForwardRouter::new(lane, max_payload_bytes))
}
