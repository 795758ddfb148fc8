//! Configuration types for the sweep engine.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Complete engine configuration, resolved once at startup. There is no
/// runtime mutation path; rotating sponsors or bounds means restarting the
/// engine with a new file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SweepConfig {
	/// Engine identity used in the signing domain.
	pub engine: EngineSettings,
	/// Allowlisted sponsor identities, 1 to 3 entries.
	pub sponsors: Vec<Address>,
	/// Bounds every intent must satisfy.
	pub bounds: IntentBounds,
	/// Deterministic cost-unit charges.
	#[serde(default)]
	pub costs: CostSchedule,
	/// Routing adapter configurations, keyed by adapter name.
	#[serde(default)]
	pub routing: RoutingConfig,
}

/// Signing-domain identity of the engine deployment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineSettings {
	/// Fixed protocol name in the EIP-712 domain.
	pub domain_name: String,
	/// Fixed protocol version in the EIP-712 domain.
	pub domain_version: String,
	/// Execution context (chain) identifier.
	pub chain_id: u64,
}

/// Static bounds on declared intent parameters.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IntentBounds {
	/// Minimum accepted overhead margin, in cost units.
	pub min_overhead: u64,
	/// Maximum accepted overhead margin, in cost units.
	pub max_overhead: u64,
	/// Maximum accepted protocol fee margin, in cost units.
	pub max_protocol_fee_units: u64,
	/// Maximum accepted fixed additive fee, in native units.
	pub max_extra_fee: u64,
	/// Maximum accepted reimbursement unit-price cap.
	pub max_reimb_price_cap: u64,
}

/// Deterministic cost-unit charges applied by the engine's meter.
///
/// Defaults mirror familiar transaction costing so that settlements reason
/// about cost in recognizable magnitudes.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CostSchedule {
	/// Flat charge for starting an attempt.
	#[serde(default = "default_base_attempt")]
	pub base_attempt: u64,
	/// Charge for digest construction and signature recovery.
	#[serde(default = "default_signature")]
	pub signature: u64,
	/// Charge per byte of routing payload.
	#[serde(default = "default_payload_byte")]
	pub payload_byte: u64,
	/// Charge for the direct transfer arm.
	#[serde(default = "default_transfer")]
	pub transfer: u64,
	/// Charge for invoking a routing endpoint, on top of payload bytes.
	#[serde(default = "default_routed_call")]
	pub routed_call: u64,
}

fn default_base_attempt() -> u64 {
	21_000
}

fn default_signature() -> u64 {
	3_000
}

fn default_payload_byte() -> u64 {
	16
}

fn default_transfer() -> u64 {
	9_000
}

fn default_routed_call() -> u64 {
	2_600
}

impl Default for CostSchedule {
	fn default() -> Self {
		Self {
			base_attempt: default_base_attempt(),
			signature: default_signature(),
			payload_byte: default_payload_byte(),
			transfer: default_transfer(),
			routed_call: default_routed_call(),
		}
	}
}

/// Routing adapter configuration tables, passed to adapter factories.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RoutingConfig {
	/// Adapter name to its TOML configuration table.
	#[serde(default)]
	pub adapters: HashMap<String, toml::Value>,
}
