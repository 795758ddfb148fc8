//! Settlement outputs and sponsor-supplied execution parameters.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::SweepMode;

/// Parameters observed by the sponsor's execution environment and passed
/// alongside the intent. The engine clamps the unit price by the intent's
/// declared cap before using it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionParams {
	/// Unit price the sponsor currently pays per cost unit.
	pub unit_price: U256,
}

/// Record emitted for every successful settlement.
///
/// Failed attempts emit nothing; they unwind without a trace beyond the
/// consumed nonce.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementRecord {
	/// Execution mode of the settled intent.
	pub mode: SweepMode,
	/// Account that was swept to zero.
	pub user: Address,
	/// Declared recipient.
	pub destination: Address,
	/// Declared target chain.
	pub destination_chain_id: u64,
	/// Amount moved to the destination or carried by the routed call.
	pub amount_routed: U256,
	/// Amount withheld for sponsor compensation.
	pub fee_reserve: U256,
	/// Deterministic reimbursement paid to the sponsor.
	pub reimbursement: U256,
	/// Reserve left over after reimbursement, also paid to the sponsor.
	pub unused_reserve: U256,
	/// Unit price actually applied (observed price clamped by the cap).
	pub effective_unit_price: U256,
	/// Cost units measured for the attempt, diagnostic.
	pub measured_cost_units: U256,
	/// Declared overhead margin.
	pub overhead_units: U256,
	/// Declared protocol fee margin.
	pub protocol_fee_units: U256,
	/// Declared fixed additive fee.
	pub extra_fee: U256,
	/// Declared reimbursement price ceiling.
	pub reimb_price_cap: U256,
	/// Nonce consumed by this settlement.
	pub nonce: u64,
}

impl SettlementRecord {
	/// Total amount the sponsor received: reimbursement plus the unused
	/// reserve. Always equals the fee reserve.
	pub fn sponsor_payout(&self) -> U256 {
		self.reimbursement + self.unused_reserve
	}
}
