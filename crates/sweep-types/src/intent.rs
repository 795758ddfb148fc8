//! The signed sweep authorization and its typed-data mirror.
//!
//! A `SweepIntent` describes exactly one settlement attempt: the user
//! authorizes moving their entire native balance out of the account, minus
//! a bounded fee reserve that compensates the executing sponsor. The intent
//! is signed offline over an EIP-712 digest anchored to the account being
//! swept, so a signature can never be replayed against a different account.

use alloy_primitives::{keccak256, Address, B256, U256};
use alloy_sol_types::sol;
use serde::{Deserialize, Serialize};

sol! {
	/// EIP-712 struct over which the user signs. Field order and type tags
	/// are part of the wire protocol and must not change.
	struct SweepAuthorization {
		uint8 mode;
		address user;
		address destination;
		uint256 destinationChainId;
		address callTarget;
		bytes32 routeCommitment;
		uint256 minReceive;
		uint256 maxFeeReserve;
		uint256 overheadUnits;
		uint256 protocolFeeUnits;
		uint256 extraFee;
		uint256 reimbPriceCap;
		uint256 deadline;
		uint256 nonce;
	}
}

/// Execution mode declared by the intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepMode {
	/// Direct transfer of the swept amount to `destination`.
	Transfer,
	/// Invocation of `call_target` carrying the swept amount, typically a
	/// bridge endpoint that moves the funds to another chain.
	RoutedCall,
}

impl SweepMode {
	/// Wire encoding used in the EIP-712 struct.
	pub fn as_u8(self) -> u8 {
		match self {
			SweepMode::Transfer => 0,
			SweepMode::RoutedCall => 1,
		}
	}
}

/// A signed, user-authorized description of exactly one sweep attempt.
///
/// Immutable once constructed; the engine consumes it at most once
/// (accepted with the nonce advancing, or rejected with no state change).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepIntent {
	/// Declared execution mode.
	pub mode: SweepMode,
	/// Owner of the account being swept. Must equal the account context
	/// the sponsor settles against.
	pub user: Address,
	/// Recipient of the swept amount. Binding for Transfer mode,
	/// informational (audit/UI) for RoutedCall.
	pub destination: Address,
	/// Target chain identifier. Informational for Transfer, binding for
	/// RoutedCall.
	pub destination_chain_id: u64,
	/// Routing endpoint invoked in RoutedCall mode. Must be `None` for
	/// Transfer.
	pub call_target: Option<Address>,
	/// keccak256 of the exact routing payload the intent authorizes.
	/// Transfer mode commits to the empty payload.
	pub route_commitment: B256,
	/// Floor on the amount routed. Enforced by the engine for Transfer;
	/// delegated to the routing endpoint for RoutedCall.
	pub min_receive: U256,
	/// Cap on the amount reserved for sponsor compensation.
	pub max_fee_reserve: U256,
	/// Cost-unit overhead margin the user authorizes on top of the
	/// measured execution cost.
	pub overhead_units: U256,
	/// Protocol fee margin in cost units.
	pub protocol_fee_units: U256,
	/// Fixed additive compensation.
	pub extra_fee: U256,
	/// Ceiling on the unit price used for reimbursement.
	pub reimb_price_cap: U256,
	/// Absolute expiry instant, unix seconds.
	pub deadline: u64,
	/// Must equal the account's current counter exactly.
	pub nonce: u64,
}

impl SweepIntent {
	/// Builds the EIP-712 struct this intent hashes to.
	pub fn authorization(&self) -> SweepAuthorization {
		SweepAuthorization {
			mode: self.mode.as_u8(),
			user: self.user,
			destination: self.destination,
			destinationChainId: U256::from(self.destination_chain_id),
			callTarget: self.call_target.unwrap_or(Address::ZERO),
			routeCommitment: self.route_commitment,
			minReceive: self.min_receive,
			maxFeeReserve: self.max_fee_reserve,
			overheadUnits: self.overhead_units,
			protocolFeeUnits: self.protocol_fee_units,
			extraFee: self.extra_fee,
			reimbPriceCap: self.reimb_price_cap,
			deadline: U256::from(self.deadline),
			nonce: U256::from(self.nonce),
		}
	}
}

/// Content hash binding an intent to one exact routing payload.
pub fn route_commitment(payload: &[u8]) -> B256 {
	keccak256(payload)
}

/// Commitment required in Transfer mode, where no payload is supplied.
pub fn empty_route_commitment() -> B256 {
	keccak256(b"")
}
